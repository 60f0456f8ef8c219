//! Services a seller can sign up for.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A service selected on the registration form.
///
/// Serialized as the kebab-case identifier the backend expects
/// (e.g. `pricing-automation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceTag {
    ProductListing,
    PricingAutomation,
    CompetitorTracking,
    TurnoverAnalytics,
    InventorySync,
    OfferCalculator,
    Latching,
    GstServices,
}

/// Error returned when a service identifier is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown service: {0}")]
pub struct UnknownServiceTag(pub String);

impl ServiceTag {
    /// Every service, in the order shown on the registration form.
    pub const ALL: [Self; 8] = [
        Self::ProductListing,
        Self::PricingAutomation,
        Self::CompetitorTracking,
        Self::TurnoverAnalytics,
        Self::InventorySync,
        Self::OfferCalculator,
        Self::Latching,
        Self::GstServices,
    ];

    /// Wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProductListing => "product-listing",
            Self::PricingAutomation => "pricing-automation",
            Self::CompetitorTracking => "competitor-tracking",
            Self::TurnoverAnalytics => "turnover-analytics",
            Self::InventorySync => "inventory-sync",
            Self::OfferCalculator => "offer-calculator",
            Self::Latching => "latching",
            Self::GstServices => "gst-services",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProductListing => "Product Listing Management",
            Self::PricingAutomation => "Pricing Automation",
            Self::CompetitorTracking => "Competitor Tracking",
            Self::TurnoverAnalytics => "Turnover Analytics",
            Self::InventorySync => "Inventory Management",
            Self::OfferCalculator => "Offer Calculator",
            Self::Latching => "Latching",
            Self::GstServices => "GST Services",
        }
    }

    /// One-line description for the registration form.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ProductListing => "Centralize SKU listings across platforms",
            Self::PricingAutomation => "MRP-based repricing rules",
            Self::CompetitorTracking => "Real-time price monitoring on Amazon/Flipkart",
            Self::TurnoverAnalytics => "Profitability forecasting and reports",
            Self::InventorySync => "Stock tracking and alerts",
            Self::OfferCalculator => "Dynamic discount simulations",
            Self::Latching => "Seamless catalog latching and listing approvals",
            Self::GstServices => "GST filing assistance and compliance support",
        }
    }
}

impl fmt::Display for ServiceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceTag {
    type Err = UnknownServiceTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownServiceTag(s.to_string()))
    }
}
