//! Spaceway Core - Shared types and calculators.
//!
//! This crate provides the pieces of the Spaceway site that carry no I/O:
//! - `site` - Public marketing site and dashboard shell
//! - `cli` - Command-line access to the calculators
//!
//! # Architecture
//!
//! The core crate contains only types, validation and pure arithmetic - no
//! HTTP clients, no sessions, no templates. This keeps it lightweight and
//! allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for emails, contact numbers, service tags and themes
//! - [`calculator`] - Pricing projection and business-metrics turnover calculators
//! - [`report`] - CSV export of a business-metrics projection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod calculator;
pub mod report;
pub mod types;

pub use calculator::{
    BusinessInput, BusinessMetrics, CalculatorError, PricingAssumptions, PricingInput,
    PricingProjection, Seasonality,
};
pub use types::*;
