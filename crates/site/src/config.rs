//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_BASE_URL` - Public URL; an `https://` URL enables secure cookies
//!   (default: `http://localhost:3000`)
//! - `SPACEWAY_API_URL` - Auth backend base URL (default: `http://localhost:5000/api`)
//! - `SPACEWAY_API_TIMEOUT_SECS` - Backend request timeout (default: 10)
//! - `SESSION_VALIDATION_TTL_SECS` - How long a validated token is trusted
//!   before `/auth/me` is called again; 0 checks on every request (default: 0)
//! - `CALC_COMPETITOR_FACTOR` - Pricing: multiplier on competitor price (default: 0.95)
//! - `CALC_PRICE_CEILING_FACTOR` - Pricing: cap relative to current price (default: 1.10)
//! - `CALC_VOLUME_UPLIFT` - Pricing: volume multiplier at the new price (default: 1.20)
//! - `CALC_SEASONAL_AMPLITUDE` - Turnover: seasonal swing (default: 0.2)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use spaceway_core::{PricingAssumptions, Seasonality};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Auth backend client configuration
    pub api: ApiConfig,
    /// How long a successful `/auth/me` result is reused
    pub session_validation_ttl: Duration,
    /// Calculator heuristics
    pub calculator: CalculatorConfig,
    /// Error tracking
    pub sentry: SentryConfig,
}

/// Auth backend client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

/// Calculator heuristics, overridable per deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorConfig {
    pub pricing: PricingAssumptions,
    pub seasonality: Seasonality,
}

/// Sentry configuration.
///
/// Implements `Debug` manually to redact the DSN.
#[derive(Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<SecretString>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .field("traces_sample_rate", &self.traces_sample_rate)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("SITE_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("SITE_PORT", "3000")?;
        let base_url = get_env_or_default("SITE_BASE_URL", "http://localhost:3000");

        let api = ApiConfig::from_env()?;
        let session_validation_ttl =
            Duration::from_secs(parse_env_or_default("SESSION_VALIDATION_TTL_SECS", "0")?);
        let calculator = CalculatorConfig::from_env()?;
        let sentry = SentryConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            api,
            session_validation_ttl,
            calculator,
            sentry,
        })
    }

    /// Configuration for local development and tests, pointed at `api_url`.
    #[must_use]
    pub fn local(api_url: Url) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            api: ApiConfig {
                base_url: api_url,
                timeout: Duration::from_secs(10),
            },
            session_validation_ttl: Duration::ZERO,
            calculator: CalculatorConfig::default(),
            sentry: SentryConfig::default(),
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("SPACEWAY_API_URL", "http://localhost:5000/api");
        let base_url = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("SPACEWAY_API_URL".to_string(), e.to_string())
        })?;
        let timeout = Duration::from_secs(parse_env_or_default("SPACEWAY_API_TIMEOUT_SECS", "10")?);

        Ok(Self { base_url, timeout })
    }
}

impl CalculatorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            pricing: PricingAssumptions {
                competitor_factor: parse_factor(
                    "CALC_COMPETITOR_FACTOR",
                    defaults.pricing.competitor_factor,
                )?,
                price_ceiling_factor: parse_factor(
                    "CALC_PRICE_CEILING_FACTOR",
                    defaults.pricing.price_ceiling_factor,
                )?,
                volume_uplift: parse_factor("CALC_VOLUME_UPLIFT", defaults.pricing.volume_uplift)?,
            },
            seasonality: Seasonality {
                amplitude: parse_factor(
                    "CALC_SEASONAL_AMPLITUDE",
                    defaults.seasonality.amplitude,
                )?,
                ..defaults.seasonality
            },
        })
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN").map(SecretString::from),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a calculator factor, which must be a finite number greater than zero.
fn parse_factor(key: &str, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let value: f64 = parse_value(key, &raw)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be a number greater than 0".to_string(),
        ));
    }
    Ok(value)
}
