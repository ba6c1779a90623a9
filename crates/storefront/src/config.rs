//! Display configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_CURRENCY` - ISO 4217 display currency (default: USD)
//! - `STOREFRONT_BADGE_CAP` - Cart badge display cap (default: 99)

use pawmart_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_BADGE_CAP: i64 = 99;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront display configuration.
///
/// These settings shape how the engine's outputs are rendered (price strings,
/// the header badge cap); they never influence cart or selection semantics.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Display currency for formatted prices.
    pub currency: CurrencyCode,
    /// Totals above this render as "{cap}+" in the header badge.
    pub badge_cap: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            badge_cap: DEFAULT_BADGE_CAP,
        }
    }
}

impl DisplayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let currency = match get_optional_env("STOREFRONT_CURRENCY") {
            Some(raw) => CurrencyCode::parse(&raw).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "STOREFRONT_CURRENCY".to_string(),
                    format!("unsupported currency code {raw:?}"),
                )
            })?,
            None => CurrencyCode::default(),
        };

        let badge_cap = match get_optional_env("STOREFRONT_BADGE_CAP") {
            Some(raw) => {
                let cap = raw.parse::<i64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("STOREFRONT_BADGE_CAP".to_string(), e.to_string())
                })?;
                if cap < 1 {
                    return Err(ConfigError::InvalidEnvVar(
                        "STOREFRONT_BADGE_CAP".to_string(),
                        format!("must be positive (got {cap})"),
                    ));
                }
                cap
            }
            None => DEFAULT_BADGE_CAP,
        };

        Ok(Self {
            currency,
            badge_cap,
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
