//! Orders configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VELOCART_ORDERS_COLLECTION` - Document collection holding orders
//!   (default: orders)
//! - `VELOCART_DATETIME_FORMAT` - strftime pattern for displayed timestamps
//!   (default: `%Y-%m-%d %H:%M`)
//! - `VELOCART_COURIER_PHOTO_PLACEHOLDER` - Image path shown when a courier
//!   record has no photo (default: /placeholder-avatar.png)

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Order aggregation configuration.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Collection name the root order documents live in
    pub orders_collection: String,
    /// strftime pattern applied to displayed timestamps
    pub datetime_format: String,
    /// Placeholder image for couriers without a photo
    pub courier_photo_placeholder: String,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            orders_collection: "orders".to_string(),
            datetime_format: "%Y-%m-%d %H:%M".to_string(),
            courier_photo_placeholder: "/placeholder-avatar.png".to_string(),
        }
    }
}

impl OrdersConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the date-time pattern does not parse as a
    /// strftime format string.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let orders_collection = get_env_or_default("VELOCART_ORDERS_COLLECTION", "orders");
        let datetime_format = get_env_or_default("VELOCART_DATETIME_FORMAT", "%Y-%m-%d %H:%M");
        validate_datetime_format(&datetime_format, "VELOCART_DATETIME_FORMAT")?;
        let courier_photo_placeholder = get_env_or_default(
            "VELOCART_COURIER_PHOTO_PLACEHOLDER",
            "/placeholder-avatar.png",
        );

        Ok(Self {
            orders_collection,
            datetime_format,
            courier_photo_placeholder,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a strftime pattern parses cleanly.
///
/// A bad pattern would otherwise surface much later, on the first formatted
/// timestamp, as garbled output.
fn validate_datetime_format(pattern: &str, var_name: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("not a valid strftime pattern: {pattern}"),
        ));
    }
    Ok(())
}
