//! Runner configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

use rebate_core::validation::{parse_decimal, validate_identifier, validate_volume};
use rebate_core::CalculateRebateRequest;

/// How the outcome is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `Rebate Result: ...` / `Rebate Amount: ...` lines
    Text,
    /// One JSON object per run
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("REBATE_OUTPUT".to_string())),
        }
    }
}

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// SQLite database file
    pub database_path: String,

    /// Rebate to apply
    pub rebate_identifier: String,

    /// Product the rebate is applied to
    pub product_identifier: String,

    /// Quantity purchased
    pub volume: Decimal,

    /// tracing env-filter directive
    pub log_filter: String,

    pub output: OutputFormat,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let config = RunnerConfig {
            database_path: var("REBATE_DB_PATH", "./rebate_dev.db"),

            rebate_identifier: var("REBATE_IDENTIFIER", "Test_Rebate_Identifier"),

            product_identifier: var("PRODUCT_IDENTIFIER", "Test_Product_Identifier"),

            volume: parse_decimal("volume", &var("REBATE_VOLUME", "100"))
                .map_err(|_| ConfigError::InvalidValue("REBATE_VOLUME".to_string()))?,

            log_filter: var("REBATE_LOG", "info"),

            output: var("REBATE_OUTPUT", "text").parse()?,
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("REBATE_DB_PATH".to_string()));
        }

        validate_identifier("rebate identifier", &config.rebate_identifier)
            .map_err(|_| ConfigError::InvalidValue("REBATE_IDENTIFIER".to_string()))?;
        validate_identifier("product identifier", &config.product_identifier)
            .map_err(|_| ConfigError::InvalidValue("PRODUCT_IDENTIFIER".to_string()))?;
        validate_volume(config.volume)
            .map_err(|_| ConfigError::InvalidValue("REBATE_VOLUME".to_string()))?;

        Ok(config)
    }

    /// The calculation this configuration asks for.
    pub fn request(&self) -> CalculateRebateRequest {
        CalculateRebateRequest::new(
            self.rebate_identifier.as_str(),
            self.product_identifier.as_str(),
            self.volume,
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
