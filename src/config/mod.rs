//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `KB_GATEWAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use kb_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Default callback: {}", config.server.default_callback_url());
//! ```

mod error;
mod killbill;
mod server;

pub use error::{ConfigError, ValidationError};
pub use killbill::KillBillConfig;
pub use server::{Environment, ServerConfig, DEFAULT_CALLBACK_PATH};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// The loaded value is immutable and passed explicitly into the components
/// that need it.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (protocol, host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Billing platform configuration (Kill Bill)
    pub killbill: KillBillConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `KB_GATEWAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `KB_GATEWAY__SERVER__PORT=5000` -> `server.port = 5000`
    /// - `KB_GATEWAY__KILLBILL__API_URL=...` -> `killbill.api_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("KB_GATEWAY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.killbill.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
