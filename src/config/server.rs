//! Server configuration

use std::net::Ipv6Addr;

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::subscription::CallbackUrl;

/// Listener path the billing platform calls back on when no explicit
/// callback URL is requested.
pub const DEFAULT_CALLBACK_PATH: &str = "/listeners/kb_callback";

/// Server configuration
///
/// `protocol`, `host` and `port` double as the gateway's externally
/// reachable address when deriving the default callback URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Scheme the gateway is reachable on (`http` or `https`)
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Host address to bind to and advertise
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Host/port pair to bind the listener to
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// Callback URL registered with the billing platform when the caller
    /// does not supply one. IPv6 literals are bracketed.
    pub fn default_callback_url(&self) -> String {
        let host = if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!(
            "{}://{}:{}{}",
            self.protocol, host, self.port, DEFAULT_CALLBACK_PATH
        )
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.protocol != "http" && self.protocol != "https" {
            return Err(ValidationError::InvalidProtocol(self.protocol.clone()));
        }
        if self.host.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SERVER__HOST"));
        }
        let callback_url = self.default_callback_url();
        if CallbackUrl::parse(callback_url.as_str()).is_err() {
            return Err(ValidationError::InvalidCallbackUrl(callback_url));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            protocol: default_protocol(),
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,kb_gateway=debug".to_string()
}
