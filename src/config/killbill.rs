//! Billing platform configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::ports::TenantHeader;

/// Kill Bill connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KillBillConfig {
    /// Base URL of the Kill Bill server (e.g. `http://127.0.0.1:8080`)
    #[serde(default)]
    pub api_url: String,

    /// Basic auth username
    #[serde(default)]
    pub username: String,

    /// Basic auth password
    #[serde(default)]
    pub password: String,

    /// Tenant API key
    #[serde(default)]
    pub api_key: String,

    /// Tenant API secret
    #[serde(default)]
    pub api_secret: String,

    /// Tenant display name (informational, used in logs)
    pub tenant: Option<String>,

    /// Value sent as `X-Killbill-CreatedBy`; defaults to the username
    pub created_by: Option<String>,

    /// Request timeout in seconds for every platform call
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl KillBillConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the tenant context attached to every platform call.
    pub fn tenant_header(&self) -> TenantHeader {
        let created_by = self
            .created_by
            .clone()
            .unwrap_or_else(|| self.username.clone());
        TenantHeader::new(&self.api_key, &self.api_secret, created_by)
    }

    /// Validate billing platform configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_url.is_empty() {
            return Err(ValidationError::MissingRequired("KILLBILL__API_URL"));
        }
        if self.username.is_empty() {
            return Err(ValidationError::MissingRequired("KILLBILL__USERNAME"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingRequired("KILLBILL__PASSWORD"));
        }
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("KILLBILL__API_KEY"));
        }
        if self.api_secret.is_empty() {
            return Err(ValidationError::MissingRequired("KILLBILL__API_SECRET"));
        }

        let url = url::Url::parse(&self.api_url).map_err(|_| ValidationError::InvalidApiUrl)?;
        match url.scheme() {
            "https" => {}
            "http" if *environment != Environment::Production => {}
            "http" => return Err(ValidationError::ApiUrlMustBeHttps),
            _ => return Err(ValidationError::InvalidApiUrl),
        }

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for KillBillConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            username: String::new(),
            password: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            tenant: None,
            created_by: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
