//! Billing platform port for push notification management.
//!
//! Defines the contract for the external billing system (Kill Bill) that
//! owns the push notification registration. Implementations perform the
//! remote calls; the gateway never caches their results.
//!
//! # Design
//!
//! - **Tenant scoped**: every call receives the [`TenantHeader`]
//! - **Pass-through**: errors are reported, never retried here
//! - **Source of truth**: retrieve results are returned verbatim

use std::fmt;

use async_trait::async_trait;
use axum::http::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::subscription::{CallbackUrl, PushNotificationView};

/// Port for billing platform push notification operations.
#[async_trait]
pub trait BillingPlatform: Send + Sync {
    /// Register `callback_url` as the tenant's push notification callback.
    async fn create_push_notification(
        &self,
        header: &TenantHeader,
        callback_url: &CallbackUrl,
    ) -> Result<(), PlatformError>;

    /// Fetch the tenant's current push notification registration.
    async fn retrieve_push_notifications(
        &self,
        header: &TenantHeader,
    ) -> Result<PushNotificationView, PlatformError>;

    /// Remove the tenant's push notification registration.
    ///
    /// Succeeds whether or not a registration existed.
    async fn delete_push_notification(&self, header: &TenantHeader) -> Result<(), PlatformError>;
}

/// Tenant and audit context attached to every platform call.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct TenantHeader {
    api_key: String,
    api_secret: SecretString,
    created_by: String,
    reason: Option<String>,
    comment: Option<String>,
}

impl TenantHeader {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::new(api_secret.into()),
            created_by: created_by.into(),
            reason: None,
            comment: None,
        }
    }

    /// Audit reason recorded by the platform on write calls.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Audit comment recorded by the platform on write calls.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Errors from billing platform operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformError {
    /// Error code for categorization.
    pub code: PlatformErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status returned by the platform, if a response was received.
    pub upstream_status: Option<u16>,
}

impl PlatformError {
    /// Create a new platform error.
    pub fn new(code: PlatformErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            upstream_status: None,
        }
    }

    /// Attach the platform's HTTP status.
    pub fn with_upstream_status(mut self, status: u16) -> Self {
        self.upstream_status = Some(status);
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorCode::Timeout, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorCode::AuthenticationError, message)
    }

    /// Create a provider (non-2xx) error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorCode::ProviderError, message)
    }

    /// Create an unparseable response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorCode::InvalidResponse, message)
    }

    /// HTTP status the gateway answers with when this error surfaces.
    pub fn status_code(&self) -> StatusCode {
        match self.code {
            PlatformErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PlatformError {}

/// Platform error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Request exceeded the configured timeout.
    Timeout,

    /// Credentials or tenant keys rejected (401/403).
    AuthenticationError,

    /// Platform answered with a non-success status.
    ProviderError,

    /// Platform answered with a body that could not be parsed.
    InvalidResponse,
}

impl fmt::Display for PlatformErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlatformErrorCode::NetworkError => "network_error",
            PlatformErrorCode::Timeout => "timeout",
            PlatformErrorCode::AuthenticationError => "authentication_error",
            PlatformErrorCode::ProviderError => "provider_error",
            PlatformErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}
