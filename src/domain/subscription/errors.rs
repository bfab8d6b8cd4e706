//! Subscription management error types.

use axum::http::StatusCode;
use thiserror::Error;

use super::PushNotificationView;
use crate::ports::PlatformError;

/// Errors from ensuring, inspecting or removing the push notification
/// subscription.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// Registration was sent but the follow-up retrieve did not list the
    /// callback. Carries the platform's answer for diagnosis.
    #[error("Callback {callback_url} not confirmed by billing platform")]
    VerificationFailed {
        callback_url: String,
        view: PushNotificationView,
    },

    /// Requested callback is not an absolute http(s) URL.
    #[error("Invalid callback URL: {0}")]
    InvalidCallback(String),

    /// Transport, auth or protocol failure talking to the platform.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl SubscriptionError {
    /// Maps the error to the HTTP status returned by the config endpoint.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::VerificationFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SubscriptionError::InvalidCallback(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::Platform(err) => err.status_code(),
        }
    }
}
