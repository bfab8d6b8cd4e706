//! EnsureSubscriptionHandler - Registers the gateway callback and verifies it.

use std::sync::Arc;

use crate::domain::subscription::{CallbackUrl, SubscriptionError};
use crate::ports::{BillingPlatform, TenantHeader};

/// Command to create or refresh the push notification subscription.
#[derive(Debug, Clone, Default)]
pub struct EnsureSubscriptionCommand {
    /// Explicit callback URL; the configured default is used when absent.
    pub callback_url: Option<String>,
}

/// Result of a confirmed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureSubscriptionResult {
    /// The callback the platform now lists.
    pub callback_url: CallbackUrl,
}

/// Handler that keeps the platform's callback registration pointed at the
/// gateway.
///
/// Registration is followed by a retrieve; success is reported only when the
/// platform lists the exact callback string. A registration that cannot be
/// confirmed is surfaced as [`SubscriptionError::VerificationFailed`] and is
/// not retried.
pub struct EnsureSubscriptionHandler {
    platform: Arc<dyn BillingPlatform>,
    header: Arc<TenantHeader>,
    default_callback_url: String,
}

impl EnsureSubscriptionHandler {
    pub fn new(
        platform: Arc<dyn BillingPlatform>,
        header: Arc<TenantHeader>,
        default_callback_url: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            header,
            default_callback_url: default_callback_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: EnsureSubscriptionCommand,
    ) -> Result<EnsureSubscriptionResult, SubscriptionError> {
        // 1. Resolve callback
        let callback_url = CallbackUrl::parse(
            cmd.callback_url
                .unwrap_or_else(|| self.default_callback_url.clone()),
        )?;

        // 2. Register
        self.platform
            .create_push_notification(&self.header, &callback_url)
            .await?;

        // 3. Verify against the platform's own state
        let view = self
            .platform
            .retrieve_push_notifications(&self.header)
            .await?;

        if view.contains(callback_url.as_str()) {
            tracing::info!(callback_url = %callback_url, "Push notification callback registered");
            Ok(EnsureSubscriptionResult { callback_url })
        } else {
            tracing::warn!(
                callback_url = %callback_url,
                registered = ?view.values(),
                "Push notification callback not confirmed by billing platform"
            );
            Err(SubscriptionError::VerificationFailed {
                callback_url: callback_url.to_string(),
                view,
            })
        }
    }
}
