//! GetSubscriptionHandler - Query handler for the platform's registration.

use std::sync::Arc;

use crate::domain::subscription::PushNotificationView;
use crate::ports::{BillingPlatform, PlatformError, TenantHeader};

/// Handler that reports the platform's current push notification state.
pub struct GetSubscriptionHandler {
    platform: Arc<dyn BillingPlatform>,
    header: Arc<TenantHeader>,
}

impl GetSubscriptionHandler {
    pub fn new(platform: Arc<dyn BillingPlatform>, header: Arc<TenantHeader>) -> Self {
        Self { platform, header }
    }

    /// Returns the platform's answer verbatim.
    pub async fn handle(&self) -> Result<PushNotificationView, PlatformError> {
        self.platform.retrieve_push_notifications(&self.header).await
    }
}
