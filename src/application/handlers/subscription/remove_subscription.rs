//! RemoveSubscriptionHandler - Command handler for deleting the registration.

use std::sync::Arc;

use crate::ports::{BillingPlatform, PlatformError, TenantHeader};

/// Handler that removes the push notification registration.
///
/// Idempotent: removing a registration that does not exist is not an error.
pub struct RemoveSubscriptionHandler {
    platform: Arc<dyn BillingPlatform>,
    header: Arc<TenantHeader>,
}

impl RemoveSubscriptionHandler {
    pub fn new(platform: Arc<dyn BillingPlatform>, header: Arc<TenantHeader>) -> Self {
        Self { platform, header }
    }

    pub async fn handle(&self) -> Result<(), PlatformError> {
        self.platform.delete_push_notification(&self.header).await?;
        tracing::info!("Push notification callback removed");
        Ok(())
    }
}
