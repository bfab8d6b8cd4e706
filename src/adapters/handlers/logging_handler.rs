//! Acknowledging handler that records the event in the log.

use async_trait::async_trait;

use crate::domain::billing_event::DeliveryContext;
use crate::ports::{BillingEventHandler, HandlerError};

/// Default binding for every known event type until the owning application
/// plugs in its own handler.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventHandler;

impl LoggingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BillingEventHandler for LoggingEventHandler {
    fn name(&self) -> &str {
        "log_event"
    }

    async fn handle(&self, ctx: &DeliveryContext) -> Result<(), HandlerError> {
        let event = ctx.event();
        tracing::info!(
            delivery_id = %ctx.delivery_id(),
            event_type = %event.event_type(),
            object_type = event.object_type(),
            object_id = event.object_id(),
            account_id = event.account_id(),
            tenant_id = event.tenant_id(),
            received_at = %ctx.received_at(),
            "Billing event acknowledged"
        );
        Ok(())
    }
}
