//! Event handler port.
//!
//! A handler is the unit of domain logic bound to one event type. What it
//! does with the event is up to the owning application.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::billing_event::DeliveryContext;

/// Handler for one billing event delivery.
///
/// Implementations should be stateless with respect to individual
/// deliveries; the same instance is shared by concurrent requests.
#[async_trait]
pub trait BillingEventHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Process the delivery.
    async fn handle(&self, ctx: &DeliveryContext) -> Result<(), HandlerError>;
}

/// Failure raised while a bound handler processed an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler reported a failure.
    #[error("Handler '{handler}' failed: {reason}")]
    Failed { handler: String, reason: String },

    /// The handler panicked; the panic was contained by the dispatcher.
    #[error("Handler '{handler}' panicked: {reason}")]
    Panicked { handler: String, reason: String },
}

impl HandlerError {
    pub fn failed(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        HandlerError::Failed {
            handler: handler.into(),
            reason: reason.into(),
        }
    }

    pub fn panicked(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        HandlerError::Panicked {
            handler: handler.into(),
            reason: reason.into(),
        }
    }
}
