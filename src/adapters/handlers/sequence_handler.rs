//! Runs several handlers in order as one binding.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::billing_event::DeliveryContext;
use crate::ports::{BillingEventHandler, HandlerError};

/// Composite handler for event types that need more than one action.
///
/// Steps run in order and stop at the first failure; that failure is the
/// result. The registry still sees a single binding.
pub struct SequenceHandler {
    name: String,
    steps: Vec<Arc<dyn BillingEventHandler>>,
}

impl SequenceHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn then(mut self, step: Arc<dyn BillingEventHandler>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[async_trait]
impl BillingEventHandler for SequenceHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, ctx: &DeliveryContext) -> Result<(), HandlerError> {
        for step in &self.steps {
            tracing::trace!(
                delivery_id = %ctx.delivery_id(),
                sequence = %self.name,
                step = step.name(),
                "Running handler step"
            );
            step.handle(ctx).await?;
        }
        Ok(())
    }
}
