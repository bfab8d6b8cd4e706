//! DispatchEventHandler - Turns one inbound delivery into one outcome.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bytes::Bytes;
use futures::FutureExt;
use serde_json::Value;

use crate::domain::billing_event::{BillingEvent, DecodeError, DeliveryContext};
use crate::ports::HandlerError;

use super::HandlerRegistry;

/// Command carrying one raw delivery from the billing platform.
#[derive(Debug, Clone, Default)]
pub struct DispatchEventCommand {
    /// Raw request body.
    pub body: Bytes,
    /// Request headers as name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl DispatchEventCommand {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }
}

/// Why no handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnhandledReason {
    /// The body decoded but its event type has no binding.
    NoHandlerBound,
    /// The body could not be decoded into an event.
    DecodeFailed(DecodeError),
}

/// Terminal state of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The bound handler ran and succeeded.
    Processed,
    /// No handler ran.
    Unhandled(UnhandledReason),
    /// The bound handler failed or panicked.
    HandlerFault(HandlerError),
}

/// Result of dispatching one delivery. Always carries the payload as it
/// was received.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    pub echoed_event: Value,
}

impl DispatchOutcome {
    pub fn is_processed(&self) -> bool {
        self.status == DispatchStatus::Processed
    }
}

/// Handler for inbound billing events.
///
/// Decodes the delivery, resolves the bound handler and invokes it inside a
/// result boundary: handler errors and panics become
/// [`DispatchStatus::HandlerFault`] instead of failing the request.
pub struct DispatchEventHandler {
    registry: Arc<HandlerRegistry>,
}

impl DispatchEventHandler {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub async fn handle(&self, cmd: DispatchEventCommand) -> DispatchOutcome {
        // 1. Decode
        let event = match BillingEvent::decode(&cmd.body) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "Undecodable event received from billing platform");
                return DispatchOutcome {
                    status: DispatchStatus::Unhandled(UnhandledReason::DecodeFailed(err)),
                    echoed_event: echo_raw_body(&cmd.body),
                };
            }
        };

        let ctx = DeliveryContext::new(event, cmd.headers);
        let event_type = ctx.event().event_type().clone();

        tracing::info!(
            delivery_id = %ctx.delivery_id(),
            event_type = %event_type,
            object_type = ctx.event().object_type(),
            object_id = ctx.event().object_id(),
            account_id = ctx.event().account_id(),
            "Event received from billing platform"
        );

        // 2. Resolve
        let Some(handler) = self.registry.resolve_type(&event_type) else {
            tracing::warn!(
                delivery_id = %ctx.delivery_id(),
                event_type = %event_type,
                payload = %ctx.event().payload(),
                "No handler bound for event type"
            );
            return DispatchOutcome {
                status: DispatchStatus::Unhandled(UnhandledReason::NoHandlerBound),
                echoed_event: ctx.into_event().into_payload(),
            };
        };

        // 3. Invoke
        let result = AssertUnwindSafe(handler.handle(&ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(HandlerError::panicked(handler.name(), panic_message(&*panic)))
            });

        let status = match result {
            Ok(()) => {
                tracing::debug!(
                    delivery_id = %ctx.delivery_id(),
                    event_type = %event_type,
                    handler = handler.name(),
                    "Event processed"
                );
                DispatchStatus::Processed
            }
            Err(err) => {
                tracing::error!(
                    delivery_id = %ctx.delivery_id(),
                    event_type = %event_type,
                    handler = handler.name(),
                    error = %err,
                    "Event handler failed"
                );
                DispatchStatus::HandlerFault(err)
            }
        };

        DispatchOutcome {
            status,
            echoed_event: ctx.into_event().into_payload(),
        }
    }
}

/// Echo for bodies that did not decode: the parsed JSON when there is any,
/// otherwise the body as text.
fn echo_raw_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
