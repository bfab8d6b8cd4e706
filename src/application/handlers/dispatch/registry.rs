//! Handler Registry - Event type to handler bindings.
//!
//! The registry is assembled once with [`HandlerRegistryBuilder`] and then
//! frozen. A built registry has no mutating methods, so it can be shared
//! behind an `Arc` and read concurrently without locking.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kb_gateway::adapters::handlers::LoggingEventHandler;
//! use kb_gateway::application::handlers::dispatch::HandlerRegistry;
//! use kb_gateway::domain::billing_event::EventType;
//!
//! let registry = HandlerRegistry::builder()
//!     .bind(EventType::AccountCreation, Arc::new(LoggingEventHandler::new()))
//!     .build();
//!
//! assert!(registry.resolve("ACCOUNT_CREATION").is_some());
//! assert!(registry.resolve("NOT_A_REAL_TYPE").is_none());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::billing_event::EventType;
use crate::ports::BillingEventHandler;

/// Frozen mapping from event type to its single bound handler.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    bindings: HashMap<EventType, Arc<dyn BillingEventHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Registry with no bindings; every event is unhandled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Binds every known platform event type to `handler`.
    pub fn standard(handler: Arc<dyn BillingEventHandler>) -> Self {
        Self::builder()
            .bind_all(EventType::KNOWN.iter().cloned(), handler)
            .build()
    }

    /// Looks up the handler for a wire event type identifier.
    ///
    /// `None` is the expected answer for types the gateway does not support.
    pub fn resolve(&self, event_type: &str) -> Option<Arc<dyn BillingEventHandler>> {
        self.resolve_type(&EventType::parse(event_type))
    }

    pub fn resolve_type(&self, event_type: &EventType) -> Option<Arc<dyn BillingEventHandler>> {
        self.bindings.get(event_type).cloned()
    }

    pub fn is_bound(&self, event_type: &EventType) -> bool {
        self.bindings.contains_key(event_type)
    }

    pub fn bound_types(&self) -> impl Iterator<Item = &EventType> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bindings: Vec<_> = self
            .bindings
            .iter()
            .map(|(event_type, handler)| (event_type.as_str(), handler.name()))
            .collect();
        bindings.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("bindings", &bindings)
            .finish()
    }
}

/// Collects bindings before the registry is frozen.
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    bindings: HashMap<EventType, Arc<dyn BillingEventHandler>>,
}

impl HandlerRegistryBuilder {
    /// Binds `handler` to `event_type`, replacing any earlier binding.
    pub fn bind(mut self, event_type: EventType, handler: Arc<dyn BillingEventHandler>) -> Self {
        if let Some(previous) = self.bindings.insert(event_type.clone(), handler) {
            tracing::debug!(
                event_type = %event_type,
                replaced = previous.name(),
                "Replacing handler binding"
            );
        }
        self
    }

    /// Binds the same handler to several event types.
    pub fn bind_all(
        mut self,
        event_types: impl IntoIterator<Item = EventType>,
        handler: Arc<dyn BillingEventHandler>,
    ) -> Self {
        for event_type in event_types {
            self = self.bind(event_type, Arc::clone(&handler));
        }
        self
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            bindings: self.bindings,
        }
    }
}
