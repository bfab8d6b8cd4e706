//! Event dispatch handlers.
//!
//! - `registry` - Frozen event type to handler table
//! - `dispatch_event` - Decode, resolve and invoke for one delivery

mod dispatch_event;
mod registry;

pub use dispatch_event::{
    DispatchEventCommand, DispatchEventHandler, DispatchOutcome, DispatchStatus, UnhandledReason,
};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
