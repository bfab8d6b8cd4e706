//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod dispatch;
pub mod subscription;

pub use dispatch::{
    DispatchEventCommand, DispatchEventHandler, DispatchOutcome, DispatchStatus, HandlerRegistry,
    HandlerRegistryBuilder, UnhandledReason,
};
pub use subscription::{
    EnsureSubscriptionCommand, EnsureSubscriptionHandler, EnsureSubscriptionResult,
    GetSubscriptionHandler, RemoveSubscriptionHandler,
};
