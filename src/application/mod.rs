//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Dispatch
    DispatchEventCommand, DispatchEventHandler, DispatchOutcome, DispatchStatus, HandlerRegistry,
    UnhandledReason,
    // Subscription
    EnsureSubscriptionCommand, EnsureSubscriptionHandler, GetSubscriptionHandler,
    RemoveSubscriptionHandler,
};
