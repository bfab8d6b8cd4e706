//! Gateway HTTP adapter - the endpoints the billing platform and operators talk to.
//!
//! Provides endpoints for:
//! - Registering, inspecting and removing the push notification callback
//! - Receiving billing events

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::GatewayAppState;
pub use routes::gateway_router;
