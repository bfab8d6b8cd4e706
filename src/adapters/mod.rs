//! Adapters - Implementations of port interfaces.
//!
//! - `killbill` - Kill Bill REST client and an in-memory test double
//! - `handlers` - Generic event handlers for the registry
//! - `http` - Axum endpoints

pub mod handlers;
pub mod http;
pub mod killbill;
