//! KB Gateway - Webhook gateway for the Kill Bill billing platform
//!
//! This crate registers a push notification callback with Kill Bill, receives
//! the billing events it delivers, and routes each one to the handler bound
//! to its event type.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
