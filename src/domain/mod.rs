//! Domain layer containing gateway types.
//!
//! # Module Organization
//!
//! - `billing_event` - Inbound platform events and their delivery context
//! - `subscription` - Push notification registration and its errors

pub mod billing_event;
pub mod subscription;
