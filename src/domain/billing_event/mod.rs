//! Billing event domain module.
//!
//! Inbound push notifications from the billing platform.
//!
//! # Module Structure
//!
//! - `event_type` - Known platform event identifiers
//! - `event` - Decoded event with its verbatim payload
//! - `delivery` - Per-delivery context handed to handlers

mod delivery;
mod event;
mod event_type;

pub use delivery::DeliveryContext;
pub use event::{BillingEvent, DecodeError, EVENT_TYPE_FIELD};
pub use event_type::EventType;
