//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the gateway core and the outside world. Adapters implement these ports.
//!
//! - `BillingPlatform` - Push notification registration on the billing platform
//! - `BillingEventHandler` - Domain action invoked for one event type

mod billing_platform;
mod event_handler;

pub use billing_platform::{BillingPlatform, PlatformError, PlatformErrorCode, TenantHeader};
pub use event_handler::{BillingEventHandler, HandlerError};
