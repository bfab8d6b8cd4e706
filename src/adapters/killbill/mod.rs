//! Kill Bill billing platform adapter.
//!
//! Implements the `BillingPlatform` port for Kill Bill, including:
//! - Push notification registration
//! - Registration lookup
//! - Registration removal
//!
//! # Configuration
//!
//! Read from `KB_GATEWAY__KILLBILL__*` (see `config::KillBillConfig`):
//! - `API_URL`, `USERNAME`, `PASSWORD`
//! - `API_KEY`, `API_SECRET` for the tenant
//! - `TIMEOUT_SECS` (default 30)

mod killbill_client;
mod mock_billing_platform;

pub use killbill_client::KillBillClient;
pub use mock_billing_platform::{MockBillingPlatform, PlatformCall};
