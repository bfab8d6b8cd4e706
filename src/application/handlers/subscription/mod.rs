//! Subscription handlers.
//!
//! Together these form the subscription manager: one push notification
//! registration per tenant, always read back from the platform.

mod ensure_subscription;
mod get_subscription;
mod remove_subscription;

pub use ensure_subscription::{
    EnsureSubscriptionCommand, EnsureSubscriptionHandler, EnsureSubscriptionResult,
};
pub use get_subscription::GetSubscriptionHandler;
pub use remove_subscription::RemoveSubscriptionHandler;
