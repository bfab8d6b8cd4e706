//! Subscription domain module.
//!
//! The push notification registration held by the billing platform. Nothing
//! here is persisted; the platform is the source of truth.
//!
//! # Module Structure
//!
//! - `callback_url` - Validated callback URL
//! - `push_notification` - Platform retrieve response
//! - `errors` - Subscription management errors

mod callback_url;
mod errors;
mod push_notification;

pub use callback_url::CallbackUrl;
pub use errors::SubscriptionError;
pub use push_notification::PushNotificationView;
