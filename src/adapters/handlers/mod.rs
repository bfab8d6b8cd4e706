//! Event handler adapters.
//!
//! Generic `BillingEventHandler` implementations. Business actions for a
//! given event type belong to the owning application and are bound in
//! the handler registry next to (or instead of) these.

mod logging_handler;
mod sequence_handler;

pub use logging_handler::LoggingEventHandler;
pub use sequence_handler::SequenceHandler;
