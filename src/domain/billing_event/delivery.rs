//! Request context handed to event handlers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::BillingEvent;

/// Everything a handler knows about one inbound delivery.
#[derive(Debug, Clone)]
pub struct DeliveryContext {
    delivery_id: Uuid,
    received_at: DateTime<Utc>,
    headers: Vec<(String, String)>,
    event: BillingEvent,
}

impl DeliveryContext {
    /// Creates a context with a fresh delivery id, stamped now.
    pub fn new(event: BillingEvent, headers: Vec<(String, String)>) -> Self {
        Self {
            delivery_id: Uuid::new_v4(),
            received_at: Utc::now(),
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            event,
        }
    }

    /// Id used to correlate log lines for this delivery. Not sent by the
    /// platform; generated on receipt.
    pub fn delivery_id(&self) -> Uuid {
        self.delivery_id
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn event(&self) -> &BillingEvent {
        &self.event
    }

    /// Case-insensitive header lookup. Returns the first value.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn into_event(self) -> BillingEvent {
        self.event
    }
}
