//! Platform view of the push notification registration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw retrieve response from the billing platform.
///
/// Kill Bill answers with a tenant key/value document
/// (`{"key": "PUSH_NOTIFICATION_CB", "values": [...], "auditLogs": [...]}`).
/// The document is kept as-is and only `values` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushNotificationView(Value);

impl PushNotificationView {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Registered callback URLs. Non-string entries are skipped.
    pub fn values(&self) -> Vec<&str> {
        self.0
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Exact string match against the registered callbacks.
    pub fn contains(&self, callback_url: &str) -> bool {
        self.values().iter().any(|v| *v == callback_url)
    }

    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Value::as_str)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }
}
