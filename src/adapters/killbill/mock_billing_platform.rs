//! Mock billing platform for testing.
//!
//! Provides an in-memory implementation of `BillingPlatform` for unit and
//! integration tests. Supports:
//! - A single registered callback per tenant, like the real platform
//! - Overriding the retrieve response
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::subscription::{CallbackUrl, PushNotificationView};
use crate::ports::{BillingPlatform, PlatformError, TenantHeader};

/// Mock billing platform for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockBillingPlatform::new();
///
/// // Make the post-registration check come back empty
/// mock.set_retrieve_response(json!({"values": []}));
///
/// // Inject errors
/// mock.fail_next_with(PlatformError::network("connection refused"));
/// ```
#[derive(Default, Clone)]
pub struct MockBillingPlatform {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Callback currently registered.
    registered: Option<String>,

    /// Fixed retrieve response, replacing the derived one.
    retrieve_override: Option<Value>,

    /// Error to return on next call.
    next_error: Option<PlatformError>,

    /// Track method calls for assertions.
    call_log: Vec<PlatformCall>,
}

/// Recorded platform call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Create(String),
    Retrieve,
    Delete,
}

impl MockBillingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer retrieve calls with `response`.
    pub fn set_retrieve_response(&self, response: Value) {
        self.inner.lock().unwrap().retrieve_override = Some(response);
    }

    /// Fail the next call, whichever it is, with `error`.
    pub fn fail_next_with(&self, error: PlatformError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Callbacks the mock currently considers registered.
    pub fn registered(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .registered
            .iter()
            .cloned()
            .collect()
    }

    fn record(&self, call: PlatformCall) -> Result<std::sync::MutexGuard<'_, MockState>, PlatformError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(call);
        match state.next_error.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl BillingPlatform for MockBillingPlatform {
    async fn create_push_notification(
        &self,
        _header: &TenantHeader,
        callback_url: &CallbackUrl,
    ) -> Result<(), PlatformError> {
        let mut state = self.record(PlatformCall::Create(callback_url.to_string()))?;
        state.registered = Some(callback_url.to_string());
        Ok(())
    }

    async fn retrieve_push_notifications(
        &self,
        _header: &TenantHeader,
    ) -> Result<PushNotificationView, PlatformError> {
        let state = self.record(PlatformCall::Retrieve)?;
        let raw = match &state.retrieve_override {
            Some(response) => response.clone(),
            None => json!({
                "key": "PUSH_NOTIFICATION_CB",
                "values": state.registered.iter().collect::<Vec<_>>(),
            }),
        };
        Ok(PushNotificationView::new(raw))
    }

    async fn delete_push_notification(&self, _header: &TenantHeader) -> Result<(), PlatformError> {
        let mut state = self.record(PlatformCall::Delete)?;
        state.registered = None;
        Ok(())
    }
}
