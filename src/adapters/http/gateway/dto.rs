//! HTTP DTOs (Data Transfer Objects) for gateway endpoints.
//!
//! These types define the JSON request/response structure of the config and
//! listener endpoints. The listener response shape is what the billing
//! platform sees, so field names and messages are fixed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Optional body of `POST /config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnsureSubscriptionRequest {
    /// Callback URL to register instead of the default.
    #[serde(default)]
    pub cb: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILED: &str = "failed";

pub const MESSAGE_PROCESSED: &str = "Event processed";
pub const MESSAGE_NOT_PROCESSED: &str = "Event not processed";
pub const MESSAGE_PROCESSING_FAILED: &str = "Event processing failed";

/// Response to an event delivery on `POST /listener`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub status: String,
    pub message: String,
    /// The delivered payload, unchanged.
    pub event_request: Value,
    /// Handler failure, only present on 500 responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventResponse {
    pub fn processed(event_request: Value) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: MESSAGE_PROCESSED.to_string(),
            event_request,
            error: None,
        }
    }

    pub fn not_processed(event_request: Value) -> Self {
        Self {
            status: STATUS_FAILED.to_string(),
            message: MESSAGE_NOT_PROCESSED.to_string(),
            event_request,
            error: None,
        }
    }

    pub fn handler_fault(event_request: Value, error: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAILED.to_string(),
            message: MESSAGE_PROCESSING_FAILED.to_string(),
            event_request,
            error: Some(error.into()),
        }
    }
}

/// Error body for config endpoint failures other than verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAILED.to_string(),
            message: message.into(),
        }
    }
}
