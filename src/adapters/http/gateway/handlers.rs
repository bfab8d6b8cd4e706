//! HTTP handlers for gateway endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    DispatchEventCommand, DispatchEventHandler, DispatchStatus, EnsureSubscriptionCommand,
    EnsureSubscriptionHandler, GetSubscriptionHandler, HandlerRegistry,
    RemoveSubscriptionHandler,
};
use crate::domain::subscription::SubscriptionError;
use crate::ports::{BillingPlatform, PlatformError, TenantHeader};

use super::dto::{EnsureSubscriptionRequest, ErrorResponse, EventResponse};

/// Application state for gateway endpoints.
#[derive(Clone)]
pub struct GatewayAppState {
    pub ensure_subscription: Arc<EnsureSubscriptionHandler>,
    pub get_subscription: Arc<GetSubscriptionHandler>,
    pub remove_subscription: Arc<RemoveSubscriptionHandler>,
    pub dispatch_event: Arc<DispatchEventHandler>,
}

impl GatewayAppState {
    /// Wire every handler against one platform and tenant.
    pub fn new(
        platform: Arc<dyn BillingPlatform>,
        header: Arc<TenantHeader>,
        default_callback_url: impl Into<String>,
        registry: Arc<HandlerRegistry>,
    ) -> Self {
        Self {
            ensure_subscription: Arc::new(EnsureSubscriptionHandler::new(
                Arc::clone(&platform),
                Arc::clone(&header),
                default_callback_url,
            )),
            get_subscription: Arc::new(GetSubscriptionHandler::new(
                Arc::clone(&platform),
                Arc::clone(&header),
            )),
            remove_subscription: Arc::new(RemoveSubscriptionHandler::new(platform, header)),
            dispatch_event: Arc::new(DispatchEventHandler::new(registry)),
        }
    }
}

/// Create or refresh the push notification subscription.
///
/// POST /config
///
/// The body is optional; `{"cb": "<url>"}` overrides the default callback.
pub async fn ensure_subscription(State(state): State<GatewayAppState>, body: Bytes) -> Response {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        EnsureSubscriptionRequest::default()
    } else {
        match serde_json::from_slice::<EnsureSubscriptionRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!("Invalid request body: {}", e))),
                )
                    .into_response();
            }
        }
    };

    let cmd = EnsureSubscriptionCommand {
        callback_url: request.cb,
    };

    match state.ensure_subscription.handle(cmd).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(SubscriptionError::VerificationFailed { view, .. }) => {
            (StatusCode::SERVICE_UNAVAILABLE, Json(view.into_raw())).into_response()
        }
        Err(e) => (e.status_code(), Json(ErrorResponse::new(e.to_string()))).into_response(),
    }
}

/// Report the platform's current subscription state.
///
/// GET /config
pub async fn get_subscription(State(state): State<GatewayAppState>) -> Response {
    match state.get_subscription.handle().await {
        Ok(view) => (StatusCode::OK, Json(view.into_raw())).into_response(),
        Err(e) => platform_error_response(e),
    }
}

/// Remove the push notification subscription.
///
/// DELETE /config
pub async fn remove_subscription(State(state): State<GatewayAppState>) -> Response {
    match state.remove_subscription.handle().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => platform_error_response(e),
    }
}

/// Receive one billing event from the platform.
///
/// POST /listener
pub async fn receive_event(
    State(state): State<GatewayAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let headers = header_pairs(&headers);

    let outcome = state
        .dispatch_event
        .handle(DispatchEventCommand { body, headers })
        .await;

    match outcome.status {
        DispatchStatus::Processed => (
            StatusCode::OK,
            Json(EventResponse::processed(outcome.echoed_event)),
        ),
        DispatchStatus::Unhandled(_) => (
            StatusCode::BAD_REQUEST,
            Json(EventResponse::not_processed(outcome.echoed_event)),
        ),
        DispatchStatus::HandlerFault(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EventResponse::handler_fault(
                outcome.echoed_event,
                err.to_string(),
            )),
        ),
    }
    .into_response()
}

/// Header name/value pairs for the delivery context. Values that are not
/// visible ASCII are decoded lossily rather than dropped.
fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = match value.to_str() {
                Ok(value) => value.to_string(),
                Err(_) => {
                    tracing::debug!(header = %name, "Non-ASCII header value decoded lossily");
                    String::from_utf8_lossy(value.as_bytes()).into_owned()
                }
            };
            (name.as_str().to_string(), value)
        })
        .collect()
}

fn platform_error_response(err: PlatformError) -> Response {
    (err.status_code(), Json(ErrorResponse::new(err.to_string()))).into_response()
}
