//! End-to-end tests for the gateway router.
//!
//! Drives the full axum stack with an in-memory billing platform and a
//! handler registry, asserting on the exact status codes and bodies the
//! billing platform and operators see.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use kb_gateway::adapters::handlers::LoggingEventHandler;
use kb_gateway::adapters::http::{gateway_router, GatewayAppState};
use kb_gateway::adapters::killbill::{MockBillingPlatform, PlatformCall};
use kb_gateway::application::handlers::HandlerRegistry;
use kb_gateway::domain::billing_event::{DeliveryContext, EventType};
use kb_gateway::ports::{BillingEventHandler, HandlerError, TenantHeader};

const DEFAULT_CB: &str = "http://127.0.0.1:5000/listeners/kb_callback";

// ════════════════════════════════════════════════════════════════════════════
// Test fixtures
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct CountingHandler {
    calls: AtomicUsize,
}

#[async_trait]
impl BillingEventHandler for CountingHandler {
    fn name(&self) -> &str {
        "counting"
    }

    async fn handle(&self, _ctx: &DeliveryContext) -> Result<(), HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingHandler;

#[async_trait]
impl BillingEventHandler for FailingHandler {
    fn name(&self) -> &str {
        "failing"
    }

    async fn handle(&self, _ctx: &DeliveryContext) -> Result<(), HandlerError> {
        Err(HandlerError::failed("failing", "ledger unavailable"))
    }
}

struct PanickingHandler;

#[async_trait]
impl BillingEventHandler for PanickingHandler {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn handle(&self, _ctx: &DeliveryContext) -> Result<(), HandlerError> {
        panic!("unexpected payload")
    }
}

fn app_with(platform: &MockBillingPlatform, registry: HandlerRegistry) -> Router {
    let state = GatewayAppState::new(
        Arc::new(platform.clone()),
        Arc::new(TenantHeader::new("bob", "lazar", "admin")),
        DEFAULT_CB,
        Arc::new(registry),
    );
    gateway_router().with_state(state)
}

fn app(platform: &MockBillingPlatform) -> Router {
    app_with(
        platform,
        HandlerRegistry::standard(Arc::new(LoggingEventHandler)),
    )
}

fn request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ════════════════════════════════════════════════════════════════════════════
// POST /listener
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn known_event_is_processed_and_echoed() {
    let platform = MockBillingPlatform::new();
    let event = json!({"eventType": "ACCOUNT_CREATION", "acct": 42});

    let response = app(&platform)
        .oneshot(request("POST", "/listener", event.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "success",
            "message": "Event processed",
            "event_request": {"eventType": "ACCOUNT_CREATION", "acct": 42}
        })
    );
}

#[tokio::test]
async fn unknown_event_type_is_not_processed() {
    let platform = MockBillingPlatform::new();
    let event = json!({"eventType": "NOT_A_REAL_TYPE"});

    let response = app(&platform)
        .oneshot(request("POST", "/listener", event.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "failed",
            "message": "Event not processed",
            "event_request": {"eventType": "NOT_A_REAL_TYPE"}
        })
    );
}

#[tokio::test]
async fn echo_keeps_big_integers_and_key_order() {
    let platform = MockBillingPlatform::new();
    let body = r#"{"zeta":1,"eventType":"NOT_A_REAL_TYPE","big":123456789012345678901234567890}"#;

    let response = app(&platform)
        .oneshot(request("POST", "/listener", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(
        text.contains(&format!("\"event_request\":{}", body)),
        "echo changed the payload: {}",
        text
    );
}

#[tokio::test]
async fn event_without_type_is_not_processed() {
    let platform = MockBillingPlatform::new();
    let event = json!({"objectId": "abc"});

    let response = app(&platform)
        .oneshot(request("POST", "/listener", event.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Event not processed");
    assert_eq!(json["event_request"], event);
}

#[tokio::test]
async fn malformed_body_is_not_processed() {
    let platform = MockBillingPlatform::new();

    let response = app(&platform)
        .oneshot(request("POST", "/listener", "{\"eventType\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "failed");
    assert_eq!(json["event_request"], "{\"eventType\": ");
}

#[tokio::test]
async fn bound_handler_runs_once_per_delivery() {
    let platform = MockBillingPlatform::new();
    let counter = Arc::new(CountingHandler::default());
    let registry = HandlerRegistry::builder()
        .bind(EventType::InvoiceCreation, counter.clone())
        .build();
    let app = app_with(&platform, registry);
    let event = json!({"eventType": "INVOICE_CREATION"}).to_string();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request("POST", "/listener", event.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(counter.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn known_but_unbound_event_is_not_processed() {
    let platform = MockBillingPlatform::new();
    let registry = HandlerRegistry::builder()
        .bind(EventType::InvoiceCreation, Arc::new(LoggingEventHandler))
        .build();

    let response = app_with(&platform, registry)
        .oneshot(request(
            "POST",
            "/listener",
            json!({"eventType": "ACCOUNT_CREATION"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failing_handler_yields_server_error() {
    let platform = MockBillingPlatform::new();
    let registry = HandlerRegistry::builder()
        .bind(EventType::PaymentFailed, Arc::new(FailingHandler))
        .build();
    let event = json!({"eventType": "PAYMENT_FAILED", "objectId": "p-9"});

    let response = app_with(&platform, registry)
        .oneshot(request("POST", "/listener", event.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "failed",
            "message": "Event processing failed",
            "event_request": {"eventType": "PAYMENT_FAILED", "objectId": "p-9"},
            "error": "Handler 'failing' failed: ledger unavailable"
        })
    );
}

#[tokio::test]
async fn panicking_handler_is_contained() {
    let platform = MockBillingPlatform::new();
    let registry = HandlerRegistry::builder()
        .bind(EventType::PaymentFailed, Arc::new(PanickingHandler))
        .build();
    let app = app_with(&platform, registry);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/listener",
            json!({"eventType": "PAYMENT_FAILED"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Handler 'panicking' panicked: unexpected payload");

    // The router keeps serving after the panic
    let response = app
        .oneshot(request("GET", "/config", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ════════════════════════════════════════════════════════════════════════════
// /config
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn ensure_with_explicit_callback_succeeds_with_empty_body() {
    let platform = MockBillingPlatform::new();

    let response = app(&platform)
        .oneshot(request(
            "POST",
            "/config",
            json!({"cb": "https://hooks.example.com/kb"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(
        platform.calls(),
        vec![
            PlatformCall::Create("https://hooks.example.com/kb".to_string()),
            PlatformCall::Retrieve,
        ]
    );
}

#[tokio::test]
async fn ensure_without_body_uses_default_callback() {
    let platform = MockBillingPlatform::new();

    let response = app(&platform)
        .oneshot(request("POST", "/config", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(platform.registered(), vec![DEFAULT_CB.to_string()]);
}

#[tokio::test]
async fn ensure_reports_unavailable_when_callback_not_listed() {
    let platform = MockBillingPlatform::new();
    platform.set_retrieve_response(json!({"values": []}));

    let response = app(&platform)
        .oneshot(request("POST", "/config", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await, json!({"values": []}));
}

#[tokio::test]
async fn get_returns_platform_view_verbatim() {
    let platform = MockBillingPlatform::new();
    let view = json!({
        "key": "PUSH_NOTIFICATION_CB",
        "values": ["http://a/b"],
        "extra": {"tenant": "t-1"}
    });
    platform.set_retrieve_response(view.clone());

    let response = app(&platform)
        .oneshot(request("GET", "/config", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, view);
}

#[tokio::test]
async fn delete_is_repeatable() {
    let platform = MockBillingPlatform::new();
    let app = app(&platform);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request("DELETE", "/config", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    assert_eq!(platform.calls(), vec![PlatformCall::Delete, PlatformCall::Delete]);
}

#[tokio::test]
async fn register_then_get_lists_callback() {
    let platform = MockBillingPlatform::new();
    let app = app(&platform);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/config",
            json!({"cb": "http://10.0.0.5:5000/listener"}).to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("GET", "/config", Body::empty()))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["values"], json!(["http://10.0.0.5:5000/listener"]));
}
