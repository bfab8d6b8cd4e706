//! Axum router configuration for gateway endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    ensure_subscription, get_subscription, receive_event, remove_subscription, GatewayAppState,
};

/// Create the gateway API router.
///
/// # Routes
///
/// ## Subscription
/// - `POST /config` - Register the callback and verify it (body: optional `{"cb": url}`)
/// - `GET /config` - Current push notification registrations, verbatim
/// - `DELETE /config` - Remove the registration
///
/// `/config/` is served identically.
///
/// ## Events
/// - `POST /listener` - Receive one billing event
pub fn gateway_routes() -> Router<GatewayAppState> {
    let config = post(ensure_subscription)
        .get(get_subscription)
        .delete(remove_subscription);

    Router::new()
        .route("/config", config.clone())
        // Trailing slash accepted for existing deployments
        .route("/config/", config)
        .route("/listener", post(receive_event))
}

/// Create the complete gateway router.
///
/// Suitable for mounting at the server root; the billing platform posts
/// events to the registered callback URL.
///
/// # Example
///
/// ```ignore
/// use kb_gateway::adapters::http::{gateway_router, GatewayAppState};
///
/// let app_state = GatewayAppState::new(platform, header, default_cb, registry);
/// let app = gateway_router().with_state(app_state);
/// ```
pub fn gateway_router() -> Router<GatewayAppState> {
    gateway_routes()
}
