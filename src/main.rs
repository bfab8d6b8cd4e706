//! KB Gateway server entry point.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kb_gateway::adapters::handlers::LoggingEventHandler;
use kb_gateway::adapters::http::{gateway_router, GatewayAppState};
use kb_gateway::adapters::killbill::KillBillClient;
use kb_gateway::application::handlers::HandlerRegistry;
use kb_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        killbill = %config.killbill.api_url,
        tenant = config.killbill.tenant.as_deref().unwrap_or(config.killbill.api_key.as_str()),
        "Starting KB Gateway"
    );

    let platform = Arc::new(KillBillClient::new(&config.killbill)?);
    let header = Arc::new(config.killbill.tenant_header());
    let registry = Arc::new(HandlerRegistry::standard(Arc::new(LoggingEventHandler)));
    info!(bound = registry.len(), "Handler registry ready");

    let state = GatewayAppState::new(
        platform,
        header,
        config.server.default_callback_url(),
        registry,
    );

    let app = gateway_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server.bind_target()).await?;
    info!(
        address = %listener.local_addr()?,
        callback = %config.server.default_callback_url(),
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
