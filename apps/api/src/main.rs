mod category;
mod config;
mod errors;
mod llm_client;
mod pipeline;
mod routes;
mod rules;
mod state;
mod text;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{Completer, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting reviewdraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; the service still serves health checks without a
    // key, and draft requests report the missing credential per request.
    let provider: Option<Arc<dyn Completer>> = match &config.openai_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmClient::new(key.clone())))
        }
        None => {
            warn!("OPENAI_API_KEY_REAL is not set; draft requests will fail with 500");
            None
        }
    };

    let state = AppState { provider };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the widget is embedded on customer sites

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
