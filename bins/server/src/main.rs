//! Mailex server
//!
//! Receives repository events and extracts attachments from new email nodes.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailex_api::{AppState, create_router};
use mailex_client::NodesClient;
use mailex_core::event::EventDispatcher;
use mailex_core::extraction::AttachmentExtractor;
use mailex_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailex=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Create repository client
    let client = NodesClient::new(&config.repository).context("Failed to build repository client")?;
    info!(
        base_url = %client.base_url(),
        timeout_secs = config.repository.timeout_secs,
        max_content_bytes = config.repository.max_content_bytes,
        "Repository client configured"
    );

    // Register the extractor
    let extractor = AttachmentExtractor::new(Arc::new(client));
    let state = AppState::new(EventDispatcher::new(extractor));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
