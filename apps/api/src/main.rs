mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod ner;
mod processing;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume parser API v{}", env!("CARGO_PKG_VERSION"));

    // Text extraction (DOCX by default, PDF via DOCUMENT_FORMAT=pdf)
    let extractor = extraction::build_extractor(&config);
    info!("Text extractor initialized ({})", extractor.id());

    // Entity recognizer, loaded once and shared by every request
    let recognizer = ner::build_recognizer(&config)?;
    info!("Entity recognizer initialized ({})", recognizer.backend_id());

    match config.max_upload_bytes {
        Some(limit) => info!("Upload limit: {limit} bytes"),
        None => info!("Upload limit: disabled"),
    }

    let state = AppState {
        config: config.clone(),
        extractor,
        recognizer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
