mod config;
mod data_source;
mod embedding;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::data_source::HttpDataSource;
use crate::embedding::build_embedder;
use crate::matching::MatchEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matcher API v{}", env!("CARGO_PKG_VERSION"));

    // One embedding provider for the whole process
    let embedder = build_embedder(&config.embedding)?;

    let data_source = HttpDataSource::new(&config.data_api_url, &config.data_api_token)?;
    info!("Data source initialized ({})", config.data_api_url);

    info!(
        "Aggregate weights: skills={} experience={} education={}",
        config.score_weights.skills, config.score_weights.experience, config.score_weights.education
    );

    let state = AppState {
        engine: Arc::new(MatchEngine::new(embedder, Arc::new(data_source))),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
