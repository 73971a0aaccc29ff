mod config;
mod db;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;
mod syllabus;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, MIGRATOR};
use crate::extraction::GeminiExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("syllabus_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Syllabus Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and apply migrations
    let db = create_pool(&config.database_url).await?;
    MIGRATOR.run(&db).await?;
    info!("Database migrations applied");

    // Initialize the extraction client
    let extractor = Arc::new(GeminiExtractor::new(config.gemini_api_key.clone()));
    info!("Extraction client initialized (model: {})", extraction::MODEL);

    // Build app state
    let state = AppState { db, extractor };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
