// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal Hub API Server
//!
//! Aggregates third-party sports and trading card data behind
//! session-gated routes.

use personal_hub::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        nba_backend = %config.nba_backend_url,
        tcgdex = %config.tcgdex_base_url,
        espn_league = ?config.espn_league_id,
        public_paths = ?config.public_paths,
        "Starting Personal Hub"
    );

    // Every client is built here, once, and injected through shared state
    let state = Arc::new(AppState::new(config.clone())?);
    tracing::info!(domain = %config.auth0_domain, "Identity provider configured");

    // Build router
    let app = personal_hub::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("personal_hub=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
