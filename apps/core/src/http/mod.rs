//! HTTP transport: axum router, shared state and server loop.

pub mod extract;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::actors::{LlmActor, RecorderHandle};
use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::crisis::CrisisAnalyzer;
use crate::error::AppError;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: TokenIssuer,
    pub analyzer: CrisisAnalyzer,
    pub recorder: RecorderHandle,
    pub llm: Arc<dyn LlmActor>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route(
            "/api/journal",
            post(handlers::create_journal_entry).get(handlers::get_journal_entries),
        )
        .route(
            "/api/mood",
            post(handlers::record_mood).get(handlers::get_mood_history),
        )
        .route("/api/chat", post(handlers::chat))
        .route("/api/therapeutic-response", post(handlers::therapeutic_response))
        .route("/api/crisis-check", post(handlers::crisis_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and run until ctrl-c.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<(), AppError> {
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
