//! ==============================================================================
//! server.rs - http surface for the pico
//! ==============================================================================
//!
//! routes:
//!     GET /                   static banner
//!     GET /pico_data          ingest a reading from query params, returns "ACK"
//!     GET /pico_data/latest   latest reading as json ({} before the first ingest)
//!     GET /pico_data/history  last readings as a json array, oldest first
//!
//! the pico cannot do anything useful with an error, so ingest never rejects:
//! bad numbers become absent fields and a missing class becomes "Unknown".
//!
//! ==============================================================================

use crate::domain::{RawReadingFields, Reading};
use crate::store::ReadingStore;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub const BANNER: &str = "See the fire before it spreads...";
pub const ACK: &str = "ACK";

/// state handed to every handler
#[derive(Clone)]
pub struct ServerState {
    pub store: ReadingStore,
    /// log each reading at info instead of debug
    pub show_reading_data: bool,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(banner_handler))
        .route("/pico_data", get(ingest_handler))
        .route("/pico_data/latest", get(latest_handler))
        .route("/pico_data/history", get(history_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// bind `addr` and serve until `shutdown` resolves
pub async fn run_server<F>(addr: &str, state: ServerState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    serve(listener, state, shutdown).await
}

/// serve on an already bound listener
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr().context("Listener has no local address")?;
    tracing::info!("Fire Detection Server is running at http://{}", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Web server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn banner_handler() -> &'static str {
    BANNER
}

/// GET /pico_data?class=fire&confidence=0.9&fire_score=0.95&nofire_score=0.05
async fn ingest_handler(
    State(state): State<ServerState>,
    query: Option<Query<HashMap<String, String>>>,
) -> &'static str {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let raw = RawReadingFields::from_query(&query);

    if state.show_reading_data {
        tracing::info!(
            class = ?raw.class,
            confidence = ?raw.confidence,
            fire_score = ?raw.fire_score,
            nofire_score = ?raw.nofire_score,
            "[RECV] pico reading"
        );
    } else {
        tracing::debug!(class = ?raw.class, "[RECV] pico reading");
    }

    state.store.ingest(&raw).await;
    ACK
}

async fn latest_handler(State(state): State<ServerState>) -> Json<serde_json::Value> {
    match state.store.latest().await {
        Some(reading) => Json(serde_json::to_value(reading).unwrap_or_default()),
        None => Json(serde_json::json!({})),
    }
}

async fn history_handler(State(state): State<ServerState>) -> Json<Vec<Reading>> {
    Json(state.store.history().await)
}
