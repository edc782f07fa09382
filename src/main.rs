//! ==============================================================================
//! main.rs - pico fire detection host entry point
//! ==============================================================================
//!
//! purpose:
//!     a raspberry pi pico runs a fire/no-fire image classifier and reports
//!     each result to this host as a plain GET request. the host keeps the
//!     latest result and a short rolling history for dashboards to poll.
//!
//! relationships:
//!     - uses: config.rs (host.toml + HOST/PORT overrides)
//!     - uses: logging.rs (tracing subscriber)
//!     - uses: store.rs (latest reading + bounded history)
//!     - uses: server.rs (axum routes)
//!
//! architecture:
//!
//!     ┌──────────┐  GET /pico_data?...   ┌─────────────────────────────┐
//!     │   pico   │ ────────────────────▶ │ web server (port 3000)      │
//!     └──────────┘                       │   ingest ─┐                 │
//!                                        │           ▼                 │
//!     ┌──────────┐  GET /pico_data/...   │   ┌───────────────┐         │
//!     │dashboard │ ◀──────────────────── │   │ ReadingStore  │ <- arc  │
//!     └──────────┘                       │   │ latest+history│  rwlock │
//!                                        │   └───────────────┘         │
//!                                        └─────────────────────────────┘
//!
//! ==============================================================================

mod config;
mod domain;
mod logging;
mod server;
mod store;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration
    let config = config::HostConfig::load_or_default();

    // step 2: logging
    logging::init(&config.logging.level);
    tracing::info!("Pico Fire Detection Host v{}", env!("CARGO_PKG_VERSION"));
    config.print_summary();

    // step 3: initialize shared state
    let store = store::ReadingStore::new();
    tracing::info!("[STARTUP] Keeping the last {} readings", store.capacity());
    let state = server::ServerState {
        store,
        show_reading_data: config.logging.show_reading_data,
    };

    // step 4: serve until ctrl-c
    let addr = config.bind_addr();
    if let Err(e) = server::run_server(&addr, state, shutdown_signal()).await {
        tracing::error!("Fatal: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => {
            tracing::warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
