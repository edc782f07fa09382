//! log subscriber setup.
//!
//! RUST_LOG wins when set; otherwise the level from host.toml applies.

use tracing_subscriber::EnvFilter;

/// build the filter used by the fmt subscriber
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// install the global fmt subscriber; a second call is a no-op
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .try_init();
}
