// src/infra/logger.rs — Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. RUST_LOG wins over the passed level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
