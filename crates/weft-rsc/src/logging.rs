//! Logging utilities for weft-rsc
//!
//! Only available with the `logging` feature.
//!
//! Library users: weft emits tracing events - install your own subscriber.
//! Application hosts: use these convenience initializers.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install a global subscriber with the given filter directive
/// (e.g. `"info"` or `"weft_rsc=debug"`).
///
/// Safe to call from multiple threads; only the first call takes effect.
pub fn init_logging(directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(directive.parse().unwrap_or_default())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}

/// Install a global subscriber configured from `RUST_LOG`, falling back to
/// `info` when the variable is unset or invalid.
pub fn init_logging_from_env() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}
