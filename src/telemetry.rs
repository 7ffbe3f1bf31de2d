//! Tracing subscriber setup for binaries.
//!
//! The library only emits `tracing` events; hosts decide where they go.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `level`.
pub fn init_tracing(level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
