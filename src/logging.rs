//! `tracing-subscriber` initialization, shared by the binary and by
//! integration tests. The engine itself only ever calls `tracing::debug!` /
//! `tracing::info!`, never configures a subscriber.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a global subscriber reading `RUST_LOG`, defaulting to `info`.
/// Safe to call more than once (e.g. once per test binary); later calls are
/// no-ops.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}
