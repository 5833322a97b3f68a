//! Tracing subscriber setup.
//!
//! ## Log Levels
//!
//! - **INFO**: solve start and end
//! - **WARN**: iteration or time limit reached
//! - **ERROR**: invariant violation at a checkpoint
//! - **DEBUG**: verified checkpoints and saves
//! - **TRACE**: individual accepted moves

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "u_twoopt=info";

/// Installs a formatted `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call multiple times - only the first call has effect. If another
/// global subscriber is already installed, it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
