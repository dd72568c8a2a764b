//! # Observability & Tracing
//!
//! Subscriber setup shared by every binary built on the framework.
//!
//! The framework logs with structured fields rather than formatted strings:
//!
//! - **Actor lifecycle**: `Actor started` / `Shutdown` with `entity_type` and final `size`
//! - **Record operations**: `Created`, `Updated`, `Deleted` at `info`, payloads at `debug`
//! - **Failures**: `warn` with the offending `id` and the `error`
//!
//! ```bash
//! RUST_LOG=info cargo run      # compact
//! RUST_LOG=debug cargo run     # full payloads
//! ```
//!
//! `with_target(false)` hides module paths; `entity_type` already says which actor spoke.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, filtering from `RUST_LOG` only.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Installs the global subscriber, using `default_level` when `RUST_LOG` is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed.
pub fn setup_tracing_with_default(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
