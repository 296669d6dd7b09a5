//! Shared test-only utilities: one-time `tracing`/`color-eyre` setup, called
//! at the top of every unit and property test in this workspace.
//!
//! Nothing here is consensus-relevant; it exists purely so that a failing
//! assertion prints a readable backtrace and so `tracing` output from the
//! crate under test reaches the terminal during `cargo test -- --nocapture`.

use std::sync::Once;

pub use pretty_assertions::{assert_eq, assert_ne};

static INIT: Once = Once::new();

/// Install a `tracing` subscriber and `color-eyre` error reporting.
///
/// Idempotent and safe to call at the top of every test; only the first
/// call in a process does anything.
pub fn init() {
    INIT.call_once(|| {
        let _ = color_eyre::install();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
