//! Test logging for the Wizard engine.
//!
//! Both the engine's unit tests (`lib.rs`) and every integration test binary
//! call [`init`] from a `ctor` hook, so engine `tracing` events show up in
//! captured test output.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once per test binary.
///
/// Filter is `TEST_LOG`, else `RUST_LOG`, else `warn`. Bot-driven match
/// tests log every bid and play at `debug`:
///
/// ```bash
/// TEST_LOG=wizard_engine=debug cargo test -p wizard-engine --test match_lifecycle_test
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
