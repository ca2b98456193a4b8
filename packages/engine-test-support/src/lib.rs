//! Engine test support utilities
//!
//! Shared by the engine's integration tests: unified logging initialization
//! so every test binary honours the same log level knobs.

pub mod logging;
