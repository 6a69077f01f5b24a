//! Diagnostic logging on stderr.
//!
//! Activation:
//!   - Environment variable: RUST_LOG=debug (or trace)
//!   - CLI flag: --debug
//!   - Config file: `log_level: info`
//!
//! User-facing output goes through `ui::messages`, not through tracing.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Priority: RUST_LOG env var > --debug flag > config level > default.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level.and_then(|l| EnvFilter::try_new(l).ok()) {
        level
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    // try_init: tests may run several commands in one process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
}
