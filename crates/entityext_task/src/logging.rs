use entityext_core::error::Severity;
use tracing::Level;

use crate::config::TaskConfig;

/// Map an entity log severity onto a tracing level. `Fatal` has no tracing
/// counterpart and is reported as `ERROR`.
pub const fn level_for(severity: Severity) -> Level {
    match severity {
        Severity::Trace => Level::TRACE,
        Severity::Debug => Level::DEBUG,
        Severity::Info => Level::INFO,
        Severity::Warn => Level::WARN,
        Severity::Error | Severity::Fatal => Level::ERROR,
    }
}

/// Install a `fmt` subscriber at the configured level.
///
/// Returns false when a global subscriber is already installed (tests,
/// embedding applications); the existing one is kept.
pub fn init_logging(config: &TaskConfig) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level_for(config.log_level))
        .with_target(false)
        .try_init()
        .is_ok()
}
