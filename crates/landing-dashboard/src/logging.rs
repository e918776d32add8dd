//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `LDASH_LOG` environment variable, falling back to the configured
//! `log_level` when the variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Debug level for the dashboard, written to the log file
//! LDASH_LOG=debug ldash
//!
//! # Module-specific filtering
//! LDASH_LOG=landing_dashboard::gold=trace,warn ldash
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "LDASH_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Standard error, for plain CLI commands.
    Stderr,
    /// Append to a file, for the full-screen dashboard.
    File(&'a Path),
}

/// Builds the filter from `LDASH_LOG` or the configured level.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the global tracing subscriber.
///
/// A second call is a no-op. Fails only when the log file cannot be opened.
pub fn init(level: LogLevel, target: LogTarget<'_>) -> std::io::Result<()> {
    let filter = build_filter(level);
    match target {
        LogTarget::Stderr => {
            let _ = fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                xdg::ensure_dir(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}
