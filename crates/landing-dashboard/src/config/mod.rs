/// Default configuration template and file creation.
pub mod default;

/// Configuration error types.
pub mod error;

/// Configuration file loader.
pub mod loader;

/// TOML configuration schema types.
pub mod schema;

/// XDG Base Directory path resolution utilities.
pub mod xdg;

use std::path::PathBuf;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::Config;

impl Config {
    /// Store file path: the configured one (tilde-expanded) or the XDG
    /// data default.
    pub fn storage_path(&self) -> PathBuf {
        if self.storage.path.trim().is_empty() {
            xdg::storage_path()
        } else {
            xdg::expand_tilde(self.storage.path.trim())
        }
    }

    /// Log file for the TUI: the configured one or the XDG state default.
    pub fn tui_log_path(&self) -> PathBuf {
        if self.logging.log_file.trim().is_empty() {
            xdg::log_path()
        } else {
            xdg::expand_tilde(self.logging.log_file.trim())
        }
    }
}
