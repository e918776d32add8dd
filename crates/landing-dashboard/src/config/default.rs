//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Landing Dashboard Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/landing-dashboard/config.toml

# ==============================================================================
# TUI
# ==============================================================================

[tui]

# Redraw tick as a human-readable duration.
# Examples: "250ms", "500ms", "1s"
tick_rate = "250ms"

# ==============================================================================
# Widgets
# ==============================================================================
#
# Panels in paint order (later entries draw on top). Listing any [[widgets]]
# entry replaces the whole built-in set.
#
#   key    - persistence key, must be unique
#   kind   - body: "clock", "gold" or "notes"
#   x, y   - default position: "center" or a literal such as "4px" or "10%"
#   width, height - default size literals; one px is one terminal cell
#
# Saved positions (after dragging in edit mode) take precedence over these.
# Run `ldash layout reset` to go back to the defaults.

[[widgets]]
key = "clock"
kind = "clock"
title = "Clock"
x = "center"
y = "1px"
width = "36px"
height = "7px"

[[widgets]]
key = "gold"
kind = "gold"
title = "Gold Rates"
x = "2px"
y = "9px"
width = "34px"
height = "10px"

[[widgets]]
key = "notes"
kind = "notes"
title = "Notes"
x = "38px"
y = "9px"
width = "38px"
height = "10px"

# ==============================================================================
# Clock
# ==============================================================================

[clock]

# The first zone provides the date and the large time.
# `tz` is an IANA zone name; `utc_offset = "+05:30"` may replace it for a
# fixed offset without daylight saving.
zones = [
  { label = "India", tz = "Asia/Kolkata" },
  { label = "France", tz = "Europe/Paris" },
  { label = "USA", tz = "America/New_York" },
]

# ==============================================================================
# Gold Rates
# ==============================================================================

[gold]

# Rates page and the relay proxy used to read it.
url = "https://www.goodreturns.in/gold-rates/chennai.html"
proxy_url = "https://api.allorigins.win/get"

# Time between fetches and per-request timeout.
refresh_interval = "5m"
timeout = "15s"

# Price display.
# grouping: "indian" (8,12,000) or "western" (812,000)
currency_symbol = "₹"
grouping = "indian"

# Shown with "Offline Mode" when a fetch fails.
[gold.fallback]
date = "Nov 23, 2025"
k22 = 7350.0
k24 = 8020.0

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Store file for layout and notes. Empty means
# $XDG_DATA_HOME/landing-dashboard/storage.json
path = ""

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Options: "error", "warn", "info", "debug", "trace"
# The LDASH_LOG environment variable overrides this.
log_level = "info"

# Log file. Empty means $XDG_STATE_HOME/landing-dashboard/ldash.log for the
# dashboard; other commands log to stderr.
log_file = ""
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Writes the default template to `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
