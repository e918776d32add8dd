//! Platform-aware path resolution for landing-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/landing-dashboard` or `~/.config/landing-dashboard`
//! - Data (store): `$XDG_DATA_HOME/landing-dashboard` or `~/.local/share/landing-dashboard`
//! - State (logs): `$XDG_STATE_HOME/landing-dashboard` or `~/.local/state/landing-dashboard`
//!
//! On **macOS**, the XDG env vars still win; otherwise config and data live
//! under `~/Library/Application Support` and state under `~/Library/Logs`.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "landing-dashboard";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn from_env_or(var: &str, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
    match std::env::var_os(var) {
        Some(v) if !v.is_empty() => PathBuf::from(v).join(APP_NAME),
        _ => fallback().join(APP_NAME),
    }
}

/// Returns the configuration directory.
pub fn config_dir() -> PathBuf {
    from_env_or("XDG_CONFIG_HOME", platform_config_dir)
}

fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory holding the store file.
pub fn data_dir() -> PathBuf {
    from_env_or("XDG_DATA_HOME", platform_data_dir)
}

fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/share")
    }
}

/// Returns the default store file path.
pub fn storage_path() -> PathBuf {
    data_dir().join("storage.json")
}

/// Returns the state directory holding log files.
pub fn state_dir() -> PathBuf {
    from_env_or("XDG_STATE_HOME", platform_state_dir)
}

fn platform_state_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library/Logs")
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/state")
    }
}

/// Returns the default TUI log file path.
pub fn log_path() -> PathBuf {
    state_dir().join("ldash.log")
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}
