//! Centralized configuration paths for guarded-input
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/guarded-input/`
//! - Windows: `%APPDATA%\guarded-input\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "guarded-input";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "guarded-input.log";

/// Base config directory for guarded-input
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/guarded-input`
///   - Else: `~/.config/guarded-input`
///
/// Windows:
///   - `%APPDATA%\guarded-input`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/guarded-input/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/guarded-input/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Most recent log file in the logs dir (e.g. `guarded-input.log.2026-10-17`).
///
/// Falls back to the undated name when no rotated file exists yet.
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;
    Some(newest_log_in(&logs_dir).unwrap_or_else(|| logs_dir.join(LOG_FILE_PREFIX)))
}

fn newest_log_in(dir: &Path) -> Option<PathBuf> {
    let mut log_files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(LOG_FILE_PREFIX))
                .unwrap_or(false)
        })
        .collect();

    // YYYY-MM-DD suffixes sort naturally, newest first
    log_files.sort_by(|a, b| b.cmp(a));
    log_files.into_iter().next()
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
