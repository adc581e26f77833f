//! Platform-specific config and data directory helpers.
//!
//! Uses the `dirs` crate to resolve platform-appropriate directories:
//! - Linux:   `~/.config/assetdesk/` (config), `~/.local/share/assetdesk/` (data)
//! - Windows: `%APPDATA%\assetdesk\` (config and data)
//! - macOS:   `~/Library/Application Support/assetdesk/` (both)

use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Get the assetdesk config directory, creating it if needed.
pub fn config_dir() -> Result<PathBuf, AssetError> {
    let base = dirs::config_dir()
        .ok_or_else(|| AssetError::Config("Could not determine config directory".into()))?;
    ensure_dir(base.join("assetdesk"))
}

/// Resolve the data directory holding `library.json`.
///
/// An explicit `--library` directory wins over the platform default.
pub fn data_dir(explicit: Option<&Path>) -> Result<PathBuf, AssetError> {
    match explicit {
        Some(dir) => ensure_dir(dir.to_path_buf()),
        None => {
            let base = dirs::data_dir()
                .ok_or_else(|| AssetError::Config("Could not determine data directory".into()))?;
            ensure_dir(base.join("assetdesk"))
        }
    }
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf, AssetError> {
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
