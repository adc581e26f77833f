mod action;
mod app;
mod event;
mod terminal;
pub mod theme;
pub mod components;

use std::path::PathBuf;

use crate::config::types::AppConfig;
use crate::error::AssetError;

/// Launch the interactive asset panel.
///
/// Runs the event loop on a current-thread tokio runtime; catalog work is
/// pushed to the blocking pool by the service. Terminal is initialized with
/// alternate screen and raw mode, and restored on exit (including on panic).
pub fn launch_tui(config: AppConfig, data_dir: PathBuf) -> Result<(), AssetError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(app::run_app(config, data_dir))
}
