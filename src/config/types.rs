use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Verbosity level controlling tracing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (info level)
    Normal,
    /// Verbose output (debug level)
    Verbose,
    /// Maximum output (trace level)
    Trace,
}

impl From<(bool, u8)> for Verbosity {
    /// Convert from (quiet_flag, verbose_count) to Verbosity.
    ///
    /// - quiet=true -> Quiet (regardless of verbose count)
    /// - verbose=0  -> Normal
    /// - verbose=1  -> Verbose
    /// - verbose=2+ -> Trace
    fn from((quiet, verbose_count): (bool, u8)) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            match verbose_count {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

impl Verbosity {
    /// Return the tracing filter string for this verbosity level.
    pub fn as_tracing_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

/// The course whose assets are being managed. Sent along with every
/// delete and lock request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseContext {
    pub id: String,
    pub name: String,
    /// Prefix for thumbnail references when building preview URLs.
    pub base_url: String,
}

impl Default for CourseContext {
    fn default() -> Self {
        Self {
            id: "demo".into(),
            name: "Demo Course".into(),
            base_url: String::new(),
        }
    }
}

/// Contents of `config.toml`. Every field has a default, so a missing or
/// partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub course: CourseContext,
    /// Upper bound on any dispatched delete or lock request.
    pub dispatch_timeout_secs: u64,
    pub tick_rate_ms: u64,
    pub render_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            course: CourseContext::default(),
            dispatch_timeout_secs: 30,
            tick_rate_ms: 250,
            render_rate_ms: 50,
        }
    }
}

impl AppConfig {
    /// Load `config_dir/config.toml`, or defaults if it does not exist.
    pub fn load(config_dir: &Path) -> Result<Self, AssetError> {
        let path = config_dir.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn to_toml(&self) -> Result<String, AssetError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn render_rate(&self) -> Duration {
        Duration::from_millis(self.render_rate_ms)
    }
}
