use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Asset already exists: {id}")]
    AssetExists { id: String },

    #[error("Asset not found: {id}")]
    AssetNotFound { id: String },

    #[error("No asset at row {index} (list has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Another delete is already in progress")]
    WorkflowBusy,

    #[error("Lock update already pending for {name}")]
    LockPending { name: String },

    #[error("Operation timed out after {limit:?}")]
    Timeout { limit: Duration },

    #[error("Asset service error: {0}")]
    Service(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AssetError {
    /// Returns a user-friendly suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            AssetError::FileNotFound { .. } => {
                Some("Check the path exists and spelling is correct.")
            }
            AssetError::AssetExists { .. } => {
                Some("Delete the existing asset first or rename the file.")
            }
            AssetError::AssetNotFound { .. } => {
                Some("List asset ids with `assetdesk list`.")
            }
            AssetError::LockPending { .. } => {
                Some("Wait for the current lock update to finish.")
            }
            AssetError::Timeout { .. } => {
                Some("Raise `dispatch_timeout_secs` in config.toml or retry.")
            }
            AssetError::Catalog(_) => {
                Some("Check library.json in the data directory, or re-import the assets.")
            }
            AssetError::Config(_) => {
                Some("Fix or remove config.toml in the assetdesk config directory.")
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::Catalog(err.to_string())
    }
}

impl From<toml::ser::Error> for AssetError {
    fn from(err: toml::ser::Error) -> Self {
        AssetError::Config(format!("TOML serialization error: {}", err))
    }
}

impl From<toml::de::Error> for AssetError {
    fn from(err: toml::de::Error) -> Self {
        AssetError::Config(format!("Invalid config.toml: {}", err))
    }
}

impl From<tokio::task::JoinError> for AssetError {
    fn from(err: tokio::task::JoinError) -> Self {
        AssetError::Service(format!("background task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display_and_suggestion() {
        let err = AssetError::FileNotFound {
            path: PathBuf::from("/tmp/missing.png"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("File not found"));
        assert!(msg.contains("missing.png"));
        assert_eq!(
            err.suggestion(),
            Some("Check the path exists and spelling is correct.")
        );
    }

    #[test]
    fn row_out_of_range_display() {
        let err = AssetError::RowOutOfRange { index: 5, len: 3 };
        let msg = format!("{}", err);
        assert!(msg.contains("row 5"));
        assert!(msg.contains("3 rows"));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn asset_not_found_suggestion() {
        let err = AssetError::AssetNotFound {
            id: "asset-v1:demo+type@asset+block@a.png".into(),
        };
        assert!(format!("{}", err).contains("block@a.png"));
        assert_eq!(err.suggestion(), Some("List asset ids with `assetdesk list`."));
    }

    #[test]
    fn timeout_suggestion_mentions_config_key() {
        let err = AssetError::Timeout {
            limit: Duration::from_secs(30),
        };
        assert!(format!("{}", err).contains("30s"));
        assert!(err.suggestion().unwrap().contains("dispatch_timeout_secs"));
    }

    #[test]
    fn io_error_no_suggestion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file gone");
        let err: AssetError = io_err.into();
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn json_error_maps_to_catalog() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: AssetError = json_err.into();
        match err {
            AssetError::Catalog(_) => {}
            other => panic!("Expected Catalog variant, got: {:?}", other),
        }
    }

    #[test]
    fn toml_error_maps_to_config() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: AssetError = toml_err.into();
        let msg = format!("{}", err);
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("config.toml"));
    }
}
