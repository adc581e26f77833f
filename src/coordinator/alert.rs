//! Status alert content derived from the latest operation status.

use std::fmt;

use crate::library::asset::Asset;
use crate::library::store::{OperationStatus, StatusKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Info,
    Success,
    Danger,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::Info => write!(f, "info"),
            AlertType::Success => write!(f, "success"),
            AlertType::Danger => write!(f, "danger"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub alert_type: AlertType,
    pub message: String,
}

impl AlertView {
    fn new(alert_type: AlertType, message: String) -> Self {
        Self {
            alert_type,
            message,
        }
    }
}

/// Alert content for an open alert.
///
/// Delete messages name `deleted` (the snapshot taken at confirmation) and
/// fall back to the status subject. Whatever status arrived last decides the
/// content; anything unrecognised reads as still processing.
pub fn derive_alert(status: Option<&OperationStatus>, deleted: Option<&Asset>) -> AlertView {
    let Some(status) = status else {
        return AlertView::new(AlertType::Info, "Processing".into());
    };
    let subject_name = status
        .subject
        .as_ref()
        .map(|a| a.display_name.as_str())
        .unwrap_or_default();
    let deleted_name = deleted
        .map(|a| a.display_name.as_str())
        .unwrap_or(subject_name);

    match status.kind {
        StatusKind::LockToggleFailed => AlertView::new(
            AlertType::Danger,
            format!("Failed to toggle lock for {}", subject_name),
        ),
        StatusKind::DeleteFailed => AlertView::new(
            AlertType::Danger,
            format!("Unable to delete {}.", deleted_name),
        ),
        StatusKind::DeleteSucceeded => AlertView::new(
            AlertType::Success,
            format!("{} has been deleted.", deleted_name),
        ),
        StatusKind::DeleteRequested
        | StatusKind::LockToggleRequested
        | StatusKind::LockToggleSucceeded => {
            AlertView::new(AlertType::Info, "Processing".into())
        }
    }
}
