//! Render descriptions handed to the presentation layer.
//!
//! These carry only the data each surface needs; widgets live in `tui`.

use super::alert::AlertView;
use super::focus::ControlHandle;
use crate::library::asset::{AssetId, Direction, SortKey};

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ImagePreview,
    DisplayName,
    ContentType,
    DateAdded,
    DeleteAsset,
    LockAsset,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::ImagePreview,
        Column::DisplayName,
        Column::ContentType,
        Column::DateAdded,
        Column::DeleteAsset,
        Column::LockAsset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::ImagePreview => "Image Preview",
            Column::DisplayName => "Name",
            Column::ContentType => "Type",
            Column::DateAdded => "Date Added",
            Column::DeleteAsset => "Delete Asset",
            Column::LockAsset => "Lock Asset",
        }
    }

    /// The sort key behind this column, if it is sortable.
    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            Column::DisplayName => Some(SortKey::DisplayName),
            Column::ContentType => Some(SortKey::ContentType),
            Column::DateAdded => Some(SortKey::DateAdded),
            Column::ImagePreview | Column::DeleteAsset | Column::LockAsset => None,
        }
    }

    pub fn hide_header(self) -> bool {
        self.sort_key().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub column: Column,
    pub label: &'static str,
    pub sortable: bool,
    pub hide_header: bool,
    /// Direction when this column is the active sort.
    pub sorted: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Image { url: String, alt: &'static str },
    Unavailable,
}

impl Preview {
    pub fn text(&self) -> &str {
        match self {
            Preview::Image { url, .. } => url,
            Preview::Unavailable => "Preview not available",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockControl {
    Toggle { locked: bool, label: String },
    Busy { label: String },
}

impl LockControl {
    pub fn label(&self) -> &str {
        match self {
            LockControl::Toggle { label, .. } | LockControl::Busy { label } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub label: String,
    pub handle: ControlHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: AssetId,
    pub display_name: String,
    pub content_type: String,
    pub date_added: String,
    pub preview: Preview,
    pub lock: LockControl,
    pub delete: DeleteControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub body: String,
    pub warning: &'static str,
    pub confirm_label: &'static str,
    pub close_label: &'static str,
}

impl ModalView {
    pub fn for_asset(display_name: &str) -> Self {
        Self {
            title: format!("Delete {}", display_name),
            body: format!("Deleting {}", display_name),
            warning: "Any links or references to this file will no longer work.",
            confirm_label: "Yes, delete.",
            close_label: "Cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    /// The first fetch has not resolved yet.
    Loading,
    Ready {
        table: TableView,
        modal: Option<ModalView>,
        alert: Option<AlertView>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_data_columns_sort() {
        let sortable: Vec<Column> = Column::ALL
            .into_iter()
            .filter(|c| c.sort_key().is_some())
            .collect();
        assert_eq!(
            sortable,
            vec![Column::DisplayName, Column::ContentType, Column::DateAdded]
        );
        assert!(Column::DeleteAsset.hide_header());
        assert!(!Column::DateAdded.hide_header());
    }

    #[test]
    fn modal_text_names_asset() {
        let modal = ModalView::for_asset("B");
        assert_eq!(modal.title, "Delete B");
        assert_eq!(modal.body, "Deleting B");
        assert_eq!(modal.confirm_label, "Yes, delete.");
    }

    #[test]
    fn preview_fallback_text() {
        assert_eq!(Preview::Unavailable.text(), "Preview not available");
    }
}
