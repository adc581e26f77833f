use crate::coordinator::view::Column;
use crate::library::asset::{AssetId, AssetKind};

/// Actions produced by TUI components.
///
/// Each component's `handle_key_event` returns an Action,
/// and the App turns it into a coordinator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No operation -- event was handled but no further action needed.
    Noop,
    /// Quit the TUI application.
    Quit,
    /// Sort by the given column.
    Sort(Column),
    /// Ask to delete the row at the given index.
    RequestDelete(usize),
    /// Confirm the pending delete.
    ConfirmDelete,
    /// Close the confirmation modal without deleting.
    CancelDelete,
    /// Toggle the lock flag of an asset.
    ToggleLock(AssetId),
    /// Close the status alert.
    DismissAlert,
    /// Add or remove one asset type from the filter.
    ToggleFilter(AssetKind),
    /// Show every asset type again.
    ClearFilters,
    /// Fetch the asset list again.
    Refresh,
}
