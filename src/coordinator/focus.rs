//! Identity-keyed focus handles.

use std::collections::{HashMap, HashSet};

use crate::library::asset::{Asset, AssetId};

/// Handle to a row's delete control. Opaque outside the coordinator apart
/// from the asset it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlHandle {
    asset: AssetId,
}

impl ControlHandle {
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }
}

/// Where keyboard focus should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Control(ControlHandle),
    StatusAlert,
    /// The asset list container, used when no row is left to focus.
    Container,
}

/// Map from asset id to its control handle. Keyed by identity rather than
/// row position, since positions shift under sorting and deletion.
#[derive(Debug, Default)]
pub struct FocusRegistry {
    handles: HashMap<AssetId, ControlHandle>,
}

impl FocusRegistry {
    pub fn register(&mut self, id: &AssetId) -> ControlHandle {
        self.handles
            .entry(id.clone())
            .or_insert_with(|| ControlHandle { asset: id.clone() })
            .clone()
    }

    pub fn get(&self, id: &AssetId) -> Option<&ControlHandle> {
        self.handles.get(id)
    }

    /// Register every row and drop handles for assets no longer listed.
    pub fn sync(&mut self, assets: &[Asset]) {
        let live: HashSet<&AssetId> = assets.iter().map(|a| &a.id).collect();
        self.handles.retain(|id, _| live.contains(id));
        for asset in assets {
            self.register(&asset.id);
        }
    }

    /// Focus target for an asset's control, or the container if the asset
    /// has no registered row.
    pub fn target_for(&self, id: &AssetId) -> FocusTarget {
        self.get(id)
            .cloned()
            .map(FocusTarget::Control)
            .unwrap_or(FocusTarget::Container)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }
}
