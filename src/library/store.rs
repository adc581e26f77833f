//! In-memory asset store read by the panel.
//!
//! Holds the full asset collection, the derived visible list (filtered and
//! ordered by the active list parameters) and the latest operation status.
//! Only the dispatcher mutates it.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use super::asset::{Asset, AssetId, AssetKind, Direction, ListParams, Loading, SortKey, SortParams};

/// Outcome kinds reported for dispatched operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    DeleteRequested,
    DeleteSucceeded,
    DeleteFailed,
    LockToggleRequested,
    LockToggleSucceeded,
    LockToggleFailed,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusKind::DeleteRequested => "delete_requested",
            StatusKind::DeleteSucceeded => "delete_succeeded",
            StatusKind::DeleteFailed => "delete_failed",
            StatusKind::LockToggleRequested => "lock_toggle_requested",
            StatusKind::LockToggleSucceeded => "lock_toggle_succeeded",
            StatusKind::LockToggleFailed => "lock_toggle_failed",
        };
        f.write_str(name)
    }
}

/// Latest operation status. `seq` increases with every status the store sets.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationStatus {
    pub kind: StatusKind,
    pub subject: Option<Asset>,
    pub error: Option<String>,
    pub seq: u64,
}

impl OperationStatus {
    pub fn is_about(&self, id: &AssetId) -> bool {
        self.subject.as_ref().is_some_and(|a| &a.id == id)
    }
}

/// A change applied while a fetch was outstanding.
#[derive(Debug, Clone)]
struct Settled {
    id: AssetId,
    /// Latest fetch generation dispatched when the change landed.
    generation: u64,
    change: Change,
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Deleted,
    Locked(bool),
}

#[derive(Debug, Default)]
pub struct AssetStore {
    all: Vec<Asset>,
    visible: Vec<Asset>,
    params: ListParams,
    status: Option<OperationStatus>,
    next_seq: u64,
    loaded: bool,
    load_error: Option<String>,
    fetch_generation: u64,
    applied_generation: u64,
    settled: Vec<Settled>,
}

impl AssetStore {
    pub fn new(assets: Vec<Asset>) -> Self {
        let mut store = Self::default();
        store.load(assets);
        store
    }

    /// Replace the collection with a freshly fetched one. In-flight markers
    /// of assets still listed carry over.
    pub fn load(&mut self, mut assets: Vec<Asset>) {
        for asset in &mut assets {
            if let Some(prev) = self.get(&asset.id) {
                asset.loading.extend(prev.loading.iter().copied());
            }
        }
        self.all = assets;
        self.loaded = true;
        self.load_error = None;
        self.refresh();
    }

    /// Record a failed fetch. The previous collection, if any, stays.
    pub fn load_failed(&mut self, reason: String) {
        self.loaded = true;
        self.load_error = Some(reason);
    }

    /// Note a fetch being dispatched and return its generation.
    pub fn fetch_requested(&mut self) -> u64 {
        self.fetch_generation += 1;
        self.fetch_generation
    }

    /// Apply the result of fetch `generation`.
    ///
    /// Results older than one already applied are dropped. Deletes and lock
    /// changes that landed after the fetch was dispatched are replayed over
    /// the fetched list, since the catalog may have been read before them.
    pub fn fetch_finished(&mut self, generation: u64, result: Result<Vec<Asset>, String>) {
        if generation < self.applied_generation {
            tracing::debug!(generation, applied = self.applied_generation, "Dropping stale fetch");
            return;
        }
        self.applied_generation = generation;
        match result {
            Ok(assets) => {
                let assets = self.replay_settled(generation, assets);
                self.load(assets);
            }
            Err(reason) => self.load_failed(reason),
        }
    }

    fn replay_settled(&mut self, generation: u64, mut assets: Vec<Asset>) -> Vec<Asset> {
        self.settled.retain(|s| s.generation >= generation);
        for settled in &self.settled {
            match settled.change {
                Change::Deleted => assets.retain(|a| a.id != settled.id),
                Change::Locked(locked) => {
                    if let Some(asset) = assets.iter_mut().find(|a| a.id == settled.id) {
                        asset.locked = locked;
                    }
                }
            }
        }
        if self.applied_generation == self.fetch_generation {
            self.settled.clear();
        }
        assets
    }

    /// Remember `change` if a fetch is outstanding that may predate it.
    fn settle(&mut self, id: &AssetId, change: Change) {
        if self.fetch_generation > self.applied_generation {
            self.settled.push(Settled {
                id: id.clone(),
                generation: self.fetch_generation,
                change,
            });
        }
    }

    /// False until the first fetch has resolved.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Assets currently shown, in display order.
    pub fn assets(&self) -> &[Asset] {
        &self.visible
    }

    pub fn get(&self, id: &AssetId) -> Option<&Asset> {
        self.all.iter().find(|a| &a.id == id)
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    pub fn status(&self) -> Option<&OperationStatus> {
        self.status.as_ref()
    }

    pub fn update_sort(&mut self, sort: SortParams) {
        self.params.sort = sort;
        self.refresh();
    }

    pub fn update_filters(&mut self, types: BTreeSet<AssetKind>) {
        self.params.types = types;
        self.refresh();
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn delete_requested(&mut self, id: &AssetId) {
        let subject = self.get(id).cloned();
        self.set_status(StatusKind::DeleteRequested, subject, None);
    }

    /// Apply a delete completion. The asset only leaves the list on success.
    pub fn delete_finished(&mut self, id: &AssetId, result: Result<(), String>) {
        match result {
            Ok(()) => {
                let pos = self.all.iter().position(|a| &a.id == id);
                let removed = pos.map(|pos| self.all.remove(pos));
                self.settle(id, Change::Deleted);
                self.refresh();
                self.set_status(StatusKind::DeleteSucceeded, removed, None);
            }
            Err(reason) => {
                let subject = self.get(id).cloned();
                self.set_status(StatusKind::DeleteFailed, subject, Some(reason));
            }
        }
    }

    pub fn lock_requested(&mut self, id: &AssetId) {
        self.mark_loading(id, true);
        let subject = self.get(id).cloned();
        self.set_status(StatusKind::LockToggleRequested, subject, None);
    }

    /// Apply a lock completion carrying the new lock flag on success.
    pub fn lock_finished(&mut self, id: &AssetId, result: Result<bool, String>) {
        self.mark_loading(id, false);
        match result {
            Ok(locked) => {
                if let Some(asset) = self.all.iter_mut().find(|a| &a.id == id) {
                    asset.locked = locked;
                }
                self.settle(id, Change::Locked(locked));
                self.refresh();
                let subject = self.get(id).cloned();
                self.set_status(StatusKind::LockToggleSucceeded, subject, None);
            }
            Err(reason) => {
                let subject = self.get(id).cloned();
                self.set_status(StatusKind::LockToggleFailed, subject, Some(reason));
            }
        }
    }

    fn mark_loading(&mut self, id: &AssetId, on: bool) {
        if let Some(asset) = self.all.iter_mut().find(|a| &a.id == id) {
            if on {
                asset.loading.insert(Loading::Lock);
            } else {
                asset.loading.remove(&Loading::Lock);
            }
        }
        self.refresh();
    }

    fn set_status(&mut self, kind: StatusKind, subject: Option<Asset>, error: Option<String>) {
        self.next_seq += 1;
        tracing::debug!(%kind, seq = self.next_seq, "Asset status updated");
        self.status = Some(OperationStatus {
            kind,
            subject,
            error,
            seq: self.next_seq,
        });
    }

    /// Rebuild the visible list from the collection and list parameters.
    fn refresh(&mut self) {
        let types = &self.params.types;
        let mut visible: Vec<Asset> = self
            .all
            .iter()
            .filter(|a| types.is_empty() || types.contains(&a.kind()))
            .cloned()
            .collect();
        let sort = self.params.sort;
        visible.sort_by(|a, b| {
            let ord = compare(a, b, sort.key).then_with(|| a.id.cmp(&b.id));
            match sort.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        });
        self.visible = visible;
    }
}

fn compare(a: &Asset, b: &Asset, key: SortKey) -> Ordering {
    match key {
        SortKey::DisplayName => a
            .display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase()),
        SortKey::ContentType => a.content_type.cmp(&b.content_type),
        SortKey::DateAdded => a.date_added.cmp(&b.date_added),
    }
}
