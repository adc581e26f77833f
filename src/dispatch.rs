//! Operation dispatcher.
//!
//! Executes the commands the panel emits. Local commands (sort, filters,
//! status clearing) apply to the store immediately. Remote commands mark the
//! store as pending, run on a spawned tokio task with a timeout, and come back
//! as a [`Completion`] through the channel returned by [`Dispatcher::new`].
//! The event loop applies completions to the store; nothing is returned to
//! the caller directly.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::types::CourseContext;
use crate::error::AssetError;
use crate::library::asset::{Asset, AssetId, AssetKind, SortParams};
use crate::library::store::AssetStore;
use crate::service::AssetService;

/// Requests the panel can make of the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadAssets { course: CourseContext },
    DeleteAsset { id: AssetId, course: CourseContext },
    ToggleLock { asset: Asset, course: CourseContext },
    UpdateSort(SortParams),
    UpdateFilters(BTreeSet<AssetKind>),
    ClearStatus,
}

/// Result of a remote operation, delivered back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Loaded {
        generation: u64,
        result: Result<Vec<Asset>, String>,
    },
    Deleted {
        id: AssetId,
        result: Result<(), String>,
    },
    LockToggled {
        id: AssetId,
        result: Result<bool, String>,
    },
}

impl Completion {
    /// Write this result into the store.
    pub fn apply(self, store: &mut AssetStore) {
        match self {
            Completion::Loaded { generation, result } => store.fetch_finished(generation, result),
            Completion::Deleted { id, result } => store.delete_finished(&id, result),
            Completion::LockToggled { id, result } => store.lock_finished(&id, result),
        }
    }
}

pub struct Dispatcher<S> {
    service: Arc<S>,
    timeout: Duration,
    tx: mpsc::UnboundedSender<Completion>,
}

impl<S: AssetService> Dispatcher<S> {
    /// Create a dispatcher and the receiver its completions arrive on.
    pub fn new(service: S, timeout: Duration) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            service: Arc::new(service),
            timeout,
            tx,
        };
        (dispatcher, rx)
    }

    /// Execute a command. Must be called from within a tokio runtime.
    pub fn dispatch(&self, command: Command, store: &mut AssetStore) {
        match command {
            Command::UpdateSort(sort) => {
                tracing::debug!(key = %sort.key, direction = %sort.direction, "Sort updated");
                store.update_sort(sort);
            }
            Command::UpdateFilters(types) => {
                tracing::debug!(?types, "Type filter updated");
                store.update_filters(types);
            }
            Command::ClearStatus => store.clear_status(),
            Command::LoadAssets { course } => {
                let generation = store.fetch_requested();
                tracing::debug!(course = %course.id, generation, "Dispatching asset fetch");
                let service = Arc::clone(&self.service);
                let limit = self.timeout;
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = with_timeout(limit, service.list_assets(course)).await;
                    if let Err(reason) = &result {
                        tracing::warn!(%reason, "Asset fetch failed");
                    }
                    if tx.send(Completion::Loaded { generation, result }).is_err() {
                        tracing::debug!("Completion receiver closed; dropping asset list");
                    }
                });
            }
            Command::DeleteAsset { id, course } => {
                tracing::info!(asset = %id, "Dispatching delete");
                store.delete_requested(&id);
                let service = Arc::clone(&self.service);
                let limit = self.timeout;
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result =
                        with_timeout(limit, service.delete_asset(id.clone(), course)).await;
                    if let Err(reason) = &result {
                        tracing::warn!(asset = %id, %reason, "Delete failed");
                    }
                    if tx.send(Completion::Deleted { id, result }).is_err() {
                        tracing::debug!("Completion receiver closed; dropping delete result");
                    }
                });
            }
            Command::ToggleLock { asset, course } => {
                let id = asset.id.clone();
                let target = !asset.locked;
                tracing::info!(asset = %id, locked = target, "Dispatching lock toggle");
                store.lock_requested(&id);
                let service = Arc::clone(&self.service);
                let limit = self.timeout;
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result =
                        with_timeout(limit, service.set_locked(id.clone(), target, course)).await;
                    if let Err(reason) = &result {
                        tracing::warn!(asset = %id, %reason, "Lock toggle failed");
                    }
                    if tx.send(Completion::LockToggled { id, result }).is_err() {
                        tracing::debug!("Completion receiver closed; dropping lock result");
                    }
                });
            }
        }
    }
}

/// Run `fut` with an upper bound; a timeout is reported as a failure.
async fn with_timeout<T>(
    limit: Duration,
    fut: impl std::future::Future<Output = Result<T, AssetError>>,
) -> Result<T, String> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(_) => Err(AssetError::Timeout { limit }.to_string()),
    }
}
