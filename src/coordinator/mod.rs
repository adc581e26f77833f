//! Asset list interaction coordinator.
//!
//! Owns sort requests, the delete-confirmation workflow, lock-toggle
//! requests, status alert reconciliation and focus restoration. Every
//! operation returns [`Effect`]s for the caller to execute; the coordinator
//! itself never touches the store or the dispatcher. Results of dispatched
//! operations are picked up by [`ListCoordinator::observe`], which the event
//! loop calls before each render.

pub mod alert;
pub mod focus;
pub mod view;
pub mod workflow;

use std::collections::BTreeSet;

use crate::config::types::CourseContext;
use crate::dispatch::Command;
use crate::error::AssetError;
use crate::library::asset::{Asset, AssetId, AssetKind, Direction, Loading, SortParams};
use crate::library::store::AssetStore;

use alert::derive_alert;
use focus::{FocusRegistry, FocusTarget};
use view::{Column, ColumnView, DeleteControl, LockControl, ModalView, PanelView, Preview, RowView, TableView};
use workflow::{StepContext, Workflow, WorkflowEvent};

/// Something the caller must do on the coordinator's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Dispatch(Command),
    Focus(FocusTarget),
}

pub struct ListCoordinator {
    workflow: Workflow,
    registry: FocusRegistry,
    course: CourseContext,
    /// Highest status sequence number that already drove a transition.
    consumed_seq: u64,
}

impl ListCoordinator {
    pub fn new(course: CourseContext) -> Self {
        Self {
            workflow: Workflow::Idle,
            registry: FocusRegistry::default(),
            course,
            consumed_seq: 0,
        }
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn registry(&self) -> &FocusRegistry {
        &self.registry
    }

    pub fn modal_open(&self) -> bool {
        self.workflow.modal_open()
    }

    pub fn status_alert_open(&self) -> bool {
        self.workflow.status_alert_open()
    }

    /// Same column flips the direction; a new column starts descending.
    /// Columns that do not sort produce nothing.
    pub fn request_sort(&self, column: Column, store: &AssetStore) -> Vec<Effect> {
        let Some(key) = column.sort_key() else {
            return Vec::new();
        };
        let current = store.params().sort;
        let direction = if current.key == key {
            current.direction.flipped()
        } else {
            Direction::Desc
        };
        vec![Effect::Dispatch(Command::UpdateSort(SortParams { key, direction }))]
    }

    pub fn toggle_type_filter(&self, kind: AssetKind, store: &AssetStore) -> Vec<Effect> {
        let mut types: BTreeSet<AssetKind> = store.params().types.clone();
        if !types.remove(&kind) {
            types.insert(kind);
        }
        vec![Effect::Dispatch(Command::UpdateFilters(types))]
    }

    pub fn clear_filters(&self, store: &AssetStore) -> Vec<Effect> {
        if store.params().types.is_empty() {
            return Vec::new();
        }
        vec![Effect::Dispatch(Command::UpdateFilters(BTreeSet::new()))]
    }

    /// Open the confirmation modal for the row at `index`.
    pub fn request_delete(
        &mut self,
        index: usize,
        store: &AssetStore,
    ) -> Result<Vec<Effect>, AssetError> {
        let assets = store.assets();
        let asset = assets
            .get(index)
            .cloned()
            .ok_or(AssetError::RowOutOfRange {
                index,
                len: assets.len(),
            })?;
        self.registry.sync(assets);
        let refocus = self.registry.target_for(&asset.id);
        self.apply(
            WorkflowEvent::RequestDelete {
                asset,
                index,
                refocus,
            },
            store,
        )
    }

    pub fn cancel_delete(&mut self, store: &AssetStore) -> Result<Vec<Effect>, AssetError> {
        self.apply(WorkflowEvent::Cancel, store)
    }

    pub fn confirm_delete(&mut self, store: &AssetStore) -> Result<Vec<Effect>, AssetError> {
        self.apply(WorkflowEvent::Confirm, store)
    }

    pub fn dismiss_alert(&mut self, store: &AssetStore) -> Result<Vec<Effect>, AssetError> {
        self.apply(WorkflowEvent::Dismiss, store)
    }

    pub fn request_lock_toggle(
        &self,
        id: &AssetId,
        store: &AssetStore,
    ) -> Result<Vec<Effect>, AssetError> {
        let asset = store
            .get(id)
            .ok_or_else(|| AssetError::AssetNotFound { id: id.to_string() })?;
        if asset.is_loading(Loading::Lock) {
            return Err(AssetError::LockPending {
                name: asset.display_name.clone(),
            });
        }
        Ok(vec![Effect::Dispatch(Command::ToggleLock {
            asset: asset.clone(),
            course: self.course.clone(),
        })])
    }

    /// Feed the store's latest status to the workflow, once per status.
    pub fn observe(&mut self, store: &AssetStore) -> Result<Vec<Effect>, AssetError> {
        self.registry.sync(store.assets());
        match store.status() {
            Some(status) if status.seq > self.consumed_seq => {
                self.apply(WorkflowEvent::Observed(status.clone()), store)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Describe the panel for the current store contents.
    pub fn view(&mut self, store: &AssetStore) -> PanelView {
        if !store.is_loaded() {
            return PanelView::Loading;
        }
        self.registry.sync(store.assets());

        let sort = store.params().sort;
        let columns = Column::ALL
            .iter()
            .map(|&column| ColumnView {
                column,
                label: column.label(),
                sortable: column.sort_key().is_some(),
                hide_header: column.hide_header(),
                sorted: (column.sort_key() == Some(sort.key)).then_some(sort.direction),
            })
            .collect();

        let mut rows = Vec::with_capacity(store.assets().len());
        for asset in store.assets() {
            rows.push(self.row(asset));
        }

        let modal = match &self.workflow {
            Workflow::ConfirmPending { asset, .. } => Some(ModalView::for_asset(&asset.display_name)),
            _ => None,
        };
        let alert = self
            .status_alert_open()
            .then(|| derive_alert(store.status(), self.workflow.deleted_asset()));

        PanelView::Ready {
            table: TableView { columns, rows },
            modal,
            alert,
        }
    }

    fn row(&mut self, asset: &Asset) -> RowView {
        let name = &asset.display_name;
        let preview = match &asset.thumbnail {
            Some(thumb) => Preview::Image {
                url: format!("{}{}", self.course.base_url, thumb),
                alt: "Description not available",
            },
            None => Preview::Unavailable,
        };
        let lock = if asset.is_loading(Loading::Lock) {
            LockControl::Busy {
                label: format!("Updating lock status for {}", name),
            }
        } else {
            let state = if asset.locked { "Locked" } else { "Unlocked" };
            LockControl::Toggle {
                locked: asset.locked,
                label: format!("{} {}", state, name),
            }
        };
        RowView {
            id: asset.id.clone(),
            display_name: name.clone(),
            content_type: asset.content_type.clone(),
            date_added: asset.date_added.format("%Y-%m-%d %H:%M").to_string(),
            preview,
            lock,
            delete: DeleteControl {
                label: format!("Delete {}", name),
                handle: self.registry.register(&asset.id),
            },
        }
    }

    fn apply(&mut self, event: WorkflowEvent, store: &AssetStore) -> Result<Vec<Effect>, AssetError> {
        let ctx = StepContext {
            assets: store.assets(),
            registry: &self.registry,
            course: &self.course,
        };
        let transition = self.workflow.step(event, &ctx)?;
        if transition.consumed {
            if let Some(status) = store.status() {
                self.consumed_seq = self.consumed_seq.max(status.seq);
            }
        }
        if transition.next != self.workflow {
            tracing::debug!(
                from = phase_name(&self.workflow),
                to = phase_name(&transition.next),
                "Workflow transition"
            );
        }
        self.workflow = transition.next;
        Ok(transition.effects)
    }
}

fn phase_name(workflow: &Workflow) -> &'static str {
    match workflow {
        Workflow::Idle => "idle",
        Workflow::ConfirmPending { .. } => "confirm_pending",
        Workflow::Deleting { .. } => "deleting",
        Workflow::ResultReported { .. } => "result_reported",
        Workflow::LockFailureReported { .. } => "lock_failure_reported",
    }
}
