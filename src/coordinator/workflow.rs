//! Delete-confirmation workflow as an explicit state machine.
//!
//! `Idle -> ConfirmPending -> Deleting -> ResultReported -> Idle`, plus
//! `LockFailureReported` for lock failures surfaced while no delete is in
//! progress. The confirmation modal is open only in `ConfirmPending` and the
//! status alert only in the reporting states, so both can never be open at
//! once.

use super::focus::{FocusRegistry, FocusTarget};
use super::Effect;
use crate::config::types::CourseContext;
use crate::dispatch::Command;
use crate::error::AssetError;
use crate::library::asset::Asset;
use crate::library::store::{OperationStatus, StatusKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Workflow {
    Idle,
    ConfirmPending {
        asset: Asset,
        index: usize,
        refocus: FocusTarget,
    },
    Deleting {
        asset: Asset,
        index: usize,
    },
    ResultReported {
        asset: Asset,
        index: usize,
        outcome: DeleteOutcome,
    },
    LockFailureReported {
        asset: Asset,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    RequestDelete {
        asset: Asset,
        index: usize,
        refocus: FocusTarget,
    },
    Cancel,
    Confirm,
    /// A status the coordinator has not consumed yet.
    Observed(OperationStatus),
    Dismiss,
}

/// Read-only inputs a transition may consult.
pub struct StepContext<'a> {
    /// Visible assets, in display order.
    pub assets: &'a [Asset],
    pub registry: &'a FocusRegistry,
    pub course: &'a CourseContext,
}

#[derive(Debug, PartialEq)]
pub struct Transition {
    pub next: Workflow,
    pub effects: Vec<Effect>,
    /// The observed status drove this transition and must not drive another.
    pub consumed: bool,
}

impl Transition {
    fn to(next: Workflow, effects: Vec<Effect>) -> Self {
        Self {
            next,
            effects,
            consumed: false,
        }
    }
}

impl Workflow {
    pub fn modal_open(&self) -> bool {
        matches!(self, Workflow::ConfirmPending { .. })
    }

    pub fn status_alert_open(&self) -> bool {
        matches!(
            self,
            Workflow::Deleting { .. }
                | Workflow::ResultReported { .. }
                | Workflow::LockFailureReported { .. }
        )
    }

    /// Asset whose name the delete alert reports.
    pub fn deleted_asset(&self) -> Option<&Asset> {
        match self {
            Workflow::Deleting { asset, .. } | Workflow::ResultReported { asset, .. } => {
                Some(asset)
            }
            _ => None,
        }
    }

    /// Compute the next state and its effects. Events that do not apply to
    /// the current state leave it unchanged with no effects.
    pub fn step(&self, event: WorkflowEvent, ctx: &StepContext<'_>) -> Result<Transition, AssetError> {
        let unchanged = || Transition::to(self.clone(), Vec::new());

        let transition = match (self, event) {
            (
                Workflow::Idle,
                WorkflowEvent::RequestDelete {
                    asset,
                    index,
                    refocus,
                },
            ) => Transition::to(
                Workflow::ConfirmPending {
                    asset,
                    index,
                    refocus,
                },
                Vec::new(),
            ),
            (_, WorkflowEvent::RequestDelete { .. }) => return Err(AssetError::WorkflowBusy),

            (Workflow::ConfirmPending { refocus, .. }, WorkflowEvent::Cancel) => {
                Transition::to(Workflow::Idle, vec![Effect::Focus(refocus.clone())])
            }

            (Workflow::ConfirmPending { asset, index, .. }, WorkflowEvent::Confirm) => {
                Transition::to(
                    Workflow::Deleting {
                        asset: asset.clone(),
                        index: *index,
                    },
                    vec![
                        Effect::Dispatch(Command::DeleteAsset {
                            id: asset.id.clone(),
                            course: ctx.course.clone(),
                        }),
                        Effect::Focus(FocusTarget::StatusAlert),
                    ],
                )
            }

            (Workflow::Deleting { asset, index }, WorkflowEvent::Observed(status))
                if status.is_about(&asset.id) =>
            {
                let outcome = match status.kind {
                    StatusKind::DeleteSucceeded => Some(DeleteOutcome::Deleted),
                    StatusKind::DeleteFailed => Some(DeleteOutcome::Failed),
                    _ => None,
                };
                match outcome {
                    Some(outcome) => Transition {
                        next: Workflow::ResultReported {
                            asset: asset.clone(),
                            index: *index,
                            outcome,
                        },
                        effects: Vec::new(),
                        consumed: true,
                    },
                    None => unchanged(),
                }
            }

            (Workflow::Idle, WorkflowEvent::Observed(status))
                if status.kind == StatusKind::LockToggleFailed =>
            {
                match status.subject {
                    Some(asset) => Transition {
                        next: Workflow::LockFailureReported { asset },
                        effects: vec![Effect::Focus(FocusTarget::StatusAlert)],
                        consumed: true,
                    },
                    None => unchanged(),
                }
            }

            (Workflow::LockFailureReported { .. }, WorkflowEvent::Observed(status))
                if status.kind == StatusKind::LockToggleFailed =>
            {
                match status.subject {
                    Some(asset) => Transition {
                        next: Workflow::LockFailureReported { asset },
                        effects: Vec::new(),
                        consumed: true,
                    },
                    None => unchanged(),
                }
            }

            (Workflow::ResultReported { asset, index, outcome }, WorkflowEvent::Dismiss) => {
                let target = match outcome {
                    DeleteOutcome::Deleted => focus_after_delete(*index, ctx),
                    DeleteOutcome::Failed => ctx.registry.target_for(&asset.id),
                };
                dismissed(target)
            }
            (Workflow::Deleting { asset, .. }, WorkflowEvent::Dismiss)
            | (Workflow::LockFailureReported { asset }, WorkflowEvent::Dismiss) => {
                dismissed(ctx.registry.target_for(&asset.id))
            }

            _ => unchanged(),
        };
        Ok(transition)
    }
}

fn dismissed(target: FocusTarget) -> Transition {
    Transition {
        next: Workflow::Idle,
        effects: vec![
            Effect::Dispatch(Command::ClearStatus),
            Effect::Focus(target),
        ],
        consumed: true,
    }
}

/// Focus target once the asset at `index` has been removed: the row above
/// it, or the new first row when the first row was deleted.
fn focus_after_delete(index: usize, ctx: &StepContext<'_>) -> FocusTarget {
    if ctx.assets.is_empty() {
        return FocusTarget::Container;
    }
    let row = index.saturating_sub(1).min(ctx.assets.len() - 1);
    ctx.registry.target_for(&ctx.assets[row].id)
}
