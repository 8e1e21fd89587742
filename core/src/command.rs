use crate::{
    case_builder::Case,
    case_store::{CaseState, StatusFilter},
    types::CaseId,
};
use serde::{Deserialize, Serialize};

/// Every state transition the desk accepts.
/// Load lifecycle variants come from the desk itself; the rest are user gestures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CaseAction {
    // ── Load lifecycle ────────────────────────────
    StartLoad,
    LoadSucceeded { cases: Vec<Case> },
    LoadFailed { message: String },

    // ── User gestures ─────────────────────────────
    SelectCase { case_id: CaseId },
    SetStatusFilter { filter: StatusFilter },
}

/// Payload-free discriminant of a CaseAction.
/// Survives the action being consumed by reduce().
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    StartLoad,
    LoadSucceeded,
    LoadFailed,
    SelectCase,
    SetStatusFilter,
}

impl ActionKind {
    /// Stable name, used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartLoad => "start_load",
            Self::LoadSucceeded => "load_succeeded",
            Self::LoadFailed => "load_failed",
            Self::SelectCase => "select_case",
            Self::SetStatusFilter => "set_status_filter",
        }
    }
}

impl CaseAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::StartLoad => ActionKind::StartLoad,
            Self::LoadSucceeded { .. } => ActionKind::LoadSucceeded,
            Self::LoadFailed { .. } => ActionKind::LoadFailed,
            Self::SelectCase { .. } => ActionKind::SelectCase,
            Self::SetStatusFilter { .. } => ActionKind::SetStatusFilter,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// The single state transition function: old state + action -> new state.
pub fn reduce(state: CaseState, action: CaseAction) -> CaseState {
    match action {
        CaseAction::StartLoad => state.start_load(),
        CaseAction::LoadSucceeded { cases } => state.load_succeeded(cases),
        CaseAction::LoadFailed { message } => state.load_failed(message),
        CaseAction::SelectCase { case_id } => state.select_case(case_id),
        CaseAction::SetStatusFilter { filter } => state.set_status_filter(filter),
    }
}
