//! Desk events, an observable record of every state transition.
//!
//! RULE: Events describe what a transition did, after the fact.
//! Nothing reads them back to decide state; the reducer alone does that.

use crate::{
    case_store::{CaseState, StatusFilter},
    command::ActionKind,
    types::{CaseId, Seq},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskEvent {
    // ── Load lifecycle ─────────────────────────────
    LoadStarted,
    CasesLoaded {
        count: usize,
    },
    SelectionRevalidated {
        from: Option<CaseId>,
        to: Option<CaseId>,
    },
    LoadFailed {
        message: String,
    },

    // ── User gestures ──────────────────────────────
    CaseSelected {
        case_id: CaseId,
    },
    FilterChanged {
        filter: StatusFilter,
    },
}

impl DeskEvent {
    /// Events produced by an action of kind `kind`, given the selection
    /// before the transition and the state after it.
    pub fn for_transition(
        kind: ActionKind,
        selected_before: Option<CaseId>,
        after: &CaseState,
    ) -> Vec<DeskEvent> {
        match kind {
            ActionKind::StartLoad => vec![DeskEvent::LoadStarted],
            ActionKind::LoadSucceeded => {
                let mut events = vec![DeskEvent::CasesLoaded {
                    count: after.items.len(),
                }];
                if selected_before != after.selected_case_id {
                    events.push(DeskEvent::SelectionRevalidated {
                        from: selected_before,
                        to: after.selected_case_id,
                    });
                }
                events
            }
            ActionKind::LoadFailed => vec![DeskEvent::LoadFailed {
                message: after.error.clone().unwrap_or_default(),
            }],
            ActionKind::SelectCase => after
                .selected_case_id
                .map(|case_id| DeskEvent::CaseSelected { case_id })
                .into_iter()
                .collect(),
            ActionKind::SetStatusFilter => vec![DeskEvent::FilterChanged {
                filter: after.status_filter,
            }],
        }
    }

    /// Stable string name, used for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            DeskEvent::LoadStarted => "load_started",
            DeskEvent::CasesLoaded { .. } => "cases_loaded",
            DeskEvent::SelectionRevalidated { .. } => "selection_revalidated",
            DeskEvent::LoadFailed { .. } => "load_failed",
            DeskEvent::CaseSelected { .. } => "case_selected",
            DeskEvent::FilterChanged { .. } => "filter_changed",
        }
    }
}

/// An event as kept in the desk's in-memory log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq: Seq,
    pub recorded_at: DateTime<Utc>,
    pub event_type: String,
    pub payload: String, // JSON-serialized DeskEvent
}
