//! Snapshot — the read model a presentation layer renders from.
//!
//! A snapshot is derived entirely from one CaseState through the
//! store's queries. It owns its data so it can be serialized and
//! shipped across the IPC boundary.

use crate::{
    case_builder::Case,
    case_store::{CaseState, StatusCounts, StatusFilter},
    types::CaseId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskSnapshot {
    pub visible_cases: Vec<Case>,
    pub visible_count: usize,
    pub status_counts: StatusCounts,
    pub selected_case_id: Option<CaseId>,
    pub selected_case: Option<Case>,
    pub status_filter: StatusFilter,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl DeskSnapshot {
    pub fn of(state: &CaseState) -> Self {
        let visible_cases: Vec<Case> = state.visible_cases().into_iter().cloned().collect();
        Self {
            visible_count: visible_cases.len(),
            visible_cases,
            status_counts: state.status_counts(),
            selected_case_id: state.selected_case_id,
            selected_case: state.selected_case().cloned(),
            status_filter: state.status_filter,
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }
}
