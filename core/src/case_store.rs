//! Case store: the single source of truth for what the desk shows.
//!
//! RULE: State changes only through the transition methods below.
//! Each one consumes the current state and returns the next, so a
//! state value is never observed half-updated.
//!
//! Queries are pure reads over a state value.

use crate::{
    case_builder::{Case, CaseStatus},
    error::DeskError,
    types::CaseId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many cases the visible list shows at once.
pub const MAX_VISIBLE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Review,
    Closed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Open => "OPEN",
            Self::Review => "REVIEW",
            Self::Closed => "CLOSED",
        }
    }

    /// Does a case with this status pass the filter?
    pub fn admits(&self, status: CaseStatus) -> bool {
        match self {
            Self::All => true,
            Self::Open => status == CaseStatus::Open,
            Self::Review => status == CaseStatus::Review,
            Self::Closed => status == CaseStatus::Closed,
        }
    }
}

impl From<CaseStatus> for StatusFilter {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Open => Self::Open,
            CaseStatus::Review => Self::Review,
            CaseStatus::Closed => Self::Closed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            other => other.parse::<CaseStatus>().map(Self::from),
        }
    }
}

/// Case counts per status, over every stored case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StatusCounts {
    pub open: usize,
    pub review: usize,
    pub closed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: CaseStatus) -> usize {
        match status {
            CaseStatus::Open => self.open,
            CaseStatus::Review => self.review,
            CaseStatus::Closed => self.closed,
        }
    }

    pub fn total(&self) -> usize {
        self.open + self.review + self.closed
    }

    fn bump(&mut self, status: CaseStatus) {
        match status {
            CaseStatus::Open => self.open += 1,
            CaseStatus::Review => self.review += 1,
            CaseStatus::Closed => self.closed += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseState {
    pub items: Vec<Case>,
    pub selected_case_id: Option<CaseId>,
    pub status_filter: StatusFilter,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl CaseState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Transitions ────────────────────────────────────────────

    /// A fetch started. Clears any previous error; keeps the stale list.
    pub fn start_load(mut self) -> Self {
        self.is_loading = true;
        self.error = None;
        self
    }

    /// A fetch settled with a fresh batch. Replaces the list wholesale and
    /// keeps the selection pointing at a stored case (or nothing).
    pub fn load_succeeded(mut self, cases: Vec<Case>) -> Self {
        self.is_loading = false;
        self.items = cases;
        let still_present = self
            .selected_case_id
            .is_some_and(|id| self.items.iter().any(|c| c.id == id));
        if !still_present {
            self.selected_case_id = self.items.first().map(|c| c.id);
        }
        self
    }

    /// A fetch failed. The previous list stays visible.
    pub fn load_failed(mut self, message: impl Into<String>) -> Self {
        self.is_loading = false;
        self.error = Some(message.into());
        self
    }

    /// Select a case. Not checked against `items`; `selected_case()`
    /// returns None for an id that matches nothing.
    pub fn select_case(mut self, id: CaseId) -> Self {
        self.selected_case_id = Some(id);
        self
    }

    pub fn set_status_filter(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    // ── Queries ────────────────────────────────────────────────

    /// Cases passing the filter, in stored order, capped at MAX_VISIBLE.
    pub fn visible_cases(&self) -> Vec<&Case> {
        self.items
            .iter()
            .filter(|c| self.status_filter.admits(c.status))
            .take(MAX_VISIBLE)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_cases().len()
    }

    /// Counts every stored case; the filter does not apply.
    pub fn status_counts(&self) -> StatusCounts {
        self.items.iter().fold(StatusCounts::default(), |mut acc, c| {
            acc.bump(c.status);
            acc
        })
    }

    pub fn selected_case(&self) -> Option<&Case> {
        let id = self.selected_case_id?;
        self.items.iter().find(|c| c.id == id)
    }
}
