//! The desk engine — single owner of the case state.
//!
//! LOAD LIFECYCLE (fixed order):
//!   1. dispatch StartLoad
//!   2. await the source's fetch (the only suspension point)
//!   3. dispatch LoadSucceeded(built cases) or LoadFailed(message)
//!
//! RULES:
//!   - Every state change goes through dispatch(); nothing else writes state.
//!   - dispatch() is synchronous, so a transition is never observed half-done.
//!   - A failed load never clears the previous cases.
//!   - Reload does not touch the status filter.
//!   - The event log keeps the newest EVENT_LOG_CAPACITY entries; older
//!     entries are dropped, so a long session runs in bounded memory.

use crate::{
    case_builder::{build_all, Case},
    case_store::{CaseState, StatusFilter},
    command::{reduce, CaseAction},
    config::DeskConfig,
    error::DeskResult,
    event::{DeskEvent, EventLogEntry},
    snapshot::DeskSnapshot,
    source::{CaseSource, HttpCaseSource},
    types::{CaseId, Seq},
};
use chrono::Utc;
use std::collections::VecDeque;

pub const EVENT_LOG_CAPACITY: usize = 256;

pub struct CaseDesk {
    state: CaseState,
    source: Box<dyn CaseSource>,
    event_log: VecDeque<EventLogEntry>,
    next_seq: Seq,
}

impl CaseDesk {
    pub fn new(source: Box<dyn CaseSource>) -> Self {
        Self {
            state: CaseState::new(),
            source,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            next_seq: 1,
        }
    }

    /// Build a desk wired to the configured HTTP endpoint.
    pub fn from_config(config: &DeskConfig) -> DeskResult<Self> {
        let mut desk = CaseDesk::new(Box::new(HttpCaseSource::new(config.endpoint.clone())));
        if config.initial_filter != StatusFilter::All {
            desk.dispatch(CaseAction::SetStatusFilter {
                filter: config.initial_filter,
            })?;
        }
        Ok(desk)
    }

    pub fn state(&self) -> &CaseState {
        &self.state
    }

    pub fn snapshot(&self) -> DeskSnapshot {
        DeskSnapshot::of(&self.state)
    }

    /// Newest EVENT_LOG_CAPACITY entries, oldest first.
    pub fn event_log(&self) -> &VecDeque<EventLogEntry> {
        &self.event_log
    }

    pub fn source(&self) -> &dyn CaseSource {
        self.source.as_ref()
    }

    /// Swap the fetch collaborator. State is kept.
    pub fn replace_source(&mut self, source: Box<dyn CaseSource>) {
        self.source = source;
    }

    /// Apply one action and record the events it produced.
    pub fn dispatch(&mut self, action: CaseAction) -> DeskResult<()> {
        let kind = action.kind();
        let selected_before = self.state.selected_case_id;
        log::debug!("dispatch {}", kind.name());

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        for event in DeskEvent::for_transition(kind, selected_before, &self.state) {
            self.record(&event)?;
        }
        Ok(())
    }

    /// Fetch a fresh batch and settle it into state.
    /// Load failures land in `state().error`; only event-log
    /// serialization can make this return Err.
    pub async fn reload(&mut self) -> DeskResult<()> {
        self.dispatch(CaseAction::StartLoad)?;
        log::info!("Loading cases from {}", self.source.describe());
        let result = self.source.fetch_raw_records().await;
        self.settle(result.map(|records| build_all(&records)))
    }

    /// Second half of the load lifecycle, for hosts that run the fetch
    /// themselves.
    pub fn settle(&mut self, result: DeskResult<Vec<Case>>) -> DeskResult<()> {
        match result {
            Ok(cases) => {
                log::info!("Loaded {} cases", cases.len());
                self.dispatch(CaseAction::LoadSucceeded { cases })
            }
            Err(e) => {
                log::warn!("Case load failed: {e}");
                self.dispatch(CaseAction::LoadFailed {
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn select_case(&mut self, case_id: CaseId) -> DeskResult<()> {
        self.dispatch(CaseAction::SelectCase { case_id })
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) -> DeskResult<()> {
        self.dispatch(CaseAction::SetStatusFilter { filter })
    }

    fn record(&mut self, event: &DeskEvent) -> DeskResult<()> {
        let entry = EventLogEntry {
            seq: self.next_seq,
            recorded_at: Utc::now(),
            event_type: event.type_name().to_string(),
            payload: serde_json::to_string(event)?,
        };
        self.next_seq += 1;
        if self.event_log.len() == EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(entry);
        Ok(())
    }
}
