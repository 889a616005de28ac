// src/services/orderer.rs

//! Presentation ordering of aggregated events.

use chrono::NaiveDateTime;

use crate::models::{CanonicalEvent, EndedState};
use crate::utils::time::parse_event_time;

/// How a result list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// Ascending by time
    Keyword,
    /// Not-ended events first, each group ascending by time
    Catalog,
}

/// Sorts canonical events. Both policies are stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultOrderer;

impl ResultOrderer {
    pub fn sort(&self, events: &mut [CanonicalEvent], policy: SortPolicy) {
        match policy {
            SortPolicy::Keyword => events.sort_by_key(sort_time),
            SortPolicy::Catalog => {
                events.sort_by_key(|event| (event.ended == EndedState::Ended, sort_time(event)))
            }
        }
    }
}

/// Parsed event time; empty or malformed times sort last.
fn sort_time(event: &CanonicalEvent) -> NaiveDateTime {
    parse_event_time(&event.time).unwrap_or(NaiveDateTime::MAX)
}
