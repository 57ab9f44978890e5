//! Autocomplete for the search box.
//!
//! The box keeps its own buffer, separate from the committed search text in
//! [`crate::FilterState`], so suggestions can be browsed without re-filtering the list on every
//! keystroke. A search is committed only by Enter or by picking a suggestion.
//!
//! ## States
//!
//! ```text
//!   Idle --keystroke--> Typing --buffer non-empty--> Suggesting --Enter / pick--> Committed
//!    ^                    ^                              |
//!    |                    +-------- keystroke -----------+
//!    +---- blur, once the grace window has elapsed ------+
//! ```
//!
//! Picking a suggestion races with the input losing focus: the pointer lands on the dropdown,
//! which blurs the input. Blur therefore only arms a deadline (`at + grace`); the dropdown stays
//! open and selectable until a [`SearchBox::tick`] at or after the deadline closes it. A pick
//! received before the deadline always wins. Time is passed in by the caller, so the race is
//! reproducible in tests.

use crate::constants::SUGGESTION_LIMIT;
use crate::pipeline::name_matches;
use crate::DoctorRecord;
use std::time::{Duration, Instant};

/// First [`SUGGESTION_LIMIT`] records, in list order, whose name contains `input`
/// case-insensitively. Empty input yields no suggestions.
pub fn suggest<'a>(doctors: &'a [DoctorRecord], input: &str) -> Vec<&'a DoctorRecord> {
    if input.is_empty() {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    doctors
        .iter()
        .filter(|d| name_matches(&d.name, &needle))
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    /// Not focused, nothing pending.
    Idle,
    /// Receiving keystrokes with an empty buffer.
    Typing,
    /// Dropdown open over a non-empty buffer.
    Suggesting,
    /// A search was just committed; dropdown closed.
    Committed,
}

/// State of the search input and its suggestion dropdown.
#[derive(Clone, Debug)]
pub struct SearchBox {
    buffer: String,
    phase: SearchPhase,
    close_at: Option<Instant>,
    grace: Duration,
}

impl SearchBox {
    pub fn new(grace: Duration) -> Self {
        Self {
            buffer: String::new(),
            phase: SearchPhase::Idle,
            close_at: None,
            grace,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Whether the dropdown is showing (suggestions may still be empty).
    pub fn is_open(&self) -> bool {
        self.phase == SearchPhase::Suggesting
    }

    /// Deadline armed by the last blur, if the dropdown is still waiting to close.
    pub fn close_deadline(&self) -> Option<Instant> {
        self.close_at
    }

    /// Replace the buffer without opening the dropdown (page load and navigation).
    pub fn seed(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.phase = SearchPhase::Idle;
        self.close_at = None;
    }

    /// A keystroke changed the input to `text`.
    pub fn input(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.close_at = None;
        self.phase = if self.buffer.is_empty() {
            SearchPhase::Typing
        } else {
            SearchPhase::Suggesting
        };
    }

    /// The input gained focus; re-open suggestions for a non-empty buffer.
    pub fn focus(&mut self) {
        self.close_at = None;
        if !self.buffer.is_empty() {
            self.phase = SearchPhase::Suggesting;
        }
    }

    /// The input lost focus at `at`.
    pub fn blur(&mut self, at: Instant) {
        match self.phase {
            SearchPhase::Suggesting => self.close_at = Some(at + self.grace),
            SearchPhase::Typing => self.phase = SearchPhase::Idle,
            SearchPhase::Idle | SearchPhase::Committed => {}
        }
    }

    /// Close the dropdown if a blur deadline has passed. Returns `true` if it closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.close_at {
            Some(deadline) if now >= deadline => {
                self.close_at = None;
                self.phase = SearchPhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Enter was pressed: commit the buffer verbatim and close the dropdown.
    pub fn enter(&mut self) -> String {
        self.commit();
        self.buffer.clone()
    }

    /// Pointer-down on a suggestion at `at`.
    ///
    /// Returns the name to commit, or `None` when the dropdown is closed, its blur deadline has
    /// passed, or `index` is out of range.
    pub fn pick(
        &mut self,
        suggestions: &[&DoctorRecord],
        index: usize,
        at: Instant,
    ) -> Option<String> {
        if !self.is_open() || self.close_at.is_some_and(|deadline| at >= deadline) {
            return None;
        }
        let name = suggestions.get(index)?.name.clone();
        self.buffer.clone_from(&name);
        self.commit();
        Some(name)
    }

    fn commit(&mut self) {
        self.phase = SearchPhase::Committed;
        self.close_at = None;
    }
}
