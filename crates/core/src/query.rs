//! Two-way mapping between [`FilterState`] and the URL query string.
//!
//! The page keeps its filters in the query string so a view can be bookmarked, shared and
//! revisited with back/forward. The mapping is an explicit pair of functions:
//!
//! - [`parse_query`] runs when the page mounts and after every navigation event
//! - [`serialize_query`] runs after every filter change, replacing the current history entry
//!
//! Parameters (all optional, `application/x-www-form-urlencoded`):
//!
//! | key            | value                                   |
//! |----------------|-----------------------------------------|
//! | `search`       | committed search text                   |
//! | `consultation` | `Video Consult` or `In Clinic`          |
//! | `specialties`  | comma-joined specialty names            |
//! | `sort`         | `fees` or `experience`                  |
//!
//! Empty values are omitted when serialising and read back as "unset". Values outside the known
//! vocabulary are dropped with a warning rather than failing the whole page.

use crate::constants::{
    PARAM_CONSULTATION, PARAM_SEARCH, PARAM_SORT, PARAM_SPECIALTIES, SPECIALTY_SEPARATOR,
};
use crate::FilterState;
use directory_types::Specialty;
use url::{form_urlencoded, Url};

/// Parse a query string into a [`FilterState`].
///
/// Accepts a bare query (`search=anil`), a location search (`?search=anil`) or a full URL. A
/// `#fragment` is ignored, and when a key repeats the first occurrence wins. A `?` inside a
/// bare query's values is kept.
pub fn parse_query(input: &str) -> FilterState {
    let query = match Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => {
            let without_fragment = input.split('#').next().unwrap_or_default();
            without_fragment.trim_start_matches('?').to_string()
        }
    };

    let mut search = None;
    let mut consultation = None;
    let mut specialties = None;
    let mut sort = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            PARAM_SEARCH => &mut search,
            PARAM_CONSULTATION => &mut consultation,
            PARAM_SPECIALTIES => &mut specialties,
            PARAM_SORT => &mut sort,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    let mut state = FilterState {
        search: search.unwrap_or_default(),
        ..FilterState::default()
    };

    if let Some(value) = consultation.filter(|v| !v.is_empty()) {
        match value.parse() {
            Ok(mode) => state.consultation = Some(mode),
            Err(e) => tracing::warn!("ignoring query parameter {PARAM_CONSULTATION}: {e}"),
        }
    }

    if let Some(value) = specialties.filter(|v| !v.is_empty()) {
        for name in value.split(SPECIALTY_SEPARATOR).filter(|n| !n.is_empty()) {
            match name.parse::<Specialty>() {
                Ok(specialty) => state.select_specialty(specialty),
                Err(e) => tracing::warn!("ignoring query parameter {PARAM_SPECIALTIES}: {e}"),
            }
        }
    }

    if let Some(value) = sort.filter(|v| !v.is_empty()) {
        match value.parse() {
            Ok(key) => state.sort = Some(key),
            Err(e) => tracing::warn!("ignoring query parameter {PARAM_SORT}: {e}"),
        }
    }

    state
}

/// Serialise a [`FilterState`] into a query string without the leading `?`.
///
/// Only fields that differ from the default are written, in the order `search`,
/// `consultation`, `specialties`, `sort`. The default state serialises to an empty string.
pub fn serialize_query(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !state.search.is_empty() {
        serializer.append_pair(PARAM_SEARCH, &state.search);
    }
    if let Some(mode) = state.consultation {
        serializer.append_pair(PARAM_CONSULTATION, mode.label());
    }
    if !state.specialties.is_empty() {
        let joined = state
            .specialties
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(&SPECIALTY_SEPARATOR.to_string());
        serializer.append_pair(PARAM_SPECIALTIES, &joined);
    }
    if let Some(key) = state.sort {
        serializer.append_pair(PARAM_SORT, key.as_str());
    }

    serializer.finish()
}

/// The location search (`?` plus query) for a state, or an empty string for the default state.
pub fn location_search(state: &FilterState) -> String {
    let query = serialize_query(state);
    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}

/// Access to the page location, as the browser history exposes it.
pub trait History {
    /// The current entry's search part (`?search=...`, possibly empty).
    fn location_search(&self) -> String;

    /// Overwrite the current entry without creating a new one.
    fn replace_state(&mut self, search: &str);
}

/// In-memory browser history used by the interactive session and in tests.
#[derive(Clone, Debug)]
pub struct SessionHistory {
    entries: Vec<String>,
    index: usize,
}

impl SessionHistory {
    /// A history with a single entry.
    pub fn new(initial_search: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_search.into()],
            index: 0,
        }
    }

    /// Navigate to a new entry, discarding any forward entries.
    pub fn push(&mut self, search: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(search.into());
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry. Returns `false` when already at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one entry. Returns `false` when already at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl History for SessionHistory {
    fn location_search(&self) -> String {
        self.entries[self.index].clone()
    }

    fn replace_state(&mut self, search: &str) {
        self.entries[self.index] = search.to_string();
    }
}
