//! The view-state reducer.
//!
//! `ViewState` owns everything the widget can observe: the current query,
//! the loading flag, the error field, the last snapshot, and the user
//! preferences. Every transition is a synchronous method; the only
//! suspension point in the system (the provider call) happens between
//! `begin_*` and `complete_search`/`fail_search`, outside this module.
//! This module performs zero I/O.

use crate::format::{self, BackgroundTheme};
use crate::model::{CURRENT_LOCATION_LABEL, WeatherSnapshot};
use crate::provider::ForecastEnvelope;

const DOMAIN_FALLBACK: &str = "Something went wrong.";
const TRANSPORT_FALLBACK: &str = "Failed to fetch weather data.";

/// What a fetch is keyed by.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchTarget {
    Query(String),
    Coordinates { lat: f64, lon: f64 },
}

/// Handle for one issued fetch. Completions carry their ticket back so the
/// reducer can drop responses that a newer search has superseded.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    id: u64,
    pub target: FetchTarget,
}

/// Result of applying a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The completion was applied. `record` names the query to append to
    /// the recent-search list, when there is one.
    Applied { record: Option<String> },
    /// The ticket was superseded by a newer search; state is untouched.
    Stale,
}

/// Display preferences owned by the user, not by any fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserPreferences {
    pub fahrenheit: bool,
    pub selected_day: Option<usize>,
}

/// Observable widget state. At any time exactly one of `loading`, a
/// populated snapshot, or `error` is authoritative.
#[derive(Debug, Default)]
pub struct ViewState {
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub snapshot: Option<WeatherSnapshot>,
    pub theme: BackgroundTheme,
    pub prefs: UserPreferences,
    issued: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(fahrenheit: bool) -> Self {
        Self { prefs: UserPreferences { fahrenheit, selected_day: None }, ..Self::default() }
    }

    /// Start a text search. A blank query changes nothing and issues no
    /// fetch. Otherwise the state enters loading and the returned ticket
    /// tells the caller to invoke the provider exactly once.
    pub fn begin_search(&mut self, query: &str) -> Option<FetchTicket> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.query = trimmed.to_string();
        Some(self.begin(FetchTarget::Query(trimmed.to_string())))
    }

    /// Start a coordinate search. Same lifecycle as [`Self::begin_search`],
    /// keyed by position instead of text.
    pub fn begin_locate(&mut self, lat: f64, lon: f64) -> FetchTicket {
        self.begin(FetchTarget::Coordinates { lat, lon })
    }

    fn begin(&mut self, target: FetchTarget) -> FetchTicket {
        self.loading = true;
        self.error = None;
        self.snapshot = None;
        self.theme = BackgroundTheme::Default;
        self.prefs.selected_day = None;
        self.issued += 1;
        FetchTicket { id: self.issued, target }
    }

    /// Apply a structured envelope. Tickets superseded by a newer `begin_*`
    /// are dropped whole: last request wins.
    pub fn complete_search(
        &mut self,
        ticket: &FetchTicket,
        envelope: ForecastEnvelope,
    ) -> SearchOutcome {
        if ticket.id != self.issued {
            return SearchOutcome::Stale;
        }
        match envelope {
            ForecastEnvelope::Report(snapshot) => {
                self.theme = format::classify_background(
                    snapshot.current.weather_code,
                    snapshot.current.is_day,
                );
                let record = match &ticket.target {
                    FetchTarget::Query(query) => Some(query.clone()),
                    FetchTarget::Coordinates { .. } => {
                        // A coordinate search adopts the resolved name as
                        // its query, unless the backend fell back to the
                        // placeholder label.
                        self.query = snapshot.location_name.clone();
                        (snapshot.location_name != CURRENT_LOCATION_LABEL)
                            .then(|| snapshot.location_name.clone())
                    }
                };
                self.snapshot = Some(snapshot);
                self.error = None;
                self.loading = false;
                SearchOutcome::Applied { record }
            }
            ForecastEnvelope::Failure { message } => {
                self.error = Some(
                    message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| DOMAIN_FALLBACK.to_string()),
                );
                self.snapshot = None;
                self.loading = false;
                SearchOutcome::Applied { record: None }
            }
        }
    }

    /// Apply a transport rejection. The extracted message is shown when
    /// present and non-empty; otherwise the generic fallback.
    pub fn fail_search(&mut self, ticket: &FetchTicket, message: Option<&str>) -> SearchOutcome {
        if ticket.id != self.issued {
            return SearchOutcome::Stale;
        }
        self.error = Some(
            message
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| TRANSPORT_FALLBACK.to_string()),
        );
        self.snapshot = None;
        self.loading = false;
        SearchOutcome::Applied { record: None }
    }

    /// Select a forecast day. Out-of-range indices leave state unchanged.
    pub fn select_day(&mut self, index: usize) {
        if index < self.daily_len() {
            self.prefs.selected_day = Some(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.prefs.selected_day = None;
    }

    /// Flip the unit preference. Never triggers a re-fetch; display values
    /// are re-derived from the unchanged snapshot.
    pub fn toggle_units(&mut self) {
        self.prefs.fahrenheit = !self.prefs.fahrenheit;
    }

    /// The validated day selection: a stored index that no longer fits the
    /// current snapshot reads as no selection.
    pub fn selected_day(&self) -> Option<usize> {
        let index = self.prefs.selected_day?;
        (index < self.daily_len()).then_some(index)
    }

    fn daily_len(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.daily.len())
    }
}
