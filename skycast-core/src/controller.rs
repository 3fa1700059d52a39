//! Orchestration around the reducer: issue a ticket, run the provider call,
//! feed the completion back, and record applied queries in the history.

use tracing::debug;

use crate::format::ClockStyle;
use crate::location::GeolocationSource;
use crate::provider::ForecastProvider;
use crate::recent::RecentSearchStore;
use crate::state::{FetchTarget, FetchTicket, SearchOutcome, ViewState};
use crate::view::DisplayView;

/// The weather widget: reducer state plus its two side-effect channels, the
/// forecast provider and the recent-search store.
#[derive(Debug)]
pub struct WeatherWidget {
    state: ViewState,
    store: RecentSearchStore,
    provider: Box<dyn ForecastProvider>,
    recent: Vec<String>,
}

impl WeatherWidget {
    pub fn new(provider: Box<dyn ForecastProvider>, store: RecentSearchStore) -> Self {
        let recent = store.load();
        Self { state: ViewState::new(), store, provider, recent }
    }

    pub fn with_units(
        provider: Box<dyn ForecastProvider>,
        store: RecentSearchStore,
        fahrenheit: bool,
    ) -> Self {
        let recent = store.load();
        Self { state: ViewState::with_units(fahrenheit), store, provider, recent }
    }

    /// Run a text search to completion. Blank queries are a no-op.
    pub async fn search(&mut self, query: &str) {
        let Some(ticket) = self.state.begin_search(query) else {
            return;
        };
        self.dispatch(ticket).await;
    }

    /// Run a position search to completion. A source failure becomes the
    /// error text directly; no fetch is issued.
    pub async fn locate(&mut self, source: &dyn GeolocationSource) {
        match source.current_position() {
            Ok((lat, lon)) => {
                let ticket = self.state.begin_locate(lat, lon);
                self.dispatch(ticket).await;
            }
            Err(err) => {
                debug!(error = %err, "position source failed");
                self.state.error = Some(err.to_string());
            }
        }
    }

    async fn dispatch(&mut self, ticket: FetchTicket) {
        let result = match &ticket.target {
            FetchTarget::Query(query) => self.provider.forecast_by_query(query).await,
            FetchTarget::Coordinates { lat, lon } => {
                self.provider.forecast_by_coordinates(*lat, *lon).await
            }
        };

        let outcome = match result {
            Ok(envelope) => self.state.complete_search(&ticket, envelope),
            Err(err) => self.state.fail_search(&ticket, err.user_message()),
        };

        if let SearchOutcome::Applied { record: Some(query) } = outcome {
            self.recent = self.store.record(&query);
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self, clock: ClockStyle) -> DisplayView {
        DisplayView::build(&self.state, clock)
    }

    pub fn recent_searches(&self) -> &[String] {
        &self.recent
    }

    pub fn toggle_units(&mut self) {
        self.state.toggle_units();
    }

    pub fn select_day(&mut self, index: usize) {
        self.state.select_day(index);
    }

    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::StaticPosition;
    use crate::model::{CurrentConditions, WeatherSnapshot};
    use crate::provider::{FetchOutcome, ForecastEnvelope, ProviderError};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct StubProvider {
        response: Result<ForecastEnvelope, ProviderError>,
    }

    impl StubProvider {
        fn report(name: &str) -> Self {
            let snapshot = WeatherSnapshot {
                location_name: name.to_string(),
                country: "US".to_string(),
                lat: 37.77,
                lon: -122.42,
                current: CurrentConditions {
                    temp: Some(15.2),
                    weather_code: Some(0),
                    is_day: true,
                    ..CurrentConditions::default()
                },
                ..WeatherSnapshot::default()
            };
            Self { response: Ok(ForecastEnvelope::Report(snapshot)) }
        }

        fn rejection(message: &str) -> Self {
            Self { response: Err(ProviderError::Rejected { message: message.to_string() }) }
        }

        fn opaque() -> Self {
            Self { response: Err(ProviderError::Opaque) }
        }
    }

    #[async_trait]
    impl ForecastProvider for StubProvider {
        async fn forecast_by_query(&self, _query: &str) -> FetchOutcome {
            clone_response(&self.response)
        }

        async fn forecast_by_coordinates(&self, _lat: f64, _lon: f64) -> FetchOutcome {
            clone_response(&self.response)
        }
    }

    fn clone_response(response: &Result<ForecastEnvelope, ProviderError>) -> FetchOutcome {
        match response {
            Ok(envelope) => Ok(envelope.clone()),
            Err(ProviderError::Rejected { message }) => {
                Err(ProviderError::Rejected { message: message.clone() })
            }
            Err(_) => Err(ProviderError::Opaque),
        }
    }

    fn store() -> (tempfile::TempDir, RecentSearchStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RecentSearchStore::with_path(dir.path().join("recent.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn successful_search_lands_in_state_and_history() {
        let (_dir, store) = store();
        let mut widget = WeatherWidget::new(Box::new(StubProvider::report("San Francisco")), store);

        widget.search("San Francisco").await;

        assert!(!widget.state().loading);
        assert!(widget.state().error.is_none());
        assert!(widget.state().snapshot.is_some());
        assert_eq!(widget.recent_searches(), ["San Francisco"]);
    }

    #[tokio::test]
    async fn blank_search_touches_nothing() {
        let (_dir, store) = store();
        let mut widget = WeatherWidget::new(Box::new(StubProvider::report("X")), store);

        widget.search("   ").await;

        assert!(!widget.state().loading);
        assert!(widget.state().snapshot.is_none());
        assert!(widget.recent_searches().is_empty());
    }

    #[tokio::test]
    async fn rejection_message_reaches_the_error_field() {
        let (_dir, store) = store();
        let mut widget = WeatherWidget::new(Box::new(StubProvider::rejection("rate limited")), store);

        widget.search("Paris").await;

        assert_eq!(widget.state().error.as_deref(), Some("rate limited"));
        assert!(widget.recent_searches().is_empty());
    }

    #[tokio::test]
    async fn opaque_failures_use_the_generic_text() {
        let (_dir, store) = store();
        let mut widget = WeatherWidget::new(Box::new(StubProvider::opaque()), store);

        widget.search("Paris").await;

        assert_eq!(widget.state().error.as_deref(), Some("Failed to fetch weather data."));
    }

    #[tokio::test]
    async fn locate_records_the_resolved_name() {
        let (_dir, store) = store();
        let mut widget = WeatherWidget::new(Box::new(StubProvider::report("Oakland")), store);

        widget.locate(&StaticPosition::new(37.8, -122.27)).await;

        assert_eq!(widget.state().query, "Oakland");
        assert_eq!(widget.recent_searches(), ["Oakland"]);
    }

    #[tokio::test]
    async fn unsupported_position_source_sets_its_error_text() {
        let (_dir, store) = store();
        let mut widget = WeatherWidget::new(Box::new(StubProvider::report("X")), store);

        widget.locate(&StaticPosition::default()).await;

        assert_eq!(
            widget.state().error.as_deref(),
            Some("Geolocation is not supported by your browser.")
        );
        assert!(!widget.state().loading);
    }

    #[tokio::test]
    async fn view_reflects_unit_toggle_without_refetch() {
        let (_dir, store) = store();
        let mut widget = WeatherWidget::new(Box::new(StubProvider::report("San Francisco")), store);

        widget.search("San Francisco").await;
        assert_eq!(widget.view(ClockStyle::TwelveHour).temperature, "15");

        widget.toggle_units();
        assert_eq!(widget.view(ClockStyle::TwelveHour).temperature, "59");
    }

    #[tokio::test]
    async fn history_survives_widget_restarts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recent.json");

        let store = RecentSearchStore::with_path(&path);
        let mut widget = WeatherWidget::new(Box::new(StubProvider::report("Paris")), store);
        widget.search("Paris").await;

        let store = RecentSearchStore::with_path(&path);
        let widget = WeatherWidget::new(Box::new(StubProvider::report("Paris")), store);
        assert_eq!(widget.recent_searches(), ["Paris"]);
    }
}
