//! Decorated, ready-to-render projection of the widget state.
//!
//! Everything here is derived at view-build time from the raw snapshot, so a
//! unit or clock toggle changes the next build without touching stored data.

use crate::format::{self, ClockStyle, MISSING};
use crate::model::{DayForecast, HourForecast, WeatherSnapshot};
use crate::state::ViewState;

/// One forecast card, fully rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCard {
    pub day_name: String,
    pub date: String,
    pub high: String,
    pub low: String,
    pub description: String,
    pub icon_url: String,
    pub main: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
}

/// One entry of the rendered hourly strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyCard {
    pub label: String,
    pub temperature: String,
    pub icon_url: String,
    pub description: String,
}

/// The complete rendered view. Built fresh on every display pass; holds only
/// strings and flags, never raw readings.
#[derive(Debug, Clone, Default)]
pub struct DisplayView {
    pub loading: bool,
    pub error: Option<String>,
    pub theme: String,
    pub location: String,
    pub coordinates: String,
    pub temperature: String,
    pub feels_like: String,
    pub high: String,
    pub low: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
    pub description: String,
    pub icon_url: String,
    pub daily: Vec<DailyCard>,
    pub hourly: Vec<HourlyCard>,
    pub selected: Option<DailyCard>,
}

impl DisplayView {
    /// Project the state into display strings under the active preferences.
    pub fn build(state: &ViewState, clock: ClockStyle) -> Self {
        let fahrenheit = state.prefs.fahrenheit;
        let mut view = DisplayView {
            loading: state.loading,
            error: state.error.clone(),
            theme: state.theme.to_string(),
            ..DisplayView::default()
        };

        let Some(snapshot) = state.snapshot.as_ref() else {
            return view;
        };

        view.location = location_display(snapshot);
        view.coordinates = coords_display(snapshot);

        let current = &snapshot.current;
        view.temperature = format::temperature(current.temp, fahrenheit);
        view.feels_like = format::temperature(current.feels_like, fahrenheit);
        view.high = format::temperature(current.temp_max, fahrenheit);
        view.low = format::temperature(current.temp_min, fahrenheit);
        view.humidity = percent(current.humidity);
        view.wind = format::speed(current.wind_speed, fahrenheit);
        view.pressure = pressure(current.pressure);
        view.visibility = format::visibility(current.visibility, fahrenheit);
        view.sunrise = format::unix_time(current.sunrise, clock);
        view.sunset = format::unix_time(current.sunset, clock);
        view.description = current.description.clone();
        view.icon_url = format::icon_url(&current.icon);

        view.daily = snapshot.daily.iter().map(|day| decorate_daily(day, fahrenheit)).collect();
        view.hourly = snapshot
            .hourly
            .iter()
            .flatten()
            .map(|hour| decorate_hourly(hour, fahrenheit))
            .collect();
        view.selected = state.selected_day().map(|index| view.daily[index].clone());

        view
    }
}

/// Render one forecast day under the active unit preference.
pub fn decorate_daily(day: &DayForecast, fahrenheit: bool) -> DailyCard {
    DailyCard {
        day_name: day.day_name.clone(),
        date: day.date_str.clone(),
        high: format::temperature(day.temp_high, fahrenheit),
        low: format::temperature(day.temp_low, fahrenheit),
        description: day.description.clone(),
        icon_url: format::icon_url(&day.icon),
        main: day.main.clone(),
        humidity: percent(day.humidity),
        wind: format::speed(day.wind_speed, fahrenheit),
        precipitation: percent(day.pop),
    }
}

/// Render one hourly entry under the active unit preference.
pub fn decorate_hourly(hour: &HourForecast, fahrenheit: bool) -> HourlyCard {
    HourlyCard {
        label: hour.label.clone(),
        temperature: format::temperature(hour.temp, fahrenheit),
        icon_url: format::icon_url(&hour.icon),
        description: hour.description.clone(),
    }
}

/// `"Name, CC"` when a country is present, bare name otherwise.
pub fn location_display(snapshot: &WeatherSnapshot) -> String {
    if snapshot.country.is_empty() {
        snapshot.location_name.clone()
    } else {
        format!("{}, {}", snapshot.location_name, snapshot.country)
    }
}

/// Hemisphere-suffixed coordinate line. A latitude of exactly 0 reads as
/// missing coordinates.
pub fn coords_display(snapshot: &WeatherSnapshot) -> String {
    if snapshot.lat == 0.0 {
        return String::new();
    }
    let ns = if snapshot.lat >= 0.0 { "N" } else { "S" };
    let ew = if snapshot.lon >= 0.0 { "E" } else { "W" };
    format!("{:.2}°{}, {:.2}°{}", snapshot.lat.abs(), ns, snapshot.lon.abs(), ew)
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => MISSING.to_string(),
    }
}

fn pressure(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v} hPa"),
        None => MISSING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CurrentConditions;
    use crate::provider::ForecastEnvelope;

    fn sample_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "San Francisco".to_string(),
            country: "US".to_string(),
            lat: 37.77,
            lon: -122.42,
            current: CurrentConditions {
                temp: Some(15.2),
                feels_like: Some(14.1),
                temp_min: Some(12.0),
                temp_max: Some(17.5),
                humidity: Some(64.0),
                wind_speed: Some(3.6),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
                main: "Clear".to_string(),
                pressure: Some(1013.0),
                visibility: Some(10_000.0),
                sunrise: Some(47_220),
                sunset: Some(90_000),
                weather_code: Some(0),
                is_day: true,
            },
            daily: vec![
                DayForecast {
                    day_name: "Mon".to_string(),
                    date_str: "Aug 3".to_string(),
                    temp_high: Some(17.5),
                    temp_low: Some(12.0),
                    description: "clear sky".to_string(),
                    icon: "01d".to_string(),
                    main: "Clear".to_string(),
                    humidity: Some(60.0),
                    wind_speed: Some(4.0),
                    pop: Some(10.0),
                },
                DayForecast {
                    day_name: "Tue".to_string(),
                    date_str: "Aug 4".to_string(),
                    temp_high: Some(19.0),
                    temp_low: Some(13.0),
                    ..DayForecast::default()
                },
            ],
            hourly: Some(vec![HourForecast {
                temp: Some(15.2),
                icon: "01d".to_string(),
                description: "clear sky".to_string(),
                label: "2 PM".to_string(),
            }]),
        }
    }

    fn loaded_state() -> ViewState {
        let mut state = ViewState::new();
        let ticket = state.begin_search("San Francisco").expect("ticket");
        state.complete_search(&ticket, ForecastEnvelope::Report(sample_snapshot()));
        state
    }

    #[test]
    fn full_view_renders_every_field() {
        let state = loaded_state();
        let view = DisplayView::build(&state, ClockStyle::TwelveHour);

        assert!(!view.loading);
        assert!(view.error.is_none());
        assert_eq!(view.theme, "sunny");
        assert_eq!(view.location, "San Francisco, US");
        assert_eq!(view.coordinates, "37.77°N, 122.42°W");
        assert_eq!(view.temperature, "15");
        assert_eq!(view.feels_like, "14");
        assert_eq!(view.high, "18");
        assert_eq!(view.low, "12");
        assert_eq!(view.humidity, "64%");
        assert_eq!(view.wind, "3.6 m/s");
        assert_eq!(view.pressure, "1013 hPa");
        assert_eq!(view.visibility, "10.0 km");
        assert_eq!(view.sunrise, "1:07 PM");
        assert_eq!(view.sunset, "1:00 AM");
        assert_eq!(view.description, "clear sky");
        assert_eq!(view.icon_url, "https://openweathermap.org/img/wn/01d@2x.png");
        assert_eq!(view.daily.len(), 2);
        assert_eq!(view.hourly.len(), 1);
        assert!(view.selected.is_none());
    }

    #[test]
    fn unit_toggle_changes_the_next_build_only() {
        let mut state = loaded_state();
        let metric = DisplayView::build(&state, ClockStyle::TwelveHour);
        assert_eq!(metric.temperature, "15");

        state.toggle_units();
        let imperial = DisplayView::build(&state, ClockStyle::TwelveHour);
        assert_eq!(imperial.temperature, "59");
        assert_eq!(imperial.wind, "8.1 mph");
        assert_eq!(imperial.visibility, "6.2 mi");
        assert_eq!(imperial.daily[0].high, "64");
    }

    #[test]
    fn empty_state_renders_placeholders_only() {
        let state = ViewState::new();
        let view = DisplayView::build(&state, ClockStyle::TwelveHour);

        assert_eq!(view.location, "");
        assert_eq!(view.coordinates, "");
        assert_eq!(view.temperature, "");
        assert!(view.daily.is_empty());
        assert!(view.hourly.is_empty());
    }

    #[test]
    fn daily_card_missing_fields_show_placeholder() {
        let state = loaded_state();
        let view = DisplayView::build(&state, ClockStyle::TwelveHour);

        let tue = &view.daily[1];
        assert_eq!(tue.high, "19");
        assert_eq!(tue.humidity, "--");
        assert_eq!(tue.wind, "--");
        assert_eq!(tue.precipitation, "--");
        assert_eq!(tue.icon_url, "");
    }

    #[test]
    fn selection_projects_the_matching_card() {
        let mut state = loaded_state();
        state.select_day(1);

        let view = DisplayView::build(&state, ClockStyle::TwelveHour);
        assert_eq!(view.selected.as_ref().map(|c| c.day_name.as_str()), Some("Tue"));
    }

    #[test]
    fn equator_latitude_suppresses_coordinates() {
        let mut snapshot = sample_snapshot();
        snapshot.lat = 0.0;
        snapshot.lon = 13.4;
        assert_eq!(coords_display(&snapshot), "");
    }

    #[test]
    fn southern_and_eastern_hemispheres_get_their_suffixes() {
        let mut snapshot = sample_snapshot();
        snapshot.lat = -33.87;
        snapshot.lon = 151.21;
        assert_eq!(coords_display(&snapshot), "33.87°S, 151.21°E");
    }

    #[test]
    fn location_without_country_renders_bare_name() {
        let mut snapshot = sample_snapshot();
        snapshot.country = String::new();
        assert_eq!(location_display(&snapshot), "San Francisco");
    }

    #[test]
    fn clock_style_flows_through_to_sun_times() {
        let state = loaded_state();
        let view = DisplayView::build(&state, ClockStyle::TwentyFourHour);
        assert_eq!(view.sunrise, "13:07");
        assert_eq!(view.sunset, "01:00");
    }
}
