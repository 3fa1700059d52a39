use serde::Deserialize;

/// Location name the backend substitutes when reverse geocoding finds
/// nothing useful. Never recorded in the recent-search list.
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// Immutable result of the last successful fetch. Replaced whole; partial
/// updates are never observable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub location_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    pub current: CurrentConditions,
    #[serde(default)]
    pub daily: Vec<DayForecast>,
    #[serde(default)]
    pub hourly: Option<Vec<HourForecast>>,
}

/// Current conditions as reported by the backend. Temperatures are Celsius,
/// wind is m/s, visibility is meters, sunrise/sunset are Unix seconds.
/// Absent numeric fields render as `"--"` downstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub main: String,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub weather_code: Option<i64>,
    #[serde(default)]
    pub is_day: bool,
}

/// One day of the multi-day forecast. `day_name` and `date_str` arrive
/// pre-rendered from the backend; `pop` is precipitation probability 0-100.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    #[serde(default)]
    pub day_name: String,
    #[serde(default)]
    pub date_str: String,
    pub temp_high: Option<f64>,
    pub temp_low: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub main: String,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub pop: Option<f64>,
}

/// One entry of the hourly strip.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourForecast {
    pub temp: Option<f64>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub label: String,
}
