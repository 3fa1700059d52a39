//! Pure display derivations for the weather view.
//!
//! Every function here is deterministic and side-effect free. Values the
//! backend did not report render as [`MISSING`].

use chrono::{DateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Placeholder shown for any value the backend did not report.
pub const MISSING: &str = "--";

/// Base URL for provider icon assets.
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn/";

/// Suffix selecting the 2x raster variant.
pub const ICON_SUFFIX: &str = "@2x.png";

const MPS_TO_MPH: f64 = 2.23694;
const KM_TO_MI: f64 = 0.621371;

/// Clock rendering variant. Both forms are in active use; the call site
/// decides which one it wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStyle {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl ClockStyle {
    /// The other variant.
    pub fn flipped(self) -> Self {
        match self {
            ClockStyle::TwelveHour => ClockStyle::TwentyFourHour,
            ClockStyle::TwentyFourHour => ClockStyle::TwelveHour,
        }
    }
}

/// UI theme tag derived from the reported weather code and day flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundTheme {
    Night,
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    #[default]
    Default,
}

impl BackgroundTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundTheme::Night => "night",
            BackgroundTheme::Sunny => "sunny",
            BackgroundTheme::Cloudy => "cloudy",
            BackgroundTheme::Rainy => "rainy",
            BackgroundTheme::Snowy => "snowy",
            BackgroundTheme::Stormy => "stormy",
            BackgroundTheme::Default => "default",
        }
    }
}

impl std::fmt::Display for BackgroundTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the background theme. A night flag wins over every code range.
pub fn classify_background(weather_code: Option<i64>, is_day: bool) -> BackgroundTheme {
    if !is_day {
        return BackgroundTheme::Night;
    }
    match weather_code {
        Some(0 | 1) => BackgroundTheme::Sunny,
        Some(2 | 3) => BackgroundTheme::Cloudy,
        Some(51..=67) | Some(80..=82) => BackgroundTheme::Rainy,
        Some(71..=77) | Some(85..=86) => BackgroundTheme::Snowy,
        Some(95..=99) => BackgroundTheme::Stormy,
        _ => BackgroundTheme::Default,
    }
}

/// Render a Celsius reading as a whole number, converting when the
/// Fahrenheit preference is active. Rounds half away from zero.
pub fn temperature(celsius: Option<f64>, fahrenheit: bool) -> String {
    let Some(c) = celsius else {
        return MISSING.to_string();
    };
    let shown = if fahrenheit { c * 9.0 / 5.0 + 32.0 } else { c };
    format!("{}", shown.round() as i64)
}

/// Render a wind speed. The metric branch passes the raw value through
/// default numeric display, so `3.0` prints as `3 m/s`.
pub fn speed(meters_per_second: Option<f64>, fahrenheit: bool) -> String {
    let Some(mps) = meters_per_second else {
        return MISSING.to_string();
    };
    if fahrenheit {
        format!("{:.1} mph", round1(mps * MPS_TO_MPH))
    } else {
        format!("{mps} m/s")
    }
}

/// Render visibility in km or miles to one decimal. A reading of exactly 0
/// counts as missing.
pub fn visibility(meters: Option<f64>, fahrenheit: bool) -> String {
    let Some(m) = meters else {
        return MISSING.to_string();
    };
    if m == 0.0 {
        return MISSING.to_string();
    }
    let km = m / 1000.0;
    if fahrenheit {
        format!("{:.1} mi", round1(km * KM_TO_MI))
    } else {
        format!("{:.1} km", round1(km))
    }
}

/// Render a Unix timestamp as a clock reading. A timestamp of 0 counts as
/// missing, as does anything chrono cannot represent.
pub fn unix_time(seconds: Option<i64>, clock: ClockStyle) -> String {
    let Some(ts) = seconds else {
        return MISSING.to_string();
    };
    if ts == 0 {
        return MISSING.to_string();
    }
    let Some(moment) = DateTime::from_timestamp(ts, 0) else {
        return MISSING.to_string();
    };
    let (hour, minute) = (moment.hour(), moment.minute());
    match clock {
        ClockStyle::TwelveHour => {
            let suffix = if hour < 12 { "AM" } else { "PM" };
            let display_hour = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{display_hour}:{minute:02} {suffix}")
        }
        ClockStyle::TwentyFourHour => format!("{hour:02}:{minute:02}"),
    }
}

/// Derived icon asset URL; empty when the backend reported no icon code.
pub fn icon_url(icon: &str) -> String {
    if icon.is_empty() {
        return String::new();
    }
    format!("{ICON_BASE_URL}{icon}{ICON_SUFFIX}")
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
