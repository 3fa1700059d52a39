//! Terminal rendering of a built view. Pure string assembly; printing is
//! the only side effect and lives in [`print_view`].

use skycast_core::view::{DailyCard, DisplayView};

pub fn print_view(view: &DisplayView) {
    print!("{}", render_view(view));
}

/// Assemble the full report. Error and empty states short-circuit.
pub fn render_view(view: &DisplayView) -> String {
    if view.loading {
        return "Loading...\n".to_string();
    }
    if let Some(error) = &view.error {
        return format!("{error}\n");
    }
    if view.location.is_empty() {
        return "No weather loaded. Try `skycast search <city>`.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{}  [{}]\n", view.location, view.theme));
    if !view.coordinates.is_empty() {
        out.push_str(&format!("{}\n", view.coordinates));
    }
    out.push('\n');
    out.push_str(&format!("  {}°  {}\n", view.temperature, view.description));
    out.push_str(&format!(
        "  feels like {}°   high {}°   low {}°\n\n",
        view.feels_like, view.high, view.low
    ));

    row(&mut out, "Humidity", &view.humidity);
    row(&mut out, "Wind", &view.wind);
    row(&mut out, "Pressure", &view.pressure);
    row(&mut out, "Visibility", &view.visibility);
    row(&mut out, "Sunrise", &view.sunrise);
    row(&mut out, "Sunset", &view.sunset);

    if !view.hourly.is_empty() {
        out.push('\n');
        for hour in &view.hourly {
            out.push_str(&format!("  {:<6} {:>4}°  {}\n", hour.label, hour.temperature, hour.description));
        }
    }

    if !view.daily.is_empty() {
        out.push('\n');
        for (i, day) in view.daily.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {:<4} {:<7} {:>4}° / {}°  {}\n",
                i + 1,
                day.day_name,
                day.date,
                day.high,
                day.low,
                day.description
            ));
        }
    }

    if let Some(day) = &view.selected {
        out.push('\n');
        out.push_str(&render_day_detail(day));
    }

    out
}

/// Expanded card for the selected forecast day.
pub fn render_day_detail(day: &DailyCard) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", day.day_name, day.date));
    out.push_str(&format!("  {}° / {}°  {}\n", day.high, day.low, day.description));
    row(&mut out, "Humidity", &day.humidity);
    row(&mut out, "Wind", &day.wind);
    row(&mut out, "Precipitation", &day.precipitation);
    out
}

fn row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {label:<13} {value}\n"));
}
