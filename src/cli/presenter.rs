//! Renders a lookup report for the terminal.
//!
//! Rendering is kept as pure `String` building so it can be tested; the caller prints it.

use crate::error::LookupError;
use crate::models::{
    aqi_category_severity, AirQualityReading, DashboardReport, Severity, UvLevel, WeatherReading,
};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

pub const AIR_QUALITY_UNAVAILABLE: &str = "Air quality data not available for this location";
pub const FOOTER: &str = "Results may vary slightly from other sources.";

fn table_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Colors a one-line status message by severity.
pub fn paint(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Success => text.green(),
        Severity::Warning => text.yellow(),
        Severity::Error => text.red(),
    }
}

/// A provider value exactly as it arrived: no rounding, whole numbers keep their ".0".
fn provider_number(value: f64) -> String {
    format!("{:?}", value)
}

/// "Low (2)", "Moderate (4)", "High (8)".
pub fn uv_label(uv_index: i32) -> String {
    format!("{} ({})", UvLevel::from_index(uv_index).label(), uv_index)
}

fn weather_table(weather: &WeatherReading) -> Table {
    let uv = UvLevel::from_index(weather.uv_index);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Weather", "Current"])
        .add_row(vec![
            Cell::new("Temperature"),
            Cell::new(format!("{}°{}", provider_number(weather.temperature), weather.unit)),
        ])
        .add_row(vec![Cell::new("Condition"), Cell::new(&weather.condition).fg(Color::Cyan)])
        .add_row(vec![Cell::new("Humidity"), Cell::new(format!("{}%", weather.humidity))])
        .add_row(vec![
            Cell::new("Wind Speed"),
            Cell::new(format!("{} km/h", provider_number(weather.wind_speed))),
        ])
        .add_row(vec![
            Cell::new("UV Index"),
            Cell::new(uv_label(weather.uv_index)).fg(table_color(uv.severity())),
        ]);
    if let Some(observed) = weather.observed_at {
        table.add_row(vec![
            Cell::new("Observed"),
            Cell::new(observed.format("%Y-%m-%d %H:%M %:z").to_string()),
        ]);
    }
    table
}

fn air_quality_table(air: &AirQualityReading) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Air Quality", "Current"])
        .add_row(vec![Cell::new("AQI"), Cell::new(air.aqi)])
        .add_row(vec![
            Cell::new("Category"),
            Cell::new(&air.category).fg(table_color(aqi_category_severity(&air.category))),
        ])
        .add_row(vec![Cell::new("Description"), Cell::new(&air.description)]);
    table
}

/// Air quality section: the table, or the unavailable notice (plus the reason) when that stage failed.
fn air_quality_section(air_quality: &Result<AirQualityReading, LookupError>) -> String {
    match air_quality {
        Ok(air) => air_quality_table(air).to_string(),
        Err(e) => format!(
            "{}\n{}",
            paint(&e.user_message(), Severity::Warning),
            AIR_QUALITY_UNAVAILABLE.blue()
        ),
    }
}

/// Full report: weather, air quality, then the footer.
pub fn render(report: &DashboardReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} (location key {})\n\n",
        "Current conditions for".bold(),
        report.city.as_str().bold(),
        report.location_key
    ));
    out.push_str(&weather_table(&report.weather).to_string());
    out.push_str("\n\n");
    out.push_str(&air_quality_section(&report.air_quality));
    out.push_str("\n\n");
    out.push_str(&FOOTER.dimmed().to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::models::{CityQuery, LocationKey};
    use rstest::rstest;

    fn weather(uv_index: i32) -> WeatherReading {
        WeatherReading {
            temperature: 29.0,
            unit: "C".to_string(),
            condition: "Hazy sunshine".to_string(),
            humidity: 58,
            wind_speed: 11.1,
            uv_index,
            observed_at: None,
        }
    }

    fn report(air_quality: Result<AirQualityReading, LookupError>) -> DashboardReport {
        DashboardReport {
            city: CityQuery::new("Maiduguri").unwrap(),
            location_key: LocationKey::new("252066"),
            weather: weather(3),
            air_quality,
        }
    }

    #[rstest]
    #[case(0, "Low (0)")]
    #[case(2, "Low (2)")]
    #[case(3, "Moderate (3)")]
    #[case(5, "Moderate (5)")]
    #[case(6, "High (6)")]
    fn test_uv_label(#[case] index: i32, #[case] expected: &str) {
        assert_eq!(uv_label(index), expected);
    }

    #[rstest]
    #[case(29.0, "29.0")]
    #[case(30.65, "30.65")]
    #[case(-3.5, "-3.5")]
    fn test_provider_number_is_not_rounded(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(provider_number(value), expected);
    }

    #[test]
    fn test_render_shows_unrounded_values() {
        let mut r = report(Err(LookupError::NoMatch));
        r.weather.temperature = 30.65;
        r.weather.wind_speed = 12.25;
        let output = render(&r);
        assert!(output.contains("30.65°C"));
        assert!(output.contains("12.25 km/h"));
    }

    #[test]
    fn test_footer_wording() {
        assert_eq!(FOOTER, "Results may vary slightly from other sources.");
    }

    #[test]
    fn test_render_with_air_quality() {
        let output = render(&report(Ok(AirQualityReading {
            aqi: 155,
            category: "Unhealthy".to_string(),
            description: "Everyone may begin to experience health effects.".to_string(),
        })));

        assert!(output.contains("Maiduguri"));
        assert!(output.contains("252066"));
        assert!(output.contains("29.0°C"));
        assert!(output.contains("58%"));
        assert!(output.contains("11.1 km/h"));
        assert!(output.contains("Hazy sunshine"));
        assert!(output.contains("Moderate (3)"));
        assert!(output.contains("155"));
        assert!(output.contains("Unhealthy"));
        assert!(!output.contains(AIR_QUALITY_UNAVAILABLE));
        assert!(output.contains(FOOTER));
    }

    #[test]
    fn test_render_without_air_quality() {
        let output = render(&report(Err(LookupError::EmptyResult {
            stage: Stage::AirQuality,
        })));

        assert!(output.contains("29.0°C"));
        assert!(output.contains(AIR_QUALITY_UNAVAILABLE));
        assert!(output.contains("Some slight Issues"));
    }
}
