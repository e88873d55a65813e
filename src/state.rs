//! Application state - single source of truth

use chrono::{TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprites::Illustration;

/// Message shown for every failed query, whatever the cause.
pub const QUERY_FAILED_MESSAGE: &str = "City not found. Please try again.";

/// Current conditions for one city, as returned by OpenWeatherMap (metric units)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub city: String,
    /// ISO 3166 country code
    pub country: String,
    /// Unix epoch seconds
    pub sunrise: i64,
    /// Unix epoch seconds
    pub sunset: i64,
}

impl WeatherReport {
    /// Header line, e.g. `Weather in Pune, INDIA`.
    ///
    /// The "IN" code is spelled out by appending "DIA"; every other code is
    /// shown as-is.
    pub fn headline(&self) -> String {
        let suffix = if self.country == "IN" { "DIA" } else { "" };
        format!("Weather in {}, {}{}", self.city, self.country, suffix)
    }

    pub fn illustration(&self) -> Illustration {
        Illustration::for_temperature(self.temperature)
    }
}

/// Format a Celsius value the way the card shows it (`31°C`, `22.5°C`).
pub fn format_celsius(value: f64) -> String {
    format!("{}°C", value)
}

/// Format an epoch-second timestamp as a time of day in `tz`.
///
/// Out-of-range timestamps render as `--`.
pub fn format_time_of_day<Tz>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match Utc.timestamp_opt(epoch_secs, 0).single() {
        Some(utc) => utc.with_timezone(tz).format("%-I:%M:%S %p").to_string(),
        None => "--".to_string(),
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Text currently in the "City Name" field
    #[debug(section = "Query", label = "Input")]
    pub city_input: String,

    /// Last successfully fetched conditions (kept across failed queries)
    #[debug(section = "Weather", label = "Report", debug_fmt)]
    pub weather: Option<WeatherReport>,

    /// Set when the most recent query failed
    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub error: Option<String>,

    /// Fetches spawned but not yet resolved
    #[debug(section = "Weather", label = "Pending")]
    pub pending_requests: u32,

    // --- Task bookkeeping (skipped) ---
    /// Id for the next fetch task; each fetch gets its own task key
    #[debug(skip)]
    pub next_request_id: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_requests > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn report(country: &str) -> WeatherReport {
        WeatherReport {
            city: "Pune".into(),
            country: country.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_headline_spells_out_india() {
        assert_eq!(report("IN").headline(), "Weather in Pune, INDIA");
    }

    #[test]
    fn test_headline_keeps_other_codes() {
        assert_eq!(report("GB").headline(), "Weather in Pune, GB");
        assert_eq!(report("in").headline(), "Weather in Pune, in");
        assert_eq!(report("IND").headline(), "Weather in Pune, IND");
    }

    #[test]
    fn test_format_celsius() {
        assert_eq!(format_celsius(31.0), "31°C");
        assert_eq!(format_celsius(22.5), "22.5°C");
        assert_eq!(format_celsius(-3.25), "-3.25°C");
    }

    #[test]
    fn test_format_time_of_day_utc() {
        assert_eq!(format_time_of_day(0, &Utc), "12:00:00 AM");
        assert_eq!(format_time_of_day(1_700_000_000, &Utc), "10:13:20 PM");
    }

    #[test]
    fn test_format_time_of_day_offset() {
        // +05:30
        let ist = FixedOffset::east_opt(19_800).unwrap();
        assert_eq!(format_time_of_day(1_700_000_000, &ist), "3:43:20 AM");
    }

    #[test]
    fn test_format_time_of_day_is_stable() {
        let first = format_time_of_day(1_718_000_000, &Utc);
        let second = format_time_of_day(1_718_000_000, &Utc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_time_of_day_out_of_range() {
        assert_eq!(format_time_of_day(i64::MAX, &Utc), "--");
    }
}
