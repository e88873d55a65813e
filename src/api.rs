//! OpenWeatherMap current-weather client

use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::state::WeatherReport;

/// Why a query produced no report. All variants look the same to the user.
#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected weather payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("weather payload is missing `{0}`")]
    MissingField(&'static str),
}

// ============================================================================
// Response shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainReadings,
    weather: Vec<Condition>,
    sys: SunAndCountry,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    temp_max: f64,
    temp_min: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SunAndCountry {
    country: String,
    sunrise: i64,
    sunset: i64,
}

/// Decode a current-weather body into a report.
///
/// Every field the card shows must be present; `weather` must hold at least
/// one entry.
pub fn decode_current_weather(body: &str) -> Result<WeatherReport, QueryError> {
    let data: CurrentWeatherResponse = serde_json::from_str(body)?;
    let description = data
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or(QueryError::MissingField("weather[0].description"))?;

    Ok(WeatherReport {
        temperature: data.main.temp,
        max_temperature: data.main.temp_max,
        min_temperature: data.main.temp_min,
        feels_like: data.main.feels_like,
        description,
        city: data.name,
        country: data.sys.country,
        sunrise: data.sys.sunrise,
        sunset: data.sys.sunset,
    })
}

/// `GET {base}/weather?q={city}&appid={key}&units=metric`
pub fn current_weather_url(config: &ApiConfig, city: &str) -> String {
    format!(
        "{}/weather?q={}&appid={}&units=metric",
        config.base_url.trim_end_matches('/'),
        urlencoding::encode(city),
        urlencoding::encode(&config.api_key)
    )
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// ============================================================================
// Client
// ============================================================================

/// Cheap to clone; every fetch task gets its own copy.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl WeatherClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions for `city`. One request, no retry.
    pub async fn current_weather(&self, city: &str) -> Result<WeatherReport, QueryError> {
        let url = current_weather_url(&self.config, city);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(QueryError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        decode_current_weather(&body)
    }
}
