use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::{CityWeather, Condition, CurrentConditions, ForecastEntry};

use super::{FetchError, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// The 3-hourly forecast slot taken as each day's representative snapshot.
const MIDDAY_MARKER: &str = "12:00:00";

/// The outlook keeps at most this many midday entries, in response order.
const OUTLOOK_DAYS: usize = 4;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at a different host (used by the wiremock tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let body = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .text()
            .await?;

        // An unresolved city is signalled by the payload's own status code,
        // not by the HTTP status.
        let envelope: OwEnvelope = serde_json::from_str(&body)?;
        if !envelope.cod.is_success() {
            debug!(city, cod = ?envelope.cod, "city not resolved");
            return Err(FetchError::CityNotFound);
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        let (condition, description, icon) = split_weather(&parsed.weather);

        Ok(CurrentConditions {
            city: parsed.name,
            condition,
            description,
            icon,
            temperature_c: parsed.main.temp,
            wind_speed_mps: parsed.wind.speed,
        })
    }

    async fn fetch_outlook(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let url = format!("{}/forecast", self.base_url);

        let body = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .text()
            .await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        daily_outlook(parsed.list)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_city(&self, city: &str) -> Result<CityWeather, FetchError> {
        let current = self.fetch_current(city).await?;
        // Issued only once the city has resolved.
        let outlook = self.fetch_outlook(city).await?;

        debug!(city, days = outlook.len(), "retrieval complete");
        Ok(CityWeather { current, outlook })
    }
}

/// Keep one entry per upcoming day: the slots matching the midday marker,
/// at most [`OUTLOOK_DAYS`] of them, in response order.
fn daily_outlook(list: Vec<OwForecastEntry>) -> Result<Vec<ForecastEntry>, FetchError> {
    list.into_iter()
        .filter(|e| e.dt_txt.contains(MIDDAY_MARKER))
        .take(OUTLOOK_DAYS)
        .map(|e| {
            let stamp = NaiveDateTime::parse_from_str(&e.dt_txt, STAMP_FORMAT)
                .map_err(|_| FetchError::BadTimestamp(e.dt_txt.clone()))?;
            let (condition, description, icon) = split_weather(&e.weather);

            Ok(ForecastEntry {
                stamp,
                condition,
                description,
                icon,
                temperature_c: e.main.temp,
            })
        })
        .collect()
}

fn split_weather(weather: &[OwWeather]) -> (Condition, String, String) {
    match weather.first() {
        Some(w) => (
            Condition::parse(&w.main),
            w.description.clone(),
            w.icon.clone(),
        ),
        None => (
            Condition::Other("Unknown".to_string()),
            "unknown".to_string(),
            String::new(),
        ),
    }
}

/// Minimal probe for the payload status code, checked before the full parse.
#[derive(Debug, Deserialize)]
struct OwEnvelope {
    cod: OwCod,
}

/// OpenWeather encodes `cod` as a number on success and a string on errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCod {
    Number(i64),
    Text(String),
}

impl OwCod {
    fn is_success(&self) -> bool {
        match self {
            OwCod::Number(n) => *n == 200,
            OwCod::Text(t) => t == "200",
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    weather: Vec<OwWeather>,
    main: OwMain,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}
