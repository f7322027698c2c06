use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::backdrop;

/// Coarse weather classification, used to pick a backdrop and glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Snow,
    /// Anything the provider reports outside the four recognized groups
    /// (e.g. "Mist", "Thunderstorm", "Tornado").
    Other(String),
}

impl Condition {
    /// Classify the provider's `weather[0].main` string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Snow" => Condition::Snow,
            other => Condition::Other(other.to_string()),
        }
    }
}

/// Current weather for a resolved city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Display name as resolved by the provider.
    pub city: String,
    pub condition: Condition,
    pub description: String,
    /// Provider icon identifier, e.g. "04d".
    pub icon: String,
    pub temperature_c: f64,
    pub wind_speed_mps: f64,
}

impl CurrentConditions {
    /// Provider-hosted icon bitmap, for frontends that can render images.
    pub fn icon_url(&self) -> String {
        backdrop::icon_url(&self.icon)
    }
}

/// One representative forecast slot: the midday snapshot of an upcoming day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Slot timestamp in the provider's local convention.
    pub stamp: NaiveDateTime,
    pub condition: Condition,
    pub description: String,
    pub icon: String,
    pub temperature_c: f64,
}

impl ForecastEntry {
    /// Provider-hosted icon bitmap, for frontends that can render images.
    pub fn icon_url(&self) -> String {
        backdrop::icon_url(&self.icon)
    }
}

/// Result of one complete retrieval: current conditions plus the shaped
/// daily outlook (at most four midday entries, ascending timestamp order).
///
/// Consumers apply both fields to their state together, so no render ever
/// shows current conditions and an outlook from different cities.
#[derive(Debug, Clone, PartialEq)]
pub struct CityWeather {
    pub current: CurrentConditions,
    pub outlook: Vec<ForecastEntry>,
}
