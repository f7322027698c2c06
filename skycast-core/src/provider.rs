use crate::{Config, model::CityWeather};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Failures of a single retrieval.
///
/// `CityNotFound` is surfaced to the user; everything else is logged and
/// otherwise silent, leaving prior session state untouched. No variant is
/// retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider reported the city as unresolved. This is read from the
    /// success payload's own status code, not from the HTTP status.
    #[error("city not found")]
    CityNotFound,

    /// The request never produced a readable response.
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expect.
    #[error("malformed weather response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A forecast slot carried an unreadable timestamp.
    #[error("invalid forecast timestamp: {0}")]
    BadTimestamp(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Retrieve current conditions and the shaped daily outlook for a city.
    ///
    /// The forecast request is only issued once the city has resolved, and
    /// the result is returned whole: callers never observe a partially
    /// fetched retrieval.
    async fn fetch_city(&self, city: &str) -> Result<CityWeather, FetchError>;
}

/// Construct the provider from config, resolving the API credential.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `skycast configure` and enter your API key,\n\
             or set the {} environment variable.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(Arc::new(OpenWeatherProvider::new(api_key.to_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.api_key = Some("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
