//! Integration tests for the OpenWeather provider using wiremock.
//!
//! These tests mock both endpoints to verify retrieval behavior without
//! making actual API calls.

use chrono::Timelike;
use skycast_core::{
    Condition, FetchError, TemperatureTrend, WeatherProvider, provider::OpenWeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new("test-key".to_string()).with_base_url(server.uri())
}

/// Current-conditions payload the way the provider answers a resolved city.
fn current_response(city: &str, condition: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "cod": 200,
        "name": city,
        "weather": [{
            "main": condition,
            "description": "scattered clouds",
            "icon": "03d"
        }],
        "main": {"temp": temp},
        "wind": {"speed": 4.1}
    })
}

/// A full 5-day, 3-hourly forecast payload: 40 slots, one midday slot per
/// day, daily midday temperatures 18..=22.
fn forecast_grid() -> serde_json::Value {
    let mut list = Vec::new();
    for day in 0..5u32 {
        for hour in (0..24).step_by(3) {
            list.push(serde_json::json!({
                "dt_txt": format!("2026-08-{:02} {hour:02}:00:00", 10 + day),
                "weather": [{
                    "main": "Clouds",
                    "description": "overcast clouds",
                    "icon": "04d"
                }],
                "main": {"temp": 18.0 + f64::from(day)}
            }));
        }
    }
    serde_json::json!({"list": list})
}

async fn mount_current(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_retrieval_maps_current_conditions_and_shapes_the_outlook() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        ResponseTemplate::new(200).set_body_json(current_response("London", "Clouds", 17.3)),
    )
    .await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(forecast_grid()),
    )
    .await;

    let weather = provider_for(&server)
        .fetch_city("London")
        .await
        .expect("retrieval must succeed");

    assert_eq!(weather.current.city, "London");
    assert_eq!(weather.current.condition, Condition::Clouds);
    assert_eq!(weather.current.description, "scattered clouds");
    assert_eq!(weather.current.icon, "03d");
    assert!((weather.current.temperature_c - 17.3).abs() < f64::EPSILON);
    assert!((weather.current.wind_speed_mps - 4.1).abs() < f64::EPSILON);

    // 40 slots in, exactly one midday slot per day out, first four days.
    assert_eq!(weather.outlook.len(), 4);
    for entry in &weather.outlook {
        assert_eq!(entry.stamp.hour(), 12);
    }
    assert!(weather.outlook.windows(2).all(|w| w[0].stamp < w[1].stamp));

    // Midday temps 18..=21 suggest chart bounds of 13 and 26.
    let trend = TemperatureTrend::from_outlook(&weather.outlook).expect("non-empty outlook");
    assert_eq!(trend.bounds, (13.0, 26.0));
    assert_eq!(trend.points.len(), 4);
}

#[tokio::test]
async fn unresolved_city_reads_the_payload_status_and_skips_the_forecast() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        // OpenWeather answers HTTP 404 here, but the signal we act on is
        // the payload's own "cod".
        ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_grid()))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .fetch_city("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::CityNotFound));
}

#[tokio::test]
async fn forecast_without_midday_slots_yields_an_empty_outlook() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        ResponseTemplate::new(200).set_body_json(current_response("Longyearbyen", "Snow", -2.0)),
    )
    .await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                {
                    "dt_txt": "2026-08-10 09:00:00",
                    "weather": [{"main": "Snow", "description": "light snow", "icon": "13d"}],
                    "main": {"temp": -1.0}
                },
                {
                    "dt_txt": "2026-08-10 15:00:00",
                    "weather": [{"main": "Snow", "description": "light snow", "icon": "13d"}],
                    "main": {"temp": -3.0}
                }
            ]
        })),
    )
    .await;

    let weather = provider_for(&server)
        .fetch_city("Longyearbyen")
        .await
        .expect("retrieval must succeed");

    assert!(weather.outlook.is_empty());
    assert_eq!(TemperatureTrend::from_outlook(&weather.outlook), None);
}

#[tokio::test]
async fn malformed_current_payload_is_a_parse_error() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        ResponseTemplate::new(200).set_body_string("not json at all"),
    )
    .await;

    let err = provider_for(&server).fetch_city("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn malformed_forecast_payload_is_a_parse_error() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        ResponseTemplate::new(200).set_body_json(current_response("London", "Rain", 12.0)),
    )
    .await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"list": "nope"})),
    )
    .await;

    let err = provider_for(&server).fetch_city("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Nothing listens on this port.
    let provider =
        OpenWeatherProvider::new("test-key".to_string()).with_base_url("http://127.0.0.1:9");

    let err = provider.fetch_city("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn repeated_retrievals_are_identical_without_network_variance() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        ResponseTemplate::new(200).set_body_json(current_response("London", "Clear", 21.0)),
    )
    .await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(forecast_grid()),
    )
    .await;

    let provider = provider_for(&server);
    let first = provider.fetch_city("London").await.expect("first retrieval");
    let second = provider
        .fetch_city("London")
        .await
        .expect("second retrieval");

    assert_eq!(first, second);
}
