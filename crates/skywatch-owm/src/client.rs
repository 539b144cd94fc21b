//! Current-weather lookup client.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::error::LookupError;
use crate::types::WeatherSnapshot;

/// OpenWeatherMap current-weather endpoint.
pub const OWM_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`WeatherClient`].
///
/// Injected at construction; there is no ambient credential or endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Provider API credential. An empty key is sent as-is; the provider's
    /// rejection comes back as a [`LookupError::Provider`].
    pub api_key: String,
    /// Current-weather endpoint, overridable for tests and proxies.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OWM_WEATHER_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// HTTP client for one weather provider.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl WeatherClient {
    /// Build a client with a shared connection pool and request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions for a free-form city query.
    ///
    /// Issues exactly one GET; no retries. Metric units are fixed.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current_weather(&self, query: &str) -> Result<WeatherSnapshot, LookupError> {
        let url = format!(
            "{}?q={}&appid={}&units=metric",
            self.config.base_url,
            urlencoding::encode(query),
            self.config.api_key
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            tracing::warn!(status = status.as_u16(), %message, "weather lookup rejected");
            return Err(LookupError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(body.into_snapshot())
    }
}

/// Provider current-weather response. Every field is optional: sparse
/// responses normalize to a snapshot with gaps rather than a decode error.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    name: Option<String>,
    sys: Option<ApiSys>,
    main: Option<ApiMain>,
    wind: Option<ApiWind>,
    #[serde(default)]
    weather: Vec<ApiCondition>,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: Option<String>,
    icon: Option<String>,
}

/// Error payload the provider attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl ApiResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let condition = self.weather.into_iter().next();
        let main = self.main;
        WeatherSnapshot {
            location_name: self.name,
            country_code: self.sys.and_then(|s| s.country),
            temperature_c: main.as_ref().and_then(|m| m.temp),
            feels_like_c: main.as_ref().and_then(|m| m.feels_like),
            humidity_percent: main.as_ref().and_then(|m| m.humidity),
            wind_speed_mps: self.wind.and_then(|w| w.speed),
            description: condition.as_ref().and_then(|c| c.description.clone()),
            icon_code: condition.and_then(|c| c.icon),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> WeatherClient {
        WeatherClient::new(ClientConfig::new("test-key").with_base_url(base_url)).unwrap()
    }

    fn manila_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Manila",
            "sys": {"country": "PH"},
            "main": {"temp": 31.7, "feels_like": 36.2, "humidity": 70},
            "wind": {"speed": 3.1},
            "weather": [{"description": "light rain", "icon": "10d"}]
        })
    }

    #[tokio::test]
    async fn test_fetch_maps_full_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("q", "Manila"))
            .respond_with(ResponseTemplate::new(200).set_body_json(manila_body()))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let snapshot = client.fetch_current_weather("Manila").await.unwrap();

        assert_eq!(snapshot.location_name.as_deref(), Some("Manila"));
        assert_eq!(snapshot.country_code.as_deref(), Some("PH"));
        assert_eq!(snapshot.temperature_c, Some(31.7));
        assert_eq!(snapshot.feels_like_c, Some(36.2));
        assert_eq!(snapshot.humidity_percent, Some(70));
        assert_eq!(snapshot.wind_speed_mps, Some(3.1));
        assert_eq!(snapshot.description.as_deref(), Some("light rain"));
        assert_eq!(snapshot.icon_code.as_deref(), Some("10d"));
    }

    #[tokio::test]
    async fn test_fetch_sends_credential_and_units() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("q", "New York"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client.fetch_current_weather("New York").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_sparse_response_normalizes_to_gaps() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let snapshot = client.fetch_current_weather("Nowhere").await.unwrap();

        assert_eq!(snapshot, WeatherSnapshot::default());
    }

    #[tokio::test]
    async fn test_provider_message_used_verbatim() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let err = client.fetch_current_weather("Atlantis").await.unwrap_err();

        assert!(matches!(err, LookupError::Provider { status: 404, .. }));
        assert_eq!(err.to_string(), "city not found");
    }

    #[tokio::test]
    async fn test_status_fallback_without_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let err = client.fetch_current_weather("Bern").await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let err = client.fetch_current_weather("Delhi").await.unwrap_err();

        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client = test_client(&uri);
        let err = client.fetch_current_weather("Lilongwe").await.unwrap_err();

        assert!(matches!(err, LookupError::Network(_)));
    }
}
