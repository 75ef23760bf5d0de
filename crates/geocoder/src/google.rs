use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::{GeocodeError, GeocodeResult};

/// Trait for address geocoding providers
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address into coordinates and a canonical
    /// address string. A single failure is final; retry policy, if any,
    /// belongs to the caller.
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;
}

/// Configuration for the Google Geocoding API client
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,

    /// Base URL for the Google Maps API (default: https://maps.googleapis.com)
    pub base_url: String,

    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,
}

impl GeocoderConfig {
    /// Build a configuration from the `GEOCODER_API_KEY` environment variable
    pub fn from_env() -> Result<Self, GeocodeError> {
        let api_key = std::env::var("GEOCODER_API_KEY").map_err(|_| {
            GeocodeError::Config("GEOCODER_API_KEY environment variable not set".to_string())
        })?;

        Ok(Self {
            api_key,
            ..Self::default()
        })
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://maps.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the Google Geocoding API
pub struct GoogleGeocoder {
    client: Client,
    config: GeocoderConfig,
}

/// Response structure from the Google Geocoding API
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,

    #[serde(default)]
    results: Vec<GeocodeEntry>,

    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    /// Create a new Google Geocoding API client
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Interpret a provider response, extracting the best match
    fn into_result(response: GeocodeResponse) -> Result<GeocodeResult, GeocodeError> {
        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(GeocodeError::NoResults),
            status => {
                let message = response.error_message.unwrap_or_else(|| status.to_string());
                return Err(GeocodeError::Provider(message));
            }
        }

        let entry = response
            .results
            .into_iter()
            .next()
            .ok_or(GeocodeError::NoResults)?;

        Ok(GeocodeResult {
            lat: entry.geometry.location.lat,
            lng: entry.geometry.location.lng,
            formatted_address: entry.formatted_address,
        })
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        debug!("Geocoding address: {}", address);

        let url = format!("{}/maps/api/geocode/json", self.config.base_url);
        let params = [("address", address), ("key", self.config.api_key.as_str())];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| GeocodeError::Network(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Geocoding request failed with status {}", status);
            return Err(GeocodeError::Provider(format!("HTTP {}", status)));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Provider(format!("Failed to parse response: {}", e)))?;

        Self::into_result(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_into_result_best_match() {
        let response = parse(
            r#"{
                "status": "OK",
                "results": [
                    {
                        "formatted_address": "Denver, CO, USA",
                        "geometry": {"location": {"lat": 39.7, "lng": -104.9}}
                    },
                    {
                        "formatted_address": "Denver, IA, USA",
                        "geometry": {"location": {"lat": 42.6, "lng": -92.3}}
                    }
                ]
            }"#,
        );

        let result = GoogleGeocoder::into_result(response).unwrap();
        assert_eq!(result.formatted_address, "Denver, CO, USA");
        assert_eq!(result.lat, 39.7);
        assert_eq!(result.lng, -104.9);
    }

    #[test]
    fn test_into_result_zero_results() {
        let response = parse(r#"{"status": "ZERO_RESULTS", "results": []}"#);

        assert!(matches!(
            GoogleGeocoder::into_result(response),
            Err(GeocodeError::NoResults)
        ));
    }

    #[test]
    fn test_into_result_error_status_carries_message() {
        let response = parse(
            r#"{
                "status": "REQUEST_DENIED",
                "results": [],
                "error_message": "The provided API key is invalid."
            }"#,
        );

        match GoogleGeocoder::into_result(response) {
            Err(GeocodeError::Provider(message)) => {
                assert_eq!(message, "The provided API key is invalid.");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_into_result_ok_without_entries_is_no_results() {
        let response = parse(r#"{"status": "OK", "results": []}"#);

        assert!(matches!(
            GoogleGeocoder::into_result(response),
            Err(GeocodeError::NoResults)
        ));
    }
}
