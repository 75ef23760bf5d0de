use serde::{Deserialize, Serialize};

/// Result of resolving a free-text address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Latitude of the best match
    pub lat: f64,
    /// Longitude of the best match
    pub lng: f64,
    /// Canonical address string returned by the provider
    pub formatted_address: String,
}

/// Custom error type for geocoding operations
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The provider returned no results for the address
    #[error("no results for address")]
    NoResults,

    /// The provider rejected the request or reported an error status
    #[error("geocoding provider error: {0}")]
    Provider(String),

    /// Network failure reaching the provider
    #[error("network error: {0}")]
    Network(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
