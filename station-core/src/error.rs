use thiserror::Error;

/// Failure modes of a weather fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No usable API key is configured. Raised before any request is sent.
    #[error("No OpenWeather API key configured")]
    Auth,

    /// The provider does not know the requested city.
    #[error("City not found: {city}")]
    NotFound { city: String },

    /// Transport failure or an unexpected HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::Auth)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        FetchError::Network(err.without_url().to_string())
    }
}
