use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while fetching a weather report.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The city name was empty after trimming.
    #[error("city name must not be empty")]
    EmptyCity,

    /// The city is a dot segment that URL normalisation would drop from the path.
    #[error("'{0}' is not a city name")]
    DotSegmentCity(String),

    /// The configured endpoint is not a URL a path segment can be appended to.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The service did not answer within the configured timeout.
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// DNS, connection or transport failure.
    #[error("could not reach weather service")]
    Network(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("weather service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body could not be read as text.
    #[error("failed to read weather service response")]
    Body(#[source] reqwest::Error),
}
