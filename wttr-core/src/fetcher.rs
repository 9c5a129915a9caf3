use async_trait::async_trait;
use reqwest::Url;
use std::fmt::Debug;

use crate::{FetchError, Query, WeatherReport, model::is_dot_segment};

pub mod wttr;

pub const DEFAULT_BASE_URL: &str = "https://wttr.in";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// wttr.in one-liner: location, condition, temperature, humidity, wind.
pub const DEFAULT_FORMAT: &str = "%l: %c %t %h %w";

/// Settings for a single fetcher instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Sent as the `format` query parameter when present.
    pub format: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            format: Some(DEFAULT_FORMAT.to_string()),
        }
    }
}

#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, query: &Query) -> Result<WeatherReport, FetchError>;
}

/// Append `city` to the path of `base_url` as a single escaped segment.
///
/// `/`, `?`, `#`, `%` and spaces inside the city are percent-encoded, so the
/// city can never add path segments or start a query string. `.` and `..`
/// are refused outright: URL normalisation would drop them, even escaped.
pub fn build_url(base_url: &str, city: &str) -> Result<Url, FetchError> {
    if is_dot_segment(city) {
        return Err(FetchError::DotSegmentCity(city.to_string()));
    }

    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot carry a path".to_string()))?
        .pop_if_empty()
        .push(city);

    Ok(url)
}
