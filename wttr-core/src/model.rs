use std::fmt;

use crate::error::FetchError;

/// A single weather lookup: the city name the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    city: String,
}

impl Query {
    /// Build a query, rejecting a city that is empty, only whitespace, `.` or `..`.
    ///
    /// Surrounding whitespace is trimmed; inner spaces are kept as-is.
    pub fn new(city: impl Into<String>) -> Result<Self, FetchError> {
        let city = city.into();
        let trimmed = city.trim();

        if trimmed.is_empty() {
            return Err(FetchError::EmptyCity);
        }
        if is_dot_segment(trimmed) {
            return Err(FetchError::DotSegmentCity(trimmed.to_string()));
        }

        Ok(Self { city: trimmed.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

pub(crate) fn is_dot_segment(city: &str) -> bool {
    matches!(city, "." | "..")
}

/// Raw text returned by the weather service. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport(String);

impl WeatherReport {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
