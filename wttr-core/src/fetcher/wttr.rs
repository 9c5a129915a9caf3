use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{FetchError, Query, WeatherReport};

use super::{FetchOptions, WeatherFetcher, build_url};

// wttr.in answers unknown agents with HTML; plain text needs a terminal-client agent.
const USER_AGENT: &str =
    concat!("curl/8.0 (compatible; wttr-core/", env!("CARGO_PKG_VERSION"), ")");

/// Fetches plain-text weather from wttr.in (or any service with the same URL shape).
#[derive(Debug, Clone)]
pub struct WttrFetcher {
    options: FetchOptions,
    http: Client,
}

impl WttrFetcher {
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { options, http })
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout { secs: self.options.timeout_secs }
        } else {
            FetchError::Network(err)
        }
    }
}

#[async_trait]
impl WeatherFetcher for WttrFetcher {
    #[instrument(skip_all, fields(city = %query.city()))]
    async fn fetch(&self, query: &Query) -> Result<WeatherReport, FetchError> {
        let url = build_url(&self.options.base_url, query.city())?;
        debug!(%url, format = ?self.options.format, "requesting weather");

        let mut req = self.http.get(url);
        if let Some(format) = &self.options.format {
            req = req.query(&[("format", format.as_str())]);
        }

        let res = req.send().await.map_err(|e| self.classify(e))?;

        let status = res.status();
        debug!(%status, "weather service responded");

        let body = res.text().await.map_err(|e| {
            if e.is_timeout() { self.classify(e) } else { FetchError::Body(e) }
        })?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        Ok(WeatherReport::new(body))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
