use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use wttr_core::{Config, FetchOptions, Query, WeatherFetcher, WttrFetcher};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Print the current weather for a city (via wttr.in)")]
pub struct Cli {
    /// City name. Several words are joined with spaces, so quoting is optional.
    #[arg(required = true, value_name = "CITY")]
    pub city: Vec<String>,

    /// wttr.in format template, e.g. "%l: %c %t".
    #[arg(long, conflicts_with = "full")]
    pub format: Option<String>,

    /// Print the full multi-day forecast instead of a one-liner.
    #[arg(long)]
    pub full: bool,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Weather-text endpoint the city is appended to.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn city(&self) -> String {
        self.city.join(" ")
    }

    /// Config file values, overridden by whatever was given on the command line.
    pub fn fetch_options(&self, config: &Config) -> FetchOptions {
        let mut options = config.fetch_options();

        if let Some(base_url) = &self.base_url {
            options.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout {
            options.timeout_secs = secs;
        }
        if self.full {
            options.format = None;
        } else if let Some(format) = &self.format {
            options.format = Some(format.clone()).filter(|f| !f.is_empty());
        }

        options
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub async fn run(&self, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
        let query = Query::new(self.city())?;
        let fetcher = WttrFetcher::new(self.fetch_options(config))?;
        debug!(options = ?fetcher.options(), "resolved fetch options");

        let report = fetcher.fetch(&query).await?;

        writeln!(out, "{}", report.as_str().trim_end()).context("Failed to write weather report")?;

        Ok(())
    }
}

/// Print a one-line failure message for `result` and map it to a process exit code.
pub fn report_outcome(city: &str, result: &anyhow::Result<()>, err_out: &mut impl Write) -> u8 {
    let Err(err) = result else {
        return EXIT_SUCCESS;
    };

    // Nothing useful to do if stderr itself is gone.
    let _ = match city.trim() {
        "" => writeln!(err_out, "Error: {err:#}"),
        city => writeln!(err_out, "Error fetching weather for {city}: {err:#}"),
    };

    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("weather").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    async fn run_cli(args: &[&str]) -> (u8, String, String) {
        let cli = parse(args);
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = cli.run(&Config::default(), &mut out).await;
        let code = report_outcome(&cli.city(), &result, &mut err);

        (code, String::from_utf8(out).expect("utf8"), String::from_utf8(err).expect("utf8"))
    }

    #[test]
    fn city_words_are_joined() {
        assert_eq!(parse(&["New", "York"]).city(), "New York");
        assert_eq!(parse(&["New York"]).city(), "New York");
    }

    #[test]
    fn city_is_required() {
        assert!(Cli::try_parse_from(["weather"]).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["weather", "--timeout", "0", "Madrid"]).is_err());
    }

    #[test]
    fn format_and_full_conflict() {
        assert!(Cli::try_parse_from(["weather", "--full", "--format", "%t", "Madrid"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "--base-url",
            "http://localhost:1",
            "--timeout",
            "3",
            "--format",
            "%t",
            "Rome",
        ]);
        let options = cli.fetch_options(&Config::default());

        assert_eq!(options.base_url, "http://localhost:1");
        assert_eq!(options.timeout_secs, 3);
        assert_eq!(options.format.as_deref(), Some("%t"));
    }

    #[test]
    fn full_drops_format_template() {
        let options = parse(&["--full", "Rome"]).fetch_options(&Config::default());
        assert!(options.format.is_none());
    }

    #[test]
    fn config_used_when_no_flags() {
        let config = Config { timeout_secs: 7, ..Config::default() };
        let options = parse(&["Rome"]).fetch_options(&config);

        assert_eq!(options, config.fetch_options());
    }

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(parse(&["Rome"]).log_filter(), "warn");
        assert_eq!(parse(&["-v", "Rome"]).log_filter(), "info");
        assert_eq!(parse(&["-vv", "Rome"]).log_filter(), "debug");
        assert_eq!(parse(&["-vvvv", "Rome"]).log_filter(), "trace");
    }

    #[test]
    fn success_maps_to_zero_and_prints_nothing_to_stderr() {
        let mut err = Vec::new();
        assert_eq!(report_outcome("Madrid", &Ok(()), &mut err), EXIT_SUCCESS);
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn prints_report_and_exits_zero() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Madrid"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Madrid: 22°C, Sunny\n"))
            .mount(&mock_server)
            .await;

        let (code, out, err) = run_cli(&["--base-url", &mock_server.uri(), "Madrid"]).await;

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "Madrid: 22°C, Sunny\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn multi_word_city_reaches_escaped_path() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/New%20York"))
            .respond_with(ResponseTemplate::new(200).set_body_string("New York: 12°C"))
            .mount(&mock_server)
            .await;

        let (code, out, _) = run_cli(&["--base-url", &mock_server.uri(), "New", "York"]).await;

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "New York: 12°C\n");
    }

    #[tokio::test]
    async fn connection_refused_exits_non_zero_with_message() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let base_url = format!("http://{}", listener.local_addr().expect("addr"));
        drop(listener);

        let (code, out, err) = run_cli(&["--base-url", &base_url, "Madrid"]).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(
            err.starts_with("Error fetching weather for Madrid: could not reach weather service")
        );
        assert_eq!(err.lines().count(), 1);
        assert!(!err.contains("backtrace"));
    }

    #[tokio::test]
    async fn remote_error_status_exits_non_zero() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Unknown location"))
            .mount(&mock_server)
            .await;

        let (code, _, err) = run_cli(&["--base-url", &mock_server.uri(), "Atlantis"]).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(err.contains("404"));
        assert!(err.contains("Unknown location"));
    }

    #[tokio::test]
    async fn empty_city_exits_non_zero_without_request() {
        let mock_server = MockServer::start().await;

        let (code, out, err) = run_cli(&["--base-url", &mock_server.uri(), ""]).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, "Error: city name must not be empty\n");

        let requests = mock_server.received_requests().await.expect("recording enabled");
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn dot_city_exits_non_zero_without_request() {
        let mock_server = MockServer::start().await;

        let (code, out, err) = run_cli(&["--base-url", &mock_server.uri(), ".."]).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, "Error fetching weather for ..: '..' is not a city name\n");

        let requests = mock_server.received_requests().await.expect("recording enabled");
        assert!(requests.is_empty());
    }
}
