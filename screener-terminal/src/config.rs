/// Terminal configuration
///
/// Read from environment variables, falling back to defaults for anything unset or unparsable:
/// - `SCREENER_API_URL`: data source base URL (default `http://localhost:8000`)
/// - `SCREENER_TIMEOUT_SECS`: per-request timeout (default 15)
/// - `SCREENER_TICK_MS`: UI redraw interval (default 250)
/// - `SCREENER_LOG_FILE`: tracing output file (default `screener.log`)
/// - `SCREENER_TICKER`: ticker searched on startup (optional)
/// - `SCREENER_MODE`: initial scenario mode, `dollar` or `pct` (default `dollar`)
use std::path::PathBuf;
use std::time::Duration;

use screener_chain::DisplayMode;

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalConfig {
    /// Data source base URL
    pub api_url: String,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Redraw interval
    pub tick_rate: Duration,
    /// File receiving tracing output (stdout belongs to the UI)
    pub log_file: PathBuf,
    /// Ticker to search immediately on startup
    pub initial_ticker: Option<String>,
    /// Initial scenario display mode
    pub mode: DisplayMode,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(15),
            tick_rate: Duration::from_millis(250),
            log_file: PathBuf::from("screener.log"),
            initial_ticker: None,
            mode: DisplayMode::Dollar,
        }
    }
}

impl TerminalConfig {
    /// Create a new configuration with custom API URL
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Load from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            api_url: non_empty("SCREENER_API_URL")
                .map(|url| url.trim().to_string())
                .unwrap_or(defaults.api_url),
            request_timeout: non_empty("SCREENER_TIMEOUT_SECS")
                .and_then(|secs| secs.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            tick_rate: non_empty("SCREENER_TICK_MS")
                .and_then(|ms| ms.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_rate),
            log_file: non_empty("SCREENER_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            initial_ticker: non_empty("SCREENER_TICKER").map(|ticker| ticker.trim().to_uppercase()),
            mode: non_empty("SCREENER_MODE")
                .and_then(|mode| DisplayMode::parse(&mode))
                .unwrap_or(defaults.mode),
        }
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set redraw interval
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set log file
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Set startup ticker
    pub fn with_initial_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.initial_ticker = Some(ticker.into());
        self
    }

    /// Set initial display mode
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }
}
