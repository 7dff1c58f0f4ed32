/// HTTP client for the screener data source
///
/// - `GET {api}/stock/{ticker}`: quote, fundamentals and a year of daily closes
/// - `GET {api}/options/{ticker}?expiration=YYYY-MM-DD`: option chain with scenario payoffs
///
/// No retries: a failed request is reported once and the user searches again.
use reqwest::{StatusCode, Url};
use screener_chain::{DataError, OptionsChain, StockQuote};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::TerminalConfig;

/// All errors generated while fetching from the data source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("bad response: {0}")]
    Data(#[from] DataError),
}

/// FastAPI error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &TerminalConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|error| FetchError::InvalidUrl(format!("{}: {}", config.api_url, error)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.api_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn stock_url(&self, ticker: &str) -> Url {
        self.endpoint(&["stock", ticker])
    }

    pub fn options_url(&self, ticker: &str, expiration: Option<&str>) -> Url {
        let mut url = self.endpoint(&["options", ticker]);
        if let Some(expiration) = expiration {
            url.query_pairs_mut().append_pair("expiration", expiration);
        }
        url
    }

    pub async fn fetch_stock(&self, ticker: &str) -> Result<StockQuote, FetchError> {
        let body = self.get(self.stock_url(ticker)).await?;
        Ok(StockQuote::from_json(&body)?)
    }

    pub async fn fetch_options(
        &self,
        ticker: &str,
        expiration: Option<&str>,
    ) -> Result<OptionsChain, FetchError> {
        let body = self.get(self.options_url(ticker, expiration)).await?;
        Ok(OptionsChain::from_json(&body)?)
    }

    async fn get(&self, url: Url) -> Result<String, FetchError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status, &body))
        }
    }

    /// Base URL with path segments appended (percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn status_error(status: StatusCode, body: &str) -> FetchError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|body| body.detail)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });

    if status == StatusCode::NOT_FOUND {
        FetchError::NotFound(detail)
    } else {
        FetchError::Status {
            status: status.as_u16(),
            detail,
        }
    }
}
