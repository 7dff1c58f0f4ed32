//! Terminal session state
//!
//! Tracks what the user has asked for and which responses are still wanted. Every fetch is
//! described by a request carrying a sequence number; a response is applied only if its request
//! is still the latest of its kind (last-request-wins). Everything else is discarded.

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::model::{ContractType, OptionsChain};
use crate::quote::{QuoteView, StockQuote};
use crate::scenario::DisplayMode;
use crate::view::{assemble_view, ChainView, ViewRequest};

/// Stock fetch to issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockRequest {
    pub seq: u64,
    pub ticker: String,
}

/// Options fetch to issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionsRequest {
    pub seq: u64,
    pub ticker: String,
    /// `None` lets the data source pick the nearest expiration
    pub expiration: Option<String>,
}

/// Load state of one fetched document
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Single-page terminal session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    input: String,
    ticker: Option<String>,
    quote: LoadState<StockQuote>,
    chain: LoadState<OptionsChain>,
    expirations: Vec<String>,
    expiration: Option<String>,
    side: ContractType,
    mode: DisplayMode,
    error: Option<String>,
    next_seq: u64,
    latest_stock: Option<u64>,
    latest_options: Option<u64>,
}

impl Session {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Ticker search box contents
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_input(&mut self, c: char) {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=') {
            self.input.push(c.to_ascii_uppercase());
        }
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Search for the ticker currently in the input box
    pub fn submit_input(&mut self) -> Option<StockRequest> {
        let ticker = self.input.clone();
        self.search(&ticker)
    }

    /// Start a new ticker search, superseding every in-flight request.
    ///
    /// Returns `None` for blank input.
    pub fn search(&mut self, ticker: &str) -> Option<StockRequest> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return None;
        }

        info!(%ticker, "searching ticker");
        self.input = ticker.clone();
        self.ticker = Some(ticker.clone());
        self.quote = LoadState::Loading;
        self.chain = LoadState::Idle;
        self.expirations.clear();
        self.expiration = None;
        self.error = None;
        self.latest_options = None;

        let seq = self.bump_seq();
        self.latest_stock = Some(seq);
        Some(StockRequest { seq, ticker })
    }

    /// Apply a stock response; on success returns the options fetch for the same ticker.
    pub fn apply_stock<E>(
        &mut self,
        request: &StockRequest,
        result: Result<StockQuote, E>,
    ) -> Option<OptionsRequest>
    where
        E: Display,
    {
        if self.latest_stock != Some(request.seq) {
            debug!(seq = request.seq, ticker = %request.ticker, "discarding stale stock response");
            return None;
        }
        self.latest_stock = None;

        match result {
            Ok(quote) => {
                debug!(ticker = %request.ticker, "stock quote loaded");
                self.quote = LoadState::Ready(quote);
                Some(self.request_options(request.ticker.clone(), None))
            }
            Err(error) => {
                warn!(ticker = %request.ticker, %error, "stock fetch failed");
                self.quote = LoadState::Idle;
                self.error = Some(error.to_string());
                None
            }
        }
    }

    /// Apply an options response if it answers the latest options request.
    ///
    /// Returns whether the response was accepted.
    pub fn apply_options<E>(
        &mut self,
        request: &OptionsRequest,
        result: Result<OptionsChain, E>,
    ) -> bool
    where
        E: Display,
    {
        if self.latest_options != Some(request.seq) {
            debug!(
                seq = request.seq,
                ticker = %request.ticker,
                expiration = ?request.expiration,
                "discarding stale options response"
            );
            return false;
        }
        self.latest_options = None;

        match result {
            Ok(chain) => {
                debug!(
                    ticker = %request.ticker,
                    expiration = %chain.selected_expiration,
                    calls = chain.calls.len(),
                    puts = chain.puts.len(),
                    "options chain loaded"
                );
                self.expirations = chain.expirations.clone();
                if !chain.selected_expiration.is_empty() {
                    self.expiration = Some(chain.selected_expiration.clone());
                }
                self.chain = LoadState::Ready(chain);
            }
            Err(error) => {
                warn!(ticker = %request.ticker, %error, "options fetch failed");
                self.chain = LoadState::Idle;
                self.error = Some(error.to_string());
            }
        }
        true
    }

    /// Switch to `expiration`, returning the options fetch to issue.
    ///
    /// `None` when no ticker is loaded, the expiration is unknown, or already selected and
    /// loaded (or loading). Re-selecting an expiration whose fetch failed retries it.
    pub fn select_expiration(&mut self, expiration: &str) -> Option<OptionsRequest> {
        let ticker = self.ticker.clone()?;
        let already_selected = self.expiration.as_deref() == Some(expiration)
            && !matches!(self.chain, LoadState::Idle);
        if self.quote.ready().is_none()
            || !self.expirations.iter().any(|known| known == expiration)
            || already_selected
        {
            return None;
        }

        info!(%ticker, %expiration, "selecting expiration");
        self.expiration = Some(expiration.to_string());
        self.error = None;
        Some(self.request_options(ticker, Some(expiration.to_string())))
    }

    /// Re-issue the options fetch for the current expiration after a failure.
    ///
    /// Also recovers when the first options fetch failed and no expirations are known yet.
    /// `None` unless a quote is loaded and the chain is idle.
    pub fn retry_options(&mut self) -> Option<OptionsRequest> {
        let ticker = self.ticker.clone()?;
        if self.quote.ready().is_none() || !matches!(self.chain, LoadState::Idle) {
            return None;
        }

        info!(%ticker, expiration = ?self.expiration, "retrying options fetch");
        self.error = None;
        let expiration = self.expiration.clone();
        Some(self.request_options(ticker, expiration))
    }

    pub fn next_expiration(&mut self) -> Option<OptionsRequest> {
        let target = self.step_expiration(1)?;
        self.select_expiration(&target)
    }

    pub fn prev_expiration(&mut self) -> Option<OptionsRequest> {
        let target = self.step_expiration(-1)?;
        self.select_expiration(&target)
    }

    pub fn set_side(&mut self, side: ContractType) {
        self.side = side;
    }

    pub fn toggle_side(&mut self) {
        self.side = self.side.opposite();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref()
    }

    pub fn side(&self) -> ContractType {
        self.side
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn expirations(&self) -> &[String] {
        &self.expirations
    }

    pub fn expiration(&self) -> Option<&str> {
        self.expiration.as_deref()
    }

    /// User-visible error banner from the last failed fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn quote(&self) -> Option<&StockQuote> {
        self.quote.ready()
    }

    pub fn is_loading(&self) -> bool {
        self.quote.is_loading() || self.chain.is_loading()
    }

    pub fn quote_view(&self) -> Option<QuoteView> {
        self.quote.ready().map(QuoteView::from_quote)
    }

    /// Current chain table for the selected side, mode and expiration
    pub fn chain_view(&self) -> ChainView {
        let request = ViewRequest {
            side: self.side,
            mode: self.mode,
            expiration: self.expiration.clone(),
        };
        assemble_view(&request, self.chain.ready())
    }

    fn request_options(&mut self, ticker: String, expiration: Option<String>) -> OptionsRequest {
        self.chain = LoadState::Loading;
        let seq = self.bump_seq();
        self.latest_options = Some(seq);
        OptionsRequest {
            seq,
            ticker,
            expiration,
        }
    }

    fn step_expiration(&self, step: isize) -> Option<String> {
        let current = self.expiration.as_deref()?;
        let index = self.expirations.iter().position(|known| known == current)?;
        let target = index.checked_add_signed(step)?;
        self.expirations.get(target).cloned()
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}
