/// Screener Chain - Options Chain Presentation Engine
///
/// Turns raw option contracts with upstream-computed scenario payoffs into a display model:
/// - format: nullable numbers to display strings (currency, T/B/M, K/M volume, percent)
/// - scenario: dollar vs percent rendering of one scenario payoff
/// - organize: stable strike ordering and the call ATM boundary
/// - classify: per-row ITM / unusual volume / ATM flags
/// - view: the assembled table per (side, mode, expiration)
///
/// Plus the stock quote panel and the terminal session that sequences fetches.
/// Nothing here performs I/O.
pub mod classify;
pub mod error;
pub mod format;
pub mod model;
pub mod organize;
pub mod quote;
pub mod scenario;
pub mod session;
pub mod view;

// Re-export commonly used types for convenience
pub use error::DataError;
pub use model::{ContractType, OptionContract, OptionsChain, Scenario, ScenarioOutcome, ScenarioSet};
pub use quote::{PricePoint, QuoteView, StockQuote};
pub use scenario::{resolve_scenario_cell, DisplayMode, ScenarioCell, Tone};
pub use session::{LoadState, OptionsRequest, Session, StockRequest};
pub use view::{assemble_view, ChainRow, ChainTable, ChainView, ScenarioHeader, ViewRequest};

pub use classify::{classify_rows, RowFlags};
pub use format::{
    format_currency, format_fixed, format_large_currency, format_percent, format_signed_percent,
    format_volume, PLACEHOLDER,
};
pub use organize::{atm_boundary, find_atm_boundary, organize};
