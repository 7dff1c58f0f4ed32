//! Options chain table assembly
//!
//! Composes ordering, classification, scenario resolution and formatting into a flat sequence of
//! display-ready rows. Assembly is pure: identical inputs always produce identical output.

use crate::classify::{classify_rows, RowFlags};
use crate::format::{format_currency, format_percent, format_signed_percent, format_volume};
use crate::model::{ContractType, OptionContract, OptionsChain, Scenario};
use crate::organize::{atm_boundary, organize};
use crate::scenario::{resolve_scenario_cell, DisplayMode, ScenarioCell};

/// What the caller wants to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ViewRequest {
    pub side: ContractType,
    pub mode: DisplayMode,
    /// `None` accepts whichever expiration the chain was fetched for
    pub expiration: Option<String>,
}

impl ViewRequest {
    pub fn new(side: ContractType, mode: DisplayMode) -> Self {
        Self {
            side,
            mode,
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: impl Into<String>) -> Self {
        self.expiration = Some(expiration.into());
        self
    }
}

/// Result of assembling a chain view.
///
/// `NotLoaded` and `Empty` are distinct terminal states: the former means there is nothing to
/// show yet, the latter that the data source returned no contracts for the request.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainView {
    NotLoaded,
    Empty {
        side: ContractType,
        expiration: String,
    },
    Table(ChainTable),
}

impl ChainView {
    pub fn is_loaded(&self) -> bool {
        !matches!(self, ChainView::NotLoaded)
    }

    pub fn table(&self) -> Option<&ChainTable> {
        match self {
            ChainView::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Column header for one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioHeader {
    pub scenario: Scenario,
    pub label: &'static str,
    /// Modelled underlying price, formatted
    pub target_price: String,
}

/// Display-ready options chain table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainTable {
    pub side: ContractType,
    pub mode: DisplayMode,
    pub expiration: String,
    pub headers: Vec<ScenarioHeader>,
    pub rows: Vec<ChainRow>,
    /// Row index of the ATM boundary (calls only)
    pub atm_index: Option<usize>,
}

/// One fully formatted contract row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRow {
    pub contract_name: String,
    pub strike: String,
    pub bid: String,
    pub ask: String,
    pub last_price: String,
    pub mid_premium: String,
    pub cost_per_contract: String,
    pub breakeven: String,
    pub pct_to_breakeven: String,
    pub volume: String,
    pub open_interest: String,
    pub implied_volatility: String,
    pub flags: RowFlags,
    /// One cell per [`Scenario::ALL`] entry, in order
    pub scenarios: Vec<ScenarioCell>,
}

impl ChainRow {
    fn build(contract: &OptionContract, flags: RowFlags, mode: DisplayMode) -> Self {
        Self {
            contract_name: contract.contract_name.clone(),
            strike: format_currency(Some(contract.strike)),
            bid: format_currency(contract.bid),
            ask: format_currency(contract.ask),
            last_price: format_currency(contract.last_price),
            mid_premium: format_currency(contract.mid_premium),
            cost_per_contract: format_currency(contract.cost_per_contract),
            breakeven: format_currency(contract.breakeven),
            pct_to_breakeven: format_signed_percent(contract.pct_to_breakeven, 2),
            volume: format_volume(contract.volume.map(|volume| volume as f64)),
            open_interest: format_volume(contract.open_interest.map(|oi| oi as f64)),
            implied_volatility: format_percent(contract.implied_volatility, 1),
            flags,
            scenarios: contract
                .scenarios
                .iter()
                .map(|(_, outcome)| resolve_scenario_cell(outcome, mode))
                .collect(),
        }
    }
}

/// Assemble the table for `request` from the current chain.
///
/// `chain` is `None` until a response has arrived. A chain fetched for a different expiration
/// than the one requested is stale and treated as not loaded.
pub fn assemble_view(request: &ViewRequest, chain: Option<&OptionsChain>) -> ChainView {
    let Some(chain) = chain else {
        return ChainView::NotLoaded;
    };

    if let Some(expiration) = &request.expiration {
        if *expiration != chain.selected_expiration {
            return ChainView::NotLoaded;
        }
    }

    let sorted = organize(chain.contracts(request.side));
    if sorted.is_empty() {
        return ChainView::Empty {
            side: request.side,
            expiration: chain.selected_expiration.clone(),
        };
    }

    let flags = classify_rows(request.side, &sorted);
    let rows = sorted
        .iter()
        .zip(flags)
        .map(|(contract, flags)| ChainRow::build(contract, flags, request.mode))
        .collect();

    ChainView::Table(ChainTable {
        side: request.side,
        mode: request.mode,
        expiration: chain.selected_expiration.clone(),
        headers: scenario_headers(chain.current_price),
        rows,
        atm_index: atm_boundary(request.side, &sorted),
    })
}

/// Headers for all scenarios, with target prices when the underlying price is known
pub fn scenario_headers(current_price: Option<f64>) -> Vec<ScenarioHeader> {
    Scenario::ALL
        .into_iter()
        .map(|scenario| ScenarioHeader {
            scenario,
            label: scenario.label(),
            target_price: format_currency(current_price.map(|price| scenario.target_price(price))),
        })
        .collect()
}
