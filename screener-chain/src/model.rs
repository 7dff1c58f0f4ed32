/// Inbound data model for option chains
///
/// These types match the JSON documents served by the screener data source at
/// `GET /options/{ticker}`.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DataError;

/// Which side of the chain a contract belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    #[default]
    Call,
    Put,
}

impl ContractType {
    /// Convert to display string
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Call => "call",
            ContractType::Put => "put",
        }
    }

    /// The other side of the chain
    pub fn opposite(self) -> Self {
        match self {
            ContractType::Call => ContractType::Put,
            ContractType::Put => ContractType::Call,
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hypothetical move of the underlying price, modelled to expiration.
///
/// The set is fixed and ordered; every contract in a chain carries the same eight scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scenario {
    Down50,
    Down25,
    Down10,
    Up10,
    Up25,
    Up50,
    Up75,
    Up100,
}

impl Scenario {
    /// All scenarios in display order
    pub const ALL: [Scenario; 8] = [
        Scenario::Down50,
        Scenario::Down25,
        Scenario::Down10,
        Scenario::Up10,
        Scenario::Up25,
        Scenario::Up50,
        Scenario::Up75,
        Scenario::Up100,
    ];

    /// Wire label, as keyed in the `scenarios` object
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Down50 => "-50%",
            Scenario::Down25 => "-25%",
            Scenario::Down10 => "-10%",
            Scenario::Up10 => "+10%",
            Scenario::Up25 => "+25%",
            Scenario::Up50 => "+50%",
            Scenario::Up75 => "+75%",
            Scenario::Up100 => "+100%",
        }
    }

    /// Parse a wire label; labels outside the fixed set yield `None`
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scenario| scenario.label() == label)
    }

    /// Fractional move applied to the underlying (e.g. `-0.5` for `-50%`)
    pub fn move_fraction(&self) -> f64 {
        match self {
            Scenario::Down50 => -0.50,
            Scenario::Down25 => -0.25,
            Scenario::Down10 => -0.10,
            Scenario::Up10 => 0.10,
            Scenario::Up25 => 0.25,
            Scenario::Up50 => 0.50,
            Scenario::Up75 => 0.75,
            Scenario::Up100 => 1.00,
        }
    }

    /// Underlying price after the move
    pub fn target_price(&self, current_price: f64) -> f64 {
        current_price * (1.0 + self.move_fraction())
    }

    /// Position within [`Scenario::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Payoff of holding one contract to expiration under a [`Scenario`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScenarioOutcome {
    /// Modelled underlying price
    pub scenario_price: Option<f64>,
    /// Profit/loss per share
    pub pnl_per_share: Option<f64>,
    /// Profit/loss per 100-share contract
    pub pnl_per_contract: Option<f64>,
    /// Percent return on the premium paid
    pub pct_return: Option<f64>,
}

/// Outcomes keyed by the fixed scenario set.
///
/// Decodes from the wire mapping of label to outcome. Labels outside the fixed set are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, ScenarioOutcome>")]
pub struct ScenarioSet {
    outcomes: [Option<ScenarioOutcome>; 8],
}

impl ScenarioSet {
    pub fn get(&self, scenario: Scenario) -> Option<&ScenarioOutcome> {
        self.outcomes[scenario.index()].as_ref()
    }

    pub fn insert(&mut self, scenario: Scenario, outcome: ScenarioOutcome) {
        self.outcomes[scenario.index()] = Some(outcome);
    }

    /// Builder style [`ScenarioSet::insert`]
    pub fn with(mut self, scenario: Scenario, outcome: ScenarioOutcome) -> Self {
        self.insert(scenario, outcome);
        self
    }

    /// Iterate all eight scenarios in display order, present or not
    pub fn iter(&self) -> impl Iterator<Item = (Scenario, Option<&ScenarioOutcome>)> {
        Scenario::ALL
            .into_iter()
            .map(move |scenario| (scenario, self.get(scenario)))
    }

    /// Number of scenarios with an outcome
    pub fn len(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<HashMap<String, ScenarioOutcome>> for ScenarioSet {
    fn from(raw: HashMap<String, ScenarioOutcome>) -> Self {
        let mut set = ScenarioSet::default();
        for (label, outcome) in raw {
            match Scenario::from_label(&label) {
                Some(scenario) => set.insert(scenario, outcome),
                None => debug!(%label, "ignoring scenario outside the fixed label set"),
            }
        }
        set
    }
}

/// A single option contract with upstream-computed breakeven and scenario payoffs.
///
/// `in_the_money` and `unusual_volume` are sourced flags and are never recomputed here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OptionContract {
    /// Unique contract symbol (e.g. "AAPL250117C00150000")
    #[serde(default)]
    pub contract_name: String,
    pub strike: f64,
    pub expiration: Option<String>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub last_price: Option<f64>,
    pub mid_premium: Option<f64>,
    pub cost_per_contract: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
    /// Implied volatility in percent (e.g. `45.2`)
    pub implied_volatility: Option<f64>,
    #[serde(default)]
    pub in_the_money: bool,
    #[serde(default)]
    pub unusual_volume: bool,
    pub breakeven: Option<f64>,
    /// Signed percent move of the underlying required to reach breakeven
    pub pct_to_breakeven: Option<f64>,
    #[serde(default)]
    pub scenarios: ScenarioSet,
}

/// Options chain for one (ticker, expiration) query.
///
/// Replaced wholesale on every query, never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OptionsChain {
    #[serde(default)]
    pub ticker: String,
    pub current_price: Option<f64>,
    /// Available expirations as `YYYY-MM-DD`, nearest first
    #[serde(default)]
    pub expirations: Vec<String>,
    #[serde(default)]
    pub selected_expiration: String,
    #[serde(default)]
    pub calls: Vec<OptionContract>,
    #[serde(default)]
    pub puts: Vec<OptionContract>,
}

impl OptionsChain {
    /// Decode an options document
    ///
    /// JSON has no NaN or infinity literals, so every decoded strike is finite.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Contracts for one side, in data source order
    pub fn contracts(&self, side: ContractType) -> &[OptionContract] {
        match side {
            ContractType::Call => &self.calls,
            ContractType::Put => &self.puts,
        }
    }
}
