//! Scenario cell resolution
//!
//! One resolver renders every scenario cell, dispatching on [`DisplayMode`]:
//! - Dollar: sign rebuilt as a prefix (`+$150`, `-$75`), magnitude from the absolute value.
//! - Percent: `+` only for positive, negative keeps its native minus (`+42%`, `-10%`).
//!
//! A value that rounds to zero renders unsigned with a neutral tone in both modes.

use serde::{Deserialize, Serialize};

use crate::format::{format_fixed, is_zero_text, PLACEHOLDER};
use crate::model::ScenarioOutcome;

/// Which payoff figure scenario cells display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DisplayMode {
    /// Profit/loss per contract
    #[default]
    #[serde(rename = "dollar")]
    Dollar,
    /// Percent return on premium
    #[serde(rename = "pct")]
    Percent,
}

impl DisplayMode {
    /// Convert to wire/display string
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Dollar => "dollar",
            DisplayMode::Percent => "pct",
        }
    }

    /// Parse `dollar`/`$` or `pct`/`%`, case-insensitive
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "dollar" | "$" => Some(DisplayMode::Dollar),
            "pct" | "percent" | "%" => Some(DisplayMode::Percent),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Dollar => DisplayMode::Percent,
            DisplayMode::Percent => DisplayMode::Dollar,
        }
    }

    fn select(&self, outcome: &ScenarioOutcome) -> Option<f64> {
        match self {
            DisplayMode::Dollar => outcome.pnl_per_contract,
            DisplayMode::Percent => outcome.pct_return,
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sign classification driving gain/loss colouring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    Gain,
    Loss,
    #[default]
    Neutral,
}

impl Tone {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Tone::Gain
        } else if value < 0.0 {
            Tone::Loss
        } else {
            Tone::Neutral
        }
    }
}

/// A fully rendered scenario cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScenarioCell {
    pub text: String,
    pub tone: Tone,
}

impl ScenarioCell {
    /// Placeholder cell with neutral tone
    pub fn empty() -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
            tone: Tone::Neutral,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text == PLACEHOLDER
    }
}

impl Default for ScenarioCell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Render the payoff of one scenario in the requested [`DisplayMode`].
pub fn resolve_scenario_cell(outcome: Option<&ScenarioOutcome>, mode: DisplayMode) -> ScenarioCell {
    let Some(value) = outcome
        .and_then(|outcome| mode.select(outcome))
        .filter(|value| value.is_finite())
    else {
        return ScenarioCell::empty();
    };

    // Sign and tone follow the rounded magnitude
    let magnitude = format_fixed(Some(value.abs()), 0);
    let tone = if is_zero_text(&magnitude) {
        Tone::Neutral
    } else {
        Tone::of(value)
    };
    let text = match (mode, tone) {
        (DisplayMode::Dollar, Tone::Gain) => format!("+${magnitude}"),
        (DisplayMode::Dollar, Tone::Loss) => format!("-${magnitude}"),
        (DisplayMode::Dollar, Tone::Neutral) => format!("${magnitude}"),
        (DisplayMode::Percent, Tone::Gain) => format!("+{magnitude}%"),
        (DisplayMode::Percent, Tone::Loss) => format!("-{magnitude}%"),
        (DisplayMode::Percent, Tone::Neutral) => format!("{magnitude}%"),
    };

    ScenarioCell { text, tone }
}
