/// Stock quote document and its formatted panel
///
/// These types match the JSON document served at `GET /stock/{ticker}`.
use serde::Deserialize;

use crate::error::DataError;
use crate::format::{
    format_currency, format_fixed, format_large_currency, format_percent, format_signed_percent,
    format_volume, PLACEHOLDER,
};
use crate::scenario::Tone;

/// One daily bar of price history
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PricePoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

/// Stock quote and fundamentals
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StockQuote {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub open: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub eps: Option<f64>,
    pub beta: Option<f64>,
    /// Fraction, e.g. `0.0052` for 0.52%
    pub dividend_yield: Option<f64>,
    pub volume: Option<f64>,
    pub avg_volume: Option<f64>,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

impl StockQuote {
    /// Decode a stock document
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let quote: StockQuote = serde_json::from_str(json)?;
        if quote.ticker.trim().is_empty() {
            return Err(DataError::MissingField("ticker"));
        }
        Ok(quote)
    }

    /// Absolute change versus previous close
    pub fn change(&self) -> Option<f64> {
        Some(self.current_price? - self.previous_close?)
    }

    /// Percent change versus previous close
    pub fn change_pct(&self) -> Option<f64> {
        let previous = self.previous_close.filter(|previous| *previous != 0.0)?;
        Some(self.change()? / previous * 100.0)
    }

    /// Close prices in date order, skipping days without a close
    pub fn closes(&self) -> Vec<f64> {
        self.price_history
            .iter()
            .filter_map(|point| point.close)
            .filter(|close| close.is_finite())
            .collect()
    }
}

/// Formatted stock header panel
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteView {
    pub ticker: String,
    pub name: String,
    /// `Sector · Industry`, placeholder when both are absent
    pub classification: String,
    pub price: String,
    pub change: String,
    pub change_pct: String,
    pub change_tone: Tone,
    pub open: String,
    pub previous_close: String,
    pub day_range: String,
    pub week_52_range: String,
    pub market_cap: String,
    pub pe_ratio: String,
    pub forward_pe: String,
    pub eps: String,
    pub beta: String,
    pub dividend_yield: String,
    pub volume: String,
    pub avg_volume: String,
    /// Business summary on one line, empty when absent
    pub description: String,
    /// Close series for a sparkline
    pub closes: Vec<f64>,
}

impl QuoteView {
    pub fn from_quote(quote: &StockQuote) -> Self {
        let change = quote.change();
        let change_text = match change.filter(|change| change.is_finite()) {
            Some(change) if change > 0.0 => format!("+{}", format_fixed(Some(change), 2)),
            other => format_fixed(other, 2),
        };

        Self {
            ticker: quote.ticker.clone(),
            name: if quote.name.is_empty() {
                quote.ticker.clone()
            } else {
                quote.name.clone()
            },
            classification: classification(quote.sector.as_deref(), quote.industry.as_deref()),
            price: format_currency(quote.current_price),
            change: change_text,
            change_pct: format_signed_percent(quote.change_pct(), 2),
            change_tone: change.map(Tone::of).unwrap_or_default(),
            open: format_currency(quote.open),
            previous_close: format_currency(quote.previous_close),
            day_range: range(quote.day_low, quote.day_high),
            week_52_range: range(quote.week_52_low, quote.week_52_high),
            market_cap: format_large_currency(quote.market_cap),
            pe_ratio: format_fixed(quote.pe_ratio, 2),
            forward_pe: format_fixed(quote.forward_pe, 2),
            eps: format_currency(quote.eps),
            beta: format_fixed(quote.beta, 2),
            dividend_yield: format_percent(
                quote.dividend_yield.map(|fraction| fraction * 100.0),
                2,
            ),
            volume: format_volume(quote.volume),
            avg_volume: format_volume(quote.avg_volume),
            description: quote
                .description
                .as_deref()
                .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
                .unwrap_or_default(),
            closes: quote.closes(),
        }
    }
}

fn classification(sector: Option<&str>, industry: Option<&str>) -> String {
    match (sector, industry) {
        (Some(sector), Some(industry)) => format!("{sector} · {industry}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

fn range(low: Option<f64>, high: Option<f64>) -> String {
    match (low, high) {
        (None, None) => PLACEHOLDER.to_string(),
        (low, high) => format!("{} - {}", format_currency(low), format_currency(high)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> StockQuote {
        StockQuote {
            ticker: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            sector: Some("Technology".to_string()),
            industry: Some("Consumer Electronics".to_string()),
            current_price: Some(189.5),
            previous_close: Some(187.5),
            day_low: Some(186.0),
            day_high: Some(190.25),
            market_cap: Some(2_950_000_000_000.0),
            pe_ratio: Some(29.456),
            beta: Some(1.29),
            dividend_yield: Some(0.0052),
            volume: Some(54_300_000.0),
            avg_volume: Some(850.0),
            price_history: vec![
                PricePoint {
                    date: "2024-01-02".to_string(),
                    close: Some(185.0),
                    ..Default::default()
                },
                PricePoint {
                    date: "2024-01-03".to_string(),
                    close: None,
                    ..Default::default()
                },
                PricePoint {
                    date: "2024-01-04".to_string(),
                    close: Some(189.5),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_quote_view_formats_fields() {
        let view = QuoteView::from_quote(&quote());

        assert_eq!(view.name, "Apple Inc.");
        assert_eq!(view.classification, "Technology · Consumer Electronics");
        assert_eq!(view.price, "$189.50");
        assert_eq!(view.change, "+2.00");
        assert_eq!(view.change_pct, "+1.07%");
        assert_eq!(view.change_tone, Tone::Gain);
        assert_eq!(view.day_range, "$186.00 - $190.25");
        assert_eq!(view.week_52_range, PLACEHOLDER);
        assert_eq!(view.market_cap, "$2.95T");
        assert_eq!(view.pe_ratio, "29.46");
        assert_eq!(view.forward_pe, PLACEHOLDER);
        assert_eq!(view.eps, PLACEHOLDER);
        assert_eq!(view.dividend_yield, "0.52%");
        assert_eq!(view.volume, "54.3M");
        assert_eq!(view.avg_volume, "850");
        assert_eq!(view.closes, vec![185.0, 189.5]);
        assert_eq!(view.description, "");
    }

    #[test]
    fn test_quote_view_description_on_one_line() {
        let mut quote = quote();
        quote.description =
            Some("Apple designs  smartphones,\n personal computers...".to_string());

        let view = QuoteView::from_quote(&quote);
        assert_eq!(
            view.description,
            "Apple designs smartphones, personal computers..."
        );
    }

    #[test]
    fn test_quote_view_negative_change() {
        let mut quote = quote();
        quote.current_price = Some(180.0);
        quote.previous_close = Some(200.0);

        let view = QuoteView::from_quote(&quote);
        assert_eq!(view.change, "-20.00");
        assert_eq!(view.change_pct, "-10.00%");
        assert_eq!(view.change_tone, Tone::Loss);
    }

    #[test]
    fn test_quote_view_missing_previous_close() {
        let mut quote = quote();
        quote.previous_close = None;
        quote.name = String::new();

        let view = QuoteView::from_quote(&quote);
        assert_eq!(view.name, "AAPL");
        assert_eq!(view.change, PLACEHOLDER);
        assert_eq!(view.change_pct, PLACEHOLDER);
        assert_eq!(view.change_tone, Tone::Neutral);
    }

    #[test]
    fn test_stock_quote_from_json() {
        let json = r#"{
            "ticker": "MSFT",
            "name": "Microsoft Corporation",
            "current_price": 410.2,
            "previous_close": null,
            "dividend_yield": 0.0071,
            "price_history": [{"date": "2024-01-02", "close": 370.87}]
        }"#;

        let quote = StockQuote::from_json(json).unwrap();
        assert_eq!(quote.ticker, "MSFT");
        assert_eq!(quote.previous_close, None);
        assert_eq!(quote.closes(), vec![370.87]);

        assert_eq!(
            StockQuote::from_json(r#"{"ticker": " "}"#),
            Err(DataError::MissingField("ticker"))
        );
    }
}
