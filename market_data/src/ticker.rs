//! Ticker metadata shown next to the closing price summary

use serde::{Deserialize, Serialize};

/// General information about a ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    /// Exchange symbol
    pub symbol: String,
    /// Short company name
    pub short_name: Option<String>,
    /// Trading currency
    pub currency: Option<String>,
    /// Lowest price over the last 52 weeks
    pub fifty_two_week_low: Option<f64>,
    /// Highest price over the last 52 weeks
    pub fifty_two_week_high: Option<f64>,
    /// Close of the previous session
    pub previous_close: Option<f64>,
    /// Latest traded price
    pub regular_market_price: Option<f64>,
}

impl TickerInfo {
    /// Metadata for a ticker known only by its symbol
    pub fn from_symbol(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            ..Self::default()
        }
    }

    /// Company name, falling back to the symbol
    pub fn company_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.symbol)
    }
}

impl std::fmt::Display for TickerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn cell(value: Option<f64>) -> String {
            value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
        }

        writeln!(f, "{:=^35}", format!(" {} Overview ", self.symbol))?;
        let rows = [
            ("52-week Low", cell(self.fifty_two_week_low)),
            ("52-week High", cell(self.fifty_two_week_high)),
            ("Previous Close", cell(self.previous_close)),
            ("Market Price", cell(self.regular_market_price)),
        ];
        for (label, value) in rows {
            writeln!(f, "| {:16} | {:>12} |", label, value)?;
        }
        write!(f, "{}", "=".repeat(35))
    }
}
