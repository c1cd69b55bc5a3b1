//! Text and JSON rendering of the two views.
//!
//! Views show only the first `limit` records. An empty result renders an explicit
//! message instead of a blank screen.
use kantor_common::{Opportunity, Quote, Result};
use serde::Serialize;

/// Shown when collection produced no quotes.
pub const NO_QUOTES: &str = "No data available.";
/// Shown when no currency has a profitable spread.
pub const NO_OPPORTUNITIES: &str = "No profitable opportunities.";

/// Renders the market view.
pub fn render_quotes(quotes: &[Quote], limit: usize) -> String {
    let shown = head(quotes, limit);
    if shown.is_empty() {
        return format!("Exchange rates\n\n{}\n", NO_QUOTES);
    }

    let mut out = String::from("Exchange rates\n\n");
    for quote in shown {
        out.push_str(&format!(
            "{}\n  {}\n  {} | buy: {} | sell: {}\n\n",
            quote.office_name, quote.office_address, quote.currency, quote.buy_rate, quote.sell_rate
        ));
    }
    out
}

/// Renders the opportunities view.
pub fn render_opportunities(opportunities: &[Opportunity], limit: usize) -> String {
    let shown = head(opportunities, limit);
    if shown.is_empty() {
        return format!("Arbitrage opportunities\n\n{}\n", NO_OPPORTUNITIES);
    }

    let mut out = String::from("Arbitrage opportunities\n\n");
    for o in shown {
        out.push_str(&format!(
            "{}\n  buy at {} ({}) for {}\n  sell at {} ({}) for {}\n  profit: {}%\n\n",
            o.currency,
            o.buy_office,
            o.buy_office_address,
            o.buy_price,
            o.sell_office,
            o.sell_office_address,
            o.sell_price,
            o.profit_percent
        ));
    }
    out
}

/// Renders the first `limit` records as a JSON array.
pub fn render_json<T: Serialize>(records: &[T], limit: usize) -> Result<String> {
    Ok(serde_json::to_string_pretty(head(records, limit))?)
}

fn head<T>(records: &[T], limit: usize) -> &[T] {
    &records[..records.len().min(limit)]
}
