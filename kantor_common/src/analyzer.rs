//! Best-buy/best-sell arbitrage reduction.
//!
//! Quotes are grouped by currency. Within a group the cheapest buying office and the
//! most generous selling office are picked; ties go to the quote seen first. An
//! [`Opportunity`] is emitted only when those are two different offices and the
//! sell price strictly exceeds the buy price. Output follows currency enumeration
//! order regardless of the order quotes arrived in.

use std::collections::BTreeMap;

use log::debug;

use crate::currency::Currency;
use crate::quote::{Opportunity, Quote};

/// Computes at most one opportunity per currency.
pub fn analyze(quotes: &[Quote]) -> Vec<Opportunity> {
    let mut by_currency: BTreeMap<Currency, Vec<&Quote>> = BTreeMap::new();
    for quote in quotes {
        by_currency.entry(quote.currency).or_default().push(quote);
    }

    by_currency
        .into_iter()
        .filter_map(|(currency, group)| {
            let best_buy = lowest_buy(&group)?;
            let best_sell = highest_sell(&group)?;
            let opportunity = Opportunity::between(best_buy, best_sell);
            if opportunity.is_none() {
                debug!(
                    "{}: no opportunity (buy {} at {}, sell {} at {})",
                    currency,
                    best_buy.office_name,
                    best_buy.buy_rate,
                    best_sell.office_name,
                    best_sell.sell_rate
                );
            }
            opportunity
        })
        .collect()
}

/// Quote with the minimum `buy_rate`; the first one wins ties.
fn lowest_buy<'a>(group: &[&'a Quote]) -> Option<&'a Quote> {
    group.iter().copied().fold(None, |best, quote| match best {
        Some(current) if current.buy_rate <= quote.buy_rate => Some(current),
        _ => Some(quote),
    })
}

/// Quote with the maximum `sell_rate`; the first one wins ties.
fn highest_sell<'a>(group: &[&'a Quote]) -> Option<&'a Quote> {
    group.iter().copied().fold(None, |best, quote| match best {
        Some(current) if current.sell_rate >= quote.sell_rate => Some(current),
        _ => Some(quote),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(office: &str, currency: Currency, buy: f64, sell: f64) -> Quote {
        Quote::new(office, format!("{} street", office), currency, sell, buy).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(analyze(&[]).is_empty());
    }

    #[test]
    fn finds_cross_office_spread() {
        let quotes = vec![
            quote("A", Currency::USD, 4.0, 4.2),
            quote("B", Currency::USD, 3.9, 4.1),
        ];
        let opportunities = analyze(&quotes);

        assert_eq!(opportunities.len(), 1);
        let opportunity = &opportunities[0];
        assert_eq!(opportunity.currency, Currency::USD);
        assert_eq!(opportunity.buy_office, "B");
        assert_eq!(opportunity.buy_office_address, "B street");
        assert_eq!(opportunity.buy_price, 3.9);
        assert_eq!(opportunity.sell_office, "A");
        assert_eq!(opportunity.sell_office_address, "A street");
        assert_eq!(opportunity.sell_price, 4.2);
        assert_eq!(opportunity.profit_percent, 7.69);
    }

    #[test]
    fn same_office_on_both_sides_is_skipped() {
        let quotes = vec![
            quote("A", Currency::EUR, 4.0, 4.5),
            quote("B", Currency::EUR, 4.2, 4.3),
        ];
        assert!(analyze(&quotes).is_empty());
    }

    #[test]
    fn non_positive_spread_is_skipped() {
        let quotes = vec![
            quote("A", Currency::GBP, 5.0, 4.8),
            quote("B", Currency::GBP, 5.1, 4.9),
        ];
        assert!(analyze(&quotes).is_empty());

        let quotes = vec![
            quote("A", Currency::GBP, 5.0, 4.8),
            quote("B", Currency::GBP, 5.2, 5.0),
        ];
        assert!(analyze(&quotes).is_empty());
    }

    #[test]
    fn ties_go_to_first_quote() {
        let quotes = vec![
            quote("A", Currency::CHF, 4.0, 4.4),
            quote("B", Currency::CHF, 3.8, 4.6),
            quote("C", Currency::CHF, 3.8, 4.6),
        ];
        // B holds both extremes first, C only ties them.
        assert!(analyze(&quotes).is_empty());

        let quotes = vec![
            quote("A", Currency::CHF, 3.8, 4.0),
            quote("B", Currency::CHF, 4.0, 4.6),
            quote("C", Currency::CHF, 3.8, 4.6),
        ];
        let opportunities = analyze(&quotes);
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].buy_office, "A");
        assert_eq!(opportunities[0].sell_office, "B");
    }

    #[test]
    fn output_follows_currency_enumeration() {
        let quotes = vec![
            quote("A", Currency::JPY, 0.025, 0.030),
            quote("B", Currency::JPY, 0.020, 0.026),
            quote("A", Currency::EUR, 4.25, 4.40),
            quote("B", Currency::EUR, 4.20, 4.30),
            quote("A", Currency::USD, 3.95, 4.10),
            quote("B", Currency::USD, 3.90, 4.00),
        ];
        let currencies: Vec<Currency> = analyze(&quotes).iter().map(|o| o.currency).collect();
        assert_eq!(currencies, vec![Currency::USD, Currency::EUR, Currency::JPY]);
    }

    #[test]
    fn currencies_are_reduced_independently() {
        let quotes = vec![
            quote("A", Currency::USD, 4.0, 4.2),
            quote("B", Currency::USD, 3.9, 4.1),
            quote("C", Currency::EUR, 4.3, 4.4),
        ];
        let opportunities = analyze(&quotes);
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].currency, Currency::USD);
    }
}
