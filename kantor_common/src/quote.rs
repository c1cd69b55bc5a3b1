//! Normalized exchange-office records.
//!
//! A `Quote` is one office's posted sell/buy pair for one currency at fetch time.
//! An `Opportunity` pairs the cheapest buying office with the most generous selling
//! office of the same currency. Both are plain in-memory values; nothing here is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// One office's posted rate for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Office display name. Not unique across the data set.
    pub office_name: String,
    /// First line of the office location.
    pub office_address: String,
    /// Quoted currency.
    pub currency: Currency,
    /// Price at which the office sells the currency to a customer.
    pub sell_rate: f64,
    /// Price at which the office buys the currency from a customer.
    pub buy_rate: f64,
}

impl Quote {
    /// Creates a quote; `None` unless both rates are strictly positive.
    pub fn new(
        office_name: impl Into<String>,
        office_address: impl Into<String>,
        currency: Currency,
        sell_rate: f64,
        buy_rate: f64,
    ) -> Option<Self> {
        if !(sell_rate > 0.0 && buy_rate > 0.0) {
            return None;
        }
        Some(Quote {
            office_name: office_name.into(),
            office_address: office_address.into(),
            currency,
            sell_rate,
            buy_rate,
        })
    }
}

/// Arbitrage signal for one currency: buy at `buy_office`, sell to `sell_office`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Currency both offices quote.
    pub currency: Currency,
    /// Office with the lowest buy rate.
    pub buy_office: String,
    /// Address of `buy_office`.
    pub buy_office_address: String,
    /// Lowest buy rate found.
    pub buy_price: f64,
    /// Office with the highest sell rate.
    pub sell_office: String,
    /// Address of `sell_office`.
    pub sell_office_address: String,
    /// Highest sell rate found.
    pub sell_price: f64,
    /// `(sell_price - buy_price) / buy_price * 100`, two decimal places.
    pub profit_percent: f64,
}

impl Opportunity {
    /// Pairs `best_buy` with `best_sell`.
    ///
    /// Returns `None` when both quotes come from the same office or the spread is
    /// not strictly positive.
    pub fn between(best_buy: &Quote, best_sell: &Quote) -> Option<Self> {
        if best_buy.office_name == best_sell.office_name {
            return None;
        }
        if best_sell.sell_rate <= best_buy.buy_rate {
            return None;
        }
        let profit = (best_sell.sell_rate - best_buy.buy_rate) / best_buy.buy_rate * 100.0;

        Some(Opportunity {
            currency: best_buy.currency,
            buy_office: best_buy.office_name.clone(),
            buy_office_address: best_buy.office_address.clone(),
            buy_price: best_buy.buy_rate,
            sell_office: best_sell.office_name.clone(),
            sell_office_address: best_sell.office_address.clone(),
            sell_price: best_sell.sell_rate,
            profit_percent: round2(profit),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_requires_positive_rates() {
        assert!(Quote::new("A", "Street 1", Currency::USD, 4.1, 4.0).is_some());
        assert!(Quote::new("A", "Street 1", Currency::USD, 0.0, 4.0).is_none());
        assert!(Quote::new("A", "Street 1", Currency::USD, 4.1, -1.0).is_none());
        assert!(Quote::new("A", "Street 1", Currency::USD, f64::NAN, 4.0).is_none());
    }

    #[test]
    fn profit_is_rounded_to_two_places() {
        let buy = Quote::new("B", "b", Currency::EUR, 4.1, 3.9).unwrap();
        let sell = Quote::new("A", "a", Currency::EUR, 4.2, 4.0).unwrap();
        let opportunity = Opportunity::between(&buy, &sell).unwrap();
        assert_eq!(opportunity.profit_percent, 7.69);
        assert_eq!(opportunity.buy_office, "B");
        assert_eq!(opportunity.sell_office, "A");
    }

    #[test]
    fn same_office_is_not_an_opportunity() {
        let quote = Quote::new("A", "a", Currency::EUR, 4.2, 3.9).unwrap();
        assert_eq!(Opportunity::between(&quote, &quote), None);
    }

    #[test]
    fn flat_spread_is_not_an_opportunity() {
        let buy = Quote::new("B", "b", Currency::EUR, 4.0, 4.0).unwrap();
        let sell = Quote::new("A", "a", Currency::EUR, 4.0, 4.1).unwrap();
        assert_eq!(Opportunity::between(&buy, &sell), None);
    }
}
