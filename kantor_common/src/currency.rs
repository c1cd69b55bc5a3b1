//! Currency codes quoted by the exchange offices and helpers to read a currency list.
//!
//! Declaration order of [`Currency`] is the fixed enumeration order: it drives the
//! default fetch list and the order of analysis output.

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ScanError;

/// Trait providing file parsing for currency lists.
pub trait CurrencyParser {
    /// Parses currencies from a buffered reader.
    ///
    /// Each non-empty line is parsed as a single `Currency` value using `FromStr`.
    /// Returns an error if any line cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Currency>, ScanError>;
}

impl CurrencyParser for Currency {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, ScanError> {
        let mut currencies = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }

            match trimmed_line.parse::<Self>() {
                Ok(currency) => currencies.push(currency),
                Err(e) => {
                    return Err(ScanError::ParseCurrenciesFile(format!(
                        "`{}`: {}",
                        trimmed_line, e
                    )));
                }
            }
        }
        Ok(currencies)
    }
}

impl Currency {
    /// Every supported currency in enumeration order.
    pub fn all() -> Vec<Currency> {
        Currency::iter().collect()
    }
}

/// Set of currencies listed by the offices.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    CZK,
    NOK,
    DKK,
    HRK,
    HUF,
    SEK,
    TRY,
    UAH,
    LTL,
    THB,
    HKD,
    ILS,
    MOP,
    SCR,
    MXN,
    CVE,
    RUB,
    ZAR,
    SAR,
    MYR,
    QAR,
    AED,
    CLP,
    RSD,
    KES,
    AZN,
    AUD,
    BGN,
    TWD,
    COP,
    CRC,
    BHD,
    TND,
    OMR,
    MVR,
    RON,
    JOD,
    CHF,
    CAD,
    GEL,
    LKR,
    MDL,
    EEK,
    NZD,
    VND,
    PEN,
    UZS,
    BRL,
    EGP,
    PHP,
    ISK,
    MUR,
    CNY,
    BAM,
    INR,
    ALL,
    MAD,
    AMD,
    KRW,
    DOP,
    MKD,
    KWD,
    TZS,
    BYN,
    KZT,
    SGD,
    JPY,
    LVL,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn enumeration_keeps_declared_order() {
        let all = Currency::all();
        assert_eq!(all.len(), 71);
        assert_eq!(all.first(), Some(&Currency::USD));
        assert_eq!(all.last(), Some(&Currency::LVL));
        assert!(Currency::USD < Currency::EUR);
        assert!(Currency::JPY < Currency::LVL);
    }

    #[test]
    fn code_round_trips_through_display() {
        assert_eq!(Currency::CHF.to_string(), "CHF");
        assert_eq!("chf".parse::<Currency>().ok(), Some(Currency::CHF));
    }

    #[test]
    fn parses_list_skipping_blank_lines() {
        let input = Cursor::new("usd\n\n  EUR  \nGbp\n");
        let currencies = Currency::parse_from_file(input).unwrap();
        assert_eq!(currencies, vec![Currency::USD, Currency::EUR, Currency::GBP]);
    }

    #[test]
    fn rejects_unknown_code() {
        let input = Cursor::new("USD\nXYZ\n");
        let err = Currency::parse_from_file(input).unwrap_err();
        assert!(matches!(err, ScanError::ParseCurrenciesFile(ref msg) if msg.contains("XYZ")));
    }
}
