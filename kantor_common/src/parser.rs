//! Extraction of office quotes from a currency listing page.
//!
//! A page lists one office per table row. Each row carries the office name, a
//! multi-line address and two rate cells in a fixed visual order: sell first, buy
//! second. Rows are parsed independently; a row that does not fit the layout is
//! dropped with its [`RowError`] logged at debug level, and the rest of the page is
//! still used.

use log::debug;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::currency::Currency;
use crate::error::ScanError;
use crate::quote::Quote;
use crate::result::Result;

/// CSS selectors describing where a source puts each quote field.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// One office listing.
    pub row: &'static str,
    /// Office name, relative to the row.
    pub name: &'static str,
    /// Office address, relative to the row.
    pub address: &'static str,
    /// Rate cells, relative to the row; first is sell, second is buy.
    pub rate: &'static str,
}

/// Markup of kantor.live city listings.
pub const KANTOR_LIVE_LAYOUT: Layout = Layout {
    row: r#"tr[class="d-flex flex-column d-md-table-row w-100 card-wrapper card-simple"]"#,
    name: "a.kantor-name",
    address: r#"td[class="border-0 align-middle kantor-address"]"#,
    rate: "div.currency-rate-value",
};

/// Reason a single row produced no quote.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// No office name element.
    #[error("office name element missing")]
    MissingName,

    /// No address element.
    #[error("office address element missing")]
    MissingAddress,

    /// Fewer than two rate cells.
    #[error("expected two rate fields, found {0}")]
    MissingRates(usize),

    /// A rate cell held no number, or a non-positive one.
    #[error("unusable rate `{0}`")]
    UnusableRate(String),
}

/// Compiled selectors for one [`Layout`].
#[derive(Debug, Clone)]
pub struct QuoteParser {
    row: Selector,
    name: Selector,
    address: Selector,
    rate: Selector,
}

impl QuoteParser {
    /// Parser for kantor.live pages.
    pub fn kantor_live() -> Result<Self> {
        Self::with_layout(&KANTOR_LIVE_LAYOUT)
    }

    /// Compiles the selectors of `layout`.
    pub fn with_layout(layout: &Layout) -> Result<Self> {
        Ok(QuoteParser {
            row: compile(layout.row)?,
            name: compile(layout.name)?,
            address: compile(layout.address)?,
            rate: compile(layout.rate)?,
        })
    }

    /// Extracts every well-formed row of `markup` as a quote for `currency`,
    /// in document order.
    pub fn parse(&self, markup: &str, currency: Currency) -> Vec<Quote> {
        let document = Html::parse_document(markup);
        let mut quotes = Vec::new();

        for (index, row) in document.select(&self.row).enumerate() {
            match self.parse_row(row, currency) {
                Ok(quote) => quotes.push(quote),
                Err(e) => debug!("{} row #{} skipped: {}", currency, index, e),
            }
        }
        quotes
    }

    /// Parses a single office row.
    pub fn parse_row(&self, row: ElementRef<'_>, currency: Currency) -> Result<Quote, RowError> {
        let name = row
            .select(&self.name)
            .next()
            .map(|el| text_of(el).trim().to_string())
            .ok_or(RowError::MissingName)?;

        let address = row
            .select(&self.address)
            .next()
            .map(|el| first_line(&text_of(el)))
            .ok_or(RowError::MissingAddress)?;

        let rates: Vec<String> = row.select(&self.rate).map(text_of).collect();
        if rates.len() < 2 {
            return Err(RowError::MissingRates(rates.len()));
        }
        let sell_rate = positive_rate(&rates[0])?;
        let buy_rate = positive_rate(&rates[1])?;

        Ok(Quote {
            office_name: name,
            office_address: address,
            currency,
            sell_rate,
            buy_rate,
        })
    }
}

/// Reads the first number out of a rate cell.
///
/// Commas are decimal separators, never thousands separators. Surrounding symbols
/// and whitespace are ignored: `"12,50 zł"` yields `12.5`, `"abc"` yields `None`.
/// Only ASCII digits count; other Unicode decimal digits are treated as symbols.
pub fn clean_rate(raw: &str) -> Option<f64> {
    let normalized = raw.replace(',', ".");
    let bytes = normalized.as_bytes();

    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let mut end = skip_digits(bytes, start);
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = skip_digits(bytes, end + 1);
    }
    normalized[start..end].parse().ok()
}

fn skip_digits(bytes: &[u8], from: usize) -> usize {
    from + bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn positive_rate(raw: &str) -> Result<f64, RowError> {
    match clean_rate(raw) {
        Some(rate) if rate > 0.0 => Ok(rate),
        _ => Err(RowError::UnusableRate(raw.trim().to_string())),
    }
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn first_line(text: &str) -> String {
    text.trim().lines().next().unwrap_or_default().trim_end().to_string()
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScanError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
