//!
//! Core pipeline of the kantor arbitrage scanner.
//!
//! This crate aggregates:
//! - `error` — unified error type `ScanError` used across the workspace.
//! - `result` — handy `Result<T, ScanError>` alias.
//! - `currency` — the fixed currency enumeration and currency-list parsing.
//! - `quote` — `Quote` and `Opportunity` records.
//! - `parser` — extraction of quotes from an office listing page.
//! - `source` — exchange sources able to fetch and parse one currency.
//! - `collector` — bounded worker pool fanning fetches out over currencies.
//! - `analyzer` — best-buy/best-sell arbitrage reduction.
//! - `config` — scan settings and collector construction.
#![warn(missing_docs)]
pub mod analyzer;
pub mod collector;
pub mod config;
pub mod currency;
pub mod error;
pub mod parser;
pub mod quote;
pub mod result;
pub mod source;

pub use analyzer::analyze;
pub use collector::{Collection, FetchFailure, RateCollector};
pub use config::ScanConfig;
pub use currency::Currency;
pub use error::ScanError;
pub use quote::{Opportunity, Quote};
pub use result::Result;
