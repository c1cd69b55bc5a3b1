//! Command-line arguments for the scanner.
//!
//! This module defines the CLI interface using `clap` and turns it into a
//! [`ScanConfig`]. See `main` for end-to-end usage.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use kantor_common::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WORKERS};
use kantor_common::currency::CurrencyParser;
use kantor_common::source::SourceKind;
use kantor_common::{Currency, Result, ScanConfig, ScanError};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// View to produce.
    #[clap(subcommand)]
    pub view: View,

    /// Exchange source to scrape.
    #[clap(long, value_enum, default_value_t = SourceKind::KantorLive, global = true)]
    pub source: SourceKind,

    /// Override of the page URL; `{}` is replaced by the currency code.
    #[clap(long, global = true)]
    pub url_template: Option<String>,

    /// Number of concurrent fetches.
    #[clap(long, default_value_t = DEFAULT_WORKERS, global = true)]
    pub workers: usize,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[clap(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Currency to fetch; repeat for several. Defaults to every known currency.
    #[clap(long = "currency", short = 'c', global = true)]
    pub currencies: Vec<Currency>,

    /// Path to a text file with one currency code per line.
    /// Takes precedence over `--currency`.
    #[clap(long, global = true)]
    pub currencies_file: Option<String>,

    /// Print JSON instead of text.
    #[clap(long, global = true)]
    pub json: bool,
}

/// Views offered to the user.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum View {
    /// Latest quotes across offices.
    Market {
        /// Number of quotes to show.
        #[clap(long, default_value_t = 10)]
        limit: usize,
    },
    /// Arbitrage opportunities between offices.
    Profit {
        /// Number of opportunities to show.
        #[clap(long, default_value_t = 5)]
        limit: usize,
    },
}

impl Args {
    /// Builds scan settings from the flags.
    pub fn to_config(&self) -> Result<ScanConfig> {
        let currencies = match &self.currencies_file {
            Some(raw) => read_currencies(&normalize_path(raw))?,
            None if !self.currencies.is_empty() => self.currencies.clone(),
            None => Currency::all(),
        };

        Ok(ScanConfig {
            source: self.source,
            url_template: self.url_template.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            workers: self.workers,
            currencies,
        })
    }
}

fn read_currencies(path: &Path) -> Result<Vec<Currency>> {
    if !is_file_exist(path) {
        return Err(ScanError::Config(format!(
            "currencies file {} not found",
            path.display()
        )));
    }
    let file = File::open(path)?;
    Currency::parse_from_file(BufReader::new(file))
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_setup() {
        let args = Args::parse_from(["kantor_scanner", "profit"]);
        let config = args.to_config().unwrap();

        assert!(matches!(args.view, View::Profit { limit: 5 }));
        assert_eq!(config.workers, 5);
        assert_eq!(config.timeout, Duration::from_secs(25));
        assert_eq!(config.currencies.len(), Currency::all().len());
        assert_eq!(config.source, SourceKind::KantorLive);
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "kantor_scanner",
            "market",
            "--limit",
            "3",
            "-c",
            "eur",
            "--currency",
            "USD",
            "--workers",
            "2",
            "--timeout-secs",
            "7",
            "--json",
        ]);
        let config = args.to_config().unwrap();

        assert!(matches!(args.view, View::Market { limit: 3 }));
        assert!(args.json);
        assert_eq!(config.currencies, vec![Currency::EUR, Currency::USD]);
        assert_eq!(config.workers, 2);
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn missing_currencies_file_is_reported() {
        let args = Args::parse_from([
            "kantor_scanner",
            "market",
            "--currencies-file",
            "\"/nonexistent/currencies.txt\"",
        ]);
        assert!(matches!(args.to_config(), Err(ScanError::Config(_))));
    }

    #[test]
    fn quoted_paths_are_unwrapped() {
        assert_eq!(normalize_path("  \"C:/data/list.txt\" "), PathBuf::from("C:/data/list.txt"));
        assert_eq!(normalize_path("list.txt"), PathBuf::from("list.txt"));
    }
}
