//! Kantor Scanner — collects exchange-office quotes and reports arbitrage spreads.
//!
//! Both views start with a fresh collection cycle: one page per configured currency,
//! fetched on a bounded worker pool. `market` prints the first quotes collected,
//! `profit` runs the best-buy/best-sell analysis over them.
//!
//! Usage example (CLI):
//! ```bash
//! kantor_scanner market --limit 10
//! kantor_scanner profit --workers 5 --timeout-secs 25 -c usd -c eur
//! kantor_scanner profit --currencies-file ./currencies.txt --json
//! ```
#![warn(missing_docs)]
mod args;
mod view;

use std::io::Write;

use chrono::Local;
use clap::Parser;
use kantor_common::{Result, ScanError, analyze};
use log::{info, warn};

use crate::args::{Args, View};

fn main() -> Result<(), ScanError> {
    init_logger();
    let args = Args::parse();
    let config = args.to_config()?;
    info!(
        "Scanning {} currencies from {} with {} workers",
        config.currencies.len(),
        config.source,
        config.workers
    );

    let collector = config.build_collector()?;
    let collection = collector.collect();
    if !collection.failed.is_empty() {
        warn!(
            "{} currencies could not be fetched: {}",
            collection.failed.len(),
            collection
                .failed
                .iter()
                .map(|f| f.currency.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let output = match args.view {
        View::Market { limit } if args.json => view::render_json(&collection.quotes, limit)?,
        View::Market { limit } => view::render_quotes(&collection.quotes, limit),
        View::Profit { limit } => {
            let opportunities = analyze(&collection.quotes);
            info!("{} opportunities found", opportunities.len());
            if args.json {
                view::render_json(&opportunities, limit)?
            } else {
                view::render_opportunities(&opportunities, limit)
            }
        }
    };

    let mut stdout = std::io::stdout().lock();
    if !args.json {
        writeln!(stdout, "Collected at {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    }
    writeln!(stdout, "{}", output)?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
