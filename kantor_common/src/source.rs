//! Exchange sources.
//!
//! A source knows how to fetch one currency's listing page and turn it into quotes.
//! The set of sources is closed: [`SourceKind`] enumerates them and builds the
//! matching [`RateSource`] implementation from scan settings.

use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::config::ScanConfig;
use crate::currency::Currency;
use crate::error::ScanError;
use crate::parser::QuoteParser;
use crate::quote::Quote;
use crate::result::Result;

/// Placeholder replaced by the currency code in URL templates.
pub const CURRENCY_PLACEHOLDER: &str = "{}";

/// Fetch-and-parse capability for one currency.
pub trait RateSource: Send + Sync {
    /// Short identifier used in logs and failure reports.
    fn name(&self) -> &str;

    /// Fetches the listing for `currency` and parses it.
    ///
    /// Transport problems are errors; an empty or unrecognised page is `Ok(vec![])`.
    fn fetch_quotes(&self, currency: Currency) -> Result<Vec<Quote>>;
}

/// Known exchange sources.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// kantor.live city listing (Lublin).
    KantorLive,
}

impl SourceKind {
    /// URL template used when the configuration does not override it.
    pub fn default_url_template(&self) -> &'static str {
        match self {
            SourceKind::KantorLive => "https://kantor.live/kantory/lublin/{}",
        }
    }

    /// Builds the source described by `config`.
    pub fn build(&self, config: &ScanConfig) -> Result<Arc<dyn RateSource>> {
        match self {
            SourceKind::KantorLive => Ok(Arc::new(KantorLive::new(
                config.url_template(),
                &config.user_agent,
                config.timeout,
            )?)),
        }
    }
}

/// kantor.live scraper: one GET per currency page.
pub struct KantorLive {
    client: Client,
    url_template: String,
    parser: QuoteParser,
}

impl KantorLive {
    /// Creates the scraper with a per-request `timeout` and a fixed `user_agent`.
    pub fn new(url_template: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        if !url_template.contains(CURRENCY_PLACEHOLDER) {
            return Err(ScanError::Config(format!(
                "URL template `{}` has no `{}` placeholder",
                url_template, CURRENCY_PLACEHOLDER
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(KantorLive {
            client,
            url_template: url_template.to_string(),
            parser: QuoteParser::kantor_live()?,
        })
    }

    /// Page URL for `currency`.
    pub fn url_for(&self, currency: Currency) -> String {
        self.url_template
            .replace(CURRENCY_PLACEHOLDER, &currency.to_string())
    }
}

impl RateSource for KantorLive {
    fn name(&self) -> &str {
        "kantor-live"
    }

    fn fetch_quotes(&self, currency: Currency) -> Result<Vec<Quote>> {
        let url = self.url_for(currency);
        debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response.text()?;

        let quotes = self.parser.parse(&body, currency);
        debug!("{}: {} quotes from {}", currency, quotes.len(), url);
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_template_is_filled_with_code() {
        let source = KantorLive::new(
            "https://kantor.live/kantory/lublin/{}",
            "Mozilla/5.0",
            Duration::from_secs(25),
        )
        .unwrap();
        assert_eq!(
            source.url_for(Currency::EUR),
            "https://kantor.live/kantory/lublin/EUR"
        );
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let result = KantorLive::new("https://kantor.live/", "Mozilla/5.0", Duration::from_secs(1));
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn source_kind_names_are_kebab_case() {
        assert_eq!(SourceKind::KantorLive.to_string(), "kantor-live");
        assert_eq!(
            SourceKind::from_str("kantor-live", false).ok(),
            Some(SourceKind::KantorLive)
        );
    }
}
