//! Scan settings.
//!
//! `ScanConfig::default()` reproduces the stock setup: kantor.live, every known
//! currency, 5 workers, 25 second request timeout. The front end overrides single
//! fields from its command line before calling [`ScanConfig::build_collector`].

use std::time::Duration;

use crate::collector::RateCollector;
use crate::currency::Currency;
use crate::error::ScanError;
use crate::result::Result;
use crate::source::SourceKind;

/// Default number of concurrent fetches.
pub const DEFAULT_WORKERS: usize = 5;
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;
/// `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Everything needed to build a [`RateCollector`].
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Source serving every currency.
    pub source: SourceKind,
    /// Page URL with `{}` standing for the currency code; `None` uses the source default.
    pub url_template: Option<String>,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Worker pool size.
    pub workers: usize,
    /// Currencies to fetch, in submission order.
    pub currencies: Vec<Currency>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            source: SourceKind::KantorLive,
            url_template: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            workers: DEFAULT_WORKERS,
            currencies: Currency::all(),
        }
    }
}

impl ScanConfig {
    /// Effective URL template.
    pub fn url_template(&self) -> &str {
        self.url_template
            .as_deref()
            .unwrap_or_else(|| self.source.default_url_template())
    }

    /// Builds the source and pairs it with every configured currency.
    pub fn build_collector(&self) -> Result<RateCollector> {
        if self.timeout.is_zero() {
            return Err(ScanError::Config("request timeout must be positive".into()));
        }
        let source = self.source.build(self)?;
        Ok(RateCollector::new(self.workers)?.with_source(source, self.currencies.iter().copied()))
    }
}
