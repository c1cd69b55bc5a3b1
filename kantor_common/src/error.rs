//! Error types shared by the scanner library and its front end.
//!
//! `ScanError` covers transport, configuration and plumbing failures. Row-level
//! markup problems never surface here; they are described by
//! [`crate::parser::RowError`] and only drop the offending row.
use std::io;

use thiserror::Error;

/// Unified error type of the scanner.
#[derive(Error, Debug)]
pub enum ScanError {
    /// I/O error originating from the standard library (files, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport failure: connection refused, timeout, body read error.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source answered with a non-success status code.
    #[error("HTTP status {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Returned status code.
        status: u16,
    },

    /// A CSS selector of a source layout failed to compile.
    #[error("Invalid selector `{selector}`: {reason}")]
    Selector {
        /// Selector text.
        selector: String,
        /// Compiler message.
        reason: String,
    },

    /// Error while parsing a currency list into `Currency` values.
    #[error("Parse currencies file error: {0}")]
    ParseCurrenciesFile(String),

    /// Failure while encoding JSON via serde_json.
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// A collector worker panicked; its in-flight job is lost.
    #[error("Collector worker #{0} panicked")]
    WorkerPanicked(usize),

    /// Scan settings are unusable (zero workers, bad URL template, ...).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    /// Whether the failure came from the per-request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScanError::Http(e) if e.is_timeout())
    }
}
