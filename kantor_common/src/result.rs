//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `ScanError`, so functions can simply return `Result<T>`.
use crate::error::ScanError;

/// Workspace-wide `Result` alias with `ScanError` as the default error.
pub type Result<T, E = ScanError> = std::result::Result<T, E>;
