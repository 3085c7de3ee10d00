//! Error types for report input loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading input tables.
///
/// `ReferralsMissing` and `ReferralsEmpty` are the fatal preconditions of a
/// run; every other input problem is either recoverable (absent secondary
/// tables) or degrades into data (unparseable cells become nulls).
#[derive(Debug, Error)]
pub enum IngestError {
    /// Data directory not found or not readable.
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The referral table is absent. Nothing can be reported without it.
    #[error("referral table not found: {path}")]
    ReferralsMissing { path: PathBuf },

    /// The referral table parsed but holds no rows.
    #[error("referral table is empty: {path}")]
    ReferralsEmpty { path: PathBuf },

    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to build the empty stand-in for an absent table.
    #[error("failed to build empty {table} table: {message}")]
    EmptySchema { table: String, message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
