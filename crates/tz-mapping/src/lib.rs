//! Legacy-to-IANA timezone mapping and TZID rewriting for iCalendar text
//!
//! This crate provides:
//! - A mapping table from Windows/Outlook timezone names to IANA names,
//!   loaded from a CSV reference file with a built-in fallback
//! - A rewriter that replaces legacy names in `TZID` properties and parameters

pub mod rewrite;
pub mod table;

use std::path::PathBuf;
use thiserror::Error;

pub use rewrite::{rewrite, Rewriter};
pub use table::{build_table, select_candidate, MappingTable, DEFAULT_MAPPINGS};

/// Mapping source errors
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Failed to read mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed mapping source: {0}")]
    Csv(#[from] csv::Error),

    #[error("Mapping source contains no usable rows")]
    Empty,
}

/// Result type for mapping operations
pub type Result<T> = std::result::Result<T, MappingError>;
