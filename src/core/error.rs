//! Error types for FastVcf2Bed
//!
//! Defines all error types used throughout the library.

use crate::formats::vcf::VcfParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FastVcf2Bed operations
#[derive(Debug, Error)]
pub enum Vcf2BedError {
    /// Input file does not exist
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// A data line could not be parsed; the run is aborted
    #[error("Invalid record at line {line}: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: VcfParseError,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FastVcf2Bed operations
pub type Result<T> = std::result::Result<T, Vcf2BedError>;
