//! Core conversion functionality
//!
//! This module contains the scan state machine, the confidence-margin
//! arithmetic, error types and file plumbing.

mod error;
pub mod extractor;
pub mod interval;
pub mod io;

pub use error::{Result, Vcf2BedError};
pub use extractor::{
    transform, CompatMode, ConversionStats, IntervalExtractor, LineAction, ScanState, SkipReason,
    TransformOutcome,
};
pub use interval::{pad, Span, CONFIDENCE_MARGIN, HALF_MARGIN, SENTINEL};
pub use io::{
    create_output, detect_compression, open_input, output_path_for, CompressionFormat,
    LineIterator, DEFAULT_BUFFER_SIZE, OUTPUT_SUFFIX,
};
