//! FastVcf2Bed - structural-variant VCF to padded BED intervals
//!
//! Reads a VCF file, skips everything before the `#CHROM` column header,
//! copies that header through, and writes one `<chrom> <start> <end>` line per
//! following record with the span widened by a fixed confidence margin
//! (50bp on each side).
//!
//! # Example
//!
//! ```ignore
//! use fast_vcf2bed::{CompatMode, IntervalExtractor};
//! use std::path::Path;
//!
//! // Writes calls.vcf.bed next to the input
//! let outcome = IntervalExtractor::new(CompatMode::Strict).transform(Path::new("calls.vcf"))?;
//! println!("{} intervals", outcome.stats.intervals);
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    transform, CompatMode, ConversionStats, IntervalExtractor, Result, ScanState, Span,
    TransformOutcome, Vcf2BedError, CONFIDENCE_MARGIN,
};
pub use formats::{bed, vcf};
