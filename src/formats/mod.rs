//! File format adapters
//!
//! VCF input view and BED output record.

pub mod bed;
pub mod vcf;

pub use bed::BedInterval;
pub use vcf::{InfoField, VcfParseError, VcfRecordView, HEADER_TOKEN};
