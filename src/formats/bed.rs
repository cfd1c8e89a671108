//! BED format adapter
//!
//! Writes the three-column, space-separated interval records this tool emits.

use std::fmt;
use std::io::{self, Write};

/// BED3 record borrowed from the VCF line it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedInterval<'a> {
    pub chrom: &'a str,
    pub start: i64,
    pub end: i64,
}

impl<'a> BedInterval<'a> {
    pub fn new(chrom: &'a str, start: i64, end: i64) -> Self {
        Self { chrom, start, end }
    }

    /// Write the record followed by a newline
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self)
    }
}

impl fmt::Display for BedInterval<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.chrom, self.start, self.end)
    }
}
