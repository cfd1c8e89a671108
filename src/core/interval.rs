//! Confidence-margin arithmetic
//!
//! A variant span is widened by half of [`CONFIDENCE_MARGIN`] on each side.
//! Positions that could not be read are carried as [`SENTINEL`].

use crate::formats::vcf::VcfParseError;

/// Total confidence interval added around each variant
pub const CONFIDENCE_MARGIN: i64 = 100;

/// Padding applied to each side (integer division)
pub const HALF_MARGIN: i64 = CONFIDENCE_MARGIN / 2;

/// Stand-in for a start or end position that was not found
pub const SENTINEL: i64 = -1;

/// Start/end pair read from one line; either side may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl Span {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Both coordinates present
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Coordinates with [`SENTINEL`] substituted for missing sides
    pub fn or_sentinel(&self) -> (i64, i64) {
        (
            self.start.unwrap_or(SENTINEL),
            self.end.unwrap_or(SENTINEL),
        )
    }

    /// Padded coordinates, or `Ok(None)` unless both sides are present
    pub fn padded(&self) -> Result<Option<(i64, i64)>, VcfParseError> {
        if !self.is_complete() {
            return Ok(None);
        }
        let (start, end) = self.or_sentinel();
        pad(start, end).map(Some)
    }

    /// Padded coordinates with sentinels standing in for missing sides
    pub fn padded_or_sentinel(&self) -> Result<(i64, i64), VcfParseError> {
        let (start, end) = self.or_sentinel();
        pad(start, end)
    }
}

/// Widen `[start, end]` by [`HALF_MARGIN`] on both sides
///
/// No clamping is applied; a start within 50bp of the contig origin goes
/// negative. Results outside the `i64` range are an error.
pub fn pad(start: i64, end: i64) -> Result<(i64, i64), VcfParseError> {
    let padded_start = start
        .checked_sub(HALF_MARGIN)
        .ok_or(VcfParseError::CoordinateOverflow { field: "POS", value: start })?;
    let padded_end = end
        .checked_add(HALF_MARGIN)
        .ok_or(VcfParseError::CoordinateOverflow { field: "END", value: end })?;
    Ok((padded_start, padded_end))
}
