//! VCF to BED interval extraction
//!
//! A single forward pass over the input. Lines before the `#CHROM` header are
//! ignored, the header is copied through once, and every following line is
//! turned into a `<chrom> <start-50> <end+50>` record.

use super::error::{Result, Vcf2BedError};
use super::interval::Span;
use super::io::{create_output, open_input, output_path_for, LineIterator};
use crate::formats::bed::BedInterval;
use crate::formats::vcf::{VcfParseError, VcfRecordView, HEADER_TOKEN};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// How lines after the header that are not usable records are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatMode {
    /// Emit one record for every non-blank line after the header, with -1
    /// standing in for a missing start or END (`-51 49` for comment lines).
    /// Keeps existing downstream consumers of the `.bed` files working.
    #[default]
    Strict,
    /// Emit only data lines carrying both POS and END; count the rest as skipped
    Improved,
}

/// Position of the scan relative to the `#CHROM` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    BeforeHeader,
    /// The current line is the header
    HeaderJustSeen,
    InData,
}

impl ScanState {
    /// State for the next line, given whether it is a `#CHROM` line
    ///
    /// Only the first `#CHROM` line opens the data section; a repeated one is
    /// treated like any other data-section line.
    pub fn advance(self, is_header: bool) -> Self {
        match self {
            ScanState::BeforeHeader if is_header => ScanState::HeaderJustSeen,
            ScanState::BeforeHeader => ScanState::BeforeHeader,
            ScanState::HeaderJustSeen | ScanState::InData => ScanState::InData,
        }
    }
}

/// Why a data-section line produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No fields on the line
    Blank,
    /// Comment or short line (improved mode only)
    NotARecord,
    /// Data line without an `END` entry (improved mode only)
    MissingEnd,
}

/// What to do with one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction<'a> {
    /// Before the header: nothing to write
    Ignore,
    /// Header line: copy it verbatim
    CopyHeader,
    /// Write an interval; `complete` is false when sentinels were used
    Emit { interval: BedInterval<'a>, complete: bool },
    /// In the data section but nothing to write
    Skip(SkipReason),
}

/// Conversion statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    /// Lines after the header
    pub total: usize,
    /// Records written with real coordinates
    pub intervals: usize,
    /// Records written with at least one sentinel coordinate
    pub sentinels: usize,
    /// Lines after the header that produced no output
    pub skipped: usize,
    /// Whether a `#CHROM` header was found at all
    pub header_found: bool,
}

/// Outcome of converting one file
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub output: PathBuf,
    pub stats: ConversionStats,
}

/// Reads the start/end pair of a line; non-data lines yield an empty span
fn read_span(view: &VcfRecordView<'_>) -> std::result::Result<Span, VcfParseError> {
    if !view.is_data_line() {
        return Ok(Span::default());
    }
    let end = view.end()?;
    let start = view.pos()?;
    Ok(Span::new(Some(start), end))
}

/// Decide the action for a line already known to be in the data section
fn data_section_action<'a>(
    view: &VcfRecordView<'a>,
    mode: CompatMode,
    line_no: usize,
) -> Result<LineAction<'a>> {
    if view.is_blank() {
        return Ok(LineAction::Skip(SkipReason::Blank));
    }
    let chrom = view.chrom().unwrap_or_default();

    let invalid = |source: VcfParseError| Vcf2BedError::InvalidRecord {
        line: line_no,
        source,
    };
    let span = read_span(view).map_err(invalid)?;

    match (mode, span.padded().map_err(invalid)?) {
        (_, Some((start, end))) => Ok(LineAction::Emit {
            interval: BedInterval::new(chrom, start, end),
            complete: true,
        }),
        (CompatMode::Strict, None) => {
            let (start, end) = span.padded_or_sentinel().map_err(invalid)?;
            Ok(LineAction::Emit {
                interval: BedInterval::new(chrom, start, end),
                complete: false,
            })
        }
        (CompatMode::Improved, None) if span.start.is_some() => {
            Ok(LineAction::Skip(SkipReason::MissingEnd))
        }
        (CompatMode::Improved, None) => Ok(LineAction::Skip(SkipReason::NotARecord)),
    }
}

/// Streams VCF lines into padded BED intervals
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalExtractor {
    mode: CompatMode,
}

impl IntervalExtractor {
    pub fn new(mode: CompatMode) -> Self {
        Self { mode }
    }

    /// Classify one line given the state before it; returns the new state
    /// and the action to take.
    ///
    /// `line_no` is 1-based and only used for error reporting.
    pub fn step<'a>(
        &self,
        state: ScanState,
        line: &'a str,
        line_no: usize,
    ) -> Result<(ScanState, LineAction<'a>)> {
        let view = VcfRecordView::split(line);
        let state = state.advance(view.is_header());

        let action = match state {
            ScanState::BeforeHeader => LineAction::Ignore,
            ScanState::HeaderJustSeen => LineAction::CopyHeader,
            ScanState::InData => data_section_action(&view, self.mode, line_no)?,
        };
        Ok((state, action))
    }

    /// Convert everything readable from `reader` into `writer`
    ///
    /// On a parse error the lines already handed to `writer` stay there.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<ConversionStats> {
        let mut stats = ConversionStats::default();
        let mut state = ScanState::default();
        let mut lines = LineIterator::new(reader);
        let mut line_no = 0;

        while let Some(line) = lines.next_line() {
            let line = line?;
            line_no += 1;

            let (next, action) = self.step(state, line, line_no)?;
            state = next;

            match action {
                LineAction::Ignore => {}
                LineAction::CopyHeader => {
                    log::info!("Column header found at line {}", line_no);
                    stats.header_found = true;
                    writeln!(writer, "{}", line)?;
                }
                LineAction::Emit { interval, complete } => {
                    stats.total += 1;
                    if complete {
                        stats.intervals += 1;
                    } else {
                        log::debug!("Line {}: emitting sentinel record {}", line_no, interval);
                        stats.sentinels += 1;
                    }
                    interval.write_to(writer)?;
                }
                LineAction::Skip(reason) => {
                    stats.total += 1;
                    stats.skipped += 1;
                    log::debug!("Line {}: skipped ({:?})", line_no, reason);
                }
            }
        }

        if !stats.header_found {
            log::warn!("No {} header line found; output is empty", HEADER_TOKEN);
        }

        writer.flush()?;
        Ok(stats)
    }

    /// Convert `input` into `<input>.bed`, overwriting any previous output
    pub fn transform(&self, input: &Path) -> Result<TransformOutcome> {
        let reader = open_input(input)?;
        let output = output_path_for(input);
        let mut writer = create_output(&output)?;

        let stats = self.run(reader, &mut writer)?;
        Ok(TransformOutcome { output, stats })
    }
}

/// Convert `input` into `<input>.bed` with the default (strict) behavior
///
/// Returns the output path.
pub fn transform(input: &Path) -> Result<PathBuf> {
    IntervalExtractor::default()
        .transform(input)
        .map(|outcome| outcome.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "##fileformat=VCFv4.1\n\
        #CHROM POS ID REF ALT QUAL FILTER INFO\n\
        chr1 1000 . N <DEL> . . SVTYPE=DEL;END=2000\n";

    fn convert(input: &str, mode: CompatMode) -> Result<(String, ConversionStats)> {
        let mut out = Vec::new();
        let stats = IntervalExtractor::new(mode).run(input.as_bytes(), &mut out)?;
        Ok((String::from_utf8(out).unwrap(), stats))
    }

    #[test]
    fn test_state_transitions() {
        let s = ScanState::BeforeHeader;
        assert_eq!(s.advance(false), ScanState::BeforeHeader);
        assert_eq!(s.advance(true), ScanState::HeaderJustSeen);
        assert_eq!(ScanState::HeaderJustSeen.advance(false), ScanState::InData);
        assert_eq!(ScanState::HeaderJustSeen.advance(true), ScanState::InData);
        assert_eq!(ScanState::InData.advance(true), ScanState::InData);
    }

    #[test]
    fn test_concrete_scenario() -> Result<()> {
        let (out, stats) = convert(SCENARIO, CompatMode::Strict)?;
        assert_eq!(out, "#CHROM POS ID REF ALT QUAL FILTER INFO\nchr1 950 2050\n");
        assert_eq!(stats.total, 1);
        assert_eq!(stats.intervals, 1);
        assert_eq!(stats.sentinels, 0);
        assert!(stats.header_found);
        Ok(())
    }

    #[test]
    fn test_header_copied_verbatim() -> Result<()> {
        let input = "#CHROM\tPOS  ID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n";
        let (out, _) = convert(input, CompatMode::Strict)?;
        assert_eq!(out, input);
        Ok(())
    }

    #[test]
    fn test_strict_missing_end_uses_sentinel() -> Result<()> {
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            chr2 500 . A T . PASS DP=10\n";
        let (out, stats) = convert(input, CompatMode::Strict)?;
        assert_eq!(out.lines().nth(1), Some("chr2 450 49"));
        assert_eq!(stats.sentinels, 1);
        Ok(())
    }

    #[test]
    fn test_bare_end_flag_is_fatal() {
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            ##late comment\n\
            chr1 10 . A T . . SVTYPE=INS;END\n";
        let err = convert(input, CompatMode::Strict).unwrap_err();
        assert!(matches!(err, Vcf2BedError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_strict_comment_after_header_emits_sentinels() -> Result<()> {
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            ##late comment\n\
            #CHROM POS ID REF ALT QUAL FILTER INFO\n\
            short line\n";
        let (out, stats) = convert(input, CompatMode::Strict)?;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "#CHROM POS ID REF ALT QUAL FILTER INFO",
                "##late -51 49",
                "#CHROM -51 49",
                "short -51 49",
            ]
        );
        assert_eq!(stats.total, 3);
        assert_eq!(stats.sentinels, 3);
        Ok(())
    }

    #[test]
    fn test_improved_skips_unusable_lines() -> Result<()> {
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            ##late comment\n\
            chr2 500 . A T . PASS DP=10\n\
            chr3 700 . A <DUP> . PASS END=900;SVTYPE=DUP\n";
        let (out, stats) = convert(input, CompatMode::Improved)?;
        assert_eq!(out, "#CHROM POS ID REF ALT QUAL FILTER INFO\nchr3 650 950\n");
        assert_eq!(stats.total, 3);
        assert_eq!(stats.intervals, 1);
        assert_eq!(stats.skipped, 2);
        Ok(())
    }

    #[test]
    fn test_improved_skip_reasons() -> Result<()> {
        let extractor = IntervalExtractor::new(CompatMode::Improved);
        let (_, action) = extractor.step(ScanState::InData, "##comment", 5)?;
        assert_eq!(action, LineAction::Skip(SkipReason::NotARecord));
        let (_, action) = extractor.step(ScanState::InData, "chr1 1 . A T . . DP=1", 6)?;
        assert_eq!(action, LineAction::Skip(SkipReason::MissingEnd));
        Ok(())
    }

    #[test]
    fn test_blank_lines_skipped() -> Result<()> {
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            \n\
            chr1 1000 . N <DEL> . . END=2000\n\
            \n";
        let (out, stats) = convert(input, CompatMode::Strict)?;
        assert_eq!(out, "#CHROM POS ID REF ALT QUAL FILTER INFO\nchr1 950 2050\n");
        assert_eq!(stats.skipped, 2);
        Ok(())
    }

    #[test]
    fn test_no_header_produces_empty_output() -> Result<()> {
        let input = "##fileformat=VCFv4.1\nchr1 1000 . N <DEL> . . END=2000\n";
        let (out, stats) = convert(input, CompatMode::Strict)?;
        assert!(out.is_empty());
        assert!(!stats.header_found);
        assert_eq!(stats.total, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_pos_reports_line() {
        let input = "##x\n#CHROM POS ID REF ALT QUAL FILTER INFO\nchr1 abc . N <DEL> . . END=2000\n";
        match convert(input, CompatMode::Strict) {
            Err(Vcf2BedError::InvalidRecord { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(
                    source,
                    VcfParseError::InvalidNumber("POS", "abc".to_string())
                );
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_end_overflow_is_fatal() {
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            chr1 1000 . N <DEL> . . SVTYPE=DEL;END=9223372036854775807\n";
        match convert(input, CompatMode::Strict) {
            Err(Vcf2BedError::InvalidRecord { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    VcfParseError::CoordinateOverflow { field: "END", value: i64::MAX }
                );
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_pos_underflow_is_fatal() {
        // Without END: strict pads POS with a sentinel end, improved never pads
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            chr1 -9223372036854775808 . N <DEL> . . SVTYPE=DEL\n";
        match convert(input, CompatMode::Strict) {
            Err(Vcf2BedError::InvalidRecord { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    VcfParseError::CoordinateOverflow { field: "POS", value: i64::MIN }
                );
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }

        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            chr1 -9223372036854775808 . N <DEL> . . SVTYPE=DEL;END=10\n";
        assert!(matches!(
            convert(input, CompatMode::Improved),
            Err(Vcf2BedError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_unterminated_header_gains_newline() -> Result<()> {
        let (out, _) = convert("##x\n#CHROM POS ID", CompatMode::Strict)?;
        assert_eq!(out, "#CHROM POS ID\n");
        Ok(())
    }

    #[test]
    fn test_partial_output_kept_on_error() {
        let input = "#CHROM POS ID REF ALT QUAL FILTER INFO\n\
            chr1 1000 . N <DEL> . . END=2000\n\
            chr1 1000 . N <DEL> . . END=oops\n";
        let mut out = Vec::new();
        let result = IntervalExtractor::default().run(input.as_bytes(), &mut out);
        assert!(result.is_err());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#CHROM POS ID REF ALT QUAL FILTER INFO\nchr1 950 2050\n"
        );
    }
}
