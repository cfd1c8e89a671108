//! FastVcf2Bed CLI entry point
//!
//! Converts a VCF file into `<input>.bed` with margin-padded intervals.

use clap::{Parser, ValueEnum};
use fast_vcf2bed::core::{CompatMode, IntervalExtractor, CONFIDENCE_MARGIN};
use std::path::PathBuf;
use std::time::Instant;

/// Compatibility mode for sentinel records (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CompatModeArg {
    /// Emit a record for every line after the header, using -1 for missing coordinates
    #[default]
    #[value(name = "strict")]
    Strict,
    /// Emit only records that have both POS and END
    #[value(name = "improved")]
    Improved,
}

impl From<CompatModeArg> for CompatMode {
    fn from(arg: CompatModeArg) -> Self {
        match arg {
            CompatModeArg::Strict => CompatMode::Strict,
            CompatModeArg::Improved => CompatMode::Improved,
        }
    }
}

#[derive(Parser)]
#[command(name = "fast-vcf2bed")]
#[command(about = "Convert VCF variants into confidence-padded BED intervals")]
#[command(version)]
#[command(author = "FastVcf2Bed Contributors")]
struct Cli {
    /// Input VCF file (plain, .gz or .bz2); output is written to <INPUT>.bed
    input: PathBuf,

    /// Compatibility mode: 'strict' keeps one output line per input line, 'improved' drops unusable lines
    #[arg(long = "compat-mode", default_value = "strict")]
    compat_mode: CompatModeArg,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.compat_mode {
        CompatModeArg::Improved => eprintln!("Compatibility mode: improved (unusable lines dropped)"),
        CompatModeArg::Strict => {} // Don't log for default mode
    }

    let extractor = IntervalExtractor::new(cli.compat_mode.into());
    eprintln!(
        "Converting VCF file: {:?} (margin {}bp)",
        cli.input, CONFIDENCE_MARGIN
    );

    let outcome = extractor
        .transform(&cli.input)
        .map_err(|e| anyhow::anyhow!("Failed to convert {:?}: {}", cli.input, e))?;

    eprintln!("Wrote {:?}", outcome.output);
    eprintln!("\n=== Conversion Statistics ===");
    eprintln!("Total records:   {}", outcome.stats.total);
    eprintln!("Intervals:       {}", outcome.stats.intervals);
    eprintln!("Sentinel:        {}", outcome.stats.sentinels);
    eprintln!("Skipped:         {}", outcome.stats.skipped);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
