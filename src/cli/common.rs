//! Shared batch-generation plumbing for the `text` and `csv` commands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use eanzip::{TtfGlyphSource, generate_zip, resolve_name};

use crate::cli::utils::write_report;

/// Flags shared by every batch-producing command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Output archive name; ".zip" is appended when missing.
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// TrueType/OpenType font used for the human-readable digits.
    #[arg(long, default_value = "MyriadPro.ttf")]
    pub font: PathBuf,

    /// Write a JSON batch summary to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Suppress the per-item failure listing on stderr.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Compose all candidates, bundle the successes, and deliver the archive.
///
/// Per-item failures are reported on stderr and counted in the completion
/// line; only empty input, an all-failed batch, or a capability failure
/// (font, archive, filesystem) surfaces as a fatal error.
pub fn run_batch(candidates: Vec<String>, args: &BatchArgs) -> Result<()> {
    if candidates.is_empty() {
        bail!("no valid 12 or 13 digit identifiers found in the input");
    }
    println!("Processing {} identifier(s)...", candidates.len());

    let glyphs = TtfGlyphSource::load(&args.font)
        .with_context(|| format!("failed to load font {}", args.font.display()))?;

    let (bytes, result) = generate_zip(&candidates, &glyphs)?;

    if !args.quiet {
        for (identifier, reason) in result.failures() {
            eprintln!("failed: {identifier}: {reason}");
        }
    }

    let archive_name = resolve_name(args.output.as_deref());
    std::fs::write(&archive_name, &bytes)
        .with_context(|| format!("failed to write {archive_name}"))?;

    if let Some(report_path) = &args.report {
        write_report(report_path, &result.summary())?;
    }

    let mut status = format!(
        "Done: wrote {archive_name} ({} label(s))",
        result.produced()
    );
    if result.failed() > 0 {
        status.push_str(&format!(", {} failed", result.failed()));
    }
    println!("{status}");
    Ok(())
}
