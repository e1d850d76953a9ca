//! CSV submission path (`eanzip csv ...`).

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use eanzip::candidates_from_csv;

use crate::cli::common::{BatchArgs, run_batch};

/// Args for `eanzip csv`.
#[derive(Args, Debug)]
pub struct CsvArgs {
    /// CSV file with identifiers in one column.
    pub file: PathBuf,

    /// 1-based column holding the identifiers.
    #[arg(long, default_value_t = 2)]
    pub column: usize,

    #[command(flatten)]
    pub batch: BatchArgs,
}

pub fn handle(args: CsvArgs) -> Result<()> {
    if args.column == 0 {
        bail!("columns are 1-based");
    }
    let file = File::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let candidates = candidates_from_csv(file, args.column - 1);
    run_batch(candidates, &args.batch)
}
