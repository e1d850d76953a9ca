//! Free-text submission path (`eanzip text ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use eanzip::candidates_from_text;

use crate::cli::common::{BatchArgs, run_batch};
use crate::cli::utils::read_text_arg;

/// Args for `eanzip text`.
#[derive(Args, Debug)]
pub struct TextArgs {
    /// Newline-separated identifiers given inline.
    pub input: Option<String>,

    /// Read identifiers from a file instead (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,

    #[command(flatten)]
    pub batch: BatchArgs,
}

pub fn handle(args: TextArgs) -> Result<()> {
    let text = read_text_arg(args.input, args.from)?;
    let candidates = candidates_from_text(&text);
    run_batch(candidates, &args.batch)
}
