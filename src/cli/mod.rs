//! Command-line interface wiring for the `eanzip` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod common;
pub mod csv;
pub mod encode;
pub mod text;
pub mod utils;

/// Parsed CLI entrypoint for the `eanzip` binary.
#[derive(Parser, Debug)]
#[command(
    name = "eanzip",
    version,
    about = "Batch EAN-13/JAN barcode labels: vector PDF per code, bundled as ZIP"
)]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate labels from newline-separated identifiers.
    Text(text::TextArgs),
    /// Generate labels from one column of a CSV file.
    Csv(csv::CsvArgs),
    /// Print the 95-module bit pattern for one identifier.
    Encode(encode::EncodeArgs),
    /// Compute the check digit for a 12-digit identifier.
    Check(check::CheckArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Text(args) => text::handle(args),
        Command::Csv(args) => csv::handle(args),
        Command::Encode(args) => encode::handle(args),
        Command::Check(args) => check::handle(args),
    }
}
