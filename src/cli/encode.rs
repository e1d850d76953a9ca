//! Encoder inspection (`eanzip encode ...`).

use anyhow::Result;
use clap::Args;
use eanzip::Ean13;

/// Args for `eanzip encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// 12 or 13 digit identifier.
    pub identifier: String,
}

/// Print the canonical form and the 95-module bit pattern.
pub fn handle(args: EncodeArgs) -> Result<()> {
    let id = Ean13::parse(&args.identifier)?;
    let symbol = id.symbol()?;
    println!("{}", id.as_str());
    println!("{}", symbol.as_str());
    Ok(())
}
