//! Check-digit computation (`eanzip check ...`).

use anyhow::Result;
use clap::Args;
use eanzip::check_digit;

/// Args for `eanzip check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The 12 digits preceding the check digit.
    pub identifier: String,
}

pub fn handle(args: CheckArgs) -> Result<()> {
    let digits = args.identifier.trim();
    let check = check_digit(digits)?;
    println!("{check}");
    println!("{digits}{check}");
    Ok(())
}
