//! Command-line interface, clap derive.

use std::path::PathBuf;

use clap::Parser;

/// motcheck — enrich a fleet spreadsheet with MOT due dates from the DVSA
/// MOT history API.
#[derive(Debug, Parser)]
#[command(name = "motcheck", version, about)]
pub struct Cli {
    /// Spreadsheet to enrich. Every sheet is processed; the first column of
    /// each sheet is treated as the registration number.
    pub input: PathBuf,

    /// Path to the configuration file.
    #[arg(long, default_value = "motcheck.toml")]
    pub config: PathBuf,

    /// Override the pause between API calls, in milliseconds.
    #[arg(long)]
    pub pace_ms: Option<u64>,
}
