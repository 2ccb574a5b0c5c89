//! Command-line parsing.
//!
//! Parsing stays separate from the lookup code; `app` turns `Cli` into a
//! `RunConfig`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::domain::MetalTier;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "slcsp", version, about = "Second Lowest Cost Silver Plan lookup by zipcode")]
pub struct Cli {
    /// CSV of zipcodes to price (must have a `zipcode` column).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: PathBuf,

    /// Show diagnostics (skipped zipcodes, summaries) on stderr.
    #[arg(
        long = "show-stderr",
        alias = "show_stderr",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub show_stderr: bool,

    /// Zipcode → rate area reference CSV.
    #[arg(long, env = "SLCSP_ZIPS", value_name = "CSV", default_value = "zips.csv")]
    pub zips: PathBuf,

    /// Plan rates reference CSV.
    #[arg(long, env = "SLCSP_PLANS", value_name = "CSV", default_value = "plans.csv")]
    pub plans: PathBuf,

    /// Metal level whose second lowest rate is reported.
    #[arg(long, value_enum, ignore_case = true, default_value_t = MetalTier::Silver)]
    pub metal: MetalTier,

    /// Also write `zipcode,rate` for every query (blank when unresolved).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}
