use std::path::PathBuf;
use clap::Parser;

/// Plot the `single_sort_step [low .. high]` bounds found in a log.
///
/// The scatter plot is written next to the log, as `FILE.svg`.
#[derive(Parser, Debug)]
#[command(name = "plot_steps", version, about)]
pub struct Args {
    /// Log file to scan.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
