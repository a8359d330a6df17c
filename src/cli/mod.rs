//! Command line interface.

pub mod command;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Args, Parser, Subcommand};
use indicatif::ProgressBar;

use crate::fetch::DEFAULT_BASE_URL;
use crate::request::Frequency;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch station observations and save them as CSV
    Fetch(FetchArgs),
    /// List the stations reporting in one day file
    Stations(StationsArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("window").required(true).args(["year", "start"])))]
pub struct FetchArgs {
    /// Station code to match exactly
    #[arg(long)]
    pub station: String,

    /// Year to fetch
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub year: Option<u16>,

    /// Last year of a year range, with --year
    #[arg(long, requires = "year")]
    pub end_year: Option<u16>,

    /// First day to fetch, as YYYY-MM-DD
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Last day to fetch, as YYYY-MM-DD
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Sampling frequency of the export
    #[arg(long, value_enum, default_value_t = Frequency::Hourly)]
    pub frequency: Frequency,

    /// Directory to save the file in, defaulting to the home directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Archive root serving the day files
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Args)]
pub struct StationsArgs {
    /// Day to inspect, as YYYY-MM-DD, defaulting to yesterday
    #[arg(long)]
    pub date: Option<String>,

    /// Archive root serving the day files
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}
