mod calendar;
mod cli;
mod dataset;
mod error;
mod export;
mod fetch;
mod pipeline;
mod reading;
mod request;

use std::process;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.cancel();
        }
    });

    match cli.command {
        Commands::Fetch(args) => match command::fetch(args, cancel).await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Commands::Stations(args) => match command::stations(args).await {
            Ok(summary) => println!("{}", summary),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }

    Ok(())
}
