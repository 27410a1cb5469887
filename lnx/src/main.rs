mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::logging::LogOptions;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, Parser)]
#[command(version, about)]
/// lnx column tools.
///
/// Ingests a text file containing one cell per line into an integer column
/// and runs diagnostics, filters and sorts over it.
pub struct Args {
    #[command(flatten)]
    logs: LogOptions,
    #[command(subcommand)]
    command: commands::Commands,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    args.logs.init().context("Init logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting lnx column tools");

    args.command.execute()
}
