//! NDVI CLI - Command line tool for fiscal-year vegetation charts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ndvi-cli",
    version,
    about = "Fiscal-year NDVI plotting toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: ndvi_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ndvi_cmd::run(cli.command)
}
