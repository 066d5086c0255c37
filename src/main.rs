use anyhow::Context;
use clap::Parser;
use oil_co2_dashboard::cli::{init_logging, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    run(cli).context("dashboard command failed")
}
