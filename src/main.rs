mod apply;
mod caption;
mod cli;
mod config;
mod csv;
mod discover;
mod filter;
mod jpeg;
mod run;
mod scan;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_logging(cli.verbose);

    let config = config::RunConfig::from_cli(cli)?;
    config.print_summary();

    run::run(config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
