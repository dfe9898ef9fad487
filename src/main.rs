// Entrypoint for the `timeular` binary.
// - Reads configuration from the environment, sets up the log file, builds
//   the API client and hands the parsed command line to the UI layer.

use anyhow::Context;
use clap::Parser;
use timeular_client::{api::TimeularClient, cli::Cli, config::Config, logging, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?.with_verbosity(cli.verbose);
    logging::init(&config.logging)?;

    let api = TimeularClient::from_config(&config).context("Failed to build HTTP client")?;
    ui::run(&api, cli)
}
