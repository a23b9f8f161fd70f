//! Claudia - appearance settings from the command line

use anyhow::Result;
use clap::Parser;

use claudia::cli::{self, Cli};
use claudia::{logging, Appearance};
use claudia_core::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_or_default()?,
    };
    logging::init(cli.log_level.unwrap_or(config.log_level));

    let appearance = Appearance::start(config);
    let mut stdout = std::io::stdout().lock();
    let result = cli::run(cli.command, &appearance, &mut stdout).await;

    appearance.shutdown()?;
    result
}
