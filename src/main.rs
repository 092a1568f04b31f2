use anyhow::Result;
use clap::Parser;
use jardine::cli::{Cli, run};
use jardine::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    jardine::observability::init_observability(
        "jardine",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let mut stdout = std::io::stdout().lock();

    run(&config, cli.command, &mut stdout).await
}
