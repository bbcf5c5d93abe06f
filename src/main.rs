use clap::Parser;
use rest_visitors::cli::{run_cli, Cli};
use rest_visitors::logging::{init_logging_with_config, LogConfig};
use tracing::error;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with_config(&LogConfig::from_env())?;

    if let Err(e) = run_cli(cli) {
        error!(error = %format!("{e:#}"), "Command failed");
        return Err(e);
    }
    Ok(())
}
