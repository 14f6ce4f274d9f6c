//! Almoner CLI entry point

use almoner_cli::commands::CommandContext;
use almoner_cli::{Cli, CliError, ConfigLoader};
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(cli_err) => eprintln!("{}", cli_err.user_message()),
                None => eprintln!("Error: {:#}", e),
            }
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path.clone()),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }

    almoner_cli::logging::init_logging(&config.log_level, cli.verbose)?;
    tracing::debug!(
        config = %loader.config_path().display(),
        store = %config.store_path.display(),
        "Loaded configuration"
    );

    let store_path = config.store_path.clone();
    let ctx = CommandContext::open(config, cli.force)
        .await
        .with_context(|| format!("opening {}", store_path.display()))?;
    let outcome = cli.command.execute(&ctx).await?;
    Ok(outcome.exit_code())
}
