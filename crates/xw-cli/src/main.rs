use anyhow::Context;
use clap::Parser;
use xw_config::XwConfig;

mod cli;
mod commands;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("xw error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = load_config(&flags)?;
    commands::dispatch(cli.command, &config, &flags).await
}

fn load_config(flags: &cli::GlobalFlags) -> anyhow::Result<XwConfig> {
    let mut config = XwConfig::load_with_dotenv().context("failed to load xword configuration")?;
    if let Some(db) = &flags.db {
        config.store.db_path.clone_from(db);
        config.validate()?;
    }
    tracing::debug!(db = %config.store.db_path, "configuration loaded");
    Ok(config)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("XWORD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
