use anyhow::Context;
use xw_config::XwConfig;
use xw_lake::CorpusLake;

use crate::cli::{Commands, GlobalFlags};

pub mod build;
pub mod clue;
pub mod export;
pub mod import;
pub mod query;
pub mod reports;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &XwConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => import::handle(&args, config, flags),
        Commands::Build => build::handle(config, flags),
        Commands::Reports => reports::handle(config, flags),
        Commands::Query(args) => query::handle(&args, config, flags).await,
        Commands::Export(args) => export::handle(&args, config, flags),
        Commands::Clue(args) => clue::handle(&args, config, flags),
    }
}

fn open_lake(config: &XwConfig) -> anyhow::Result<CorpusLake> {
    CorpusLake::open(&config.store)
        .with_context(|| format!("failed to open corpus database {}", config.store.db_path))
}
