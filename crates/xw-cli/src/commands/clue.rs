use anyhow::{Context, bail};
use serde::Serialize;
use xw_config::XwConfig;
use xw_core::Direction;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClueArgs;
use crate::output::output;

#[derive(Serialize)]
struct ResolvedClue {
    entry_id: String,
    direction: Direction,
    clue: String,
    resolved: String,
    solution: String,
}

/// Handle `xw clue`.
pub fn handle(args: &ClueArgs, config: &XwConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let lake = super::open_lake(config)?;
    let entries = lake.entries_labelled(&args.crossword_id, &args.label, args.direction)?;
    if entries.is_empty() {
        bail!("no entry {} in {}", args.label, args.crossword_id);
    }
    let corpus = lake.load_corpus().context("failed to load corpus")?;
    let resolved: Vec<ResolvedClue> = entries
        .iter()
        .map(|entry| ResolvedClue {
            entry_id: entry.entry_id.clone(),
            direction: entry.direction,
            clue: entry.clue.clone(),
            resolved: xw_analytics::resolve_clue(&corpus, entry).to_string(),
            solution: entry.solution.clone(),
        })
        .collect();
    output(&resolved, flags.format)
}
