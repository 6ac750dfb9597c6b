use std::path::PathBuf;

use xw_config::XwConfig;
use xw_lake::ImportSummary;
use xw_lake::importer::{discover_archives, import_file};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `xw import`.
pub fn handle(args: &ImportArgs, config: &XwConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let files: Vec<PathBuf> = if args.files.is_empty() {
        discover_archives(&config.store.archive_dirs)
    } else {
        args.files.clone()
    };
    if files.is_empty() {
        tracing::warn!(dirs = ?config.store.archive_dirs, "no archive files to import");
    }

    let mut lake = super::open_lake(config)?;
    let progress = Progress::bar(files.len() as u64, "importing archives");
    let mut summary = ImportSummary::default();
    for path in &files {
        let result = import_file(&mut lake, path);
        summary.record(path, &result);
        progress.inc(1);
    }
    progress.finish_clear();
    tracing::info!(
        added = summary.added,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "import finished"
    );

    output(&summary, flags.format)
}
