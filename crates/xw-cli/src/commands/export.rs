use std::path::PathBuf;

use anyhow::Context;
use xw_config::XwConfig;
use xw_report::{AnalysisContext, export_all};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `xw export`.
pub fn handle(args: &ExportArgs, config: &XwConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.report.export_dir));
    let lake = super::open_lake(config)?;
    let progress = Progress::spinner("exporting reports");
    let corpus = lake.load_corpus().context("failed to load corpus")?;
    let ctx = AnalysisContext::new(&corpus, &config.report);
    let summary = export_all(&ctx, &dir)?;
    progress.finish_clear();
    output(&summary, flags.format)
}
