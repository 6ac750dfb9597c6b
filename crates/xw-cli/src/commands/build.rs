use anyhow::Context;
use serde::Serialize;
use xw_config::XwConfig;
use xw_report::{AnalysisContext, REPORTS, ReportCatalog};

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct BuildOutput {
    crosswords: usize,
    entries: usize,
    reports: Vec<&'static str>,
    omitted: Vec<&'static str>,
}

/// Handle `xw build`.
pub fn handle(config: &XwConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let lake = super::open_lake(config)?;
    let progress = Progress::spinner("loading corpus");
    let corpus = lake.load_corpus().context("failed to load corpus")?;

    progress.set_message("computing reports");
    let ctx = AnalysisContext::new(&corpus, &config.report);
    let catalog = ReportCatalog::build(lake.connection()?, &ctx);
    progress.finish_clear();

    let reports: Vec<&'static str> = catalog.reports().iter().map(|r| r.name).collect();
    let omitted = REPORTS
        .iter()
        .map(|r| r.name)
        .filter(|name| !reports.contains(name))
        .collect();
    output(
        &BuildOutput {
            crosswords: corpus.crosswords().len(),
            entries: corpus.entries().len(),
            reports,
            omitted,
        },
        flags.format,
    )
}
