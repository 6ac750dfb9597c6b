use serde::Serialize;
use xw_config::XwConfig;
use xw_report::ReportCatalog;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct ReportListing {
    name: &'static str,
    title: &'static str,
    columns: Vec<&'static str>,
}

/// Handle `xw reports`.
pub fn handle(config: &XwConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let lake = super::open_lake(config)?;
    let catalog = ReportCatalog::open(lake.connection()?)?;
    if catalog.reports().is_empty() {
        tracing::warn!("no materialised reports; run `xw build` first");
    }
    let listing: Vec<ReportListing> = catalog
        .reports()
        .iter()
        .map(|r| ReportListing {
            name: r.name,
            title: r.title,
            columns: r.columns.iter().map(|c| c.title).collect(),
        })
        .collect();
    output(&listing, flags.format)
}
