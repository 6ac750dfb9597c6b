use std::sync::Arc;

use serde::Serialize;
use xw_config::XwConfig;
use xw_report::{QueryService, ReportCatalog, ReportError, ReportQuery, SortSpec};

use crate::cli::root_commands::QueryArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::{output, render_page};

/// Structured failure printed for machine-readable formats.
#[derive(Serialize)]
struct QueryFailure<'a> {
    draw: i64,
    error: &'static str,
    message: String,
    report: &'a str,
}

/// Handle `xw query`.
pub async fn handle(args: &QueryArgs, config: &XwConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let lake = super::open_lake(config)?;
    let catalog = Arc::new(ReportCatalog::open(lake.connection()?)?);
    let service = QueryService::new(Arc::clone(&catalog), &config.query);

    let request = ReportQuery {
        report: args.report.clone(),
        draw: args.draw,
        start: args.start,
        length: args.length,
        search: args.search.clone(),
        sort: args.sort.map(|column| SortSpec {
            column,
            direction: args.order.into(),
        }),
    };
    let page = match service.query_async(request).await {
        Ok(page) => page,
        Err(error) => return Err(report_failure(args, flags, error)),
    };
    let report = catalog.get(&args.report)?;
    println!("{}", render_page(report, &page, args.start, flags.format)?);
    Ok(())
}

fn report_failure(args: &QueryArgs, flags: &GlobalFlags, error: ReportError) -> anyhow::Error {
    if flags.format != OutputFormat::Table {
        let failure = QueryFailure {
            draw: args.draw,
            error: error.kind(),
            message: error.to_string(),
            report: &args.report,
        };
        if let Err(print_error) = output(&failure, flags.format) {
            tracing::warn!(%print_error, "failed to print query failure");
        }
    }
    let hint = if error.is_bad_request() {
        "run `xw reports` to list reports and their columns"
    } else {
        "report query failed"
    };
    anyhow::Error::new(error).context(hint)
}
