//! Static data files for a client-side table widget.
//!
//! Each report is written as `<name>.json` holding `{"data": [[..], ..]}`,
//! every cell rendered to a string. HTML in cells is written literally.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ReportError;
use crate::registry::{AnalysisContext, REPORTS, ReportKind};
use crate::rowset::{Cell, RowSet};

#[derive(Serialize)]
struct ExportDocument<'a> {
    data: &'a [Vec<Cell>],
}

/// Serialize a row set as an export document.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if serialization fails.
pub fn to_document(rows: &RowSet) -> Result<String, ReportError> {
    Ok(serde_json::to_string(&ExportDocument { data: &rows.rows })?)
}

/// Outcome of [`export_all`].
#[derive(Debug, Default, Serialize)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    /// Names of reports that could not be written.
    pub failed: Vec<&'static str>,
}

/// Write one report into `dir`, returning the file path.
///
/// # Errors
///
/// Returns [`ReportError::Json`] or [`ReportError::Io`].
pub fn export_report(
    report: &ReportKind,
    rows: &RowSet,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(format!("{}.json", report.name));
    let document = to_document(rows)?;
    fs::write(&path, document).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(report = report.name, path = %path.display(), rows = rows.len(), "exported report");
    Ok(path)
}

/// Compute and write every report into `dir`, creating it if needed.
///
/// A report that fails to write is logged and listed in
/// [`ExportSummary::failed`]; the others are still written.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if `dir` cannot be created.
pub fn export_all(ctx: &AnalysisContext<'_>, dir: &Path) -> Result<ExportSummary, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut summary = ExportSummary::default();
    for report in REPORTS {
        let rows = report.compute(ctx);
        match export_report(report, &rows, dir) {
            Ok(path) => summary.written.push(path),
            Err(error) => {
                tracing::warn!(report = report.name, %error, "report not exported");
                summary.failed.push(report.name);
            }
        }
    }
    tracing::info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        dir = %dir.display(),
        "export finished"
    );
    Ok(summary)
}
