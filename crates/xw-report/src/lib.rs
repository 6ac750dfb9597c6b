//! # xw-report
//!
//! Reporting layer over the crossword analyses.
//!
//! - [`registry`]: the fixed list of reports and their columns.
//! - [`catalog`]: computes each report once and materialises it into a
//!   `report_<name>` `DuckDB` table.
//! - [`query`]: paginated, searchable, sortable page requests against those
//!   tables, bounded by a [`QueryBudget`].
//! - [`export`]: `{"data": [[..]]}` files for a client-side table widget.

pub mod cancel;
pub mod catalog;
pub mod error;
pub mod export;
pub mod query;
pub mod registry;
pub mod reports;
pub mod rowset;
pub mod sql;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cancel::{CancellationToken, QueryBudget};
pub use catalog::ReportCatalog;
pub use error::{QueryPhase, ReportError};
pub use export::{ExportSummary, export_all};
pub use query::{QueryService, ReportPage, ReportQuery, SortDirection, SortSpec};
pub use registry::{AnalysisContext, REPORTS, ReportKind};
pub use rowset::{Cell, Column, ColumnKind, RowSet};
