use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use xw_core::Direction;
use xw_report::SortDirection;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Import crossword archive JSON files into the corpus database.
    Import(ImportArgs),
    /// Compute every report and materialise it in the database.
    Build,
    /// List the reports available for querying.
    Reports,
    /// Fetch one page of a report.
    Query(QueryArgs),
    /// Write one JSON data file per report.
    Export(ExportArgs),
    /// Show an entry's clue with cross-references resolved.
    Clue(ClueArgs),
}

/// Arguments for `xw import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Archive files (defaults to every *.json under store.archive_dirs).
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Self::Asc,
            SortOrder::Desc => Self::Desc,
        }
    }
}

/// Arguments for `xw query`.
#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    /// Report name (see `xw reports`).
    pub report: String,
    /// Request counter echoed in the response.
    #[arg(long, default_value_t = 1)]
    pub draw: i64,
    /// Offset of the first row.
    #[arg(long, default_value_t = 0)]
    pub start: i64,
    /// Rows per page (0 uses query.default_page_length).
    #[arg(long, default_value_t = 0)]
    pub length: i64,
    /// Case-insensitive substring filter over searchable columns.
    #[arg(long)]
    pub search: Option<String>,
    /// Zero-based column index to sort by.
    #[arg(long)]
    pub sort: Option<usize>,
    /// Sort direction.
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,
}

/// Arguments for `xw export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Output directory (defaults to report.export_dir).
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for `xw clue`.
#[derive(Clone, Debug, Args)]
pub struct ClueArgs {
    /// Crossword id, e.g. crosswords/cryptic/28000.
    pub crossword_id: String,
    /// Printed entry label, e.g. 12.
    pub label: String,
    /// across or down (both when omitted).
    #[arg(long)]
    pub direction: Option<Direction>,
}
