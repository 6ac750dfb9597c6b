//! Report layer error types.

use std::fmt;
use std::path::PathBuf;

/// Stage of report work an error or budget check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Materialise,
    TotalCount,
    FilteredCount,
    DataFetch,
}

impl QueryPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Materialise => "materialise",
            Self::TotalCount => "total count",
            Self::FilteredCount => "filtered count",
            Self::DataFetch => "data fetch",
        }
    }
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur building, querying or exporting reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// No materialised report has this name.
    #[error("unknown report '{0}'")]
    UnknownReport(String),

    /// Sort column index is outside the report's column list.
    #[error("report '{report}' has {columns} columns; cannot sort by column {column}")]
    SortColumnOutOfRange {
        report: String,
        column: usize,
        columns: usize,
    },

    /// `DuckDB` failed while working on a report.
    #[error("storage error in report '{report}' during {phase}: {source}")]
    Storage {
        report: String,
        phase: QueryPhase,
        #[source]
        source: duckdb::Error,
    },

    /// The request deadline passed before `phase` could start.
    #[error("query on report '{report}' timed out before {phase}")]
    Timeout { report: String, phase: QueryPhase },

    /// The request was cancelled before `phase` could start.
    #[error("query on report '{report}' was cancelled before {phase}")]
    Cancelled { report: String, phase: QueryPhase },

    /// Writing an export file failed.
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing an export document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Whether the request itself was malformed, as opposed to a failure
    /// while serving it.
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::UnknownReport(_) | Self::SortColumnOutOfRange { .. }
        )
    }

    /// Stable status code for structured error responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownReport(_) | Self::SortColumnOutOfRange { .. } => "bad_request",
            Self::Storage { .. } => "storage_error",
            Self::Timeout { .. } => "timeout",
            Self::Cancelled { .. } => "cancelled",
            Self::Io { .. } | Self::Json(_) => "export_error",
        }
    }

    pub(crate) fn storage(report: &str, phase: QueryPhase, source: duckdb::Error) -> Self {
        Self::Storage {
            report: report.to_string(),
            phase,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_requests_share_a_status() {
        let unknown = ReportError::UnknownReport("x".to_string());
        let sort = ReportError::SortColumnOutOfRange {
            report: "x".to_string(),
            column: 9,
            columns: 2,
        };
        assert_eq!(unknown.kind(), "bad_request");
        assert_eq!(sort.kind(), "bad_request");
        assert!(sort.to_string().contains("column 9"));

        let timeout = ReportError::Timeout {
            report: "x".to_string(),
            phase: QueryPhase::DataFetch,
        };
        assert_eq!(timeout.kind(), "timeout");
        assert!(!timeout.is_bad_request());
        assert_eq!(timeout.to_string(), "query on report 'x' timed out before data fetch");
    }
}
