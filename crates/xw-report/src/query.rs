//! Paginated, searchable, sortable access to materialised reports.
//!
//! A request is validated against the catalog before any SQL runs. It then
//! executes three read-only statements on its own connection (total count,
//! filtered count, page fetch), checking its [`QueryBudget`] before each.

use std::sync::Arc;
use std::time::Duration;

use duckdb::types::Value;
use duckdb::{Connection, params_from_iter};
use serde::{Deserialize, Serialize};
use xw_config::QueryConfig;

use crate::cancel::QueryBudget;
use crate::catalog::{ROW_ORDER, ReportCatalog, column_name, value_cell};
use crate::error::{QueryPhase, ReportError};
use crate::registry::ReportKind;
use crate::rowset::ColumnKind;
use crate::sql::{LIKE_ESCAPE, contains_pattern, quote_ident, quote_literal};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort by one report column (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: usize,
    #[serde(default)]
    pub direction: SortDirection,
}

/// One table-widget request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub report: String,
    /// Opaque request counter, echoed back.
    #[serde(default)]
    pub draw: i64,
    #[serde(default)]
    pub start: i64,
    /// Rows per page; zero or negative selects the configured default.
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl ReportQuery {
    #[must_use]
    pub fn new(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            ..Self::default()
        }
    }
}

/// One page of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub draw: i64,
    pub records_total: u64,
    pub records_filtered: u64,
    pub data: Vec<Vec<String>>,
}

/// Serves [`ReportQuery`] requests against a [`ReportCatalog`].
#[derive(Clone)]
pub struct QueryService {
    catalog: Arc<ReportCatalog>,
    default_length: i64,
    timeout: Duration,
}

impl QueryService {
    #[must_use]
    pub fn new(catalog: Arc<ReportCatalog>, config: &QueryConfig) -> Self {
        Self {
            catalog,
            default_length: i64::from(config.default_page_length),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ReportCatalog {
        &self.catalog
    }

    /// Run a request under the configured timeout.
    ///
    /// # Errors
    ///
    /// See [`Self::query_with_budget`].
    pub fn query(&self, request: &ReportQuery) -> Result<ReportPage, ReportError> {
        self.query_with_budget(request, &QueryBudget::with_timeout(self.timeout))
    }

    /// Run a request under an explicit budget.
    ///
    /// # Errors
    ///
    /// - [`ReportError::UnknownReport`] / [`ReportError::SortColumnOutOfRange`]
    ///   for a malformed request, before any SQL runs.
    /// - [`ReportError::Timeout`] / [`ReportError::Cancelled`] if the budget
    ///   is exhausted before a phase starts.
    /// - [`ReportError::Storage`] if `DuckDB` fails.
    pub fn query_with_budget(
        &self,
        request: &ReportQuery,
        budget: &QueryBudget,
    ) -> Result<ReportPage, ReportError> {
        let report = self.catalog.get(&request.report)?;
        if let Some(sort) = request.sort.filter(|s| s.column >= report.columns.len()) {
            return Err(ReportError::SortColumnOutOfRange {
                report: report.name.to_string(),
                column: sort.column,
                columns: report.columns.len(),
            });
        }
        let length = if request.length <= 0 {
            self.default_length
        } else {
            request.length
        };
        let start = request.start.max(0);
        let name = report.name;
        let table = quote_ident(&report.table_name());

        budget.check(name, QueryPhase::TotalCount)?;
        let conn = self
            .catalog
            .connection()
            .map_err(storage_error(name, QueryPhase::TotalCount))?;
        let records_total = count(&conn, &format!("SELECT count(*) FROM {table}"), &[])
            .map_err(storage_error(name, QueryPhase::TotalCount))?;
        tracing::debug!(report = name, records_total, "total count");

        let filter = SearchFilter::new(report, request.search.as_deref());
        budget.check(name, QueryPhase::FilteredCount)?;
        let records_filtered = match &filter {
            None => records_total,
            Some(filter) => count(
                &conn,
                &format!("SELECT count(*) FROM {table} WHERE {}", filter.clause),
                &filter.binds(),
            )
            .map_err(storage_error(name, QueryPhase::FilteredCount))?,
        };
        tracing::debug!(report = name, records_filtered, "filtered count");

        budget.check(name, QueryPhase::DataFetch)?;
        let select = (0..report.columns.len())
            .map(|i| quote_ident(&column_name(i)))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("SELECT {select} FROM {table}");
        if let Some(filter) = &filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.clause);
        }
        sql.push_str(" ORDER BY ");
        if let Some(sort) = request.sort {
            sql.push_str(&quote_ident(&column_name(sort.column)));
            sql.push(' ');
            sql.push_str(sort.direction.sql());
            sql.push_str(", ");
        }
        sql.push_str(&quote_ident(ROW_ORDER));
        sql.push_str(&format!(" LIMIT {length} OFFSET {start}"));

        let binds = filter.as_ref().map(SearchFilter::binds).unwrap_or_default();
        let data = fetch(&conn, &sql, &binds, report.columns.len())
            .map_err(storage_error(name, QueryPhase::DataFetch))?;
        tracing::debug!(report = name, start, length, rows = data.len(), "fetched page");

        Ok(ReportPage {
            draw: request.draw,
            records_total,
            records_filtered,
            data,
        })
    }

    /// Run a request on the blocking pool, bounded by the configured timeout.
    ///
    /// On expiry the request's token is cancelled so the worker stops at its
    /// next phase boundary, and [`ReportError::Timeout`] is returned.
    ///
    /// # Errors
    ///
    /// See [`Self::query_with_budget`].
    pub async fn query_async(&self, request: ReportQuery) -> Result<ReportPage, ReportError> {
        let budget = QueryBudget::with_timeout(self.timeout);
        let report = request.report.clone();
        let service = self.clone();
        let worker_budget = budget.clone();
        let handle =
            tokio::task::spawn_blocking(move || service.query_with_budget(&request, &worker_budget));

        match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) if join.is_panic() => std::panic::resume_unwind(join.into_panic()),
            Ok(Err(_)) => Err(ReportError::Cancelled {
                report,
                phase: budget.last_phase().unwrap_or(QueryPhase::TotalCount),
            }),
            Err(_) => {
                budget.token().cancel();
                let phase = budget.last_phase().unwrap_or(QueryPhase::TotalCount);
                tracing::warn!(report, %phase, "report query timed out");
                Err(ReportError::Timeout { report, phase })
            }
        }
    }
}

/// `WHERE` clause matching any searchable column against one term.
struct SearchFilter {
    clause: String,
    pattern: String,
    placeholders: usize,
}

impl SearchFilter {
    fn new(report: &ReportKind, term: Option<&str>) -> Option<Self> {
        let term = term.filter(|t| !t.is_empty())?;
        let escape = quote_literal(&LIKE_ESCAPE.to_string());
        let predicates: Vec<String> = report
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.searchable)
            .map(|(i, c)| {
                let ident = quote_ident(&column_name(i));
                let text = match c.kind {
                    ColumnKind::Decimal => format!("printf('%.1f', {ident})"),
                    ColumnKind::Text | ColumnKind::Integer => format!("CAST({ident} AS VARCHAR)"),
                };
                format!("{text} ILIKE ? ESCAPE {escape}")
            })
            .collect();
        let clause = if predicates.is_empty() {
            "FALSE".to_string()
        } else {
            format!("({})", predicates.join(" OR "))
        };
        Some(Self {
            clause,
            pattern: contains_pattern(term),
            placeholders: predicates.len(),
        })
    }

    fn binds(&self) -> Vec<&str> {
        vec![self.pattern.as_str(); self.placeholders]
    }
}

fn storage_error(report: &str, phase: QueryPhase) -> impl FnOnce(duckdb::Error) -> ReportError + '_ {
    move |source| {
        tracing::error!(report, %phase, error = %source, "report query failed");
        ReportError::storage(report, phase, source)
    }
}

fn count(conn: &Connection, sql: &str, binds: &[&str]) -> duckdb::Result<u64> {
    let n: i64 = conn.query_row(sql, params_from_iter(binds), |row| row.get(0))?;
    Ok(u64::try_from(n).unwrap_or_default())
}

fn fetch(
    conn: &Connection,
    sql: &str,
    binds: &[&str],
    width: usize,
) -> duckdb::Result<Vec<Vec<String>>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(binds), |row| {
        (0..width)
            .map(|i| row.get::<_, Value>(i).map(|v| value_cell(v).render()))
            .collect::<duckdb::Result<Vec<_>>>()
    })?;
    rows.collect()
}
