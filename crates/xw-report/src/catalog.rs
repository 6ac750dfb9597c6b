//! Materialised report tables.
//!
//! [`ReportCatalog::build`] computes every registered report once and writes
//! it to a `report_<name>` table with a `row_order` column holding the
//! natural order and one typed `c{i}` column per report column. A report
//! that fails to compute or write is logged and left out; the rest of the
//! catalog is still usable.

use std::sync::{Mutex, PoisonError};

use duckdb::types::Value;
use duckdb::{Connection, params};

use crate::error::{QueryPhase, ReportError};
use crate::registry::{AnalysisContext, REPORTS, ReportKind};
use crate::rowset::{Cell, RowSet};
use crate::sql::quote_ident;

/// Name of the natural-order column in every report table.
pub const ROW_ORDER: &str = "row_order";

/// Name of the table column holding report column `index`.
#[must_use]
pub fn column_name(index: usize) -> String {
    format!("c{index}")
}

/// The set of reports available for querying.
pub struct ReportCatalog {
    base: Mutex<Connection>,
    available: Vec<&'static ReportKind>,
}

impl ReportCatalog {
    /// Compute and materialise every registered report.
    ///
    /// Each report is written in its own transaction, replacing any previous
    /// table of the same name.
    #[must_use]
    pub fn build(mut conn: Connection, ctx: &AnalysisContext<'_>) -> Self {
        let mut available = Vec::with_capacity(REPORTS.len());
        for report in REPORTS {
            let rows = report.compute(ctx);
            match materialise(&mut conn, report, &rows) {
                Ok(()) => available.push(report),
                Err(error) => {
                    tracing::warn!(report = report.name, %error, "report omitted from catalog");
                }
            }
        }
        tracing::info!(
            available = available.len(),
            registered = REPORTS.len(),
            "report catalog built"
        );
        Self {
            base: Mutex::new(conn),
            available,
        }
    }

    /// Attach to report tables written by an earlier [`Self::build`].
    ///
    /// Reports whose table is missing or has the wrong number of columns are
    /// not available.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Storage`] if the schema lookup itself fails.
    pub fn open(conn: Connection) -> Result<Self, ReportError> {
        let mut available = Vec::new();
        {
            let mut stmt = conn
                .prepare(
                    "SELECT count(*) FROM information_schema.columns \
                     WHERE table_schema = 'main' AND table_name = ?",
                )
                .map_err(|e| ReportError::storage("catalog", QueryPhase::Materialise, e))?;
            for report in REPORTS {
                let found: i64 = stmt
                    .query_row(params![report.table_name()], |row| row.get(0))
                    .map_err(|e| ReportError::storage(report.name, QueryPhase::Materialise, e))?;
                let expected = report.columns.len() + 1;
                if usize::try_from(found).is_ok_and(|n| n == expected) {
                    available.push(report);
                } else {
                    tracing::debug!(report = report.name, found, expected, "report table unavailable");
                }
            }
        }
        Ok(Self {
            base: Mutex::new(conn),
            available,
        })
    }

    /// Available reports in registry order.
    #[must_use]
    pub fn reports(&self) -> &[&'static ReportKind] {
        &self.available
    }

    /// Look up an available report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnknownReport`] if no materialised report has
    /// this name.
    pub fn get(&self, name: &str) -> Result<&'static ReportKind, ReportError> {
        self.available
            .iter()
            .copied()
            .find(|r| r.name == name)
            .ok_or_else(|| ReportError::UnknownReport(name.to_string()))
    }

    /// A fresh connection to the catalog database for one request.
    ///
    /// # Errors
    ///
    /// Returns the underlying `DuckDB` error if the connection cannot be cloned.
    pub fn connection(&self) -> duckdb::Result<Connection> {
        self.base
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_clone()
    }
}

fn materialise(
    conn: &mut Connection,
    report: &ReportKind,
    rows: &RowSet,
) -> Result<(), ReportError> {
    let storage = |e| ReportError::storage(report.name, QueryPhase::Materialise, e);
    let table = report.table_name();
    let ddl = std::iter::once(format!("{} BIGINT NOT NULL", quote_ident(ROW_ORDER)))
        .chain(
            report
                .columns
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{} {}", quote_ident(&column_name(i)), c.kind.sql_type())),
        )
        .collect::<Vec<_>>()
        .join(", ");

    let tx = conn.transaction().map_err(storage)?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table_q}; CREATE TABLE {table_q} ({ddl});",
        table_q = quote_ident(&table)
    ))
    .map_err(storage)?;
    {
        let mut appender = tx.appender(&table).map_err(storage)?;
        for (order, row) in rows.rows.iter().enumerate() {
            let values = std::iter::once(Value::BigInt(i64::try_from(order).unwrap_or(i64::MAX)))
                .chain(row.iter().map(cell_value));
            appender
                .append_row(duckdb::appender_params_from_iter(values))
                .map_err(storage)?;
        }
        appender.flush().map_err(storage)?;
    }
    tx.commit().map_err(storage)?;
    tracing::debug!(report = report.name, rows = rows.len(), "materialised report");
    Ok(())
}

fn cell_value(cell: &Cell) -> Value {
    match cell {
        Cell::Text(s) => Value::Text(s.clone()),
        Cell::Integer(i) => Value::BigInt(*i),
        Cell::Decimal(d) => Value::Double(*d),
        Cell::Null => Value::Null,
    }
}

/// Convert a value read back from a report table.
pub(crate) fn value_cell(value: Value) -> Cell {
    match value {
        Value::Text(s) => Cell::Text(s),
        Value::BigInt(i) => Cell::Integer(i),
        Value::Int(i) => Cell::Integer(i64::from(i)),
        Value::Double(d) => Cell::Decimal(d),
        Value::Float(f) => Cell::Decimal(f64::from(f)),
        _ => Cell::Null,
    }
}

#[cfg(test)]
mod tests {
    use xw_config::ReportConfig;

    use super::*;
    use crate::fixtures::five_setters;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT count(*) FROM {}", quote_ident(table)), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn build_materialises_every_report() {
        let corpus = five_setters();
        let config = ReportConfig::default();
        let ctx = AnalysisContext::new(&corpus, &config);
        let catalog = ReportCatalog::build(Connection::open_in_memory().unwrap(), &ctx);

        assert_eq!(catalog.reports().len(), REPORTS.len());
        let conn = catalog.connection().unwrap();
        assert_eq!(count(&conn, "report_setter_totals"), 5);
        assert_eq!(count(&conn, "report_monthly_cadence"), 12);
    }

    #[test]
    fn rebuild_replaces_tables() {
        let corpus = five_setters();
        let config = ReportConfig::default();
        let ctx = AnalysisContext::new(&corpus, &config);
        let first = ReportCatalog::build(Connection::open_in_memory().unwrap(), &ctx);
        let conn = first.connection().unwrap();
        let second = ReportCatalog::build(conn, &ctx);
        assert_eq!(count(&second.connection().unwrap(), "report_setter_totals"), 5);
    }

    #[test]
    fn failing_report_is_omitted() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE VIEW report_setter_totals AS SELECT 1 AS x")
            .unwrap();
        let corpus = five_setters();
        let config = ReportConfig::default();
        let ctx = AnalysisContext::new(&corpus, &config);
        let catalog = ReportCatalog::build(conn, &ctx);

        assert_eq!(catalog.reports().len(), REPORTS.len() - 1);
        assert!(matches!(
            catalog.get("setter_totals"),
            Err(ReportError::UnknownReport(_))
        ));
        assert!(catalog.get("yearly_activity").is_ok());
    }

    #[test]
    fn open_finds_existing_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.duckdb");
        let corpus = five_setters();
        let config = ReportConfig::default();
        let ctx = AnalysisContext::new(&corpus, &config);
        drop(ReportCatalog::build(Connection::open(&path).unwrap(), &ctx));

        let reopened = ReportCatalog::open(Connection::open(&path).unwrap()).unwrap();
        assert_eq!(reopened.reports().len(), REPORTS.len());

        let empty = ReportCatalog::open(Connection::open_in_memory().unwrap()).unwrap();
        assert!(empty.reports().is_empty());
    }

    #[test]
    fn values_round_trip_to_cells() {
        assert_eq!(value_cell(cell_value(&Cell::Integer(7))), Cell::Integer(7));
        assert_eq!(value_cell(cell_value(&Cell::from("x"))), Cell::from("x"));
        assert_eq!(value_cell(Value::Null), Cell::Null);
    }
}
