//! Named-column result sets.
//!
//! Every report computes a [`RowSet`]: a fixed, ordered column list and rows
//! of typed [`Cell`]s in the report's natural order. The catalog materialises
//! it into `DuckDB`; export flattens it to strings.

use serde::{Serialize, Serializer};

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Integer,
    Decimal,
}

impl ColumnKind {
    /// `DuckDB` column type.
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Text => "VARCHAR",
            Self::Integer => "BIGINT",
            Self::Decimal => "DOUBLE",
        }
    }
}

/// One report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub title: &'static str,
    /// Whether free-text search looks at this column.
    pub searchable: bool,
    pub kind: ColumnKind,
}

impl Column {
    #[must_use]
    pub const fn text(title: &'static str) -> Self {
        Self {
            title,
            searchable: true,
            kind: ColumnKind::Text,
        }
    }

    #[must_use]
    pub const fn integer(title: &'static str) -> Self {
        Self {
            title,
            searchable: true,
            kind: ColumnKind::Integer,
        }
    }

    #[must_use]
    pub const fn decimal(title: &'static str) -> Self {
        Self {
            title,
            searchable: true,
            kind: ColumnKind::Decimal,
        }
    }

    /// HTML column excluded from search (markup would match every term).
    #[must_use]
    pub const fn html(title: &'static str) -> Self {
        Self {
            title,
            searchable: false,
            kind: ColumnKind::Text,
        }
    }
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Null,
}

impl Cell {
    /// Display form: decimals with one digit after the point, null as empty.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Decimal(d) => format!("{d:.1}"),
            Self::Null => String::new(),
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

/// Rows of one report in natural order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    pub columns: &'static [Column],
    pub rows: Vec<Vec<Cell>>,
}

impl RowSet {
    #[must_use]
    pub const fn new(columns: &'static [Column]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Rows shorter than the column list are padded with nulls;
    /// extra cells are dropped.
    pub fn push(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as display strings.
    #[must_use]
    pub fn rendered(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::render).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Count"),
        Column::decimal("Ratio"),
    ];

    #[test]
    fn push_pads_and_truncates() {
        let mut set = RowSet::new(COLUMNS);
        set.push(vec![Cell::from("Paul")]);
        set.push(vec![
            "Araucaria".into(),
            3_usize.into(),
            Cell::Decimal(75.0),
            "extra".into(),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[0], vec![Cell::from("Paul"), Cell::Null, Cell::Null]);
        assert_eq!(set.rows[1].len(), 3);
    }

    #[test]
    fn renders_decimals_with_one_digit() {
        assert_eq!(Cell::Decimal(75.0).render(), "75.0");
        assert_eq!(Cell::Decimal(12.34).render(), "12.3");
        assert_eq!(Cell::Integer(-4).render(), "-4");
        assert_eq!(Cell::Null.render(), "");
    }

    #[test]
    fn cells_serialize_as_strings() {
        let json = serde_json::to_string(&vec![Cell::Integer(3), Cell::from("x")]).unwrap();
        assert_eq!(json, r#"["3","x"]"#);
    }
}
