//! Insert and read methods on [`CorpusLake`].
//!
//! A crossword and its entries are written in one transaction, so a failed
//! insert never leaves a crossword without its entries. Dates go in through
//! `CAST(? AS DATE)` and come back as `YYYY-MM-DD` text.

use chrono::NaiveDate;
use duckdb::{Row, params};
use xw_core::{Corpus, Crossword, CrosswordType, Direction, Entry, Position};

use crate::{CorpusLake, LakeError};

const SELECT_CROSSWORD: &str = "
SELECT id, number, name, creator_name, creator_weburl,
       CAST(date AS VARCHAR), crossword_type, pdf
FROM crosswords";

const SELECT_ENTRY: &str = "
SELECT crossword_id, entry_id, number, human_number, clue,
       direction, length, solution, pos_x, pos_y
FROM entries";

const ENTRY_ORDER: &str = " ORDER BY crossword_id, direction, number, entry_id";

/// Raw `crosswords` row before domain conversion.
struct CrosswordRow {
    id: String,
    number: String,
    name: String,
    creator_name: String,
    creator_url: String,
    date: String,
    crossword_type: String,
    pdf_url: Option<String>,
}

impl CrosswordRow {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            number: row.get(1)?,
            name: row.get(2)?,
            creator_name: row.get(3)?,
            creator_url: row.get(4)?,
            date: row.get(5)?,
            crossword_type: row.get(6)?,
            pdf_url: row.get(7)?,
        })
    }

    fn into_crossword(self) -> Result<Crossword, LakeError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            LakeError::InvalidRecord {
                table: "crosswords",
                reason: format!("crossword '{}' has bad date '{}': {e}", self.id, self.date),
            }
        })?;
        Ok(Crossword {
            id: self.id,
            number: self.number,
            name: self.name,
            creator_name: self.creator_name,
            creator_url: self.creator_url,
            date,
            crossword_type: CrosswordType::from(self.crossword_type),
            pdf_url: self.pdf_url,
        })
    }
}

/// Raw `entries` row before domain conversion.
struct EntryRow {
    crossword_id: String,
    entry_id: String,
    number: i32,
    human_number: String,
    clue: String,
    direction: String,
    length: i32,
    solution: String,
    pos_x: i32,
    pos_y: i32,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            crossword_id: row.get(0)?,
            entry_id: row.get(1)?,
            number: row.get(2)?,
            human_number: row.get(3)?,
            clue: row.get(4)?,
            direction: row.get(5)?,
            length: row.get(6)?,
            solution: row.get(7)?,
            pos_x: row.get(8)?,
            pos_y: row.get(9)?,
        })
    }

    fn into_entry(self) -> Result<Entry, LakeError> {
        let direction: Direction =
            self.direction
                .parse()
                .map_err(|e: xw_core::CoreError| LakeError::InvalidRecord {
                    table: "entries",
                    reason: e.to_string(),
                })?;
        Ok(Entry {
            crossword_id: self.crossword_id,
            entry_id: self.entry_id,
            number: self.number,
            human_number: self.human_number,
            clue: self.clue,
            direction,
            length: self.length,
            solution: self.solution,
            position: Position {
                x: self.pos_x,
                y: self.pos_y,
            },
        })
    }
}

impl CorpusLake {
    /// Whether a crossword with this id is already stored.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the query fails.
    pub fn contains_crossword(&self, id: &str) -> Result<bool, LakeError> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM crosswords WHERE id = ?",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Insert a crossword and all of its entries in one transaction.
    ///
    /// Returns `false` without writing anything if the id is already stored.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::Core`] if an entry belongs to another crossword,
    /// or [`LakeError::DuckDb`] if any INSERT fails (the transaction is rolled back).
    pub fn insert_crossword(
        &mut self,
        crossword: &Crossword,
        entries: &[Entry],
    ) -> Result<bool, LakeError> {
        if let Some(stray) = entries.iter().find(|e| e.crossword_id != crossword.id) {
            return Err(xw_core::CoreError::Validation(format!(
                "entry '{}' belongs to '{}', not '{}'",
                stray.entry_id, stray.crossword_id, crossword.id
            ))
            .into());
        }
        if self.contains_crossword(&crossword.id)? {
            return Ok(false);
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO crosswords (
                id, number, name, creator_name, creator_weburl,
                date, crossword_type, pdf
            ) VALUES (?, ?, ?, ?, ?, CAST(? AS DATE), ?, ?)",
            params![
                crossword.id,
                crossword.number,
                crossword.name,
                crossword.creator_name,
                crossword.creator_url,
                crossword.date.format("%Y-%m-%d").to_string(),
                crossword.crossword_type.as_str(),
                crossword.pdf_url,
            ],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (
                    crossword_id, entry_id, number, human_number, clue,
                    direction, length, solution, pos_x, pos_y
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.crossword_id,
                    entry.entry_id,
                    entry.number,
                    entry.human_number,
                    entry.clue,
                    entry.direction.as_str(),
                    entry.length,
                    entry.solution,
                    entry.position.x,
                    entry.position.y,
                ])?;
            }
        }
        tx.commit()?;
        Ok(true)
    }

    /// Look up one crossword by id.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the query fails, or
    /// [`LakeError::InvalidRecord`] if the stored date is malformed.
    pub fn crossword(&self, id: &str) -> Result<Option<Crossword>, LakeError> {
        let mut stmt = self.conn().prepare(&format!("{SELECT_CROSSWORD} WHERE id = ?"))?;
        let mut rows = stmt.query_map(params![id], CrosswordRow::from_row)?;
        rows.next()
            .transpose()?
            .map(CrosswordRow::into_crossword)
            .transpose()
    }

    /// All entries of one crossword.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the query fails, or
    /// [`LakeError::InvalidRecord`] if a stored direction is unknown.
    pub fn entries_of(&self, crossword_id: &str) -> Result<Vec<Entry>, LakeError> {
        self.query_entries(
            &format!("{SELECT_ENTRY} WHERE crossword_id = ?{ENTRY_ORDER}"),
            &[&crossword_id],
        )
    }

    /// Entries of `crossword_id` printed with `human_number`, optionally
    /// restricted to one direction.
    ///
    /// # Errors
    ///
    /// Same as [`Self::entries_of`].
    pub fn entries_labelled(
        &self,
        crossword_id: &str,
        human_number: &str,
        direction: Option<Direction>,
    ) -> Result<Vec<Entry>, LakeError> {
        match direction {
            Some(d) => self.query_entries(
                &format!(
                    "{SELECT_ENTRY} WHERE crossword_id = ? AND human_number = ? AND direction = ?{ENTRY_ORDER}"
                ),
                &[&crossword_id, &human_number, &d.as_str()],
            ),
            None => self.query_entries(
                &format!(
                    "{SELECT_ENTRY} WHERE crossword_id = ? AND human_number = ?{ENTRY_ORDER}"
                ),
                &[&crossword_id, &human_number],
            ),
        }
    }

    /// Number of stored crosswords.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the query fails.
    pub fn crossword_count(&self) -> Result<u64, LakeError> {
        self.count("crosswords")
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the query fails.
    pub fn entry_count(&self) -> Result<u64, LakeError> {
        self.count("entries")
    }

    /// Read the whole corpus into an immutable in-memory snapshot.
    ///
    /// Crosswords are ordered by date then id; entries by crossword, direction,
    /// number and entry id.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] on query failure, [`LakeError::InvalidRecord`]
    /// for malformed stored values, or [`LakeError::Core`] if the snapshot is
    /// inconsistent.
    pub fn load_corpus(&self) -> Result<Corpus, LakeError> {
        let crosswords = {
            let mut stmt = self
                .conn()
                .prepare(&format!("{SELECT_CROSSWORD} ORDER BY date, id"))?;
            let rows = stmt
                .query_map([], CrosswordRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter()
                .map(CrosswordRow::into_crossword)
                .collect::<Result<Vec<_>, _>>()?
        };
        let entries = self.query_entries(&format!("{SELECT_ENTRY}{ENTRY_ORDER}"), &[])?;

        tracing::info!(
            crosswords = crosswords.len(),
            entries = entries.len(),
            "loaded corpus snapshot"
        );
        Ok(Corpus::new(crosswords, entries)?)
    }

    fn query_entries(
        &self,
        sql: &str,
        params: &[&dyn duckdb::ToSql],
    ) -> Result<Vec<Entry>, LakeError> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt
            .query_map(params, EntryRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    fn count(&self, table: &str) -> Result<u64, LakeError> {
        let count: i64 =
            self.conn()
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
