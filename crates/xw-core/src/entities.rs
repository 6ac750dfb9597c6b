//! Corpus records.
//!
//! [`Crossword`] and [`Entry`] are write-once records as imported.
//! [`ResolvedEntry`] is the per-analysis projection of an entry whose clue has
//! been replaced by the text it cross-references; it borrows from the corpus
//! and is never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{CrosswordType, Direction};

/// A published puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossword {
    pub id: String,
    /// Series number. Archives mix integers and strings, so it is kept as text.
    pub number: String,
    pub name: String,
    pub creator_name: String,
    pub creator_url: String,
    pub date: NaiveDate,
    pub crossword_type: CrosswordType,
    pub pdf_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// A single grid entry (light) of a crossword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub crossword_id: String,
    /// Identifier within the crossword (e.g. `"12-across"`); not globally unique.
    pub entry_id: String,
    pub number: i32,
    /// Printed clue label, e.g. `"12"`. Join key for cross-references.
    pub human_number: String,
    pub clue: String,
    pub direction: Direction,
    pub length: i32,
    pub solution: String,
    pub position: Position,
}

/// An entry with its clue resolved through at most one cross-reference hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry<'a> {
    pub crossword_id: &'a str,
    pub entry_id: &'a str,
    pub number: i32,
    pub human_number: &'a str,
    pub clue: &'a str,
    pub direction: Direction,
    pub length: i32,
    pub solution: &'a str,
    pub position: Position,
}

impl<'a> ResolvedEntry<'a> {
    /// Project `entry` with `clue` as its resolved clue text.
    #[must_use]
    pub fn new(entry: &'a Entry, clue: &'a str) -> Self {
        Self {
            crossword_id: &entry.crossword_id,
            entry_id: &entry.entry_id,
            number: entry.number,
            human_number: &entry.human_number,
            clue,
            direction: entry.direction,
            length: entry.length,
            solution: &entry.solution,
            position: entry.position,
        }
    }
}
