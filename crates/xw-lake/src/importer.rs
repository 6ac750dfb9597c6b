//! Guardian-style JSON archive importer.
//!
//! One archive file holds one crossword with its entries. Files are imported
//! independently: each goes through [`CorpusLake::insert_crossword`] in its
//! own transaction, a crossword already present is skipped, and a file that
//! fails to read or parse is logged and counted without stopping the run.
//!
//! Normalisation applied before storage:
//! - `number` may be an integer or a string; it is stored as text.
//! - `date` is epoch milliseconds, converted to a UTC calendar date.
//! - trailing whitespace is trimmed from the creator name; an empty name
//!   becomes `Unknown`.
//! - an empty creator URL becomes `http://www.example.org`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use xw_core::{Crossword, CrosswordType, Direction, Entry, Position};

use crate::{CorpusLake, LakeError};

const UNKNOWN_CREATOR: &str = "Unknown";
const PLACEHOLDER_URL: &str = "http://www.example.org";

/// One archive file as published by the scraper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveCrossword {
    pub id: String,
    #[serde(default)]
    pub number: serde_json::Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub creator: Option<ArchiveCreator>,
    /// Epoch milliseconds.
    pub date: f64,
    #[serde(default)]
    pub entries: Vec<ArchiveEntry>,
    #[serde(default)]
    pub crossword_type: String,
    #[serde(default)]
    pub pdf: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveCreator {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub web_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub id: String,
    pub number: i32,
    pub human_number: String,
    #[serde(default)]
    pub clue: String,
    pub direction: String,
    pub length: i32,
    /// Absent for prize puzzles whose answers were never published.
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub position: ArchivePosition,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ArchivePosition {
    pub x: i32,
    pub y: i32,
}

impl ArchiveCrossword {
    /// Normalise into domain records.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::InvalidRecord`] if the date is out of range or an
    /// entry has an unknown direction.
    pub fn into_records(self) -> Result<(Crossword, Vec<Entry>), LakeError> {
        let date = epoch_millis_to_date(self.date).ok_or_else(|| LakeError::InvalidRecord {
            table: "crosswords",
            reason: format!("crossword '{}' has out-of-range date {}", self.id, self.date),
        })?;
        let creator = self.creator.unwrap_or_default();
        let creator_name = match creator.name.trim_end() {
            "" => UNKNOWN_CREATOR.to_string(),
            name => name.to_string(),
        };
        let creator_url = if creator.web_url.is_empty() {
            PLACEHOLDER_URL.to_string()
        } else {
            creator.web_url
        };

        let entries = self
            .entries
            .into_iter()
            .map(|e| {
                let direction: Direction =
                    e.direction.parse().map_err(|err: xw_core::CoreError| {
                        LakeError::InvalidRecord {
                            table: "entries",
                            reason: format!("entry '{}' of '{}': {err}", e.id, self.id),
                        }
                    })?;
                Ok(Entry {
                    crossword_id: self.id.clone(),
                    entry_id: e.id,
                    number: e.number,
                    human_number: e.human_number,
                    clue: e.clue,
                    direction,
                    length: e.length,
                    solution: e.solution,
                    position: Position {
                        x: e.position.x,
                        y: e.position.y,
                    },
                })
            })
            .collect::<Result<Vec<_>, LakeError>>()?;

        let crossword = Crossword {
            number: number_text(&self.number),
            id: self.id,
            name: self.name,
            creator_name,
            creator_url,
            date,
            crossword_type: CrosswordType::from(self.crossword_type),
            pdf_url: self.pdf,
        };
        Ok((crossword, entries))
    }
}

/// Render the archive `number` field, which is an integer or a string.
fn number_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => n.as_i64().map_or_else(
            || match n.as_f64() {
                Some(f) if f.fract() == 0.0 => format!("{f:.0}"),
                _ => n.to_string(),
            },
            |i| i.to_string(),
        ),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn epoch_millis_to_date(millis: f64) -> Option<NaiveDate> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
}

/// Parse one archive file.
///
/// # Errors
///
/// Returns [`LakeError::Io`] if the file cannot be read, or [`LakeError::Json`]
/// if it is not a crossword archive.
pub fn parse_archive(path: &Path) -> Result<ArchiveCrossword, LakeError> {
    let data = std::fs::read(path)?;
    serde_json::from_slice(&data).map_err(|source| LakeError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// What happened to a single archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Added,
    /// The crossword id was already stored.
    Skipped,
}

/// Totals for a multi-file import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
    pub failed: Vec<PathBuf>,
}

impl ImportSummary {
    /// Count the result of importing `path`, logging skips and failures.
    pub fn record(&mut self, path: &Path, result: &Result<ImportOutcome, LakeError>) {
        match result {
            Ok(ImportOutcome::Added) => self.added += 1,
            Ok(ImportOutcome::Skipped) => {
                tracing::debug!(path = %path.display(), "skipped existing crossword");
                self.skipped += 1;
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to import archive");
                self.failed.push(path.to_path_buf());
            }
        }
    }
}

/// Import a single archive file.
///
/// # Errors
///
/// Returns any read, parse, normalisation or storage error for this file.
pub fn import_file(lake: &mut CorpusLake, path: &Path) -> Result<ImportOutcome, LakeError> {
    let archive = parse_archive(path)?;
    let (crossword, entries) = archive.into_records()?;
    if lake.insert_crossword(&crossword, &entries)? {
        tracing::debug!(id = %crossword.id, entries = entries.len(), "added crossword");
        Ok(ImportOutcome::Added)
    } else {
        Ok(ImportOutcome::Skipped)
    }
}

/// Import every file, continuing past failures.
pub fn import_files(lake: &mut CorpusLake, paths: &[PathBuf]) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for path in paths {
        let result = import_file(lake, path);
        summary.record(path, &result);
    }
    tracing::info!(
        added = summary.added,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "import finished"
    );
    summary
}

/// Find `*.json` files (case-insensitive) under `dirs`, sorted.
///
/// Missing directories are skipped.
#[must_use]
pub fn discover_archives<P: AsRef<Path>>(dirs: &[P]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for dir in dirs.iter().map(AsRef::as_ref) {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "archive directory not found");
            continue;
        }
        found.extend(
            WalkBuilder::new(dir)
                .standard_filters(false)
                .build()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
                .map(ignore::DirEntry::into_path)
                .filter(|p| {
                    p.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
                }),
        );
    }
    found.sort();
    found
}
