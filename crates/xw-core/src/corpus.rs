//! Immutable in-memory snapshot of the archive.
//!
//! Built once per analysis run from the corpus store. Two exact-match indexes
//! are computed at construction and never change afterwards:
//! - crossword id → crossword (and its entries)
//! - `(crossword id, human number, direction)` → entries
//!
//! Every analysis reads from a shared `&Corpus`; nothing writes to it.

use std::collections::{BTreeSet, HashMap};

use crate::entities::{Crossword, Entry};
use crate::enums::Direction;
use crate::errors::CoreError;

/// Key of the cross-reference index.
type LabelKey = (usize, String, Direction);

#[derive(Debug, Default)]
pub struct Corpus {
    crosswords: Vec<Crossword>,
    entries: Vec<Entry>,
    by_id: HashMap<String, usize>,
    /// Entry indices per crossword index, in insertion order.
    by_crossword: Vec<Vec<usize>>,
    by_label: HashMap<LabelKey, Vec<usize>>,
}

impl Corpus {
    /// Build a corpus and its indexes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if two crosswords share an id or an
    /// entry references a crossword that is not present.
    pub fn new(crosswords: Vec<Crossword>, entries: Vec<Entry>) -> Result<Self, CoreError> {
        let mut by_id = HashMap::with_capacity(crosswords.len());
        for (idx, crossword) in crosswords.iter().enumerate() {
            if by_id.insert(crossword.id.clone(), idx).is_some() {
                return Err(CoreError::Validation(format!(
                    "duplicate crossword id '{}'",
                    crossword.id
                )));
            }
        }

        let mut by_crossword = vec![Vec::new(); crosswords.len()];
        let mut by_label: HashMap<LabelKey, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let Some(&cw_idx) = by_id.get(&entry.crossword_id) else {
                return Err(CoreError::Validation(format!(
                    "entry '{}' references unknown crossword '{}'",
                    entry.entry_id, entry.crossword_id
                )));
            };
            by_crossword[cw_idx].push(idx);
            by_label
                .entry((cw_idx, entry.human_number.clone(), entry.direction))
                .or_default()
                .push(idx);
        }

        Ok(Self {
            crosswords,
            entries,
            by_id,
            by_crossword,
            by_label,
        })
    }

    #[must_use]
    pub fn crosswords(&self) -> &[Crossword] {
        &self.crosswords
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crosswords.is_empty()
    }

    /// Exact-match lookup by crossword id.
    #[must_use]
    pub fn crossword(&self, id: &str) -> Option<&Crossword> {
        self.by_id.get(id).map(|&idx| &self.crosswords[idx])
    }

    /// Entries of one crossword, in insertion order. Empty for unknown ids.
    pub fn entries_of<'a>(
        &'a self,
        crossword_id: &str,
    ) -> impl Iterator<Item = &'a Entry> + use<'a> {
        let indices = self
            .by_id
            .get(crossword_id)
            .map_or(&[][..], |&idx| self.by_crossword[idx].as_slice());
        indices.iter().map(move |&idx| &self.entries[idx])
    }

    /// Entries of `crossword_id` printed with `human_number`.
    ///
    /// With `direction = None` both directions are returned, across first.
    #[must_use]
    pub fn entries_labelled(
        &self,
        crossword_id: &str,
        human_number: &str,
        direction: Option<Direction>,
    ) -> Vec<&Entry> {
        let Some(&cw_idx) = self.by_id.get(crossword_id) else {
            return Vec::new();
        };
        let directions: &[Direction] = match direction {
            Some(Direction::Across) => &[Direction::Across],
            Some(Direction::Down) => &[Direction::Down],
            None => &[Direction::Across, Direction::Down],
        };
        directions
            .iter()
            .filter_map(|&d| self.by_label.get(&(cw_idx, human_number.to_string(), d)))
            .flatten()
            .map(|&idx| &self.entries[idx])
            .collect()
    }

    /// Distinct setter names, sorted.
    #[must_use]
    pub fn setters(&self) -> BTreeSet<&str> {
        self.crosswords
            .iter()
            .map(|cw| cw.creator_name.as_str())
            .collect()
    }
}
