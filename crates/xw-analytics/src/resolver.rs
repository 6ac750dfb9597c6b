//! Cross-reference resolution.
//!
//! A clue of the form `See 12` or `See 12 across` carries no text of its own;
//! the solver is expected to read the clue printed at 12 (across). Resolution
//! replaces such a clue with its target's clue, following exactly one hop.
//!
//! When several entries share the target label (12 across and 12 down, with
//! no direction given) the candidate whose own clue is not a reference wins,
//! then `across` before `down`, then the smaller entry id. A reference with no
//! candidate keeps its original text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use xw_core::{Corpus, Direction, Entry, ResolvedEntry};

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^See\s+(\d+)(\s+(across|down))?").expect("reference pattern is valid")
});

/// A parsed `See N [direction]` clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossReference<'a> {
    /// Target human number, e.g. `"12"`.
    pub target: &'a str,
    pub direction: Option<Direction>,
}

/// Parse `clue` as a cross-reference, or `None` for a literal clue.
#[must_use]
pub fn parse_reference(clue: &str) -> Option<CrossReference<'_>> {
    let caps = REFERENCE_RE.captures(clue)?;
    let target = caps.get(1)?.as_str();
    let direction = caps.get(3).and_then(|m| m.as_str().parse().ok());
    Some(CrossReference { target, direction })
}

#[must_use]
pub fn is_reference(clue: &str) -> bool {
    REFERENCE_RE.is_match(clue)
}

/// Resolved clue text for one entry of `corpus`.
#[must_use]
pub fn resolve_clue<'a>(corpus: &'a Corpus, entry: &'a Entry) -> &'a str {
    let Some(reference) = parse_reference(&entry.clue) else {
        return &entry.clue;
    };

    let candidates =
        corpus.entries_labelled(&entry.crossword_id, reference.target, reference.direction);
    let best = candidates.into_iter().min_by(|a, b| {
        is_reference(&a.clue)
            .cmp(&is_reference(&b.clue))
            .then_with(|| a.direction.as_str().cmp(b.direction.as_str()))
            .then_with(|| a.entry_id.cmp(&b.entry_id))
    });

    if let Some(target) = best {
        &target.clue
    } else {
        tracing::trace!(
            crossword = %entry.crossword_id,
            entry = %entry.entry_id,
            target = reference.target,
            "cross-reference has no target"
        );
        &entry.clue
    }
}

/// Resolve every entry of one crossword: `entry_id → resolved clue`.
///
/// Unknown crossword ids yield an empty map.
#[must_use]
pub fn resolve_crossword<'a>(corpus: &'a Corpus, crossword_id: &str) -> HashMap<&'a str, &'a str> {
    corpus
        .entries_of(crossword_id)
        .map(|entry| (entry.entry_id.as_str(), resolve_clue(corpus, entry)))
        .collect()
}

/// Resolve the whole corpus, one [`ResolvedEntry`] per entry in corpus order.
#[must_use]
pub fn resolve_corpus(corpus: &Corpus) -> Vec<ResolvedEntry<'_>> {
    let resolved: Vec<ResolvedEntry<'_>> = corpus
        .entries()
        .iter()
        .map(|entry| ResolvedEntry::new(entry, resolve_clue(corpus, entry)))
        .collect();
    tracing::debug!(entries = resolved.len(), "resolved cross-references");
    resolved
}
