//! Answer and clue vocabulary analyses.
//!
//! Clue-text analyses take resolved entries (see [`crate::resolver`]);
//! solution-only analyses read the raw corpus, where resolution makes no
//! difference. Empty solutions (unpublished prize answers) are never counted
//! as answers.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use xw_core::{Corpus, CrosswordType, ResolvedEntry};

use crate::{NumberKey, round1};

static PLACEHOLDER_RES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"^\s*\(\d+\)$",
        r"^See\s+\d+.*",
        r"^See\s+(clues|special)\s+.*",
        r"^Follow\s+the\s+link\s+below\s+to\s+see\s+today's\s+clues.*",
    ]
    .map(|pattern| Regex::new(pattern).expect("placeholder pattern is valid"))
});

static LENGTH_HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([\d,\-]+\)\s*$").expect("length hint pattern is valid"));

/// Whether `clue` carries no clue text of its own.
#[must_use]
pub fn is_placeholder(clue: &str) -> bool {
    clue.is_empty() || PLACEHOLDER_RES.iter().any(|re| re.is_match(clue))
}

/// One appearance of a duplicated answer or clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    pub crossword_id: String,
    pub crossword_number: String,
    pub crossword_type: CrosswordType,
    pub clue: String,
}

/// An answer (or clue) a setter used in more than one crossword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub setter: String,
    /// The shared solution or clue.
    pub key: String,
    /// Appearances ordered by crossword number.
    pub mentions: Vec<Mention>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum GroupBy {
    Solution,
    Clue,
}

fn duplicates(corpus: &Corpus, resolved: &[ResolvedEntry<'_>], by: GroupBy) -> Vec<DuplicateGroup> {
    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    let mut groups: BTreeMap<(&str, &str), Vec<&ResolvedEntry<'_>>> = BTreeMap::new();

    for entry in resolved {
        if is_placeholder(entry.clue) || (by == GroupBy::Solution && entry.solution.is_empty()) {
            continue;
        }
        // A linked entry resolves to its target's clue: one clue per crossword.
        let solution = match by {
            GroupBy::Solution => entry.solution,
            GroupBy::Clue => "",
        };
        if !seen.insert((entry.crossword_id, solution, entry.clue)) {
            continue;
        }
        let Some(crossword) = corpus.crossword(entry.crossword_id) else {
            continue;
        };
        let key = match by {
            GroupBy::Solution => entry.solution,
            GroupBy::Clue => entry.clue,
        };
        groups
            .entry((crossword.creator_name.as_str(), key))
            .or_default()
            .push(entry);
    }

    groups
        .into_iter()
        .filter(|(_, members)| {
            members
                .iter()
                .map(|e| e.crossword_id)
                .collect::<HashSet<_>>()
                .len()
                > 1
        })
        .map(|((setter, key), members)| {
            let mut mentions: Vec<Mention> = members
                .into_iter()
                .filter_map(|e| {
                    let crossword = corpus.crossword(e.crossword_id)?;
                    Some(Mention {
                        crossword_id: crossword.id.clone(),
                        crossword_number: crossword.number.clone(),
                        crossword_type: crossword.crossword_type.clone(),
                        clue: e.clue.to_string(),
                    })
                })
                .collect();
            mentions.sort_by(|a, b| {
                NumberKey::new(&a.crossword_number)
                    .cmp(&NumberKey::new(&b.crossword_number))
                    .then_with(|| a.crossword_id.cmp(&b.crossword_id))
                    .then_with(|| a.clue.cmp(&b.clue))
            });
            DuplicateGroup {
                setter: setter.to_string(),
                key: key.to_string(),
                mentions,
            }
        })
        .collect()
}

/// Answers a setter used in more than one crossword, with the clues used.
///
/// Resolved entries are de-duplicated on `(crossword, solution, clue)` and
/// placeholder clues dropped before grouping by `(setter, solution)`. Groups
/// are ordered by setter, then solution.
#[must_use]
pub fn duplicate_answers(corpus: &Corpus, resolved: &[ResolvedEntry<'_>]) -> Vec<DuplicateGroup> {
    let groups = duplicates(corpus, resolved, GroupBy::Solution);
    tracing::debug!(groups = groups.len(), "duplicate answers");
    groups
}

/// Clues a setter used in more than one crossword, grouped by
/// `(setter, resolved clue)`, ordered by setter then clue.
///
/// Resolved entries are de-duplicated on `(crossword, clue)`, so a linked
/// entry sharing its target's clue is listed once.
#[must_use]
pub fn duplicate_clues(corpus: &Corpus, resolved: &[ResolvedEntry<'_>]) -> Vec<DuplicateGroup> {
    let groups = duplicates(corpus, resolved, GroupBy::Clue);
    tracing::debug!(groups = groups.len(), "duplicate clues");
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniquenessRatio {
    pub setter: String,
    pub unique: usize,
    pub total: usize,
    /// `100 * unique / total`, one decimal.
    pub ratio: f64,
}

/// Share of a setter's answers that are distinct.
///
/// Ordered by ratio descending, then setter. Setters without any non-empty
/// solution are left out.
#[must_use]
pub fn uniqueness_ratio(corpus: &Corpus) -> Vec<UniquenessRatio> {
    let mut per_setter: BTreeMap<&str, (HashSet<&str>, usize)> = BTreeMap::new();
    for entry in corpus.entries() {
        if entry.solution.is_empty() {
            continue;
        }
        let Some(crossword) = corpus.crossword(&entry.crossword_id) else {
            continue;
        };
        let (distinct, total) = per_setter.entry(crossword.creator_name.as_str()).or_default();
        distinct.insert(entry.solution.as_str());
        *total += 1;
    }

    let mut ratios: Vec<UniquenessRatio> = per_setter
        .into_iter()
        .filter(|(_, (_, total))| *total > 0)
        .map(|(setter, (distinct, total))| UniquenessRatio {
            setter: setter.to_string(),
            unique: distinct.len(),
            total,
            ratio: round1(100.0 * count_f64(distinct.len()) / count_f64(total)),
        })
        .collect();
    ratios.sort_by(|a, b| {
        b.ratio
            .total_cmp(&a.ratio)
            .then_with(|| a.setter.cmp(&b.setter))
    });
    ratios
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerCount {
    pub solution: String,
    pub count: usize,
}

/// The `limit` most frequent solutions across all setters.
///
/// Ties are broken by solution ascending.
#[must_use]
pub fn most_used_answers(corpus: &Corpus, limit: usize) -> Vec<AnswerCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in corpus.entries() {
        if !entry.solution.is_empty() {
            *counts.entry(entry.solution.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<AnswerCount> = counts
        .into_iter()
        .map(|(solution, count)| AnswerCount {
            solution: solution.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.solution.cmp(&b.solution)));
    ranked.truncate(limit);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClueLength {
    pub setter: String,
    pub clues: usize,
    /// Mean characters per clue, one decimal.
    pub average: f64,
}

/// Clue text with a trailing enumeration such as ` (5)` or ` (3,4)` removed.
#[must_use]
pub fn strip_length_hint(clue: &str) -> &str {
    let end = LENGTH_HINT_RE.find(clue).map_or(clue.len(), |m| m.start());
    clue[..end].trim()
}

/// Mean resolved clue length per setter, excluding the enumeration.
///
/// Empty clues are left out; a bare enumeration such as `(5)` counts as
/// length zero. Ordered by average descending, then setter.
#[must_use]
pub fn average_clue_length(corpus: &Corpus, resolved: &[ResolvedEntry<'_>]) -> Vec<ClueLength> {
    let mut per_setter: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for entry in resolved {
        if entry.clue.is_empty() {
            continue;
        }
        let text = strip_length_hint(entry.clue);
        let Some(crossword) = corpus.crossword(entry.crossword_id) else {
            continue;
        };
        let (clues, chars) = per_setter.entry(crossword.creator_name.as_str()).or_default();
        *clues += 1;
        *chars += text.chars().count();
    }

    let mut lengths: Vec<ClueLength> = per_setter
        .into_iter()
        .map(|(setter, (clues, chars))| ClueLength {
            setter: setter.to_string(),
            clues,
            average: round1(count_f64(chars) / count_f64(clues)),
        })
        .collect();
    lengths.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| a.setter.cmp(&b.setter))
    });
    lengths
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepeatPeak {
    pub setter: String,
    /// The most repeated answer (alphabetically first on ties).
    pub solution: String,
    pub peak: usize,
}

/// Highest number of times each setter used any single answer.
///
/// Raw entries are counted, so a repeat inside one crossword counts too.
/// Only answers used more than once qualify. Ordered by peak descending,
/// then setter.
#[must_use]
pub fn repeat_peaks(corpus: &Corpus) -> Vec<RepeatPeak> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for entry in corpus.entries() {
        if entry.solution.is_empty() {
            continue;
        }
        if let Some(crossword) = corpus.crossword(&entry.crossword_id) {
            *counts
                .entry((crossword.creator_name.as_str(), entry.solution.as_str()))
                .or_default() += 1;
        }
    }

    let mut best: BTreeMap<&str, (&str, usize)> = BTreeMap::new();
    for ((setter, solution), count) in counts {
        if count < 2 {
            continue;
        }
        let slot = best.entry(setter).or_insert((solution, count));
        if count > slot.1 {
            *slot = (solution, count);
        }
    }

    let mut peaks: Vec<RepeatPeak> = best
        .into_iter()
        .map(|(setter, (solution, peak))| RepeatPeak {
            setter: setter.to_string(),
            solution: solution.to_string(),
            peak,
        })
        .collect();
    peaks.sort_by(|a, b| b.peak.cmp(&a.peak).then_with(|| a.setter.cmp(&b.setter)));
    peaks
}

#[allow(clippy::cast_precision_loss)]
const fn count_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use xw_core::Direction::{Across, Down};

    use super::*;
    use crate::fixtures::{corpus, crossword, date, entry};
    use crate::resolve_corpus;

    #[rstest]
    #[case("", true)]
    #[case("(5)", true)]
    #[case("  (12)", true)]
    #[case("See 12", true)]
    #[case("See 4 down", true)]
    #[case("See clues below", true)]
    #[case("See special instructions", true)]
    #[case("Follow the link below to see today's clues", true)]
    #[case("Bird (5)", false)]
    #[case("Seen in the garden (6)", false)]
    fn detects_placeholders(#[case] clue: &str, #[case] expected: bool) {
        assert_eq!(is_placeholder(clue), expected);
    }

    #[test]
    fn uniqueness_ratio_of_repeated_answers() {
        let cw = "crosswords/cryptic/1";
        let corpus = corpus(
            vec![crossword(cw, "Paul", date(2020, 1, 1))],
            vec![
                entry(cw, "1", Across, "a", "A"),
                entry(cw, "2", Across, "b", "A"),
                entry(cw, "3", Across, "c", "B"),
                entry(cw, "4", Across, "d", "C"),
                entry(cw, "5", Across, "e", ""),
            ],
        );
        let ratios = uniqueness_ratio(&corpus);
        assert_eq!(
            ratios,
            vec![UniquenessRatio {
                setter: "Paul".to_string(),
                unique: 3,
                total: 4,
                ratio: 75.0,
            }]
        );
    }

    #[test]
    fn answer_repeated_within_one_crossword_is_not_duplicate() {
        let cw = "crosswords/cryptic/1";
        let corpus = corpus(
            vec![crossword(cw, "Paul", date(2020, 1, 1))],
            vec![
                entry(cw, "1", Across, "Bird (5)", "ROBIN"),
                entry(cw, "7", Down, "Thief (5)", "ROBIN"),
            ],
        );
        let resolved = resolve_corpus(&corpus);
        assert!(duplicate_answers(&corpus, &resolved).is_empty());
    }

    #[test]
    fn duplicate_answers_across_crosswords() {
        let corpus = corpus(
            vec![
                crossword("crosswords/cryptic/10", "Paul", date(2020, 1, 1)),
                crossword("crosswords/cryptic/9", "Paul", date(2019, 1, 1)),
                crossword("crosswords/prize/11", "Araucaria", date(2020, 1, 1)),
            ],
            vec![
                entry("crosswords/cryptic/10", "1", Across, "Bird (5)", "ROBIN"),
                entry("crosswords/cryptic/10", "2", Down, "See 1", "ROBIN"),
                entry("crosswords/cryptic/9", "4", Across, "Thief (5)", "ROBIN"),
                entry("crosswords/prize/11", "4", Across, "Hood (5)", "ROBIN"),
            ],
        );
        let resolved = resolve_corpus(&corpus);
        let groups = duplicate_answers(&corpus, &resolved);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].setter, "Paul");
        assert_eq!(groups[0].key, "ROBIN");
        let numbers: Vec<&str> = groups[0]
            .mentions
            .iter()
            .map(|m| m.crossword_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["9", "10"]);
        assert_eq!(groups[0].mentions[1].clue, "Bird (5)");
    }

    #[test]
    fn duplicate_clues_group_by_resolved_text() {
        let corpus = corpus(
            vec![
                crossword("crosswords/cryptic/1", "Paul", date(2020, 1, 1)),
                crossword("crosswords/cryptic/2", "Paul", date(2020, 2, 1)),
            ],
            vec![
                entry("crosswords/cryptic/1", "1", Across, "Bird (5)", "ROBIN"),
                entry("crosswords/cryptic/2", "3", Across, "Bird (5)", "WREN"),
                entry("crosswords/cryptic/2", "5", Down, "(4)", "ABCD"),
                entry("crosswords/cryptic/1", "5", Down, "(4)", "ABCD"),
            ],
        );
        let resolved = resolve_corpus(&corpus);
        let groups = duplicate_clues(&corpus, &resolved);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "Bird (5)");
        assert_eq!(groups[0].mentions.len(), 2);
    }

    #[test]
    fn linked_entry_clue_counted_once_per_crossword() {
        let corpus = corpus(
            vec![
                crossword("crosswords/cryptic/1", "Paul", date(2020, 1, 1)),
                crossword("crosswords/cryptic/2", "Paul", date(2020, 2, 1)),
            ],
            vec![
                entry("crosswords/cryptic/1", "1", Across, "Bird (5)", "ROBIN"),
                entry("crosswords/cryptic/1", "14", Down, "See 1", "HOOD"),
                entry("crosswords/cryptic/2", "3", Across, "Bird (5)", "WREN"),
            ],
        );
        let resolved = resolve_corpus(&corpus);
        let groups = duplicate_clues(&corpus, &resolved);
        assert_eq!(groups.len(), 1);
        let numbers: Vec<&str> = groups[0]
            .mentions
            .iter()
            .map(|m| m.crossword_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["1", "2"]);
    }

    #[test]
    fn most_used_answers_tie_break_alphabetically() {
        let cw = "crosswords/cryptic/1";
        let corpus = corpus(
            vec![crossword(cw, "Paul", date(2020, 1, 1))],
            vec![
                entry(cw, "1", Across, "a", "EMU"),
                entry(cw, "2", Across, "b", "ERA"),
                entry(cw, "3", Across, "c", "ERA"),
                entry(cw, "4", Across, "d", "EMU"),
                entry(cw, "5", Across, "e", "ALE"),
            ],
        );
        let top = most_used_answers(&corpus, 2);
        assert_eq!(
            top,
            vec![
                AnswerCount { solution: "EMU".to_string(), count: 2 },
                AnswerCount { solution: "ERA".to_string(), count: 2 },
            ]
        );
    }

    #[rstest]
    #[case("Bird (5)", "Bird")]
    #[case("Small bird (3,4) ", "Small bird")]
    #[case("Split (4-3)", "Split")]
    #[case("No hint", "No hint")]
    #[case("(5)", "")]
    fn strips_enumeration(#[case] clue: &str, #[case] expected: &str) {
        assert_eq!(strip_length_hint(clue), expected);
    }

    #[test]
    fn average_clue_length_uses_resolved_text() {
        let cw = "crosswords/cryptic/1";
        let corpus = corpus(
            vec![crossword(cw, "Paul", date(2020, 1, 1))],
            vec![
                entry(cw, "1", Across, "Bird (5)", "ROBIN"),
                entry(cw, "2", Down, "See 1", "ROBIN"),
                entry(cw, "3", Down, "Tiny (3)", "WEE"),
                entry(cw, "4", Down, "", ""),
            ],
        );
        let resolved = resolve_corpus(&corpus);
        let lengths = average_clue_length(&corpus, &resolved);
        assert_eq!(lengths.len(), 1);
        assert_eq!(lengths[0].clues, 3);
        assert!((lengths[0].average - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bare_enumeration_counts_as_empty_clue() {
        let cw = "crosswords/cryptic/1";
        let corpus = corpus(
            vec![crossword(cw, "Paul", date(2020, 1, 1))],
            vec![
                entry(cw, "1", Across, "Bird (5)", "ROBIN"),
                entry(cw, "2", Across, "(5)", "EGRET"),
            ],
        );
        let resolved = resolve_corpus(&corpus);
        let lengths = average_clue_length(&corpus, &resolved);
        assert_eq!(lengths[0].clues, 2);
        assert!((lengths[0].average - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeat_peaks_count_raw_entries() {
        let corpus = corpus(
            vec![
                crossword("crosswords/cryptic/1", "Paul", date(2020, 1, 1)),
                crossword("crosswords/cryptic/2", "Araucaria", date(2020, 1, 1)),
            ],
            vec![
                entry("crosswords/cryptic/1", "1", Across, "a", "ERA"),
                entry("crosswords/cryptic/1", "2", Across, "b", "ERA"),
                entry("crosswords/cryptic/1", "3", Across, "c", "ERA"),
                entry("crosswords/cryptic/1", "4", Across, "d", "EMU"),
                entry("crosswords/cryptic/1", "5", Across, "e", "EMU"),
                entry("crosswords/cryptic/2", "1", Across, "f", "OWL"),
            ],
        );
        let peaks = repeat_peaks(&corpus);
        assert_eq!(
            peaks,
            vec![RepeatPeak {
                setter: "Paul".to_string(),
                solution: "ERA".to_string(),
                peak: 3,
            }]
        );
    }
}
