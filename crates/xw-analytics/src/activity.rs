//! Setter activity over time.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use xw_core::{Corpus, Crossword, CrosswordType, Direction};

use crate::NumberKey;

/// Crossword counts split by series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub cryptic: usize,
    pub prize: usize,
    pub other: usize,
}

impl TypeCounts {
    fn add(&mut self, crossword_type: &CrosswordType) {
        match crossword_type {
            CrosswordType::Cryptic => self.cryptic += 1,
            CrosswordType::Prize => self.prize += 1,
            CrosswordType::Other(_) => self.other += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.cryptic + self.prize + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetterTotals {
    pub setter: String,
    pub counts: TypeCounts,
}

/// Crosswords per setter by type, ordered by total descending then setter.
#[must_use]
pub fn setter_totals(corpus: &Corpus) -> Vec<SetterTotals> {
    let mut totals: Vec<SetterTotals> = by_setter(corpus)
        .into_iter()
        .map(|(setter, crosswords)| {
            let mut counts = TypeCounts::default();
            for cw in crosswords {
                counts.add(&cw.crossword_type);
            }
            SetterTotals {
                setter: setter.to_string(),
                counts,
            }
        })
        .collect();
    totals.sort_by(|a, b| {
        b.counts
            .total()
            .cmp(&a.counts.total())
            .then_with(|| a.setter.cmp(&b.setter))
    });
    totals
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyActivity {
    pub setter: String,
    pub year: i32,
    pub crosswords: usize,
}

/// Crosswords per `(setter, year)`, ordered by setter then year.
#[must_use]
pub fn yearly_activity(corpus: &Corpus) -> Vec<YearlyActivity> {
    let mut counts: BTreeMap<(&str, i32), usize> = BTreeMap::new();
    for cw in corpus.crosswords() {
        *counts
            .entry((cw.creator_name.as_str(), cw.date.year()))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((setter, year), crosswords)| YearlyActivity {
            setter: setter.to_string(),
            year,
            crosswords,
        })
        .collect()
}

/// Calendar difference between two dates, shown as
/// "Y years, M months, D days".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tenure {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Tenure {
    /// Years, months and days from `from` to `to` (`from <= to`).
    ///
    /// Whole months are counted first; month ends clamp, so 31 January plus
    /// one month is the last day of February. The remainder is days.
    #[must_use]
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        let mut months = (to.year() - from.year()) * 12 + month_i32(to) - month_i32(from);
        let mut anchor = add_months(from, months);
        while months > 0 && anchor > to {
            months -= 1;
            anchor = add_months(from, months);
        }
        let days = (to - anchor).num_days();
        Self {
            years: months / 12,
            months: months % 12,
            days: i32::try_from(days).unwrap_or(i32::MAX),
        }
    }
}

impl fmt::Display for Tenure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

fn month_i32(date: NaiveDate) -> i32 {
    i32::try_from(date.month()).unwrap_or(0)
}

fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    u32::try_from(months)
        .ok()
        .and_then(|m| date.checked_add_months(Months::new(m)))
        .unwrap_or(date)
}

/// Biography of one setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetterProfile {
    pub setter: String,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub tenure: Tenure,
    pub counts: TypeCounts,
    /// Entries whose raw clue contains the setter's own name.
    pub self_references: usize,
}

/// One profile per setter, ordered by setter.
#[must_use]
pub fn setter_profiles(corpus: &Corpus) -> Vec<SetterProfile> {
    by_setter(corpus)
        .into_iter()
        .filter_map(|(setter, crosswords)| {
            let first = crosswords.iter().map(|cw| cw.date).min()?;
            let last = crosswords.iter().map(|cw| cw.date).max()?;
            let mut counts = TypeCounts::default();
            let mut self_references = 0;
            for cw in &crosswords {
                counts.add(&cw.crossword_type);
                self_references += corpus
                    .entries_of(&cw.id)
                    .filter(|e| e.clue.contains(setter))
                    .count();
            }
            Some(SetterProfile {
                setter: setter.to_string(),
                first,
                last,
                tenure: Tenure::between(first, last),
                counts,
                self_references,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectionCounts {
    pub across: usize,
    pub down: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionBalance {
    pub setter: String,
    pub counts: DirectionCounts,
}

impl DirectionBalance {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.counts.across + self.counts.down
    }
}

/// Across and down entries per setter, ordered by total descending then setter.
#[must_use]
pub fn direction_balance(corpus: &Corpus) -> Vec<DirectionBalance> {
    let mut counts: BTreeMap<&str, DirectionCounts> = BTreeMap::new();
    for entry in corpus.entries() {
        let Some(cw) = corpus.crossword(&entry.crossword_id) else {
            continue;
        };
        let slot = counts.entry(cw.creator_name.as_str()).or_default();
        match entry.direction {
            Direction::Across => slot.across += 1,
            Direction::Down => slot.down += 1,
        }
    }
    let mut balance: Vec<DirectionBalance> = counts
        .into_iter()
        .map(|(setter, counts)| DirectionBalance {
            setter: setter.to_string(),
            counts,
        })
        .collect();
    balance.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.setter.cmp(&b.setter)));
    balance
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebutYear {
    pub year: i32,
    /// Setters whose first crossword appeared this year, sorted.
    pub setters: Vec<String>,
}

/// Debuts per year from the earliest to the latest debut year.
///
/// Years without a debut are present with no setters.
#[must_use]
pub fn debut_years(corpus: &Corpus) -> Vec<DebutYear> {
    let mut debuts: BTreeMap<i32, Vec<String>> = BTreeMap::new();
    for (setter, crosswords) in by_setter(corpus) {
        if let Some(first) = crosswords.iter().map(|cw| cw.date).min() {
            debuts.entry(first.year()).or_default().push(setter.to_string());
        }
    }
    let (Some(&min), Some(&max)) = (debuts.keys().next(), debuts.keys().next_back()) else {
        return Vec::new();
    };
    (min..=max)
        .map(|year| DebutYear {
            year,
            setters: debuts.remove(&year).unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// 1 = January.
    pub month: u32,
    pub name: &'static str,
    pub crosswords: usize,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Crosswords per calendar month across all years; always twelve rows.
#[must_use]
pub fn monthly_cadence(corpus: &Corpus) -> Vec<MonthCount> {
    let mut counts = [0_usize; 12];
    for cw in corpus.crosswords() {
        counts[cw.date.month0() as usize] += 1;
    }
    MONTH_NAMES
        .into_iter()
        .zip(counts)
        .zip(1_u32..)
        .map(|((name, crosswords), month)| MonthCount {
            month,
            name,
            crosswords,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfCrossword {
    pub setter: String,
    pub crossword_id: String,
    pub number: String,
    pub pdf_url: String,
    pub date: NaiveDate,
}

/// Crosswords with a PDF version, ordered by setter then number.
#[must_use]
pub fn pdf_crosswords(corpus: &Corpus) -> Vec<PdfCrossword> {
    let mut pdfs: Vec<PdfCrossword> = corpus
        .crosswords()
        .iter()
        .filter_map(|cw| {
            let pdf_url = cw.pdf_url.as_ref().filter(|url| !url.is_empty())?;
            Some(PdfCrossword {
                setter: cw.creator_name.clone(),
                crossword_id: cw.id.clone(),
                number: cw.number.clone(),
                pdf_url: pdf_url.clone(),
                date: cw.date,
            })
        })
        .collect();
    pdfs.sort_by(|a, b| {
        a.setter
            .cmp(&b.setter)
            .then_with(|| NumberKey::new(&a.number).cmp(&NumberKey::new(&b.number)))
            .then_with(|| a.crossword_id.cmp(&b.crossword_id))
    });
    pdfs
}

fn by_setter(corpus: &Corpus) -> BTreeMap<&str, Vec<&Crossword>> {
    let mut grouped: BTreeMap<&str, Vec<&Crossword>> = BTreeMap::new();
    for cw in corpus.crosswords() {
        grouped.entry(cw.creator_name.as_str()).or_default().push(cw);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use xw_core::Direction::{Across, Down};

    use super::*;
    use crate::fixtures::{corpus, crossword, date, entry};

    fn typed(id: &str, setter: &str, d: NaiveDate, t: CrosswordType) -> Crossword {
        let mut cw = crossword(id, setter, d);
        cw.crossword_type = t;
        cw
    }

    #[test]
    fn totals_split_by_type() {
        let corpus = corpus(
            vec![
                typed("c/1", "Paul", date(2020, 1, 1), CrosswordType::Cryptic),
                typed("c/2", "Paul", date(2020, 1, 2), CrosswordType::Prize),
                typed("c/3", "Paul", date(2020, 1, 3), CrosswordType::from("quiptic")),
                typed("c/4", "Araucaria", date(2020, 1, 4), CrosswordType::Cryptic),
            ],
            Vec::new(),
        );
        let totals = setter_totals(&corpus);
        assert_eq!(totals[0].setter, "Paul");
        assert_eq!(
            totals[0].counts,
            TypeCounts {
                cryptic: 1,
                prize: 1,
                other: 1,
            }
        );
        assert_eq!(totals[0].counts.total(), 3);
        assert_eq!(totals[1].setter, "Araucaria");
    }

    #[test]
    fn yearly_activity_per_setter() {
        let corpus = corpus(
            vec![
                crossword("c/1", "Paul", date(2019, 6, 1)),
                crossword("c/2", "Paul", date(2020, 1, 2)),
                crossword("c/3", "Paul", date(2020, 3, 3)),
            ],
            Vec::new(),
        );
        let years: Vec<(i32, usize)> = yearly_activity(&corpus)
            .into_iter()
            .map(|y| (y.year, y.crosswords))
            .collect();
        assert_eq!(years, vec![(2019, 1), (2020, 2)]);
    }

    #[rstest]
    #[case(date(2010, 1, 15), date(2015, 3, 20), "5 years, 2 months, 5 days")]
    #[case(date(2010, 1, 31), date(2010, 3, 1), "0 years, 1 months, 1 days")]
    #[case(date(2010, 11, 10), date(2011, 2, 5), "0 years, 2 months, 26 days")]
    #[case(date(2020, 5, 5), date(2020, 5, 5), "0 years, 0 months, 0 days")]
    fn tenure_text(#[case] from: NaiveDate, #[case] to: NaiveDate, #[case] expected: &str) {
        assert_eq!(Tenure::between(from, to).to_string(), expected);
    }

    #[test]
    fn profile_counts_self_references() {
        let corpus = corpus(
            vec![
                crossword("c/1", "Paul", date(2018, 2, 1)),
                crossword("c/2", "Paul", date(2020, 4, 1)),
            ],
            vec![
                entry("c/1", "1", Across, "Paul's favourite (5)", "ABCDE"),
                entry("c/2", "1", Across, "Saint Paul (4)", "ABCD"),
                entry("c/2", "2", Down, "Unrelated (4)", "ABCD"),
            ],
        );
        let profiles = setter_profiles(&corpus);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].first, date(2018, 2, 1));
        assert_eq!(profiles[0].last, date(2020, 4, 1));
        assert_eq!(profiles[0].tenure.to_string(), "2 years, 2 months, 0 days");
        assert_eq!(profiles[0].self_references, 2);
    }

    #[test]
    fn direction_balance_counts() {
        let corpus = corpus(
            vec![crossword("c/1", "Paul", date(2020, 1, 1))],
            vec![
                entry("c/1", "1", Across, "a", "A"),
                entry("c/1", "2", Across, "b", "B"),
                entry("c/1", "3", Down, "c", "C"),
            ],
        );
        let balance = direction_balance(&corpus);
        assert_eq!(balance[0].counts, DirectionCounts { across: 2, down: 1 });
        assert_eq!(balance[0].total(), 3);
    }

    #[test]
    fn debut_years_fill_gaps() {
        let corpus = corpus(
            vec![
                crossword("c/1", "Paul", date(2001, 5, 1)),
                crossword("c/2", "Araucaria", date(1999, 5, 1)),
                crossword("c/3", "Paul", date(1998, 5, 1)),
                crossword("c/4", "Enigmatist", date(2001, 1, 1)),
            ],
            Vec::new(),
        );
        let debuts = debut_years(&corpus);
        let years: Vec<i32> = debuts.iter().map(|d| d.year).collect();
        assert_eq!(years, vec![1998, 1999, 2000, 2001]);
        assert_eq!(debuts[0].setters, vec!["Paul".to_string()]);
        assert!(debuts[2].setters.is_empty());
        assert_eq!(debuts[3].setters, vec!["Enigmatist".to_string()]);
    }

    #[test]
    fn monthly_cadence_has_twelve_months() {
        let corpus = corpus(
            vec![
                crossword("c/1", "Paul", date(2001, 3, 1)),
                crossword("c/2", "Paul", date(2005, 3, 9)),
            ],
            Vec::new(),
        );
        let months = monthly_cadence(&corpus);
        assert_eq!(months.len(), 12);
        assert_eq!(months[2].name, "March");
        assert_eq!(months[2].crosswords, 2);
        assert_eq!(months[0].crosswords, 0);
    }

    #[test]
    fn pdf_crosswords_ordered_by_setter_then_number() {
        let mut a = crossword("crosswords/prize/100", "Paul", date(2001, 3, 1));
        a.pdf_url = Some("https://example.org/100.pdf".to_string());
        let mut b = crossword("crosswords/prize/99", "Paul", date(2001, 2, 1));
        b.pdf_url = Some("https://example.org/99.pdf".to_string());
        let c = crossword("crosswords/prize/98", "Paul", date(2001, 1, 1));
        let corpus = corpus(vec![a, b, c], Vec::new());

        let numbers: Vec<String> = pdf_crosswords(&corpus)
            .into_iter()
            .map(|p| p.number)
            .collect();
        assert_eq!(numbers, vec!["99".to_string(), "100".to_string()]);
    }
}
