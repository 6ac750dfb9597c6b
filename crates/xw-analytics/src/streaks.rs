//! Publishing streaks (gaps and islands).
//!
//! Each setter's publication dates are collapsed into active periods (ISO
//! weeks or calendar months). Periods get a dense integer ordinal, so two
//! periods are consecutive exactly when their ordinals differ by one. Ranking
//! a setter's periods 1, 2, 3, … and subtracting the rank from the ordinal
//! gives a key that is constant along an unbroken run; the longest run per
//! setter is that setter's streak.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use xw_core::Corpus;

/// Period size for streak detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// ISO weeks, Monday to Sunday.
    Weekly,
    /// Calendar months.
    Monthly,
}

impl Granularity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Dense ordinal of the period containing `date`.
    ///
    /// Weekly: days from the Common Era to the Monday of the ISO week,
    /// divided by seven. Consecutive ISO weeks differ by one, including
    /// across ISO year boundaries. Monthly: `year * 12 + month`.
    #[must_use]
    pub fn ordinal(self, date: NaiveDate) -> i64 {
        match self {
            Self::Weekly => {
                let monday =
                    date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
                i64::from(monday.num_days_from_ce()).div_euclid(7)
            }
            Self::Monthly => i64::from(date.year()) * 12 + i64::from(date.month()),
        }
    }

    /// Label of a period, given the earliest publication date inside it.
    #[must_use]
    pub fn label(self, earliest: NaiveDate) -> String {
        match self {
            Self::Weekly => earliest.format("%Y-%m-%d").to_string(),
            Self::Monthly => earliest.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One active period of one setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRecord {
    pub ordinal: i64,
    pub label: String,
    /// Crosswords published in the period.
    pub puzzles: usize,
}

/// The longest run of consecutive active periods of one setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub setter: String,
    /// Number of periods in the run.
    pub length: usize,
    /// Label of the first period.
    pub start: String,
    /// Label of the last period.
    pub end: String,
    /// Crosswords published during the run.
    pub puzzles: usize,
}

/// Collapse publication dates into chronologically ordered periods.
pub fn collapse_periods<I>(dates: I, granularity: Granularity) -> Vec<PeriodRecord>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut by_ordinal: BTreeMap<i64, (NaiveDate, usize)> = BTreeMap::new();
    for date in dates {
        by_ordinal
            .entry(granularity.ordinal(date))
            .and_modify(|(earliest, puzzles)| {
                *earliest = (*earliest).min(date);
                *puzzles += 1;
            })
            .or_insert((date, 1));
    }
    by_ordinal
        .into_iter()
        .map(|(ordinal, (earliest, puzzles))| PeriodRecord {
            ordinal,
            label: granularity.label(earliest),
            puzzles,
        })
        .collect()
}

/// Longest run in chronologically ordered `periods`.
///
/// Returns `(first index, last index, puzzles)`. Among equally long runs the
/// one with the lowest starting ordinal wins.
fn longest_run(periods: &[PeriodRecord]) -> Option<(usize, usize, usize)> {
    let mut runs: Vec<(usize, usize, usize)> = Vec::new();
    let mut current_key = None;
    for (rank, period) in periods.iter().enumerate() {
        let key = period.ordinal - i64::try_from(rank).unwrap_or(i64::MAX);
        match runs.last_mut() {
            Some(run) if current_key == Some(key) => {
                run.1 = rank;
                run.2 += period.puzzles;
            }
            _ => runs.push((rank, rank, period.puzzles)),
        }
        current_key = Some(key);
    }
    runs.into_iter()
        .reduce(|best, run| if run.1 - run.0 > best.1 - best.0 { run } else { best })
}

/// Longest streak of every setter, ordered by length descending then setter.
#[must_use]
pub fn detect_streaks(corpus: &Corpus, granularity: Granularity) -> Vec<Streak> {
    let mut dates_by_setter: BTreeMap<&str, Vec<NaiveDate>> = BTreeMap::new();
    for crossword in corpus.crosswords() {
        dates_by_setter
            .entry(crossword.creator_name.as_str())
            .or_default()
            .push(crossword.date);
    }

    let mut streaks: Vec<Streak> = dates_by_setter
        .into_iter()
        .filter_map(|(setter, dates)| {
            let periods = collapse_periods(dates, granularity);
            let (first, last, puzzles) = longest_run(&periods)?;
            Some(Streak {
                setter: setter.to_string(),
                length: last - first + 1,
                start: periods[first].label.clone(),
                end: periods[last].label.clone(),
                puzzles,
            })
        })
        .collect();

    streaks.sort_by(|a, b| b.length.cmp(&a.length).then_with(|| a.setter.cmp(&b.setter)));
    tracing::debug!(%granularity, setters = streaks.len(), "detected streaks");
    streaks
}
