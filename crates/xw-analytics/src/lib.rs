//! # xw-analytics
//!
//! Pure analyses over an immutable [`xw_core::Corpus`].
//!
//! - [`resolver`]: replaces "See 12 across" style clues with the clue they
//!   point to. Every text analysis reads resolved clues.
//! - [`streaks`]: longest run of consecutive active weeks or months per setter.
//! - [`vocabulary`]: duplicate answers and clues, uniqueness ratios, most used
//!   answers, clue lengths and repeat peaks.
//! - [`activity`]: setter totals, yearly activity, profiles, direction balance,
//!   debut years, monthly cadence and PDF crosswords.
//!
//! Nothing here touches storage. Functions take `&Corpus` (and resolved
//! entries where clue text matters) and return plain records in a stable,
//! documented order.

pub mod activity;
pub mod resolver;
pub mod streaks;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use resolver::{resolve_clue, resolve_corpus, resolve_crossword};
pub use streaks::{Granularity, Streak, detect_streaks};

use std::cmp::Ordering;

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sort key for crossword series numbers.
///
/// Numbers that parse as integers order numerically and before any textual
/// number; textual numbers order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NumberKey<'a> {
    Numeric(i64),
    Text(&'a str),
}

impl<'a> NumberKey<'a> {
    #[must_use]
    pub fn new(number: &'a str) -> Self {
        number
            .trim()
            .parse()
            .map_or(Self::Text(number), Self::Numeric)
    }
}

/// Compare two crossword numbers by [`NumberKey`].
#[must_use]
pub fn compare_numbers(a: &str, b: &str) -> Ordering {
    NumberKey::new(a).cmp(&NumberKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("9", "10", Ordering::Less)]
    #[case("100", "100", Ordering::Equal)]
    #[case("abc", "abd", Ordering::Less)]
    #[case("10", "9", Ordering::Greater)]
    #[case("28,000", "27,999", Ordering::Greater)]
    fn crossword_numbers_order(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_numbers(a, b), expected);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert!((round1(75.0) - 75.0).abs() < f64::EPSILON);
        assert!((round1(66.666_666) - 66.7).abs() < 1e-9);
        assert!((round1(12.34) - 12.3).abs() < 1e-9);
    }
}
