//! # End-to-end analyses over a small corpus
//!
//! Builds a three-setter corpus and runs every analysis on it, checking that
//! resolution feeds the text analyses and that results are stable across runs.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use xw_analytics::vocabulary::{average_clue_length, duplicate_answers, duplicate_clues};
use xw_analytics::{Granularity, activity, detect_streaks, resolve_corpus, resolve_crossword};
use xw_core::{Corpus, Crossword, CrosswordType, Direction, Entry, Position};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn crossword(number: u32, setter: &str, date: (i32, u32, u32)) -> Crossword {
    Crossword {
        id: format!("crosswords/cryptic/{number}"),
        number: number.to_string(),
        name: format!("Cryptic crossword No {number}"),
        creator_name: setter.to_string(),
        creator_url: "http://www.example.org".to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        crossword_type: CrosswordType::Cryptic,
        pdf_url: None,
    }
}

fn entry(number: u32, label: &str, direction: Direction, clue: &str, solution: &str) -> Entry {
    Entry {
        crossword_id: format!("crosswords/cryptic/{number}"),
        entry_id: format!("{label}-{direction}"),
        number: label.parse().unwrap(),
        human_number: label.to_string(),
        clue: clue.to_string(),
        direction,
        length: i32::try_from(solution.len()).unwrap(),
        solution: solution.to_string(),
        position: Position::default(),
    }
}

fn sample_corpus() -> Corpus {
    use Direction::{Across, Down};
    Corpus::new(
        vec![
            crossword(100, "Paul", (2020, 1, 6)),
            crossword(101, "Paul", (2020, 1, 13)),
            crossword(102, "Paul", (2020, 2, 3)),
            crossword(200, "Araucaria", (2019, 12, 30)),
            crossword(300, "Enigmatist", (2020, 6, 1)),
        ],
        vec![
            entry(100, "12", Down, "See 12 across", ""),
            entry(100, "12", Across, "Songbird (5)", "ROBIN"),
            entry(101, "4", Across, "Outlaw of Sherwood (5)", "ROBIN"),
            entry(102, "1", Across, "Songbird (5)", "WREN"),
            entry(200, "1", Across, "Songbird (5)", "ROBIN"),
            entry(300, "7", Down, "(6)", "ABCDEF"),
        ],
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn resolution_is_independent_of_insertion_order() {
    let corpus = sample_corpus();
    let resolved = resolve_crossword(&corpus, "crosswords/cryptic/100");
    assert_eq!(resolved["12-down"], "Songbird (5)");
    assert_eq!(resolved["12-across"], "Songbird (5)");
}

#[test]
fn text_analyses_read_resolved_clues() {
    let corpus = sample_corpus();
    let resolved = resolve_corpus(&corpus);

    let answers = duplicate_answers(&corpus, &resolved);
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].setter, "Paul");
    assert_eq!(answers[0].key, "ROBIN");
    assert_eq!(answers[0].mentions.len(), 2);

    let clues = duplicate_clues(&corpus, &resolved);
    let keys: Vec<(&str, &str)> = clues
        .iter()
        .map(|g| (g.setter.as_str(), g.key.as_str()))
        .collect();
    assert_eq!(keys, vec![("Paul", "Songbird (5)")]);

    let lengths = average_clue_length(&corpus, &resolved);
    let setters: Vec<&str> = lengths.iter().map(|l| l.setter.as_str()).collect();
    assert_eq!(setters, vec!["Paul", "Araucaria"]);
}

#[test]
fn weekly_and_monthly_streaks() {
    let corpus = sample_corpus();
    let weekly = detect_streaks(&corpus, Granularity::Weekly);
    let paul = weekly.iter().find(|s| s.setter == "Paul").unwrap();
    assert_eq!(paul.length, 2);
    assert_eq!(paul.start, "2020-01-06");
    assert_eq!(paul.end, "2020-01-13");

    let monthly = detect_streaks(&corpus, Granularity::Monthly);
    assert_eq!(monthly[0].setter, "Paul");
    assert_eq!(monthly[0].length, 2);
    assert_eq!(monthly[0].puzzles, 3);
    assert_eq!(monthly, detect_streaks(&corpus, Granularity::Monthly));
}

#[test]
fn activity_reports_cover_every_setter() {
    let corpus = sample_corpus();
    assert_eq!(activity::setter_totals(&corpus).len(), 3);
    assert_eq!(activity::setter_profiles(&corpus).len(), 3);
    let debuts = activity::debut_years(&corpus);
    assert_eq!(debuts.first().map(|d| d.year), Some(2019));
    assert_eq!(debuts.last().map(|d| d.year), Some(2020));
}
