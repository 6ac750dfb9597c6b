//! Corpus builders shared by the unit tests.

use chrono::NaiveDate;
use xw_core::{Corpus, Crossword, CrosswordType, Direction, Entry, Position};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn crossword(id: &str, setter: &str, date: NaiveDate) -> Crossword {
    Crossword {
        id: id.to_string(),
        number: id.rsplit('/').next().unwrap_or(id).to_string(),
        name: format!("Crossword {id}"),
        creator_name: setter.to_string(),
        creator_url: "http://www.example.org".to_string(),
        date,
        crossword_type: CrosswordType::Cryptic,
        pdf_url: None,
    }
}

pub fn entry(cw: &str, label: &str, direction: Direction, clue: &str, solution: &str) -> Entry {
    Entry {
        crossword_id: cw.to_string(),
        entry_id: format!("{label}-{direction}"),
        number: label.parse().unwrap_or(0),
        human_number: label.to_string(),
        clue: clue.to_string(),
        direction,
        length: i32::try_from(solution.len()).unwrap_or(0),
        solution: solution.to_string(),
        position: Position::default(),
    }
}

pub fn corpus(crosswords: Vec<Crossword>, entries: Vec<Entry>) -> Corpus {
    Corpus::new(crosswords, entries).unwrap()
}
