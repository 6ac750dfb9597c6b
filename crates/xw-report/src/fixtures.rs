use chrono::NaiveDate;
use xw_core::{Corpus, Crossword, CrosswordType, Direction, Entry, Position};

pub const SETTERS: [&str; 5] = ["Araucaria", "Brendan", "O'Hare", "Paul", "Rufus 100%"];

/// One cryptic per setter, one entry each: five rows in `setter_totals`.
pub fn five_setters() -> Corpus {
    let crosswords = SETTERS
        .iter()
        .zip(1_u32..)
        .map(|(setter, n)| Crossword {
            id: format!("crosswords/cryptic/{n}"),
            number: n.to_string(),
            name: format!("Cryptic crossword No {n}"),
            creator_name: (*setter).to_string(),
            creator_url: "http://www.example.org".to_string(),
            date: NaiveDate::from_ymd_opt(2021, n, 4).unwrap(),
            crossword_type: CrosswordType::Cryptic,
            pdf_url: None,
        })
        .collect();
    let entries = (1_u32..=5)
        .map(|n| Entry {
            crossword_id: format!("crosswords/cryptic/{n}"),
            entry_id: "1-across".to_string(),
            number: 1,
            human_number: "1".to_string(),
            clue: "Bird (5)".to_string(),
            direction: Direction::Across,
            length: 5,
            solution: "ROBIN".to_string(),
            position: Position::default(),
        })
        .collect();
    Corpus::new(crosswords, entries).unwrap()
}
