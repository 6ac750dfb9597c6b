//! `DuckDB` table DDL for the corpus.
//!
//! Both tables are write-once: the importer inserts, nothing updates or
//! deletes. `entries.crossword_id` references `crosswords.id`.

/// Published crosswords, one row per puzzle.
pub const CREATE_CROSSWORDS: &str = "
CREATE TABLE IF NOT EXISTS crosswords (
    id             VARCHAR PRIMARY KEY,
    number         VARCHAR NOT NULL,
    name           VARCHAR NOT NULL,
    creator_name   VARCHAR NOT NULL,
    creator_weburl VARCHAR NOT NULL,
    date           DATE NOT NULL,
    crossword_type VARCHAR NOT NULL,
    pdf            VARCHAR
);
";

/// Grid entries with their raw clue text.
pub const CREATE_ENTRIES: &str = "
CREATE TABLE IF NOT EXISTS entries (
    crossword_id VARCHAR NOT NULL REFERENCES crosswords(id),
    entry_id     VARCHAR NOT NULL,
    number       INTEGER NOT NULL,
    human_number VARCHAR NOT NULL,
    clue         VARCHAR NOT NULL,
    direction    VARCHAR NOT NULL,
    length       INTEGER NOT NULL,
    solution     VARCHAR NOT NULL,
    pos_x        INTEGER NOT NULL,
    pos_y        INTEGER NOT NULL
);
";

/// Lookup index for cross-reference resolution.
pub const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS idx_entries_label
    ON entries(crossword_id, human_number, direction);
";
