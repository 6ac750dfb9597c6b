//! Clue direction and crossword type.
//!
//! Both serialize to the lowercase strings used in the archive JSON and in
//! SQL storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction of a grid entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Across => "across",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "across" => Ok(Self::Across),
            "down" => Ok(Self::Down),
            other => Err(CoreError::Validation(format!(
                "unknown direction '{other}' (expected 'across' or 'down')"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// CrosswordType
// ---------------------------------------------------------------------------

/// Series a crossword was published in.
///
/// Archives occasionally carry series other than cryptic and prize; those are
/// kept verbatim in [`CrosswordType::Other`] instead of failing the import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CrosswordType {
    Cryptic,
    Prize,
    Other(String),
}

impl CrosswordType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cryptic => "cryptic",
            Self::Prize => "prize",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for CrosswordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "cryptic" => Self::Cryptic,
            "prize" => Self::Prize,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for CrosswordType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CrosswordType> for String {
    fn from(value: CrosswordType) -> Self {
        match value {
            CrosswordType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CrosswordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
