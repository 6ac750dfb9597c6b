//! Corpus store configuration.

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    "./xword.duckdb".to_string()
}

fn default_archive_dirs() -> Vec<String> {
    vec![
        "./crosswords/cryptic/setter".to_string(),
        "./crosswords/prize/setter".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// `DuckDB` file holding the corpus and materialised reports.
    /// `":memory:"` opens an in-memory database.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Directories walked for `*.json` archives when `import` gets no files.
    #[serde(default = "default_archive_dirs")]
    pub archive_dirs: Vec<String>,
}

impl StoreConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.db_path == ":memory:"
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            archive_dirs: default_archive_dirs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StoreConfig::default();
        assert_eq!(config.db_path, "./xword.duckdb");
        assert_eq!(config.archive_dirs.len(), 2);
        assert!(!config.is_in_memory());
    }
}
