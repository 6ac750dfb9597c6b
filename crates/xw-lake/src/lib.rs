//! # xw-lake
//!
//! `DuckDB` storage for the crossword corpus.
//!
//! Holds two write-once tables, `crosswords` and `entries`, populated by the
//! idempotent JSON [`importer`]. Analyses never query these tables row by
//! row: [`CorpusLake::load_corpus`] reads them once into an immutable
//! [`xw_core::Corpus`].
//!
//! The same database file also hosts the materialised report tables written
//! by `xw-report`; [`CorpusLake::connection`] hands out independent
//! connections for that purpose.

pub mod error;
pub mod importer;
pub mod schemas;
pub mod store;

pub use error::LakeError;
pub use importer::{ArchiveCrossword, ImportOutcome, ImportSummary};

use duckdb::Connection;
use xw_config::StoreConfig;

/// Local `DuckDB` database holding the corpus.
pub struct CorpusLake {
    conn: Connection,
}

impl CorpusLake {
    /// Open the database named by `config`, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the file cannot be opened or schema creation fails.
    pub fn open(config: &StoreConfig) -> Result<Self, LakeError> {
        if config.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open_local(&config.db_path)
        }
    }

    /// Open or create a local `DuckDB` file.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the file cannot be opened or schema creation fails.
    pub fn open_local(path: &str) -> Result<Self, LakeError> {
        let conn = Connection::open(path)?;
        let lake = Self { conn };
        lake.init_schema()?;
        tracing::debug!(path, "opened corpus lake");
        Ok(lake)
    }

    /// Open an in-memory lake (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if schema creation fails.
    pub fn open_in_memory() -> Result<Self, LakeError> {
        let conn = Connection::open_in_memory()?;
        let lake = Self { conn };
        lake.init_schema()?;
        Ok(lake)
    }

    /// Access the underlying `DuckDB` connection.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// A new connection to the same database, for use on another thread.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if the connection cannot be cloned.
    pub fn connection(&self) -> Result<Connection, LakeError> {
        Ok(self.conn.try_clone()?)
    }

    fn init_schema(&self) -> Result<(), LakeError> {
        self.conn.execute_batch(schemas::CREATE_CROSSWORDS)?;
        self.conn.execute_batch(schemas::CREATE_ENTRIES)?;
        self.conn.execute_batch(schemas::CREATE_INDEXES)?;
        Ok(())
    }
}
