//! # xw-core
//!
//! Core types shared by every xword crate:
//! - Crossword and entry records as stored in the corpus
//! - The resolved-entry projection used by text analyses
//! - Direction and crossword-type enums
//! - The immutable in-memory [`Corpus`] with its exact-match indexes
//! - Cross-cutting error types

pub mod corpus;
pub mod entities;
pub mod enums;
pub mod errors;

pub use corpus::Corpus;
pub use entities::{Crossword, Entry, Position, ResolvedEntry};
pub use enums::{CrosswordType, Direction};
pub use errors::CoreError;
