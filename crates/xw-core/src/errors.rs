//! Cross-cutting error types.
//!
//! Storage and reporting errors (`LakeError`, `ReportError`) live in their own
//! crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any xword crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record lookup returned no result.
    #[error("Record not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (unknown enum value, dangling reference, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
