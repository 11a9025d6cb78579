//! # Error Types: Structured Error Hierarchy
//!
//! Umbrella error for the catalog schema pipeline. Component crates define
//! their own precise `thiserror` enums; [`CatalogError`] lets a caller hold
//! any of them behind one type without depending on every crate.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Top-level error type for the catalog backend.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The attribute schema could not be parsed.
    #[error("attribute schema parse error: {0}")]
    SchemaParse(String),

    /// A parsed schema uses a field type outside the supported set.
    #[error("unsupported attribute schema: {0}")]
    UnsupportedSchema(String),

    /// Code generation from a parsed schema failed.
    #[error("code generation error: {0}")]
    Codegen(String),

    /// A write request failed validation.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// A request body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FieldErrors> for CatalogError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
