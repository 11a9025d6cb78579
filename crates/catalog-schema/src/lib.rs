//! # catalog-schema: Attribute Schema Pipeline
//!
//! Every catalog category may carry an *attribute schema*: a JSON-Schema
//! subset describing the extra attributes valid for products in that
//! category (CPU type for phones, battery capacity for vacuums, ...).
//!
//! ```text
//! raw bytes ──► parse::extract ──► SchemaInformation ─┬─► validate (write path)
//!                                                     └─► codegen  (offline tool)
//! ```
//!
//! ## Modules
//!
//! - [`parse`]: fail-closed extraction of [`SchemaInformation`] from bytes.
//! - [`validate`]: supported-type policy, one violation per failing branch.
//! - [`codegen`]: declaration model and Rust source rendering.
//! - [`category`]: category create/update validation with accumulated
//!   field errors.
//! - [`model`]: the parsed data model.
//!
//! ## Crate Policy
//!
//! - Depends only on `catalog-core` internally.
//! - Parsing and validation are pure; the only side effect in the crate is
//!   [`codegen::generate`]'s single file write.
//! - Every call is independent; nothing is cached between calls.

pub mod category;
pub mod codegen;
pub mod model;
pub mod parse;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use category::{ensure_valid_category, parse_category, validate_category, Category};
pub use codegen::{build_module, generate, CodegenError, Constraint, FieldDecl, ModuleDecl, TypeDecl};
pub use model::{FieldInfo, Fields, PrimitiveType, SchemaInformation};
pub use parse::{extract, SchemaParseError};
pub use validate::{
    check_supported_types, ensure_supported_types, TypeSupportViolation, TypeSupportViolations,
};

use catalog_core::CatalogError;

impl From<SchemaParseError> for CatalogError {
    fn from(e: SchemaParseError) -> Self {
        CatalogError::SchemaParse(e.to_string())
    }
}

impl From<TypeSupportViolations> for CatalogError {
    fn from(e: TypeSupportViolations) -> Self {
        let messages: Vec<String> = e.violations().iter().map(|v| v.to_string()).collect();
        CatalogError::UnsupportedSchema(messages.join("; "))
    }
}

impl From<CodegenError> for CatalogError {
    fn from(e: CodegenError) -> Self {
        CatalogError::Codegen(e.to_string())
    }
}
