//! # catalog-core: Foundational Types for the Catalog Backend
//!
//! Leaf crate of the workspace. Everything here is pure and synchronous:
//!
//! 1. **Transliteration.** [`transliterate`] rewrites Cyrillic (and the four
//!    Tajik-specific letters) into Latin text so category titles and
//!    attribute names can be used as generated type, field, and file names.
//!    ASCII input comes back untouched.
//!
//! 2. **Field-error accumulation.** [`FieldErrors`] collects every
//!    `(field, message)` violation of a write request so the caller can
//!    answer with one response listing all of them.
//!
//! 3. **Error hierarchy.** [`CatalogError`] is the umbrella error for callers
//!    that want a single type across the schema pipeline.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `catalog-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod translit;
pub mod validation;

pub use error::CatalogError;
pub use translit::{contains_cyrillic, is_cyrillic, transliterate};
pub use validation::{FieldError, FieldErrors};
