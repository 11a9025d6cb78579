//! # catalog-cli: Attribute Schema Tooling
//!
//! Provides the `catalog` command-line interface over attribute-schema
//! files. It is an offline tool; the request-serving path uses
//! `catalog-schema` directly.
//!
//! ## Subcommands
//!
//! - `catalog inspect`: Parse a schema and print the extracted model.
//! - `catalog check`: Parse and apply the supported-type policy.
//! - `catalog generate`: Generate typed Rust bindings from a schema.
//! - `catalog category`: Validate a category create/update payload.
//!
//! ```bash
//! catalog check schemas/smartphones.schema.json
//! catalog --config catalog.yaml generate schemas/vacuums.schema.json
//! ```
//!
//! Handlers return the process exit code: `0` on success, `1` when the
//! input was rejected. Unexpected failures propagate as `anyhow` errors.

pub mod category;
pub mod check;
pub mod config;
pub mod generate;
pub mod inspect;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a schema or payload file into memory.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}
