//! # Category Subcommand
//!
//! Validates a category create/update payload the way the write path does
//! and prints the collected field errors as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use catalog_core::{CatalogError, FieldErrors};
use catalog_schema::parse_category;

use crate::read_input;

/// Arguments for the category subcommand.
#[derive(Args, Debug)]
pub struct CategoryArgs {
    /// Path to the category payload JSON file.
    pub payload: PathBuf,
}

/// Response body listing every violation by field.
pub fn render_errors(errors: &FieldErrors) -> Result<String> {
    serde_json::to_string_pretty(&json!({ "errors": errors }))
        .context("cannot serialize validation errors")
}

/// Execute the category subcommand.
pub fn run_category(args: &CategoryArgs) -> Result<u8> {
    let data = read_input(&args.payload)?;
    match parse_category(&data) {
        Ok(_) => {
            tracing::info!(path = %args.payload.display(), "category is valid");
            println!("OK    {}", args.payload.display());
            Ok(0)
        }
        Err(CatalogError::Serialization(e)) => {
            eprintln!("{}: malformed category payload: {e}", args.payload.display());
            Ok(1)
        }
        Err(CatalogError::Validation(errors)) => {
            println!("{}", render_errors(&errors)?);
            Ok(1)
        }
        Err(e) => Err(e).context("category validation failed"),
    }
}
