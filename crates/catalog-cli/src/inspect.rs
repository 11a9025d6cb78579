//! # Inspect Subcommand
//!
//! Parses an attribute schema and prints the extracted model as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use catalog_schema::{extract, SchemaInformation};

use crate::read_input;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the attribute schema JSON file.
    pub schema: PathBuf,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Render a parsed model as JSON text.
pub fn render_model(info: &SchemaInformation, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(info)
    } else {
        serde_json::to_string_pretty(info)
    };
    rendered.context("cannot serialize schema model")
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let data = read_input(&args.schema)?;
    match extract(&data) {
        Ok(info) => {
            println!("{}", render_model(&info, args.compact)?);
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}: {e}", args.schema.display());
            Ok(1)
        }
    }
}
