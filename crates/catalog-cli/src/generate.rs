//! # Generate Subcommand
//!
//! Generates typed Rust bindings from an attribute schema. The schema is
//! parsed and checked against the supported-type policy before anything is
//! written; the output is a single `<Title>.rs` file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use catalog_schema::{ensure_supported_types, extract, generate, CodegenError};

use crate::config::GeneratorConfig;
use crate::read_input;

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the attribute schema JSON file.
    pub schema: PathBuf,

    /// Directory to write the generated file into (created if missing).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Module name the generated types are declared in.
    #[arg(long)]
    pub package: Option<String>,
}

/// Execute the generate subcommand.
///
/// `config` is the optional `--config` file; flags on `args` override it.
pub fn run_generate(args: &GenerateArgs, config: Option<&Path>) -> Result<u8> {
    let config = GeneratorConfig::load_or_default(config)?
        .with_overrides(args.out_dir.clone(), args.package.clone());
    tracing::debug!(
        output_dir = %config.output_dir.display(),
        package = %config.package,
        "generator configuration"
    );

    let data = read_input(&args.schema)?;
    let info = match extract(&data) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("{}: {e}", args.schema.display());
            return Ok(1);
        }
    };

    if let Err(violations) = ensure_supported_types(&info) {
        eprintln!("{}: unsupported field types:\n{violations}", args.schema.display());
        return Ok(1);
    }

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            config.output_dir.display()
        )
    })?;

    match generate(&config.output_dir, &config.package, &info) {
        Ok(path) => {
            println!("{}", path.display());
            Ok(0)
        }
        Err(e @ CodegenError::Io { .. }) => Err(e).context("cannot write generated bindings"),
        Err(e) => {
            eprintln!("{}: {e}", args.schema.display());
            Ok(1)
        }
    }
}
