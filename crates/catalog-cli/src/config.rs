//! # Tool Configuration
//!
//! Optional YAML file passed with `--config`. Command-line flags override
//! whatever the file sets.
//!
//! ```yaml
//! output_dir: generated
//! package: category
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default module name for generated bindings.
pub const DEFAULT_PACKAGE: &str = "attributes";

/// Settings for the `generate` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GeneratorConfig {
    /// Directory generated files are written to.
    pub output_dir: PathBuf,
    /// Module name the generated types are declared in.
    pub package: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, output_dir: Option<PathBuf>, package: Option<String>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if let Some(package) = package {
            self.package = package;
        }
        self
    }
}
