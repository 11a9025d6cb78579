//! # Check Subcommand
//!
//! Parses one or more attribute schemas and applies the supported-type
//! policy. Every file is checked; the exit code is `1` if any fails.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use catalog_schema::{check_supported_types, extract, SchemaInformation};

use crate::read_input;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Attribute schema JSON files to check.
    #[arg(required = true)]
    pub schemas: Vec<PathBuf>,
}

/// Outcome of checking a single schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Schema parsed and every branch uses supported types.
    Passed {
        /// Number of active branches.
        branches: usize,
        /// Properties across all active branches.
        properties: usize,
    },
    /// Schema failed; one message per problem.
    Failed(Vec<String>),
}

/// Check schema bytes.
pub fn check_schema(data: &[u8]) -> CheckOutcome {
    let info = match extract(data) {
        Ok(info) => info,
        Err(e) => return CheckOutcome::Failed(vec![e.to_string()]),
    };

    let violations = check_supported_types(&info);
    if violations.is_empty() {
        CheckOutcome::Passed {
            branches: info.branches().len(),
            properties: count_properties(&info),
        }
    } else {
        CheckOutcome::Failed(violations.violations().iter().map(|v| v.to_string()).collect())
    }
}

fn count_properties(info: &SchemaInformation) -> usize {
    info.branches()
        .iter()
        .map(|(_, fields)| fields.properties.len())
        .sum()
}

fn check_file(path: &Path) -> Result<bool> {
    let data = read_input(path)?;
    match check_schema(&data) {
        CheckOutcome::Passed {
            branches,
            properties,
        } => {
            tracing::info!(path = %path.display(), "schema passed");
            println!(
                "OK    {} ({branches} branch(es), {properties} propert(ies))",
                path.display()
            );
            Ok(true)
        }
        CheckOutcome::Failed(messages) => {
            println!("FAIL  {}", path.display());
            for message in messages {
                println!("  {message}");
            }
            Ok(false)
        }
    }
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let mut failed = 0usize;
    for path in &args.schemas {
        if !check_file(path)? {
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} schema(s) failed", args.schemas.len());
        Ok(1)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_schema_counts() {
        let outcome = check_schema(
            br#"{"type":"object","title":"T","oneOf":[
                {"properties":{"a":{"type":"string"},"b":{"type":"number"}}},
                {"properties":{"c":{"type":"int"}}}]}"#,
        );
        assert_eq!(
            outcome,
            CheckOutcome::Passed {
                branches: 2,
                properties: 3
            }
        );
    }

    #[test]
    fn parse_failure_is_single_message() {
        let outcome = check_schema(br#"{"type":"object"}"#);
        assert_eq!(
            outcome,
            CheckOutcome::Failed(vec!["title should be provided".into()])
        );
    }

    #[test]
    fn every_failing_branch_listed() {
        let outcome = check_schema(
            br#"{"type":"object","title":"T","oneOf":[
                {"properties":{"a":{"type":"boolean"}}},
                {"properties":{"b":{"type":"array"}}}]}"#,
        );
        match outcome {
            CheckOutcome::Failed(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages[0].starts_with("oneOf[0]:"));
                assert!(messages[1].starts_with("oneOf[1]:"));
            }
            other => panic!("Expected Failed, got: {other:?}"),
        }
    }

    #[test]
    fn run_check_fails_if_any_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, br#"{"type":"object","title":"T"}"#).unwrap();
        std::fs::write(
            &bad,
            br#"{"type":"object","title":"T","properties":{"x":{"type":"boolean"}}}"#,
        )
        .unwrap();

        let args = CheckArgs {
            schemas: vec![good.clone()],
        };
        assert_eq!(run_check(&args).unwrap(), 0);

        let args = CheckArgs {
            schemas: vec![good, bad],
        };
        assert_eq!(run_check(&args).unwrap(), 1);
    }

    #[test]
    fn run_check_propagates_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = CheckArgs {
            schemas: vec![dir.path().join("absent.json")],
        };
        assert!(run_check(&args).is_err());
    }
}
