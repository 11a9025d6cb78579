//! # Supported-Type Policy
//!
//! A parsed schema may still name field types the catalog cannot store or
//! generate code for. This module checks every property's `type` against
//! the supported primitive set ([`PrimitiveType::ALL`]).
//!
//! Unlike the parser, the policy does not stop at the first failing branch:
//! each branch is checked on its own and reports its first unsupported
//! field, so a write-path caller can list every broken branch in a single
//! response.

use std::fmt;

use thiserror::Error;

use crate::model::{FieldInfo, Fields, PrimitiveType, SchemaInformation};

/// A property whose `type` is outside the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeSupportViolation {
    /// Found in the top-level properties.
    #[error("unsupported field type '{field_type}' for field '{field_name}'")]
    Fields {
        /// Property name.
        field_name: String,
        /// Offending type keyword (empty when absent).
        field_type: String,
    },

    /// Found in a `oneOf` branch.
    #[error("oneOf[{index}]: unsupported field type '{field_type}' for field '{field_name}'")]
    Branch {
        /// Zero-based branch index.
        index: usize,
        /// Property name.
        field_name: String,
        /// Offending type keyword (empty when absent).
        field_type: String,
    },
}

impl TypeSupportViolation {
    fn new(branch: Option<usize>, field: &FieldInfo) -> Self {
        let field_name = field.field_name.clone();
        let field_type = field.field_type.clone();
        match branch {
            Some(index) => Self::Branch {
                index,
                field_name,
                field_type,
            },
            None => Self::Fields {
                field_name,
                field_type,
            },
        }
    }

    /// Branch index, or `None` for the top-level properties.
    pub fn branch(&self) -> Option<usize> {
        match self {
            Self::Fields { .. } => None,
            Self::Branch { index, .. } => Some(*index),
        }
    }

    /// Name of the offending property.
    pub fn field_name(&self) -> &str {
        match self {
            Self::Fields { field_name, .. } | Self::Branch { field_name, .. } => field_name,
        }
    }

    /// The unsupported type keyword.
    pub fn field_type(&self) -> &str {
        match self {
            Self::Fields { field_type, .. } | Self::Branch { field_type, .. } => field_type,
        }
    }
}

/// All violations found in one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSupportViolations {
    violations: Vec<TypeSupportViolation>,
}

impl TypeSupportViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[TypeSupportViolation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<TypeSupportViolation> {
        self.violations
    }
}

impl fmt::Display for TypeSupportViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TypeSupportViolations {}

/// First property of `fields` with an unsupported type.
pub fn first_unsupported(fields: &Fields) -> Option<&FieldInfo> {
    fields.properties.iter().find(|p| p.primitive().is_none())
}

/// Returns true if `field_type` is one of the supported keywords.
pub fn is_supported_type(field_type: &str) -> bool {
    PrimitiveType::from_schema_type(field_type).is_some()
}

/// Check the active branch set of `info`, one violation per failing branch.
pub fn check_supported_types(info: &SchemaInformation) -> TypeSupportViolations {
    let violations = info
        .branches()
        .into_iter()
        .filter_map(|(branch, fields)| {
            first_unsupported(fields).map(|field| TypeSupportViolation::new(branch, field))
        })
        .collect();
    TypeSupportViolations { violations }
}

/// Like [`check_supported_types`], as a `Result`.
///
/// # Errors
///
/// Returns every violation when at least one branch fails.
pub fn ensure_supported_types(info: &SchemaInformation) -> Result<(), TypeSupportViolations> {
    let violations = check_supported_types(info);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::extract;

    #[test]
    fn all_supported_types_pass() {
        let info = extract(
            br#"{"type":"object","title":"T","properties":{
                "a":{"type":"string"},"b":{"type":"int"},"c":{"type":"integer"},
                "d":{"type":"double"},"e":{"type":"float"},"f":{"type":"number"}}}"#,
        )
        .unwrap();
        assert!(check_supported_types(&info).is_empty());
        assert!(ensure_supported_types(&info).is_ok());
    }

    #[test]
    fn reports_first_unsupported_field_only() {
        let info = extract(
            br#"{"type":"object","title":"T","properties":{
                "ok":{"type":"string"},"flag":{"type":"boolean"},"tags":{"type":"array"}}}"#,
        )
        .unwrap();
        let violations = check_supported_types(&info);
        assert_eq!(
            violations.violations(),
            &[TypeSupportViolation::Fields {
                field_name: "flag".into(),
                field_type: "boolean".into()
            }]
        );
    }

    #[test]
    fn missing_type_is_unsupported() {
        let info = extract(br#"{"type":"object","title":"T","properties":{"a":{}}}"#).unwrap();
        let violations = check_supported_types(&info);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.violations()[0].field_type(), "");
    }

    #[test]
    fn one_violation_per_failing_branch() {
        let info = extract(
            br#"{"type":"object","title":"T","oneOf":[
                {"properties":{"a":{"type":"boolean"},"b":{"type":"object"}}},
                {"properties":{"c":{"type":"string"}}},
                {"properties":{"d":{"type":"array"}}}]}"#,
        )
        .unwrap();
        let err = ensure_supported_types(&info).unwrap_err();
        let branches: Vec<Option<usize>> = err.violations().iter().map(|v| v.branch()).collect();
        assert_eq!(branches, vec![Some(0), Some(2)]);
        assert_eq!(err.violations()[0].field_name(), "a");
        assert_eq!(err.violations()[1].field_name(), "d");
        assert_eq!(
            err.violations()[1].to_string(),
            "oneOf[2]: unsupported field type 'array' for field 'd'"
        );
    }

    #[test]
    fn top_level_fields_ignored_when_one_of_present() {
        let mut info = extract(
            br#"{"type":"object","title":"T","oneOf":[{"properties":{"c":{"type":"string"}}}]}"#,
        )
        .unwrap();
        info.fields.properties.push(FieldInfo {
            field_name: "x".into(),
            field_type: "boolean".into(),
            ..FieldInfo::default()
        });
        assert!(check_supported_types(&info).is_empty());
    }

    #[test]
    fn supported_keyword_check() {
        assert!(is_supported_type("number"));
        assert!(!is_supported_type("Number"));
        assert!(!is_supported_type("boolean"));
    }

    #[test]
    fn violations_display_one_per_line() {
        let violations = TypeSupportViolations {
            violations: vec![
                TypeSupportViolation::Branch {
                    index: 0,
                    field_name: "a".into(),
                    field_type: "boolean".into(),
                },
                TypeSupportViolation::Branch {
                    index: 1,
                    field_name: "b".into(),
                    field_type: "".into(),
                },
            ],
        };
        let rendered = violations.to_string();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("oneOf[1]: unsupported field type '' for field 'b'"));
    }
}
