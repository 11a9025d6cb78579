//! # Attribute Schema Parsing
//!
//! Extracts a [`SchemaInformation`] from the raw bytes of a category's
//! attribute schema, a JSON-Schema subset:
//!
//! - the top level must be `"type": "object"` with a string `title`;
//! - attributes are scalar `properties` with optional `required`;
//! - alternatively one level of `oneOf`, each branch a flat property set.
//!
//! The document is decoded once into a [`serde_json::Value`] and every step
//! matches on the expected variant. Parsing fails closed: the first
//! violation aborts with a [`SchemaParseError`] and no partial result is
//! ever returned.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{FieldInfo, Fields, PrimitiveType, SchemaInformation};

/// Error while extracting an attribute schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaParseError {
    /// The input buffer is empty.
    #[error("schema is empty")]
    EmptySchema,

    /// The input is not a JSON object.
    #[error("invalid JSON: {reason}")]
    InvalidJson {
        /// Decoder message or the kind of value found instead.
        reason: String,
    },

    /// The top-level `type` keyword is absent.
    #[error("type is not defined")]
    MissingType,

    /// The top-level `type` is not the string `"object"`.
    #[error("type must be 'object', found {found}")]
    InvalidType {
        /// Rendering of the offending value.
        found: String,
    },

    /// The top-level `title` keyword is absent.
    #[error("title should be provided")]
    MissingTitle,

    /// `title` is not a string.
    #[error("title should be string, found {found}")]
    InvalidTitle {
        /// Kind of value found.
        found: &'static str,
    },

    /// `description` is present but not a string.
    #[error("description should be string, found {found}")]
    InvalidDescription {
        /// Kind of value found.
        found: &'static str,
    },

    /// `oneOf` is not an array of objects.
    #[error("invalid oneOf: {reason}")]
    InvalidOneOf {
        /// What is wrong with the shape.
        reason: String,
    },

    /// A `oneOf` branch failed; wraps the branch's own error.
    #[error("oneOf[{index}]: {source}")]
    InOneOf {
        /// Zero-based branch index.
        index: usize,
        /// Failure inside the branch.
        source: Box<SchemaParseError>,
    },

    /// `required` is not an array of non-empty strings.
    #[error("invalid required: {reason}")]
    InvalidRequired {
        /// What is wrong with the shape.
        reason: String,
    },

    /// `properties` or one of its entries has the wrong shape.
    #[error("invalid properties: {reason}")]
    InvalidProperties {
        /// What is wrong with the shape.
        reason: String,
    },

    /// A property's `type` is present but not a string.
    #[error("property '{field}': type must be a string, found {found}")]
    InvalidPropertyType {
        /// Property name.
        field: String,
        /// Kind of value found.
        found: &'static str,
    },

    /// A property's `default` does not match its declared type.
    #[error("property '{field}': default value for {field_type} must be a {expected}")]
    InvalidDefault {
        /// Property name.
        field: String,
        /// Declared type keyword.
        field_type: String,
        /// Kind of JSON value the default must be.
        expected: &'static str,
    },

    /// A numeric bound keyword is not a JSON number.
    #[error("property '{field}': {bound} must be a number, found {found}")]
    InvalidBound {
        /// Property name.
        field: String,
        /// Bound keyword (`minLength`, `maxLength`, `minimum`, `maximum`).
        bound: &'static str,
        /// Kind of value found.
        found: &'static str,
    },

    /// A property's `description` is not a string.
    #[error("property '{field}': description must be a string, found {found}")]
    InvalidPropertyDescription {
        /// Property name.
        field: String,
        /// Kind of value found.
        found: &'static str,
    },

    /// A property's `enum` is not a non-empty array of non-empty strings.
    #[error("property '{field}': invalid enum: {reason}")]
    InvalidEnum {
        /// Property name.
        field: String,
        /// What is wrong with the shape.
        reason: String,
    },

    /// A name listed in `required` has no matching property.
    #[error("required field '{field}' is not defined in properties")]
    MissingRequiredProperty {
        /// The dangling required name.
        field: String,
    },

    /// `required` is non-empty but no properties are defined.
    #[error("schema must define at least the required properties")]
    EmptySchemaDefinition,
}

impl SchemaParseError {
    /// The innermost error, looking through `oneOf` wrappers.
    pub fn root_cause(&self) -> &SchemaParseError {
        match self {
            Self::InOneOf { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Index of the failing `oneOf` branch, if the error came from one.
    pub fn branch_index(&self) -> Option<usize> {
        match self {
            Self::InOneOf { index, .. } => Some(*index),
            _ => None,
        }
    }

    fn in_branch(index: usize, source: SchemaParseError) -> Self {
        Self::InOneOf {
            index,
            source: Box::new(source),
        }
    }
}

/// Human name of a JSON value's kind, used in error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse raw attribute-schema bytes.
///
/// Checks run in a fixed order and the first failure is returned:
/// emptiness, JSON object shape, `type`, `title`, `description`, then the
/// branch set (`oneOf` when present, the top level otherwise). Without
/// `oneOf`, every `required` name must be defined under `properties`;
/// `oneOf` branches are shape-checked only.
///
/// # Errors
///
/// Returns the [`SchemaParseError`] describing the first violation.
/// Failures inside a `oneOf` branch are wrapped in
/// [`SchemaParseError::InOneOf`] with the branch index.
pub fn extract(data: &[u8]) -> Result<SchemaInformation, SchemaParseError> {
    if data.is_empty() {
        return Err(SchemaParseError::EmptySchema);
    }

    let value: Value =
        serde_json::from_slice(data).map_err(|e| SchemaParseError::InvalidJson {
            reason: e.to_string(),
        })?;
    let schema = match value {
        Value::Object(schema) => schema,
        other => {
            return Err(SchemaParseError::InvalidJson {
                reason: format!("expected an object, found {}", kind_of(&other)),
            })
        }
    };

    match schema.get("type") {
        None => return Err(SchemaParseError::MissingType),
        Some(Value::String(t)) if t == "object" => {}
        Some(other) => {
            return Err(SchemaParseError::InvalidType {
                found: other.to_string(),
            })
        }
    }

    let title = match schema.get("title") {
        None => return Err(SchemaParseError::MissingTitle),
        Some(Value::String(t)) => t.clone(),
        Some(other) => {
            return Err(SchemaParseError::InvalidTitle {
                found: kind_of(other),
            })
        }
    };

    let description = match schema.get("description") {
        None => None,
        Some(Value::String(d)) => Some(d.clone()),
        Some(other) => {
            return Err(SchemaParseError::InvalidDescription {
                found: kind_of(other),
            })
        }
    };

    let mut info = SchemaInformation {
        title,
        description,
        fields: Fields::default(),
        one_of: Vec::new(),
    };

    match schema.get("oneOf") {
        Some(one_of) => {
            info.one_of = extract_one_of(one_of)?;
        }
        None => {
            let fields = extract_fields(&schema)?;
            check_required_fields(&fields)?;
            info.fields = fields;
        }
    }

    tracing::debug!(
        title = %info.title,
        properties = info.fields.properties.len(),
        branches = info.one_of.len(),
        "attribute schema extracted"
    );

    Ok(info)
}

fn extract_one_of(value: &Value) -> Result<Vec<Fields>, SchemaParseError> {
    let Value::Array(elements) = value else {
        return Err(SchemaParseError::InvalidOneOf {
            reason: format!("oneOf should be an array, found {}", kind_of(value)),
        });
    };

    let mut branches = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let Value::Object(branch) = element else {
            return Err(SchemaParseError::InvalidOneOf {
                reason: format!(
                    "elements of oneOf should be objects, element {index} is {}",
                    kind_of(element)
                ),
            });
        };
        let fields =
            extract_fields(branch).map_err(|e| SchemaParseError::in_branch(index, e))?;
        tracing::trace!(index, properties = fields.properties.len(), "oneOf branch extracted");
        branches.push(fields);
    }
    Ok(branches)
}

/// Reads `required` and `properties` of one branch.
fn extract_fields(schema: &Map<String, Value>) -> Result<Fields, SchemaParseError> {
    let mut fields = Fields::default();

    if let Some(required) = schema.get("required") {
        fields.required_fields = extract_required(required)?;
    }

    if let Some(properties) = schema.get("properties") {
        let Value::Object(properties) = properties else {
            return Err(SchemaParseError::InvalidProperties {
                reason: format!("properties must be an object, found {}", kind_of(properties)),
            });
        };
        fields.properties.reserve(properties.len());
        for (name, property) in properties {
            fields.properties.push(extract_property(name, property)?);
        }
    }

    Ok(fields)
}

fn extract_required(value: &Value) -> Result<Vec<String>, SchemaParseError> {
    let Value::Array(items) = value else {
        return Err(SchemaParseError::InvalidRequired {
            reason: format!("required must be an array, found {}", kind_of(value)),
        });
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) if s.is_empty() => Err(SchemaParseError::InvalidRequired {
                reason: "required element cannot be empty".to_string(),
            }),
            Value::String(s) => Ok(s.clone()),
            other => Err(SchemaParseError::InvalidRequired {
                reason: format!("required element must be a string, found {}", kind_of(other)),
            }),
        })
        .collect()
}

fn extract_property(name: &str, value: &Value) -> Result<FieldInfo, SchemaParseError> {
    if name.is_empty() {
        return Err(SchemaParseError::InvalidProperties {
            reason: "property name cannot be empty".to_string(),
        });
    }
    let Value::Object(property) = value else {
        return Err(SchemaParseError::InvalidProperties {
            reason: format!("property '{name}' must be an object, found {}", kind_of(value)),
        });
    };

    let mut info = FieldInfo {
        field_name: name.to_string(),
        ..FieldInfo::default()
    };

    match property.get("type") {
        None => {}
        Some(Value::String(t)) => info.field_type = t.clone(),
        Some(other) => {
            return Err(SchemaParseError::InvalidPropertyType {
                field: name.to_string(),
                found: kind_of(other),
            })
        }
    }

    if let Some(default) = property.get("default") {
        check_default(name, &info.field_type, default)?;
        info.default = Some(default.clone());
    }

    info.min_length = number_bound(name, property, "minLength")?.map(|n| n as i64);
    info.max_length = number_bound(name, property, "maxLength")?.map(|n| n as i64);
    info.minimum = number_bound(name, property, "minimum")?;
    info.maximum = number_bound(name, property, "maximum")?;

    match property.get("description") {
        None => {}
        Some(Value::String(d)) => info.description = Some(d.clone()),
        Some(other) => {
            return Err(SchemaParseError::InvalidPropertyDescription {
                field: name.to_string(),
                found: kind_of(other),
            })
        }
    }

    if let Some(values) = property.get("enum") {
        info.enum_values = Some(extract_enum(name, values)?);
    }

    Ok(info)
}

/// Only recognized string and numeric types constrain the default.
fn check_default(field: &str, field_type: &str, default: &Value) -> Result<(), SchemaParseError> {
    let Some(primitive) = PrimitiveType::from_schema_type(field_type) else {
        return Ok(());
    };
    let (ok, expected) = if primitive.is_numeric() {
        (default.is_number(), "number")
    } else {
        (default.is_string(), "string")
    };
    if ok {
        Ok(())
    } else {
        Err(SchemaParseError::InvalidDefault {
            field: field.to_string(),
            field_type: field_type.to_string(),
            expected,
        })
    }
}

fn number_bound(
    field: &str,
    property: &Map<String, Value>,
    bound: &'static str,
) -> Result<Option<f64>, SchemaParseError> {
    match property.get(bound) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(SchemaParseError::InvalidBound {
            field: field.to_string(),
            bound,
            found: kind_of(other),
        }),
    }
}

fn extract_enum(field: &str, value: &Value) -> Result<Vec<String>, SchemaParseError> {
    let invalid = |reason: String| SchemaParseError::InvalidEnum {
        field: field.to_string(),
        reason,
    };

    let Value::Array(items) = value else {
        return Err(invalid(format!("enum must be an array, found {}", kind_of(value))));
    };
    if items.is_empty() {
        return Err(invalid("enum must not be empty".to_string()));
    }

    items
        .iter()
        .map(|item| match item {
            Value::String(s) if s.is_empty() => {
                Err(invalid("enum element cannot be empty".to_string()))
            }
            Value::String(s) => Ok(s.clone()),
            other => Err(invalid(format!(
                "enum element must be a string, found {}",
                kind_of(other)
            ))),
        })
        .collect()
}

/// Every top-level `required` name must be a top-level property. Not
/// applied to `oneOf` branches.
fn check_required_fields(fields: &Fields) -> Result<(), SchemaParseError> {
    if fields.properties.is_empty() && !fields.required_fields.is_empty() {
        return Err(SchemaParseError::EmptySchemaDefinition);
    }
    match fields
        .required_fields
        .iter()
        .find(|name| fields.property(name).is_none())
    {
        Some(missing) => Err(SchemaParseError::MissingRequiredProperty {
            field: missing.clone(),
        }),
        None => Ok(()),
    }
}
