//! # Attribute Schema Model
//!
//! Typed result of parsing an attribute schema. Values are built once by
//! [`extract`](crate::parse::extract) and never mutated afterwards; the
//! owning category keeps only the raw bytes and re-parses on demand.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Parsed attribute schema of a category.
///
/// Exactly one branch set is active: the top-level [`fields`](Self::fields)
/// when `one_of` is empty, otherwise the `one_of` branches. A schema with a
/// `oneOf` keyword leaves `fields` empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInformation {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Fields,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Fields>,
}

impl SchemaInformation {
    /// Returns true when the schema declares `oneOf` branches.
    pub fn has_one_of(&self) -> bool {
        !self.one_of.is_empty()
    }

    /// The active branch set, each paired with its `oneOf` index (`None`
    /// for the top-level fields).
    pub fn branches(&self) -> Vec<(Option<usize>, &Fields)> {
        if self.has_one_of() {
            self.one_of.iter().enumerate().map(|(i, f)| (Some(i), f)).collect()
        } else {
            vec![(None, &self.fields)]
        }
    }
}

/// One flat property set with its required names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fields {
    pub required_fields: Vec<String>,
    pub properties: Vec<FieldInfo>,
}

impl Fields {
    /// Returns true if `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required_fields.iter().any(|r| r == name)
    }

    /// Looks up a property by its original name.
    pub fn property(&self, name: &str) -> Option<&FieldInfo> {
        self.properties.iter().find(|p| p.field_name == name)
    }
}

/// A single attribute declared under `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub field_name: String,
    /// Raw `type` keyword; empty when the property omits it.
    pub field_type: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl FieldInfo {
    /// The supported primitive this field maps to, if any.
    pub fn primitive(&self) -> Option<PrimitiveType> {
        PrimitiveType::from_schema_type(&self.field_type)
    }
}

/// Field types an attribute schema may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Int,
    Integer,
    Double,
    Float,
    Number,
}

impl PrimitiveType {
    /// Every supported type, in declaration order.
    pub const ALL: [PrimitiveType; 6] = [
        PrimitiveType::String,
        PrimitiveType::Int,
        PrimitiveType::Integer,
        PrimitiveType::Double,
        PrimitiveType::Float,
        PrimitiveType::Number,
    ];

    /// Maps a schema `type` keyword to a supported primitive.
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_schema_type(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "integer" => Some(Self::Integer),
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            "number" => Some(Self::Number),
            _ => None,
        }
    }

    /// The schema keyword for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Float => "float",
            Self::Number => "number",
        }
    }

    /// Returns true for the integer and floating-point kinds.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::String)
    }

    /// Rust type used for generated fields of this kind.
    pub fn rust_type(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int | Self::Integer => "i64",
            Self::Double | Self::Float | Self::Number => "f64",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
