//! # Category Write Validation
//!
//! Validation of category create/update requests. The attribute schema is
//! stored as the raw JSON text the client sent; it is parsed here only to
//! check it and re-parsed whenever a consumer needs the structured form.
//!
//! All violations are collected into a [`FieldErrors`] so one response can
//! list them together.

use catalog_core::{CatalogError, FieldErrors};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::model::SchemaInformation;
use crate::parse::{extract, SchemaParseError};
use crate::validate::check_supported_types;

/// Longest accepted `category_name`, in bytes.
pub const MAX_CATEGORY_NAME_BYTES: usize = 50;

/// Accepted `language` codes.
pub const SUPPORTED_LANGUAGES: &[&str] = &["tj", "ru", "en"];

/// Request field that carries the attribute schema.
pub const ATTRIBUTE_SCHEMA_FIELD: &str = "attribute_schema";

/// A category as received on the write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub category_name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub language: String,
    /// Attribute schema exactly as sent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_schema: Option<Box<RawValue>>,
}

impl Category {
    /// Raw bytes of the attribute schema; empty when absent.
    pub fn attribute_schema_bytes(&self) -> &[u8] {
        self.attribute_schema
            .as_deref()
            .map(|raw| raw.get().as_bytes())
            .unwrap_or_default()
    }

    /// Parse the stored attribute schema, `None` when the category has none.
    ///
    /// # Errors
    ///
    /// Returns the parser's error for a malformed schema.
    pub fn attribute_info(&self) -> Result<Option<SchemaInformation>, SchemaParseError> {
        let bytes = self.attribute_schema_bytes();
        if bytes.is_empty() {
            return Ok(None);
        }
        extract(bytes).map(Some)
    }
}

/// Record every violation of `category` into `errors`.
pub fn validate_category(errors: &mut FieldErrors, category: &Category) {
    errors.check(
        !category.category_name.is_empty(),
        "category_name",
        "must be provided",
    );
    errors.check(
        category.category_name.len() <= MAX_CATEGORY_NAME_BYTES,
        "category_name",
        format!("must not be more than {MAX_CATEGORY_NAME_BYTES} bytes long"),
    );
    errors.check(
        SUPPORTED_LANGUAGES.contains(&category.language.as_str()),
        "language",
        format!("must be one of {}", SUPPORTED_LANGUAGES.join(", ")),
    );

    match category.attribute_info() {
        Ok(Some(info)) => validate_attribute_schema(errors, &info),
        Ok(None) => {}
        Err(e) => {
            tracing::debug!(error = %e, "rejecting category attribute schema");
            errors.add_error(
                ATTRIBUTE_SCHEMA_FIELD,
                format!("failed to extract information: {e}"),
            );
        }
    }
}

/// Record one error per branch that uses an unsupported field type.
pub fn validate_attribute_schema(errors: &mut FieldErrors, info: &SchemaInformation) {
    for violation in check_supported_types(info).violations() {
        let message = match violation.branch() {
            Some(index) => format!(
                "failed to validate fields for oneOf[{index}]: unsupported field type '{}' for field '{}'",
                violation.field_type(),
                violation.field_name()
            ),
            None => format!(
                "failed to validate fields: unsupported field type '{}' for field '{}'",
                violation.field_type(),
                violation.field_name()
            ),
        };
        errors.add_error(ATTRIBUTE_SCHEMA_FIELD, message);
    }
}

/// Validate `category`, returning the collected errors when invalid.
///
/// # Errors
///
/// Returns the non-empty [`FieldErrors`] when any check fails.
pub fn ensure_valid_category(category: &Category) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    validate_category(&mut errors, category);
    if errors.is_valid() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Decode a category request body and validate it.
///
/// # Errors
///
/// [`CatalogError::Serialization`] when the body is not a category object,
/// [`CatalogError::Validation`] carrying every violation otherwise.
pub fn parse_category(data: &[u8]) -> Result<Category, CatalogError> {
    let category: Category = serde_json::from_slice(data)?;
    ensure_valid_category(&category)?;
    Ok(category)
}
