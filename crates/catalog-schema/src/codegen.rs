//! # Attribute Type Generation
//!
//! Turns a parsed attribute schema into Rust source for typed bindings:
//! one serde-derived struct for the top-level properties and one
//! `<Title>VariantN` struct per `oneOf` branch.
//!
//! Generation is split in two steps:
//!
//! 1. [`build_module`] maps the schema onto a declaration model
//!    ([`ModuleDecl`] → [`TypeDecl`] → [`FieldDecl`]). All naming and
//!    type-support checks happen here.
//! 2. [`ModuleDecl::render`] formats the model into source text in one pass.
//!
//! [`generate`] runs both and writes the result with a single write, so an
//! unsupported type never leaves a file behind.
//!
//! Each field carries the original attribute name as its serde key and a
//! `binding:` doc line listing its constraints in a fixed order:
//! `required`, `min`/`max` from the length bounds, `min`/`max` from the
//! value bounds, then `oneof`.
//!
//! Type and field names are the transliterated schema names in upper camel
//! case (`"цвет кузова"` becomes `TsvetKuzova`). A name that leaves nothing,
//! maps onto a reserved identifier, or collides with a sibling field is an
//! error rather than source that would not compile.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use catalog_core::transliterate;
use thiserror::Error;

use crate::model::{FieldInfo, Fields, PrimitiveType, SchemaInformation};

/// Error during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A property type outside the supported set.
    #[error("unsupported field type '{field_type}' for field '{field_name}'")]
    UnsupportedFieldType {
        /// Property name as written in the schema.
        field_name: String,
        /// Offending type keyword.
        field_type: String,
    },

    /// A failure inside a `oneOf` branch.
    #[error("oneOf[{index}]: {source}")]
    InOneOf {
        /// Zero-based branch index.
        index: usize,
        /// Failure inside the branch.
        source: Box<CodegenError>,
    },

    /// A title or property name has nothing left after transliteration.
    #[error("{what} '{name}' produces an empty identifier")]
    EmptyIdentifier {
        /// `"title"` or `"field"`.
        what: &'static str,
        /// The name as written.
        name: String,
    },

    /// A name maps onto an identifier the generated module cannot declare.
    #[error("{what} '{name}' maps to the reserved identifier '{ident}'")]
    ReservedIdentifier {
        /// `"title"`, `"field"` or `"package"`.
        what: &'static str,
        /// The name as written.
        name: String,
        /// The identifier it maps to.
        ident: String,
    },

    /// Two properties of one type map to the same field identifier.
    #[error("fields '{first}' and '{second}' of {type_name} both map to '{ident}'")]
    DuplicateField {
        /// Generated type holding both fields.
        type_name: String,
        /// Shared field identifier.
        ident: String,
        /// Earlier property name.
        first: String,
        /// Later property name.
        second: String,
    },

    /// The requested module name is not a Rust identifier.
    #[error("package '{package}' is not a valid module name")]
    InvalidPackage {
        /// The requested name.
        package: String,
    },

    /// The output file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target file.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl CodegenError {
    /// The innermost error, looking through `oneOf` wrappers.
    pub fn root_cause(&self) -> &CodegenError {
        match self {
            Self::InOneOf { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A single validation constraint attached to a generated field.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The field is listed in `required`.
    Required,
    /// `minLength`.
    MinLength(i64),
    /// `maxLength`.
    MaxLength(i64),
    /// `minimum`, rendered without fractional digits.
    Minimum(f64),
    /// `maximum`, rendered without fractional digits.
    Maximum(f64),
    /// `enum` values.
    OneOf(Vec<String>),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::MinLength(n) => write!(f, "min={n}"),
            Self::MaxLength(n) => write!(f, "max={n}"),
            Self::Minimum(n) => write!(f, "min={n:.0}"),
            Self::Maximum(n) => write!(f, "max={n:.0}"),
            Self::OneOf(values) => write!(f, "oneof={}", values.join(" ")),
        }
    }
}

/// A generated struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Rust field identifier (transliterated, capitalized).
    pub ident: String,
    /// Field type.
    pub ty: PrimitiveType,
    /// Serialization key: the attribute name as written in the schema.
    pub serde_key: String,
    /// Property description, if any.
    pub description: Option<String>,
    /// Constraints in rendering order.
    pub constraints: Vec<Constraint>,
}

impl FieldDecl {
    /// The `binding:` tag value, or `None` without constraints.
    pub fn binding(&self) -> Option<String> {
        if self.constraints.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
        Some(parts.join(","))
    }
}

/// A generated struct.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    /// Module the types are declared in, `r#`-escaped if a keyword.
    pub package: String,
    /// Schema title the module was generated from.
    pub title: String,
    /// Primary type first, then one type per `oneOf` branch.
    pub types: Vec<TypeDecl>,
}

impl ModuleDecl {
    /// Name of the primary type, also the file stem.
    pub fn primary_name(&self) -> &str {
        self.types.first().map(|t| t.name.as_str()).unwrap_or_default()
    }

    /// Output file name: `<PrimaryType>.rs`.
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.primary_name())
    }

    /// Render the module as Rust source.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            "// Code generated from the {:?} attribute schema. DO NOT EDIT.",
            self.title
        )?;
        writeln!(out)?;
        writeln!(out, "pub mod {} {{", self.package)?;
        writeln!(out, "    use serde::{{Deserialize, Serialize}};")?;
        for ty in &self.types {
            writeln!(out)?;
            render_type(out, ty)?;
        }
        writeln!(out, "}}")
    }
}

fn render_type(out: &mut String, ty: &TypeDecl) -> fmt::Result {
    writeln!(out, "    #[allow(non_snake_case)]")?;
    writeln!(
        out,
        "    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]"
    )?;
    if ty.fields.is_empty() {
        return writeln!(out, "    pub struct {} {{}}", ty.name);
    }
    writeln!(out, "    pub struct {} {{", ty.name)?;
    for field in &ty.fields {
        if let Some(description) = &field.description {
            writeln!(out, "        /// {}", single_line(description))?;
        }
        if let Some(binding) = field.binding() {
            writeln!(out, "        /// binding: {}", single_line(&binding))?;
        }
        writeln!(out, "        #[serde(rename = {:?})]", field.serde_key)?;
        writeln!(out, "        pub {}: {},", field.ident, field.ty.rust_type())?;
    }
    writeln!(out, "    }}")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rust keywords, including reserved ones, that `r#` can escape.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const UNESCAPABLE: &[&str] = &["_", "crate", "self", "Self", "super"];

/// Names the generated module already uses for its own items.
const MODULE_NAMES: &[&str] = &["Deserialize", "Serialize", "String"];

/// Transliterated name as an upper-camel-case identifier.
///
/// Every run of characters outside `[A-Za-z0-9]` separates words; each
/// word gets its first letter uppercased. A leading digit is prefixed with
/// `_`. Returns an empty string when nothing identifier-safe remains.
pub fn pascal_case(name: &str) -> String {
    let latin = transliterate(name);
    let mut ident = String::with_capacity(latin.len());
    for word in latin.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            ident.push(first.to_ascii_uppercase());
            ident.push_str(chars.as_str());
        }
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Field identifier for a property name.
pub fn field_ident(field_name: &str) -> String {
    pascal_case(field_name)
}

/// Name of the primary type generated for `info`.
pub fn type_name(info: &SchemaInformation) -> String {
    pascal_case(&info.title)
}

fn checked_ident(what: &'static str, name: &str, ident: String) -> Result<String, CodegenError> {
    if ident.is_empty() {
        return Err(CodegenError::EmptyIdentifier {
            what,
            name: name.to_string(),
        });
    }
    if UNESCAPABLE.contains(&ident.as_str()) || MODULE_NAMES.contains(&ident.as_str()) {
        return Err(CodegenError::ReservedIdentifier {
            what,
            name: name.to_string(),
            ident,
        });
    }
    Ok(ident)
}

/// Module name as written, `r#`-escaped when it is a keyword.
fn package_ident(package: &str) -> Result<String, CodegenError> {
    let mut chars = package.chars();
    let well_formed = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !well_formed {
        return Err(CodegenError::InvalidPackage {
            package: package.to_string(),
        });
    }
    if UNESCAPABLE.contains(&package) {
        return Err(CodegenError::ReservedIdentifier {
            what: "package",
            name: package.to_string(),
            ident: package.to_string(),
        });
    }
    if KEYWORDS.contains(&package) {
        return Ok(format!("r#{package}"));
    }
    Ok(package.to_string())
}

fn field_decl(fields: &Fields, field: &FieldInfo) -> Result<FieldDecl, CodegenError> {
    let ty = field
        .primitive()
        .ok_or_else(|| CodegenError::UnsupportedFieldType {
            field_name: field.field_name.clone(),
            field_type: field.field_type.clone(),
        })?;

    let mut constraints = Vec::new();
    if fields.is_required(&field.field_name) {
        constraints.push(Constraint::Required);
    }
    if let Some(n) = field.min_length {
        constraints.push(Constraint::MinLength(n));
    }
    if let Some(n) = field.max_length.filter(|n| *n != 0) {
        constraints.push(Constraint::MaxLength(n));
    }
    if let Some(n) = field.minimum {
        constraints.push(Constraint::Minimum(n));
    }
    if let Some(n) = field.maximum.filter(|n| *n != 0.0) {
        constraints.push(Constraint::Maximum(n));
    }
    if let Some(values) = field.enum_values.as_ref().filter(|v| !v.is_empty()) {
        constraints.push(Constraint::OneOf(values.clone()));
    }

    Ok(FieldDecl {
        ident: checked_ident("field", &field.field_name, field_ident(&field.field_name))?,
        ty,
        serde_key: field.field_name.clone(),
        description: field.description.clone(),
        constraints,
    })
}

fn type_decl(name: String, fields: &Fields) -> Result<TypeDecl, CodegenError> {
    let mut decls: Vec<FieldDecl> = Vec::with_capacity(fields.properties.len());
    for field in &fields.properties {
        let decl = field_decl(fields, field)?;
        if let Some(earlier) = decls.iter().find(|d| d.ident == decl.ident) {
            return Err(CodegenError::DuplicateField {
                type_name: name,
                ident: decl.ident,
                first: earlier.serde_key.clone(),
                second: decl.serde_key,
            });
        }
        decls.push(decl);
    }
    Ok(TypeDecl {
        name,
        fields: decls,
    })
}

/// Build the declaration model for `info` inside module `package`.
///
/// # Errors
///
/// Returns [`CodegenError::UnsupportedFieldType`] for the first property
/// with a type outside the supported set (wrapped with the branch index
/// for `oneOf` branches). Names that leave no identifier, map to a
/// reserved one, or collide within a type are rejected as well.
pub fn build_module(package: &str, info: &SchemaInformation) -> Result<ModuleDecl, CodegenError> {
    let package = package_ident(package)?;
    let base = checked_ident("title", &info.title, type_name(info))?;

    let mut types = Vec::with_capacity(1 + info.one_of.len());
    types.push(type_decl(base.clone(), &info.fields)?);
    for (index, branch) in info.one_of.iter().enumerate() {
        let name = format!("{base}Variant{}", index + 1);
        let decl = type_decl(name, branch).map_err(|e| CodegenError::InOneOf {
            index,
            source: Box::new(e),
        })?;
        types.push(decl);
    }

    Ok(ModuleDecl {
        package,
        title: info.title.clone(),
        types,
    })
}

/// Generate bindings for `info` into `output_dir/<Title>.rs`.
///
/// The whole file is rendered in memory and written once. Returns the path
/// of the written file.
///
/// # Errors
///
/// Any [`build_module`] error aborts before touching the filesystem;
/// a failed write is reported as [`CodegenError::Io`].
pub fn generate(
    output_dir: impl AsRef<Path>,
    package: &str,
    info: &SchemaInformation,
) -> Result<PathBuf, CodegenError> {
    let module = build_module(package, info)?;
    let path = output_dir.as_ref().join(module.file_name());
    let source = module.render();

    std::fs::write(&path, source).map_err(|e| CodegenError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::debug!(
        path = %path.display(),
        types = module.types.len(),
        "generated attribute bindings"
    );
    Ok(path)
}
