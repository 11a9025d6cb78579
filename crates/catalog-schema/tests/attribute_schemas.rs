//! Integration test: run every fixture schema through the whole pipeline.
//!
//! Fixtures under `tests/fixtures/valid` must parse, pass the supported-type
//! policy, and generate bindings. Fixtures under `tests/fixtures/invalid`
//! must be rejected by the parser.

use std::path::{Path, PathBuf};

use catalog_schema::{
    build_module, check_supported_types, extract, generate, CodegenError, SchemaParseError,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// All `*.schema.json` files directly under `dir`, sorted.
fn schema_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("fixture directory readable")
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".schema.json"))
        })
        .collect();
    files.sort();
    files
}

fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

#[test]
fn test_valid_fixtures_pass_whole_pipeline() {
    let files = schema_files(&fixtures_dir().join("valid"));
    assert_eq!(files.len(), 4, "expected four valid fixtures");

    let out = tempfile::tempdir().unwrap();
    let mut failed = Vec::new();

    for path in &files {
        let result = extract(&read(path))
            .map_err(|e| format!("parse: {e}"))
            .and_then(|info| {
                let violations = check_supported_types(&info);
                if violations.is_empty() {
                    Ok(info)
                } else {
                    Err(format!("policy: {violations}"))
                }
            })
            .and_then(|info| generate(out.path(), "category", &info).map_err(|e| e.to_string()));

        if let Err(e) = result {
            failed.push(format!("{}: {e}", path.display()));
        }
    }

    assert!(failed.is_empty(), "fixtures failed:\n{}", failed.join("\n"));

    let mut generated: Vec<String> = std::fs::read_dir(out.path())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    generated.sort();
    assert_eq!(
        generated,
        vec!["Elektronika.rs", "Pylesosy.rs", "Smartfony.rs", "Test.rs"]
    );
}

#[test]
fn test_invalid_fixtures_rejected_by_parser() {
    let files = schema_files(&fixtures_dir().join("invalid"));
    assert!(!files.is_empty());

    for path in &files {
        let result = extract(&read(path));
        assert!(
            result.is_err(),
            "{} should have been rejected, parsed as {:?}",
            path.display(),
            result.ok()
        );
    }
}

#[test]
fn test_scenario_flat_schema() {
    let info = extract(&read(&fixtures_dir().join("valid/test.schema.json"))).unwrap();
    assert_eq!(info.title, "Test");
    assert_eq!(info.fields.properties.len(), 2);
    assert_eq!(info.fields.required_fields, vec!["f1", "f2"]);
}

#[test]
fn test_scenario_type_must_be_object() {
    let err = extract(&read(&fixtures_dir().join("invalid/string-type.schema.json"))).unwrap_err();
    assert!(matches!(err, SchemaParseError::InvalidType { .. }), "{err}");
}

#[test]
fn test_scenario_required_not_in_properties() {
    let err =
        extract(&read(&fixtures_dir().join("invalid/missing-required.schema.json"))).unwrap_err();
    assert_eq!(
        err,
        SchemaParseError::MissingRequiredProperty {
            field: "missing".into()
        }
    );
}

#[test]
fn test_scenario_bad_branch_is_attributed() {
    let err = extract(&read(&fixtures_dir().join("invalid/bad-branch.schema.json"))).unwrap_err();
    assert_eq!(err.branch_index(), Some(1));
    assert!(matches!(
        err.root_cause(),
        SchemaParseError::InvalidDefault { field, .. } if field == "мощность"
    ));
}

#[test]
fn test_scenario_one_of_generates_two_variants() {
    let info = extract(&read(&fixtures_dir().join("valid/vacuums.schema.json"))).unwrap();
    assert!(info.fields.properties.is_empty());
    assert_eq!(info.one_of.len(), 2);
    for branch in &info.one_of {
        for name in &branch.required_fields {
            assert!(branch.property(name).is_some(), "{name} missing from its branch");
        }
    }

    let module = build_module("category", &info).unwrap();
    let variants: Vec<&str> = module
        .types
        .iter()
        .skip(1)
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(variants, vec!["PylesosyVariant1", "PylesosyVariant2"]);
    assert!(module.types[0].fields.is_empty());

    let source = module.render();
    assert!(source.contains("/// binding: required,min=2000"));
    assert!(source.contains("#[serde(rename = \"мощность\")]"));
    assert!(source.contains("pub Moshchnost: i64,"));
}

#[test]
fn test_scenario_boolean_field_fails_generation() {
    let info = extract(&read(&fixtures_dir().join("unsupported-boolean.schema.json"))).unwrap();

    let violations = check_supported_types(&info);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.violations()[0].field_name(), "подсветка");

    let out = tempfile::tempdir().unwrap();
    let err = generate(out.path(), "category", &info).unwrap_err();
    match err {
        CodegenError::UnsupportedFieldType {
            field_name,
            field_type,
        } => {
            assert_eq!(field_name, "подсветка");
            assert_eq!(field_type, "boolean");
        }
        other => panic!("Expected UnsupportedFieldType, got: {other}"),
    }
    assert!(!out.path().join("Noutbuki.rs").exists());
}

#[test]
fn test_generator_type_closure() {
    let out = tempfile::tempdir().unwrap();
    for ty in ["string", "int", "integer", "double", "float", "number"] {
        let doc = format!(
            r#"{{"type":"object","title":"T","properties":{{"a":{{"type":"{ty}"}}}}}}"#
        );
        let info = extract(doc.as_bytes()).unwrap();
        assert!(generate(out.path(), "category", &info).is_ok(), "{ty}");
    }
    for ty in ["boolean", "array", "object", "null", "", "String", "long"] {
        let doc = format!(
            r#"{{"type":"object","title":"T","properties":{{"a":{{"type":"{ty}"}}}}}}"#
        );
        let info = extract(doc.as_bytes()).unwrap();
        assert!(
            matches!(
                build_module("category", &info),
                Err(CodegenError::UnsupportedFieldType { .. })
            ),
            "{ty}"
        );
    }
}
