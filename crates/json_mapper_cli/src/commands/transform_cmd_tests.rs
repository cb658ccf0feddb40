//! Tests for the transform command.

use super::*;
use serde_json::json;
use std::io::Cursor;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

fn write_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("json-mapper.toml");
    fs::write(
        &path,
        r#"
include_builtin_templates = false

[templates]
GREETING = "Hello {{name}}"
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_read_json_parses_document() {
    let value = read_json("inline", Cursor::new(r#"{"a": [1, 2]}"#)).unwrap();
    assert_eq!(value, json!({"a": [1, 2]}));
}

#[test]
fn test_read_json_reports_label_on_parse_failure() {
    let result = read_json("broken.json", Cursor::new("{oops"));

    match result {
        Err(Error::ParseJson { path, .. }) => assert_eq!(path, "broken.json"),
        other => panic!("Expected ParseJson error, got {:?}", other),
    }
}

#[test]
fn test_read_json_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    let result = read_json_file(&temp_dir.path().join("absent.json"));

    let err = result.unwrap_err();
    assert!(matches!(err, Error::ReadInput { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_transform_to_string_pretty_and_compact() {
    let mapper = StructureMapper::new();
    let source = json!({"settings": {"theme": "dark"}});
    let mapping = json!({"theme": {"mapperType": "COPY", "jsonPath": "$.settings.theme"}});

    let pretty = transform_to_string(&mapper, &source, &mapping, false).unwrap();
    assert_eq!(pretty, "{\n  \"theme\": \"dark\"\n}");

    let compact = transform_to_string(&mapper, &source, &mapping, true).unwrap();
    assert_eq!(compact, r#"{"theme":"dark"}"#);
}

#[test]
fn test_transform_to_string_surfaces_mapping_errors() {
    let mapper = StructureMapper::new();
    let mapping = json!({"x": {"mapperType": "TRANSFORM", "jsonPath": "$"}});

    let err = transform_to_string(&mapper, &json!({}), &mapping, false).unwrap_err();
    assert!(matches!(
        err,
        Error::Mapping(json_mapper_core::Error::NotImplemented(_))
    ));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_execute_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_json(&temp_dir, "source.json", &json!({"user": {"name": "Jo"}}));
    let mapping = write_json(
        &temp_dir,
        "mapping.json",
        &json!({
            "client": {
                "greeting": {"mapperType": "MUSTACHE", "templateName": "GREETING", "jsonPath": "$.user"},
                "raw": {"mapperType": "COPY", "jsonPath": "$.user.name"}
            }
        }),
    );
    let output = temp_dir.path().join("out.json");

    let args = TransformArgs {
        source: source.display().to_string(),
        mapping,
        config: Some(write_config(&temp_dir)),
        output: Some(output.clone()),
        compact: true,
    };
    execute(&args).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "{\"client\":{\"greeting\":\"Hello Jo\",\"raw\":\"Jo\"}}\n"
    );
}

#[test]
fn test_execute_with_unknown_template_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_json(&temp_dir, "source.json", &json!({"user": {}}));
    let mapping = write_json(
        &temp_dir,
        "mapping.json",
        &json!({"x": {"mapperType": "MUSTACHE", "templateName": "ORDER_DETAIL", "jsonPath": "$.user"}}),
    );

    let args = TransformArgs {
        source: source.display().to_string(),
        mapping,
        config: Some(write_config(&temp_dir)),
        output: Some(temp_dir.path().join("out.json")),
        compact: false,
    };

    let err = execute(&args).unwrap_err();
    assert!(matches!(
        err,
        Error::Mapping(json_mapper_core::Error::TemplateNotFound(_))
    ));
    assert!(!temp_dir.path().join("out.json").exists());
}

#[test]
fn test_execute_rejects_mapping_from_stdin() {
    let args = TransformArgs {
        source: "source.json".to_string(),
        mapping: PathBuf::from("-"),
        config: None,
        output: None,
        compact: false,
    };

    let err = execute(&args).unwrap_err();
    assert!(matches!(err, Error::InvalidArguments(_)));
    assert_eq!(err.exit_code(), 2);
}
