use super::*;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

#[test]
fn test_new_registry_is_empty() {
    let registry = TemplateRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.names().is_empty());
}

#[test]
fn test_default_templates_exist() {
    let registry = TemplateRegistry::with_defaults();

    assert!(registry.contains("ORDER_DETAIL"));
    assert!(registry.contains("USER_SUMMARY"));
    assert!(registry.contains("SETTINGS_INFO"));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_register_and_get() {
    let registry = TemplateRegistry::with_defaults();
    registry.register("TEST_TEMPLATE", "Hello {{name}}!").unwrap();

    assert!(registry.contains("TEST_TEMPLATE"));
    assert_eq!(registry.get("TEST_TEMPLATE").unwrap(), "Hello {{name}}!");
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_register_replaces_existing_template() {
    let registry = TemplateRegistry::new();
    registry.register("T", "first").unwrap();
    registry.register("T", "second").unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("T").unwrap(), "second");
}

#[test]
fn test_register_rejects_blank_names() {
    let registry = TemplateRegistry::new();

    assert!(matches!(
        registry.register("", "content"),
        Err(Error::InvalidTemplateName(_))
    ));
    assert!(matches!(
        registry.register("   ", "content"),
        Err(Error::InvalidTemplateName(_))
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_get_missing_template() {
    let registry = TemplateRegistry::new();

    match registry.get("NON_EXISTENT") {
        Err(Error::TemplateNotFound(name)) => assert_eq!(name, "NON_EXISTENT"),
        other => panic!("Expected TemplateNotFound, got {other:?}"),
    }
}

#[test]
fn test_remove_template() {
    let registry = TemplateRegistry::new();
    registry.register("TEMP", "content").unwrap();

    assert!(registry.remove("TEMP"));
    assert!(!registry.contains("TEMP"));
    assert!(!registry.remove("TEMP"));
}

#[test]
fn test_names_are_sorted() {
    let registry = TemplateRegistry::with_defaults();
    let names: Vec<String> = registry.names().into_iter().collect();

    assert_eq!(names, vec!["ORDER_DETAIL", "SETTINGS_INFO", "USER_SUMMARY"]);
}

#[test]
fn test_load_directory_registers_template_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("greeting.hbs"), "Hi {{name}}").unwrap();
    fs::write(temp_dir.path().join("farewell.mustache"), "Bye {{name}}").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a template").unwrap();
    fs::create_dir(temp_dir.path().join("nested")).unwrap();
    fs::write(temp_dir.path().join("nested").join("deep.hbs"), "ignored").unwrap();

    let registry = TemplateRegistry::new();
    let loaded = registry.load_directory(temp_dir.path()).unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(registry.get("greeting").unwrap(), "Hi {{name}}");
    assert_eq!(registry.get("farewell").unwrap(), "Bye {{name}}");
    assert!(!registry.contains("notes"));
    assert!(!registry.contains("deep"));
}

#[test]
fn test_load_directory_rejects_invalid_utf8() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("broken.hbs"), [0xff, 0xfe, 0xfd]).unwrap();

    let registry = TemplateRegistry::new();
    let result = registry.load_directory(temp_dir.path());

    assert!(matches!(result, Err(Error::InvalidUtf8(_))));
}

#[test]
fn test_load_missing_directory_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let registry = TemplateRegistry::new();

    let result = registry.load_directory(&temp_dir.path().join("does-not-exist"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_concurrent_reads_and_writes() {
    let registry = Arc::new(TemplateRegistry::with_defaults());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.register(format!("T{i}"), "{{value}}").unwrap();
                assert!(registry.get("ORDER_DETAIL").is_ok());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 11);
}
