use super::*;

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

#[test]
fn test_configuration_error_display() {
    let error = Error::Configuration("client.orders: unknown mapperType 'FOO'".to_string());
    assert_eq!(
        error.to_string(),
        "Configuration error: client.orders: unknown mapperType 'FOO'"
    );
}

#[test]
fn test_template_not_found_error_display() {
    let error = Error::TemplateNotFound("ORDER_DETAIL".to_string());
    assert_eq!(error.to_string(), "Template not found: ORDER_DETAIL");
}

#[test]
fn test_not_implemented_error_display() {
    let error = Error::NotImplemented("TRANSFORM mapper".to_string());
    assert_eq!(error.to_string(), "Not implemented: TRANSFORM mapper");
}

#[test]
fn test_render_error_keeps_source() {
    let error = Error::Render {
        template: "GREETING".to_string(),
        source: template_engine::RenderError::RenderError {
            message: "boom".to_string(),
        },
    };

    assert_eq!(
        error.to_string(),
        "Failed to render template 'GREETING': Template rendering failed: boom"
    );
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_store_not_found_converts_to_template_not_found() {
    let error: Error = template_engine::Error::TemplateNotFound("X".to_string()).into();
    assert!(matches!(error, Error::TemplateNotFound(name) if name == "X"));
}

#[test]
fn test_other_store_errors_are_wrapped() {
    let error: Error = template_engine::Error::InvalidTemplateName(String::new()).into();
    assert!(matches!(error, Error::TemplateStore(_)));
}

#[test]
fn test_json_error_conversion() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: Error = parse_error.into();
    assert!(error.to_string().starts_with("JSON error:"));
}
