use super::*;
use serde_json::json;

#[test]
fn test_templates_without_sections_are_borrowed() {
    let template = "Hi {{name}} {{#if flag}}x{{/if}}";
    assert!(matches!(to_handlebars("Hi {{name}}"), Cow::Borrowed(_)));
    assert_eq!(to_handlebars(template), template);
}

#[test]
fn test_section_is_rewritten_to_each() {
    assert_eq!(
        to_handlebars("{{#items}}{{name}};{{/items}}"),
        "{{#each (__mustache_section items this)}}{{name}};{{/each}}"
    );
}

#[test]
fn test_inverted_section_is_rewritten() {
    assert_eq!(
        to_handlebars("{{^flag}}no{{/flag}}"),
        "{{#each (__mustache_inverted flag this)}}no{{/each}}"
    );
}

#[test]
fn test_handlebars_blocks_pass_through() {
    let template = "{{#each tags}}{{this}}{{/each}}{{#if a}}x{{else}}y{{/if}}";
    assert_eq!(to_handlebars(template), template);
}

#[test]
fn test_sections_nest_inside_handlebars_blocks() {
    assert_eq!(
        to_handlebars("{{#if a}}{{#user}}{{name}}{{/user}}{{/if}}"),
        "{{#if a}}{{#each (__mustache_section user this)}}{{name}}{{/each}}{{/if}}"
    );
}

#[test]
fn test_dot_becomes_this() {
    assert_eq!(
        to_handlebars("{{#tags}}{{.}},{{{.}}}{{/tags}}"),
        "{{#each (__mustache_section tags this)}}{{this}},{{{this}}}{{/each}}"
    );
}

#[test]
fn test_whitespace_control_is_kept() {
    assert_eq!(
        to_handlebars("{{~#items~}}x{{~/items~}}"),
        "{{~#each (__mustache_section items this)~}}x{{~/each~}}"
    );
}

#[test]
fn test_unclosed_tag_is_left_for_the_compiler() {
    assert_eq!(
        to_handlebars("{{#items}}x {{oops"),
        "{{#each (__mustache_section items this)}}x {{oops"
    );
}

#[test]
fn test_truthiness() {
    for falsy in [json!(null), json!(false), json!(0), json!(""), json!([])] {
        assert!(!is_truthy(&falsy), "{falsy} should be falsy");
    }
    for truthy in [json!(true), json!(1.5), json!("x"), json!([0]), json!({})] {
        assert!(is_truthy(&truthy), "{truthy} should be truthy");
    }
}

#[test]
fn test_section_items_layers_objects_over_scope() {
    let scope = json!({"currency": "EUR", "name": "outer"});

    assert_eq!(
        section_items(&json!([{"name": "a"}, 3]), &scope),
        json!([{"currency": "EUR", "name": "a"}, 3])
    );
    assert_eq!(
        section_items(&json!({"name": "inner"}), &scope),
        json!([{"currency": "EUR", "name": "inner"}])
    );
    assert_eq!(section_items(&json!(true), &scope), json!([scope.clone()]));
    assert_eq!(section_items(&json!(false), &scope), json!([]));
}

#[test]
fn test_inverted_items() {
    let scope = json!({"a": 1});
    assert_eq!(inverted_items(&json!(null), &scope), json!([{"a": 1}]));
    assert_eq!(inverted_items(&json!([1]), &scope), json!([]));
}
