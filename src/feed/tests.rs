use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

use super::*;
use crate::bus::RefreshInstruction;

#[derive(Serialize)]
struct Person {
    name: &'static str,
    age: u32,
}

#[test]
fn test_text_rows_keep_source_order() {
    let feed = FeedBridge::new("list", || vec!["first", "second", "third"], TextRenderer::new());

    let response = feed.on_request().unwrap();

    assert_eq!(response.content_type, "application/json");
    assert_eq!(response.body, r#"["first","second","third"]"#);
}

#[test]
fn test_empty_source_is_empty_array() {
    let feed = FeedBridge::new("list", Vec::<String>::new, TextRenderer::new());
    assert_eq!(feed.on_request().unwrap().body, "[]");
}

#[test]
fn test_json_renderer_serializes_rows() {
    let feed = FeedBridge::new(
        "people",
        || {
            vec![
                Person { name: "Ada", age: 36 },
                Person { name: "Alan", age: 41 },
            ]
        },
        JsonRenderer::new(),
    );

    let rows = feed.render_rows().unwrap();
    assert_eq!(
        rows,
        vec![json!({"name": "Ada", "age": 36}), json!({"name": "Alan", "age": 41})]
    );
}

#[test]
fn test_template_renderer_keys_by_token() {
    let renderer = TemplateRenderer::new(|p: &Person| format!("<b>{}</b>", p.name));
    let token = renderer.token().to_string();
    assert!(token.starts_with("widgetwire-template-"));
    assert_eq!(renderer.template_token(), Some(token.as_str()));

    let element = renderer.render(&Person { name: "Ada", age: 36 }).unwrap();
    let mut expected = serde_json::Map::new();
    expected.insert(token.clone(), json!("<b>Ada</b>"));
    assert_eq!(element, serde_json::Value::Object(expected));

    assert_eq!(renderer.markup(), format!("#= data['{token}'] #"));
    assert!(renderer
        .script_block()
        .starts_with(&format!("<script id=\"{token}\" type=\"text/x-kendo-template\">")));
}

#[test]
fn test_template_tokens_are_unique_per_template() {
    let a = TemplateRenderer::new(|s: &String| s.clone());
    let b = TemplateRenderer::new(|s: &String| s.clone());
    assert_ne!(a.token(), b.token());
}

#[test]
fn test_rows_are_read_on_every_request() {
    let rows = Arc::new(Mutex::new(vec![1]));
    let source = {
        let rows = Arc::clone(&rows);
        move || rows.lock().map(|r| r.clone()).unwrap_or_default()
    };
    let feed = FeedBridge::new("list", source, TextRenderer::new());

    assert_eq!(feed.on_request().unwrap().body, r#"["1"]"#);
    rows.lock().unwrap().push(2);
    assert_eq!(feed.on_request().unwrap().body, r#"["1","2"]"#);
}

#[test]
fn test_refresh_and_reload() {
    let feed = FeedBridge::new("list", Vec::<u8>::new, TextRenderer::new());
    assert_eq!(
        feed.refresh_statement(),
        "var $w = jQuery('#list').data('kendoListView'); if ($w) { $w.dataSource.read(); }"
    );

    let mut target = RequestTarget::new();
    feed.refresh(&mut target);
    feed.reload(&mut target);
    assert_eq!(
        target.instructions(),
        &[
            RefreshInstruction::Script(feed.refresh_statement()),
            RefreshInstruction::Component(WidgetId::new("list")),
        ]
    );
}

#[test]
fn test_init_statement_points_at_feed_url() {
    let config = BridgeConfig::default();
    let template = TemplateRenderer::new(|n: &u8| n.to_string());
    let token = template.token().to_string();
    let feed = FeedBridge::new("list", Vec::<u8>::new, template).with_page_size(20);

    let statement = feed.init_statement(&config);

    assert!(statement.starts_with("jQuery(function() { jQuery('#list').kendoListView({ dataSource: { transport: { read: { url: '/widgetwire/feed?endpoint="));
    assert!(statement.contains("dataType: 'json' } }, pageSize: 20 }, autoBind: true"));
    assert!(statement.contains(&format!("template: kendo.template(jQuery('#{token}').html())")));
    assert_eq!(feed.feed_url(&config), format!("/widgetwire/feed?endpoint={}", feed.id()));
}
