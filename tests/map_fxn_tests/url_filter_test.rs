use forumsift_rs::map_fxn::{is_url_only, replace_urls_with_token, DataProcessor, UrlOnlyFilter, UrlTokenModifier};
use forumsift_rs::table::Table;
use serde_json::json;

use super::column;

#[test]
fn test_is_url_only() {
    assert!(is_url_only("https://example.com"));
    assert!(is_url_only("  http://example.com/a?b=c  "));
    assert!(is_url_only("www.example.com/path"));
    assert!(is_url_only("example.com"));
    assert!(is_url_only("(https://example.com)."));
    assert!(is_url_only("https://a.com www.b.org"));

    assert!(!is_url_only("Check out https://example.com"));
    assert!(!is_url_only("hello"));
    assert!(!is_url_only(""));
    assert!(!is_url_only("   "));
}

#[test]
fn test_replace_urls() {
    assert_eq!(
        replace_urls_with_token("Look at https://example.com/page now", "<URL>"),
        "Look at <URL> now"
    );
    assert_eq!(replace_urls_with_token("See www.example.com.", "<URL>"), "See <URL>.");
    assert_eq!(
        replace_urls_with_token("wiki https://en.wikipedia.org/wiki/Foo_(bar) ok", "<URL>"),
        "wiki <URL> ok"
    );
    assert_eq!(
        replace_urls_with_token("check https://example.com out", "<URL>"),
        "check <URL> out"
    );
    assert_eq!(replace_urls_with_token("no links here", "<URL>"), "no links here");
    // Replacement text is literal
    assert_eq!(replace_urls_with_token("go to http://x.io/a", "$1"), "go to $1");
}

#[test]
fn test_url_only_filter() {
    let table = Table::from_records(vec![
        json!({"id": 1, "body": "https://example.com"}),
        json!({"id": 2, "body": "Look at https://example.com/page now"}),
        json!({"id": 3, "body": null}),
        json!({"id": 4, "body": "www.example.com example.org"}),
    ]);
    let filter = UrlOnlyFilter::new(&json!({})).unwrap();
    let out = filter.process(&table);
    assert_eq!(column(&out, "id"), vec![json!(2), json!(3)]);
    assert_eq!(filter.process(&out), out);
}

#[test]
fn test_url_token_modifier() {
    let table = Table::from_records(vec![
        json!({"id": 1, "selftext": "Look at https://example.com/page now"}),
        json!({"id": 2, "selftext": null}),
        json!({"id": 3, "selftext": 42}),
        json!({"id": 4, "selftext": "plain text"}),
    ]);
    let modifier = UrlTokenModifier::new(&json!({"text_field": "selftext"})).unwrap();
    let out = modifier.process(&table);
    assert_eq!(out.len(), 4);
    assert_eq!(
        column(&out, "selftext"),
        vec![json!("Look at <URL> now"), json!(null), json!(42), json!("plain text")]
    );
    // input left alone
    assert_eq!(table.row(0).unwrap().get("selftext"), &json!("Look at https://example.com/page now"));
}

#[test]
fn test_url_token_modifier_custom_token() {
    let table = Table::from_records(vec![json!({"body": "see http://a.com"})]);
    let modifier = UrlTokenModifier::new(&json!({"token": "[link]"})).unwrap();
    assert_eq!(column(&modifier.process(&table), "body"), vec![json!("see [link]")]);
}

#[test]
fn test_url_stages_missing_column_are_noops() {
    let table = Table::from_records(vec![json!({"title": "https://example.com"})]);
    let filter = UrlOnlyFilter::new(&json!({})).unwrap();
    let modifier = UrlTokenModifier::new(&json!({})).unwrap();
    assert_eq!(filter.process(&table), table);
    assert_eq!(modifier.process(&table), table);
}
