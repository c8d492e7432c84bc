use anyhow::{anyhow, Error, Result};
use forumsift_rs::map_fxn::{
    normalize_language_code, DataProcessor, LanguageDetector, LanguageFilter, WhatlangDetector,
};
use forumsift_rs::table::Table;
use serde_json::json;

use super::column;

// Deterministic stand-in for a real detector
#[derive(Debug)]
struct KeywordDetector;

impl LanguageDetector for KeywordDetector {
    fn detect(&self, text: &str) -> Result<String, Error> {
        if text.contains("bonjour") {
            Ok(String::from("fra"))
        } else if text.contains("???") {
            Err(anyhow!("no features"))
        } else {
            Ok(String::from("eng"))
        }
    }
}

fn records() -> Table {
    Table::from_records(vec![
        json!({"id": 1, "body": "hello there"}),
        json!({"id": 2, "body": "bonjour tout le monde"}),
        json!({"id": 3, "body": null}),
        json!({"id": 4, "body": "   "}),
        json!({"id": 5, "body": "???"}),
    ])
}

#[test]
fn test_normalize_language_code() {
    assert_eq!(normalize_language_code("eng"), "en");
    assert_eq!(normalize_language_code("EN"), "en");
    assert_eq!(normalize_language_code(" fra "), "fr");
    assert_eq!(normalize_language_code("xyz"), "xyz");
}

#[test]
fn test_language_filter_with_stub_detector() {
    let filter = LanguageFilter::with_detector(&json!({"target_language": "en"}), Box::new(KeywordDetector)).unwrap();
    assert_eq!(column(&filter.process(&records()), "id"), vec![json!(1)]);

    let filter = LanguageFilter::with_detector(&json!({"target_language": "fr"}), Box::new(KeywordDetector)).unwrap();
    assert_eq!(column(&filter.process(&records()), "id"), vec![json!(2)]);
}

#[test]
fn test_language_filter_three_letter_target() {
    let filter = LanguageFilter::with_detector(&json!({"target_language": "eng"}), Box::new(KeywordDetector)).unwrap();
    assert_eq!(filter.target_language, "en");
    assert!(filter.is_target_language("hello there"));
    assert!(!filter.is_target_language(""));
}

#[test]
fn test_language_filter_missing_column_is_noop() {
    let table = Table::from_records(vec![json!({"title": "bonjour"})]);
    let filter = LanguageFilter::with_detector(&json!({}), Box::new(KeywordDetector)).unwrap();
    assert_eq!(filter.process(&table), table);
}

#[test]
fn test_language_filter_empty_target_rejected() {
    assert!(LanguageFilter::with_detector(&json!({"target_language": ""}), Box::new(KeywordDetector)).is_err());
}

#[test]
fn test_whatlang_detector() {
    let detector = WhatlangDetector;
    let english = "My daughter has been refusing to go to sleep at night and we are running out of ideas.";
    let french = "Ma fille refuse de dormir la nuit et nous ne savons plus quoi faire pour l'aider.";
    assert_eq!(normalize_language_code(&detector.detect(english).unwrap()), "en");
    assert_eq!(normalize_language_code(&detector.detect(french).unwrap()), "fr");

    let filter = LanguageFilter::new(&json!({"text_field": "body", "target_language": "en"})).unwrap();
    let table = Table::from_records(vec![json!({"body": english}), json!({"body": french})]);
    assert_eq!(column(&filter.process(&table), "body"), vec![json!(english)]);
}
