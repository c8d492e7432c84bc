use forumsift_rs::map_fxn::{is_edited, DataProcessor, EditedFilter};
use forumsift_rs::table::Table;
use serde_json::json;

use super::column;

#[test]
fn test_is_edited_values() {
    assert!(!is_edited(&json!(false)));
    assert!(!is_edited(&json!(0)));
    assert!(!is_edited(&json!(0.0)));
    assert!(!is_edited(&json!("false")));
    assert!(!is_edited(&json!("False")));
    assert!(!is_edited(&json!("0")));
    assert!(!is_edited(&json!(null)));
    assert!(!is_edited(&json!("not a time")));

    assert!(is_edited(&json!(true)));
    assert!(is_edited(&json!("true")));
    assert!(is_edited(&json!(1600000000)));
    assert!(is_edited(&json!("123456")));
    assert!(is_edited(&json!(1600000000.5)));
}

#[test]
fn test_edited_filter_mixed_column() {
    // edited = [False, 0, "false", "123456", True] keeps the last two rows
    let table = Table::from_records(vec![
        json!({"id": 1, "edited": false}),
        json!({"id": 2, "edited": 0}),
        json!({"id": 3, "edited": "false"}),
        json!({"id": 4, "edited": "123456"}),
        json!({"id": 5, "edited": true}),
    ]);
    let filter = EditedFilter::new(&json!({})).unwrap();
    let out = filter.process(&table);
    assert_eq!(column(&out, "id"), vec![json!(4), json!(5)]);
}

#[test]
fn test_edited_filter_missing_column_is_noop() {
    let table = Table::from_records(vec![json!({"id": 1}), json!({"id": 2})]);
    let filter = EditedFilter::new(&json!({})).unwrap();
    assert_eq!(filter.process(&table), table);
}

#[test]
fn test_edited_filter_custom_field() {
    let table = Table::from_records(vec![
        json!({"id": 1, "changed_at": 0}),
        json!({"id": 2, "changed_at": 99}),
    ]);
    let filter = EditedFilter::new(&json!({"edited_field": "changed_at"})).unwrap();
    assert_eq!(column(&filter.process(&table), "id"), vec![json!(2)]);
}
