use forumsift_rs::map_fxn::{DataProcessor, DedupFilter};
use forumsift_rs::table::Table;
use serde_json::json;

use super::column;

fn records() -> Table {
    Table::from_records(vec![
        json!({"id": "a", "author": "x", "n": 1}),
        json!({"id": "b", "author": "x", "n": 2}),
        json!({"id": "a", "author": "y", "n": 3}),
        json!({"id": "c", "author": "y", "n": 4}),
        json!({"id": "a", "author": "x", "n": 5}),
    ])
}

#[test]
fn test_dedup_defaults() {
    let filter = DedupFilter::new(&json!({})).unwrap();
    assert_eq!(filter.subset, vec!["id"]);
    assert_eq!(filter.keep, "first");
}

#[test]
fn test_dedup_keep_first() {
    let filter = DedupFilter::new(&json!({"subset": ["id"], "keep": "first"})).unwrap();
    let out = filter.process(&records());
    assert_eq!(column(&out, "n"), vec![json!(1), json!(2), json!(4)]);
}

#[test]
fn test_dedup_keep_last() {
    let filter = DedupFilter::new(&json!({"subset": ["id"], "keep": "last"})).unwrap();
    let out = filter.process(&records());
    assert_eq!(column(&out, "n"), vec![json!(2), json!(4), json!(5)]);
}

#[test]
fn test_dedup_keep_none_drops_every_copy() {
    for keep in [json!("none"), json!(false)] {
        let filter = DedupFilter::new(&json!({"subset": ["id"], "keep": keep})).unwrap();
        let out = filter.process(&records());
        assert_eq!(column(&out, "n"), vec![json!(2), json!(4)]);
    }
}

#[test]
fn test_dedup_multi_column_key() {
    let filter = DedupFilter::new(&json!({"subset": ["id", "author"]})).unwrap();
    let out = filter.process(&records());
    assert_eq!(column(&out, "n"), vec![json!(1), json!(2), json!(3), json!(4)]);
}

#[test]
fn test_dedup_single_string_subset() {
    let filter = DedupFilter::new(&json!({"subset": "author"})).unwrap();
    let out = filter.process(&records());
    assert_eq!(column(&out, "n"), vec![json!(1), json!(3)]);
}

#[test]
fn test_dedup_is_idempotent() {
    let filter = DedupFilter::new(&json!({})).unwrap();
    let once = filter.process(&records());
    assert_eq!(filter.process(&once), once);
}

#[test]
fn test_dedup_missing_key_column_is_noop() {
    let filter = DedupFilter::new(&json!({"subset": ["id", "link_id"]})).unwrap();
    assert_eq!(filter.process(&records()), records());
}

#[test]
fn test_dedup_bad_config() {
    assert!(DedupFilter::new(&json!({"keep": "middle"})).is_err());
    assert!(DedupFilter::new(&json!({"subset": []})).is_err());
}
