use forumsift_rs::map_fxn::{registered_processors, PipelineProcessor};
use forumsift_rs::table::Table;
use serde_json::json;

use super::column;

fn records() -> Table {
    Table::from_records(vec![
        json!({"id": 1, "author": "alice", "score": 5, "selftext": "a b c d"}),
        json!({"id": 2, "author": "AutoModerator", "score": 9, "selftext": "a b c d"}),
        json!({"id": 3, "author": "bob", "score": 1, "selftext": "a b c d"}),
        json!({"id": 4, "author": "carol", "score": 4, "selftext": "a b"}),
        json!({"id": 1, "author": "alice", "score": 5, "selftext": "a b c d"}),
    ])
}

#[test]
fn test_registry_names() {
    let names = registered_processors();
    assert_eq!(names.len(), 14);
    for name in ["score_filter", "url_only_filter", "dedup_filter", "language_filter", "anonymize_modifier"] {
        assert!(names.contains(&name), "{} not registered", name);
    }
}

#[test]
fn test_default_step_names() {
    // Steps are named after their stage unless a label is given
    let config = json!({
        "pipeline": [
            {"name": "score_filter", "kwargs": {"min_score": 2}},
            {"name": "bot_filter", "step": "no_bots"},
        ]
    });
    let processor = PipelineProcessor::new(&config).unwrap();
    assert_eq!(processor.len(), 2);
    assert_eq!(processor.steps, vec!["score_filter", "no_bots"]);
}

#[test]
fn test_pipeline_runs_in_order_with_stats() {
    let config = json!({
        "text_field": "selftext",
        "pipeline": [
            {"name": "score_filter", "kwargs": {"min_score": 2}},
            {"name": "dedup_filter", "kwargs": {"subset": ["id"]}},
            {"name": "bot_filter"},
            {"name": "word_count_filter", "kwargs": {"min_words": 3}},
        ]
    });
    let processor = PipelineProcessor::new(&config).unwrap();
    let input = records();
    let (out, stats) = processor.process(&input);

    assert_eq!(column(&out, "id"), vec![json!(1)]);
    let counts: Vec<(usize, usize)> = stats.iter().map(|s| (s.rows_in, s.rows_out)).collect();
    assert_eq!(counts, vec![(5, 4), (4, 3), (3, 2), (2, 1)]);
    assert_eq!(stats[0].removed(), 1);
    assert_eq!(input, records());
}

#[test]
fn test_stage_text_field_wins_over_top_level() {
    let config = json!({
        "text_field": "selftext",
        "pipeline": [{"name": "word_count_filter", "kwargs": {"text_field": "missing", "min_words": 3}}]
    });
    let processor = PipelineProcessor::new(&config).unwrap();
    let (out, _) = processor.process(&records());
    assert_eq!(out, records());
}

#[test]
fn test_empty_pipeline_is_identity() {
    let processor = PipelineProcessor::new(&json!({"pipeline": []})).unwrap();
    assert!(processor.is_empty());
    let (out, stats) = processor.process(&records());
    assert_eq!(out, records());
    assert!(stats.is_empty());
}

#[test]
fn test_bad_pipeline_configs() {
    assert!(PipelineProcessor::new(&json!({})).is_err());
    assert!(PipelineProcessor::new(&json!({"pipeline": [{"kwargs": {}}]})).is_err());
    assert!(PipelineProcessor::new(&json!({"pipeline": [{"name": "nope"}]})).is_err());
    assert!(PipelineProcessor::new(&json!({"pipeline": [{"name": "score_filter", "kwargs": [1]}]})).is_err());
    assert!(PipelineProcessor::new(&json!({"pipeline": [{"name": "dedup_filter", "kwargs": {"keep": "middle"}}]})).is_err());
}
