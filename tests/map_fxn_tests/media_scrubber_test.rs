use forumsift_rs::map_fxn::{DataProcessor, MediaScrubber};
use forumsift_rs::table::Table;
use serde_json::{json, Value};

fn submissions() -> Table {
    Table::from_records(vec![
        json!({"id": "v", "title": "clip", "selftext": "watch", "is_video": true, "is_self": false,
               "url": "https://v.redd.it/abc", "media": {"reddit_video": {}}, "media_embed": {"content": "<iframe>"},
               "thumbnail": "https://thumbs/v.jpg"}),
        json!({"id": "img", "title": "pic", "selftext": "", "is_video": false, "is_self": false,
               "url": "https://i.redd.it/PIC.JPG", "media": null, "media_embed": {},
               "thumbnail": "https://thumbs/p.jpg"}),
        json!({"id": "self", "title": "question", "selftext": "text", "is_video": false, "is_self": true,
               "url": "https://example.com/notes.png", "media": null, "media_embed": {},
               "thumbnail": "self"}),
        json!({"id": "link", "title": "article", "selftext": "", "is_video": false, "is_self": false,
               "url": "https://example.com/article", "media": null, "media_embed": {},
               "thumbnail": "default"}),
    ])
}

#[test]
fn test_media_scrubber_video_row() {
    let scrubber = MediaScrubber::new(&json!({})).unwrap();
    let out = scrubber.process(&submissions());
    assert_eq!(out.len(), 4);

    let video = out.row(0).unwrap();
    assert_eq!(video.get("url"), &Value::Null);
    assert_eq!(video.get("is_video"), &json!(false));
    assert_eq!(video.get("media"), &Value::Null);
    assert_eq!(video.get("media_embed"), &json!({}));
    assert_eq!(video.get("thumbnail"), &json!("self"));
    assert_eq!(video.get("title"), &json!("clip"));
    assert_eq!(video.get("selftext"), &json!("watch"));
}

#[test]
fn test_media_scrubber_extension_rows() {
    let scrubber = MediaScrubber::new(&json!({})).unwrap();
    let out = scrubber.process(&submissions());

    let image = out.row(1).unwrap();
    assert_eq!(image.get("url"), &Value::Null);
    assert_eq!(image.get("thumbnail"), &json!("self"));

    // Self-posts and plain links keep their url
    assert_eq!(out.row(2).unwrap().get("url"), &json!("https://example.com/notes.png"));
    assert_eq!(out.row(3).unwrap().get("url"), &json!("https://example.com/article"));
    assert_eq!(out.row(3).unwrap().get("thumbnail"), &json!("default"));
}

#[test]
fn test_media_scrubber_without_self_column() {
    let table = Table::from_records(vec![
        json!({"url": "http://x.com/a.gif", "thumbnail": "t"}),
        json!({"url": "http://x.com/a", "thumbnail": "t"}),
    ]);
    let scrubber = MediaScrubber::new(&json!({})).unwrap();
    let out = scrubber.process(&table);
    assert_eq!(out.row(0).unwrap().get("url"), &Value::Null);
    assert_eq!(out.row(0).unwrap().get("thumbnail"), &json!("self"));
    assert_eq!(out.row(1).unwrap().get("url"), &json!("http://x.com/a"));
    assert_eq!(out.columns(), table.columns());
}

#[test]
fn test_media_scrubber_missing_columns_is_noop() {
    let table = Table::from_records(vec![json!({"id": 1, "body": "comment text"})]);
    let scrubber = MediaScrubber::new(&json!({})).unwrap();
    assert_eq!(scrubber.process(&table), table);
}

#[test]
fn test_media_scrubber_is_idempotent() {
    let scrubber = MediaScrubber::new(&json!({})).unwrap();
    let once = scrubber.process(&submissions());
    assert_eq!(scrubber.process(&once), once);
}
