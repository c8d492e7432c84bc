use std::path::Path;

use anyhow::{Context, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::anonymize::{Anonymizer, DEFAULT_SALT};
use crate::map_fxn::{PipelineProcessor, StepStats};
use crate::table::Table;
use crate::utils::parse_config;
use crate::wordlists::{BOT_NAMES, PARENTING_KEYWORDS};

/*================================================================================
=                            CLEANING CONFIG                                     =
================================================================================*/

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    pub min_score: i64,
    pub min_comment_words: usize,
    pub idioms: Vec<String>,
    pub filter_edited: bool,
    pub filter_language: bool,
    pub target_language: String,
    pub anonymize: bool,
    #[serde(skip_serializing)]
    pub salt: String,
    pub topic_filter: bool,
    pub topic_keywords: Vec<String>,
    pub bot_names: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            min_score: 2,
            min_comment_words: 10,
            idioms: Vec::new(),
            filter_edited: false,
            filter_language: false,
            target_language: String::from("en"),
            anonymize: false,
            salt: String::from(DEFAULT_SALT),
            topic_filter: false,
            topic_keywords: PARENTING_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            bot_names: BOT_NAMES.iter().map(|b| b.to_string()).collect(),
        }
    }
}

fn stage(name: &str, step: &str, kwargs: Value) -> Value {
    json!({"name": name, "step": step, "kwargs": kwargs})
}

impl CleanConfig {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let value = parse_config(path)?;
        serde_json::from_value(value).with_context(|| format!("Invalid cleaning config {:?}", path))
    }

    /// Pipeline config for the submissions table
    pub fn submission_pipeline_config(&self) -> Value {
        let mut pipeline = vec![
            stage("media_scrubber", "media_scrubber", json!({})),
            stage("removed_category_filter", "removed_category_filter", json!({})),
            stage("removed_text_filter", "removed_text_filter(selftext)", json!({"text_field": "selftext"})),
            stage("score_filter", "score_filter", json!({"min_score": self.min_score})),
            stage("url_only_filter", "url_only_filter(selftext)", json!({"text_field": "selftext"})),
            stage("url_token_modifier", "url_token_modifier(selftext)", json!({"text_field": "selftext"})),
            stage("url_token_modifier", "url_token_modifier(title)", json!({"text_field": "title"})),
            stage("dedup_filter", "dedup_filter", json!({"subset": ["id"], "keep": "first"})),
            stage("bot_filter", "bot_filter", json!({"bot_names": self.bot_names})),
        ];
        if self.topic_filter {
            pipeline.push(stage("keyword_filter", "keyword_filter(selftext)",
                json!({"text_field": "selftext", "keywords": self.topic_keywords})));
        }
        pipeline.push(stage("word_count_filter", "word_count_filter(selftext)",
            json!({"text_field": "selftext", "min_words": self.min_comment_words})));
        if self.filter_language {
            for field in ["selftext", "title"] {
                pipeline.push(stage("language_filter", &format!("language_filter({})", field),
                    json!({"text_field": field, "target_language": self.target_language})));
            }
        }
        json!({"pipeline": pipeline})
    }

    /// Pipeline config for the comments table
    pub fn comment_pipeline_config(&self) -> Value {
        let mut pipeline = vec![
            stage("removed_text_filter", "removed_text_filter(body)", json!({"text_field": "body"})),
            stage("score_filter", "score_filter", json!({"min_score": self.min_score})),
            stage("url_only_filter", "url_only_filter(body)", json!({"text_field": "body"})),
            stage("url_token_modifier", "url_token_modifier(body)", json!({"text_field": "body"})),
        ];
        if self.filter_edited {
            pipeline.push(stage("edited_filter", "edited_filter", json!({})));
        }
        pipeline.push(stage("dedup_filter", "dedup_filter", json!({"subset": ["id"], "keep": "first"})));
        pipeline.push(stage("bot_filter", "bot_filter", json!({"bot_names": self.bot_names})));
        pipeline.push(stage("idiom_filter", "idiom_filter(body)", json!({"text_field": "body", "idioms": self.idioms})));
        if self.topic_filter {
            pipeline.push(stage("keyword_filter", "keyword_filter(body)",
                json!({"text_field": "body", "keywords": self.topic_keywords})));
        }
        pipeline.push(stage("word_count_filter", "word_count_filter(body)",
            json!({"text_field": "body", "min_words": self.min_comment_words})));
        if self.filter_language {
            pipeline.push(stage("language_filter", "language_filter(body)",
                json!({"text_field": "body", "target_language": self.target_language})));
        }
        json!({"pipeline": pipeline})
    }
}

/*================================================================================
=                            ORCHESTRATION                                       =
================================================================================*/

#[derive(Debug)]
pub struct CleanOutput {
    pub comments: Table,
    pub submissions: Table,
    pub comment_stats: Vec<StepStats>,
    pub submission_stats: Vec<StepStats>,
}

/// Runs both fixed pipelines and, when asked, anonymizes what survives. Returns `None`
/// when there is nothing to clean at all.
pub fn clean_tables(comments: &Table, submissions: &Table, config: &CleanConfig) -> Result<Option<CleanOutput>, Error> {
    if comments.is_empty() && submissions.is_empty() {
        return Ok(None);
    }
    let comment_processor = PipelineProcessor::new(&config.comment_pipeline_config())
        .context("Failed to build comment pipeline")?;
    let submission_processor = PipelineProcessor::new(&config.submission_pipeline_config())
        .context("Failed to build submission pipeline")?;

    info!("Initial comments count: {}", comments.len());
    info!("Initial submissions count: {}", submissions.len());

    // Independent tables, no shared state between the two runs
    let ((mut comments_out, comment_stats), (mut submissions_out, submission_stats)) = rayon::join(
        || comment_processor.process(comments),
        || submission_processor.process(submissions),
    );
    info!("Final comments count after filtering: {}", comments_out.len());
    info!("Final submissions count after filtering: {}", submissions_out.len());

    if config.anonymize {
        info!("Anonymizing data...");
        let anonymizer = Anonymizer::new(&config.salt);
        comments_out = anonymizer.anonymize_comments(&comments_out);
        submissions_out = anonymizer.anonymize_submissions(&submissions_out);
    }

    Ok(Some(CleanOutput {
        comments: comments_out,
        submissions: submissions_out,
        comment_stats,
        submission_stats,
    }))
}
