use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::time::Instant;

use anyhow::{anyhow, ensure, Context, Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::anonymize::{Anonymizer, DEFAULT_SALT};
use crate::table::{Keep, Table};
use crate::utils::{cell_bool, cell_f64, cell_text, get_default};
use crate::wordlists::{BOT_NAMES, PARENTING_KEYWORDS, REMOVED_MARKERS};

/*================================================================================
=                            PIPELINE PROCESSING                                 =
================================================================================*/
type ProcessorConstructor = fn(&Value) -> Result<Box<dyn AnyDataProcessor>, Error>;


macro_rules! register_processor {
	($map:expr, $name:expr, $processor_type:ty) => {
		$map.insert($name, |config| {
			let processor = <$processor_type>::new(config)
				.with_context(|| format!("Failed to build processor {:?}", $name))?;
			Ok(Box::new(processor) as Box<dyn AnyDataProcessor>)
		});
	};
}


// Static map of processor types to their constructor wrapper functions
static PROCESSOR_CONSTRUCTORS: Lazy<HashMap<&'static str, ProcessorConstructor>> = Lazy::new(|| {
	let mut m: HashMap<&'static str, ProcessorConstructor> = HashMap::new();

	register_processor!(m, "media_scrubber", MediaScrubber);
	register_processor!(m, "removed_category_filter", RemovedCategoryFilter);
	register_processor!(m, "removed_text_filter", RemovedTextFilter);
	register_processor!(m, "score_filter", ScoreFilter);
	register_processor!(m, "url_only_filter", UrlOnlyFilter);
	register_processor!(m, "url_token_modifier", UrlTokenModifier);
	register_processor!(m, "edited_filter", EditedFilter);
	register_processor!(m, "dedup_filter", DedupFilter);
	register_processor!(m, "bot_filter", BotFilter);
	register_processor!(m, "idiom_filter", IdiomFilter);
	register_processor!(m, "keyword_filter", KeywordFilter);
	register_processor!(m, "word_count_filter", WordCountFilter);
	register_processor!(m, "language_filter", LanguageFilter);
	register_processor!(m, "anonymize_modifier", AnonymizeModifier);

	m
});

pub fn registered_processors() -> Vec<&'static str> {
	let mut names: Vec<&'static str> = PROCESSOR_CONSTRUCTORS.keys().copied().collect();
	names.sort();
	names
}


pub trait AnyDataProcessor: Send + Sync + Debug {
	fn process(&self, table: &Table) -> Table;

	// Kwargs the processor ended up with, for the run report
	fn describe(&self) -> Value;
}

impl<T> AnyDataProcessor for T
where
	T: DataProcessor + Send + Sync + Serialize + Debug,
{
	fn process(&self, table: &Table) -> Table {
		DataProcessor::process(self, table)
	}

	fn describe(&self) -> Value {
		serde_json::to_value(self).unwrap_or(Value::Null)
	}
}


#[derive(Debug, Clone, Serialize)]
pub struct StepStats {
	pub step: String,
	pub rows_in: usize,
	pub rows_out: usize,
	pub nanos: u128,
}

impl StepStats {
	pub fn removed(&self) -> usize {
		self.rows_in.saturating_sub(self.rows_out)
	}
}


#[derive(Debug)]
pub struct PipelineProcessor {
	pub pipeline: Vec<Box<dyn AnyDataProcessor>>,
	pub steps: Vec<String>,
}

impl PipelineProcessor {
	/*
	Config layout:
		text_field: optional, handed to every stage that doesn't set its own
		pipeline: [{name, kwargs: {arg1: val1, ...}, step: optional label}, ...]
	*/
	pub fn new(config: &Value) -> Result<Self, Error> {
		let mut pipeline: Vec<Box<dyn AnyDataProcessor>> = Vec::new();
		let mut steps: Vec<String> = Vec::new();
		let text_field: Option<String> = get_default(config, "text_field", None);

		let pipeline_configs = config
			.get("pipeline")
			.and_then(|p| p.as_array())
			.ok_or_else(|| anyhow!("Config needs a `pipeline` list"))?;

		for subconfig in pipeline_configs {
			let subconfig_name = subconfig
				.get("name")
				.and_then(|n| n.as_str())
				.ok_or_else(|| anyhow!("Pipeline entry without a name: {}", subconfig))?;
			let mut subconfig_kwargs: Value = subconfig.get("kwargs").cloned().unwrap_or_else(|| json!({}));
			ensure!(subconfig_kwargs.is_object(), "kwargs of {:?} must be a mapping", subconfig_name);
			if let Some(text_field) = &text_field {
				if subconfig_kwargs.get("text_field").is_none() {
					subconfig_kwargs["text_field"] = Value::String(text_field.clone());
				}
			}

			let constructor = PROCESSOR_CONSTRUCTORS
				.get(subconfig_name)
				.ok_or_else(|| anyhow!("Unknown processor: {:?}", subconfig_name))?;
			let processor = constructor(&subconfig_kwargs)?;
			let step = get_default(subconfig, "step", subconfig_name.to_string());
			debug!("Step {} | {}", step, processor.describe());
			pipeline.push(processor);
			steps.push(step);
		}
		Ok(Self { pipeline, steps })
	}

	pub fn len(&self) -> usize {
		self.pipeline.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pipeline.is_empty()
	}

	/// Runs every stage in order. The input table is left as it was.
	pub fn process(&self, table: &Table) -> (Table, Vec<StepStats>) {
		let mut current = table.clone();
		let mut stats = Vec::with_capacity(self.pipeline.len());

		for (processor, step) in self.pipeline.iter().zip(&self.steps) {
			let start_step = Instant::now();
			let rows_in = current.len();
			current = processor.process(&current);
			let stat = StepStats {
				step: step.clone(),
				rows_in,
				rows_out: current.len(),
				nanos: start_step.elapsed().as_nanos(),
			};
			debug!("{} | {} -> {} rows", stat.step, stat.rows_in, stat.rows_out);
			stats.push(stat);
		}
		(current, stats)
	}
}



/*================================================================================
=                            DATA PROCESSOR TRAIT                                =
================================================================================*/
/*
	- each processor takes a whole table and hands back a new one; it never fails once built
	- anything that can go wrong (bad kwargs, bad regex) goes wrong in `new`
	- a missing column turns the processor into the identity, with a warning
	- kwargs come from the pipeline config, see `PipelineProcessor::new`
*/

pub trait DataProcessor {
	// Initialize and return Self with cached data
	fn new(config: &Value) -> Result<Self, Error>
	where
		Self: Sized;

	fn process(&self, table: &Table) -> Table;
}


/*================================================================================
=                            CONTENT REMOVAL                                     =
================================================================================*/

#[derive(Serialize, Debug)]
pub struct MediaScrubber {
	/* Image/video submissions lose their media payload but keep every text field.
	A row is a media post if its video flag is set, or if its url ends in a media file
	extension (in which case self-posts are exempt when a self-post flag is present).
	*/
	pub video_field: String,
	pub url_field: String,
	pub self_field: String,
	pub media_field: String,
	pub media_embed_field: String,
	pub thumbnail_field: String,
	pub thumbnail_placeholder: String,
	pub extensions: Vec<String>,
}

const MEDIA_EXTENSIONS: &[&str] = &[
	".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", // images
	".mp4", ".webm", ".gifv", ".mov",                 // video
];

impl DataProcessor for MediaScrubber {
	fn new(config: &Value) -> Result<Self, Error> {
		let video_field = get_default(config, "video_field", String::from("is_video"));
		let url_field = get_default(config, "url_field", String::from("url"));
		let self_field = get_default(config, "self_field", String::from("is_self"));
		let media_field = get_default(config, "media_field", String::from("media"));
		let media_embed_field = get_default(config, "media_embed_field", String::from("media_embed"));
		let thumbnail_field = get_default(config, "thumbnail_field", String::from("thumbnail"));
		let thumbnail_placeholder = get_default(config, "thumbnail_placeholder", String::from("self"));
		let extensions: Vec<String> = get_default(config, "extensions", MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect::<Vec<_>>())
			.into_iter()
			.map(|e| e.to_lowercase())
			.collect();
		Ok(Self {video_field, url_field, self_field, media_field, media_embed_field,
				 thumbnail_field, thumbnail_placeholder, extensions})
	}

	fn process(&self, table: &Table) -> Table {
		let has_video = table.has_column(&self.video_field);
		let has_url = table.has_column(&self.url_field);
		if !has_video && !has_url {
			warn!("Neither '{}' nor '{}' column found. Skipping media scrubbing.", self.video_field, self.url_field);
			return table.clone();
		}
		let has_self = table.has_column(&self.self_field);

		table.map_rows(|row| {
			let is_video = has_video && cell_bool(row.get(&self.video_field)) == Some(true);
			let is_media_url = has_url && {
				let url = cell_text(row.get(&self.url_field)).to_lowercase();
				let not_self = !has_self || cell_bool(row.get(&self.self_field)) == Some(false);
				not_self && self.extensions.iter().any(|ext| url.ends_with(ext.as_str()))
			};
			if !(is_video || is_media_url) {
				return;
			}
			row.set(&self.url_field, Value::Null);
			row.set(&self.video_field, Value::Bool(false));
			row.set(&self.media_field, Value::Null);
			row.set(&self.media_embed_field, json!({}));
			row.set(&self.thumbnail_field, Value::String(self.thumbnail_placeholder.clone()));
		})
	}
}


#[derive(Serialize, Debug)]
pub struct RemovedCategoryFilter {
	// Keeps only rows that moderation hasn't removed (null or empty removal category)
	pub category_field: String,
}

impl DataProcessor for RemovedCategoryFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let category_field = get_default(config, "category_field", String::from("removed_by_category"));
		Ok(Self {category_field})
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.category_field, "removed-category filtering") else {
			return table.clone();
		};
		table.filter(|row| match row.at(idx) {
			Value::Null => true,
			Value::String(s) => s.is_empty(),
			_ => false,
		})
	}
}


#[derive(Serialize, Debug)]
pub struct RemovedTextFilter {
	// Drops rows whose text is exactly one of the removal markers
	pub text_field: String,
	pub markers: Vec<String>,
}

impl DataProcessor for RemovedTextFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let text_field = get_default(config, "text_field", String::from("body"));
		let markers: Vec<String> = get_default(config, "markers", REMOVED_MARKERS.iter().map(|m| m.to_string()).collect());
		Ok(Self {text_field, markers})
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.text_field, "removed-text filtering") else {
			return table.clone();
		};
		table.filter(|row| match row.at(idx) {
			Value::String(s) => !self.markers.iter().any(|m| m == s),
			_ => true,
		})
	}
}


/*================================================================================
=                            SCORE / EDITED / DUPES / BOTS                       =
================================================================================*/

#[derive(Serialize, Debug)]
pub struct ScoreFilter {
	// Keeps rows with score >= min_score. Scores that aren't numbers count as 0.
	pub score_field: String,
	pub min_score: i64,
}

impl DataProcessor for ScoreFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let score_field = get_default(config, "score_field", String::from("score"));
		let min_score = get_default(config, "min_score", 2 as i64);
		Ok(Self {score_field, min_score})
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.score_field, "score filtering") else {
			return table.clone();
		};
		let min_score = self.min_score as f64;
		table.filter(|row| cell_f64(row.at(idx)) >= min_score)
	}
}


/// Whether an `edited` cell means the record was edited.
/// false / 0 / "false" / null / unreadable strings are unedited; true and non-zero
/// timestamps (numeric or as strings) are edited.
pub fn is_edited(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().map_or(false, |v| v != 0.0 && !v.is_nan()),
		Value::String(s) => {
			let s = s.trim();
			if s.eq_ignore_ascii_case("false") {
				false
			} else if s.eq_ignore_ascii_case("true") {
				true
			} else {
				s.parse::<f64>().map_or(false, |v| v != 0.0 && !v.is_nan())
			}
		}
		_ => false,
	}
}

#[derive(Serialize, Debug)]
pub struct EditedFilter {
	// Keeps only rows that were edited after posting
	pub edited_field: String,
}

impl DataProcessor for EditedFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let edited_field = get_default(config, "edited_field", String::from("edited"));
		Ok(Self {edited_field})
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.edited_field, "edited content filtering") else {
			return table.clone();
		};
		table.filter(|row| is_edited(row.at(idx)))
	}
}


#[derive(Serialize, Debug)]
pub struct DedupFilter {
	// Unique rows over the `subset` columns; keep is one of first/last/none
	pub subset: Vec<String>,
	pub keep: String,
	#[serde(skip)]
	keep_policy: Keep,
}

impl DataProcessor for DedupFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let subset = get_default(config, "subset", vec![String::from("id")]);
		ensure!(!subset.is_empty(), "dedup_filter needs at least one subset column");
		let keep = match config.get("keep") {
			Some(Value::Bool(false)) => String::from("none"),
			_ => get_default(config, "keep", String::from("first")),
		};
		let keep_policy = Keep::parse(&keep)?;
		Ok(Self {subset, keep, keep_policy})
	}

	fn process(&self, table: &Table) -> Table {
		table.drop_duplicates(&self.subset, self.keep_policy)
	}
}


#[derive(Serialize, Debug)]
pub struct BotFilter {
	// Drops rows written by known automated accounts (whole-name, case-insensitive)
	pub author_field: String,
	pub bot_names: HashSet<String>,
}

impl DataProcessor for BotFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let author_field = get_default(config, "author_field", String::from("author"));
		let bot_names: HashSet<String> = get_default(config, "bot_names", BOT_NAMES.iter().map(|b| b.to_string()).collect::<Vec<_>>())
			.into_iter()
			.map(|b| b.trim().to_lowercase())
			.filter(|b| !b.is_empty())
			.collect();
		Ok(Self {author_field, bot_names})
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.author_field, "automoderator/bot filtering") else {
			return table.clone();
		};
		table.filter(|row| {
			let author = cell_text(row.at(idx)).trim().to_lowercase();
			!self.bot_names.contains(&author)
		})
	}
}


/*================================================================================
=                            URL HANDLING                                        =
================================================================================*/

static URL_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)^(https?://\S+|www\.\S+|[a-z0-9-]+\.[a-z]{2,})(/\S*)?$").unwrap()
});

// Finds URLs inside running text: balanced parentheses in the path, no trailing punctuation
static URL_IN_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(concat!(
		r"(?i)\b((?:https?://|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)",
		r"(?:[^\s()<>]+|\(([^\s()<>]+|(\([^\s()<>]+\)))*\))+",
		r#"(?:\(([^\s()<>]+|(\([^\s()<>]+\)))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’]))"#,
	)).unwrap()
});

const URL_STRIP_CHARS: &[char] = &['.', ',', '!', '?', '(', ')', '[', ']'];

pub const URL_PLACEHOLDER: &str = "<URL>";

/// True when every whitespace token of `text` is a URL. Empty text is not URL-only.
pub fn is_url_only(text: &str) -> bool {
	let mut tokens = text.split_whitespace().peekable();
	if tokens.peek().is_none() {
		return false;
	}
	tokens.all(|t| URL_TOKEN_RE.is_match(t.trim_matches(URL_STRIP_CHARS)))
}

pub fn replace_urls_with_token(text: &str, token: &str) -> String {
	URL_IN_TEXT_RE.replace_all(text, regex::NoExpand(token)).into_owned()
}


#[derive(Serialize, Debug)]
pub struct UrlOnlyFilter {
	// Drops rows whose text is nothing but links
	pub text_field: String,
}

impl DataProcessor for UrlOnlyFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let text_field = get_default(config, "text_field", String::from("body"));
		Ok(Self {text_field})
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.text_field, "URL-only content filtering") else {
			return table.clone();
		};
		table.filter(|row| !is_url_only(&cell_text(row.at(idx))))
	}
}


#[derive(Serialize, Debug)]
pub struct UrlTokenModifier {
	// Replaces links inside the text with a placeholder token. Run after url_only_filter.
	pub text_field: String,
	pub token: String,
}

impl DataProcessor for UrlTokenModifier {
	fn new(config: &Value) -> Result<Self, Error> {
		let text_field = get_default(config, "text_field", String::from("body"));
		let token = get_default(config, "token", String::from(URL_PLACEHOLDER));
		Ok(Self {text_field, token})
	}

	fn process(&self, table: &Table) -> Table {
		if table.require_column(&self.text_field, "URL tokenization").is_none() {
			return table.clone();
		}
		table.map_column(&self.text_field, |cell| match cell {
			Value::String(s) => Value::String(replace_urls_with_token(s, &self.token)),
			other => other.clone(),
		})
	}
}


/*================================================================================
=                            TERM LISTS                                          =
================================================================================*/

/// Whole-word, case-insensitive match against any of a list of terms
#[derive(Debug, Clone)]
pub struct TermMatcher {
	regex: Option<Regex>,
}

impl TermMatcher {
	pub fn new(terms: &[String]) -> Result<Self, Error> {
		let escaped: Vec<String> = terms
			.iter()
			.filter(|t| !t.is_empty())
			.map(|t| regex::escape(t))
			.collect();
		if escaped.is_empty() {
			return Ok(Self { regex: None });
		}
		let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
		let regex = Regex::new(&pattern).context("Failed to compile term list")?;
		Ok(Self { regex: Some(regex) })
	}

	pub fn is_empty(&self) -> bool {
		self.regex.is_none()
	}

	pub fn is_match(&self, text: &str) -> bool {
		self.regex.as_ref().map_or(false, |r| r.is_match(text))
	}
}


#[derive(Serialize, Debug)]
pub struct IdiomFilter {
	// Drops rows whose text contains any of the idioms
	pub text_field: String,
	pub idioms: Vec<String>,
	#[serde(skip)]
	matcher: TermMatcher,
}

impl DataProcessor for IdiomFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let text_field = get_default(config, "text_field", String::from("body"));
		let idioms: Vec<String> = get_default(config, "idioms", Vec::new());
		let matcher = TermMatcher::new(&idioms)?;
		Ok(Self {text_field, idioms, matcher})
	}

	fn process(&self, table: &Table) -> Table {
		if self.matcher.is_empty() {
			return table.clone();
		}
		let Some(idx) = table.require_column(&self.text_field, "idiom filtering") else {
			return table.clone();
		};
		table.filter(|row| !self.matcher.is_match(&cell_text(row.at(idx))))
	}
}


#[derive(Serialize, Debug)]
pub struct KeywordFilter {
	// Keeps only rows whose text mentions at least one keyword (topical relevance)
	pub text_field: String,
	pub keywords: Vec<String>,
	#[serde(skip)]
	matcher: TermMatcher,
}

impl DataProcessor for KeywordFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let text_field = get_default(config, "text_field", String::from("body"));
		let keywords: Vec<String> = get_default(config, "keywords", PARENTING_KEYWORDS.iter().map(|k| k.to_string()).collect());
		let matcher = TermMatcher::new(&keywords)?;
		Ok(Self {text_field, keywords, matcher})
	}

	fn process(&self, table: &Table) -> Table {
		if self.matcher.is_empty() {
			warn!("Empty keyword list. Skipping keyword filtering.");
			return table.clone();
		}
		let Some(idx) = table.require_column(&self.text_field, "keyword filtering") else {
			return table.clone();
		};
		table.filter(|row| self.matcher.is_match(&cell_text(row.at(idx))))
	}
}


#[derive(Serialize, Debug)]
pub struct WordCountFilter {
	// Keeps rows whose text has at least min_words whitespace-separated words
	pub text_field: String,
	pub min_words: usize,
}

impl DataProcessor for WordCountFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		let text_field = get_default(config, "text_field", String::from("body"));
		let min_words = get_default(config, "min_words", 10);
		Ok(Self {text_field, min_words})
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.text_field, "min word count filtering") else {
			return table.clone();
		};
		table.filter(|row| cell_text(row.at(idx)).split_whitespace().count() >= self.min_words)
	}
}


/*================================================================================
=                            LANGUAGE                                            =
================================================================================*/

pub trait LanguageDetector: Send + Sync + Debug {
	/// Language code of `text`, or an error when no language can be told
	fn detect(&self, text: &str) -> Result<String, Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
	fn detect(&self, text: &str) -> Result<String, Error> {
		whatlang::detect(text)
			.map(|info| info.lang().code().to_string())
			.ok_or_else(|| anyhow!("Could not detect a language"))
	}
}

const ISO_639_3_TO_1: &[(&str, &str)] = &[
	("eng", "en"), ("spa", "es"), ("fra", "fr"), ("deu", "de"), ("por", "pt"),
	("rus", "ru"), ("jpn", "ja"), ("cmn", "zh"), ("zho", "zh"), ("ara", "ar"),
	("hin", "hi"), ("ita", "it"), ("nld", "nl"), ("pol", "pl"), ("tur", "tr"),
	("vie", "vi"), ("kor", "ko"), ("swe", "sv"), ("dan", "da"), ("fin", "fi"),
	("nob", "no"), ("ukr", "uk"), ("ces", "cs"), ("ell", "el"), ("heb", "he"),
	("ind", "id"), ("ron", "ro"), ("hun", "hu"), ("tha", "th"), ("ben", "bn"),
];

/// Lower-cased two-letter code where one is known, so "en" and "eng" compare equal
pub fn normalize_language_code(code: &str) -> String {
	let code = code.trim().to_lowercase();
	ISO_639_3_TO_1
		.iter()
		.find(|(three, _)| *three == code)
		.map(|(_, two)| two.to_string())
		.unwrap_or(code)
}

#[derive(Serialize, Debug)]
pub struct LanguageFilter {
	/* Keeps rows whose text is detected as target_language.
	Empty text and detector failures count as some other language.
	*/
	pub text_field: String,
	pub target_language: String,
	#[serde(skip)]
	detector: Box<dyn LanguageDetector>,
}

impl LanguageFilter {
	pub fn with_detector(config: &Value, detector: Box<dyn LanguageDetector>) -> Result<Self, Error> {
		let text_field = get_default(config, "text_field", String::from("body"));
		let target_language = normalize_language_code(&get_default(config, "target_language", String::from("en")));
		ensure!(!target_language.is_empty(), "target_language can't be empty");
		Ok(Self {text_field, target_language, detector})
	}

	pub fn is_target_language(&self, text: &str) -> bool {
		if text.trim().is_empty() {
			return false;
		}
		match self.detector.detect(text) {
			Ok(code) => normalize_language_code(&code) == self.target_language,
			Err(e) => {
				debug!("Language detection failed: {}", e);
				false
			}
		}
	}
}

impl DataProcessor for LanguageFilter {
	fn new(config: &Value) -> Result<Self, Error> {
		Self::with_detector(config, Box::new(WhatlangDetector))
	}

	fn process(&self, table: &Table) -> Table {
		let Some(idx) = table.require_column(&self.text_field, "language filtering") else {
			return table.clone();
		};
		table.filter(|row| match row.at(idx) {
			Value::Null => false,
			cell => self.is_target_language(&cell_text(cell)),
		})
	}
}


/*================================================================================
=                            ANONYMIZATION                                       =
================================================================================*/

#[derive(Serialize, Debug)]
pub struct AnonymizeModifier {
	// Hashes author names and scrubs PII from text fields
	pub author_field: String,
	pub text_fields: Vec<String>,
	#[serde(skip)]
	anonymizer: Anonymizer,
}

impl DataProcessor for AnonymizeModifier {
	fn new(config: &Value) -> Result<Self, Error> {
		let author_field = get_default(config, "author_field", String::from("author"));
		let text_fields: Vec<String> = match config.get("text_fields") {
			Some(_) => get_default(config, "text_fields", Vec::new()),
			None => vec![get_default(config, "text_field", String::from("body"))],
		};
		let anonymizer = Anonymizer {
			salt: get_default(config, "salt", String::from(DEFAULT_SALT)),
			hash_authors: get_default(config, "hash_authors", true),
			remove_pii: get_default(config, "remove_pii", true),
		};
		Ok(Self {author_field, text_fields, anonymizer})
	}

	fn process(&self, table: &Table) -> Table {
		let text_fields: Vec<&str> = self.text_fields.iter().map(|f| f.as_str()).collect();
		self.anonymizer.anonymize_table(table, &self.author_field, &text_fields)
	}
}
