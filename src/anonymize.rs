use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::table::Table;

/*================================================================================
=                            ANONYMIZATION                                       =
================================================================================*/
/*
Usernames are replaced by a salted SHA-256 digest, so the same author maps to the same
pseudonym in both the comment and the submission table. Text cells lose user mentions,
email addresses and phone numbers, in that order. None of the placeholders can be matched
by a later pass.
*/

pub const DEFAULT_SALT: &str = "your_secret_salt";
pub const USER_PLACEHOLDER: &str = "[USER]";
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL]";
pub const PHONE_PLACEHOLDER: &str = "[PHONE]";

const SENTINEL_USERNAMES: &[&str] = &["[deleted]", "[removed]", ""];

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bu/[A-Za-z0-9_-]+\b").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());
static PHONE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b", // 123-456-7890
        r"\(\d{3}\)\s*\d{3}[-.\s]?\d{4}\b",   // (123) 456-7890
        r"\b\d{10}\b",                        // 1234567890
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub fn is_sentinel_username(username: &str) -> bool {
    SENTINEL_USERNAMES.contains(&username)
}

/// `user_` + the first 16 hex chars of sha256(username + salt). Sentinels pass through.
pub fn hash_username(username: &str, salt: &str) -> String {
    if is_sentinel_username(username) {
        return username.to_string();
    }
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("user_{}", &digest[..16])
}

pub fn remove_usernames_from_text(text: &str) -> String {
    MENTION_RE.replace_all(text, USER_PLACEHOLDER).into_owned()
}

pub fn remove_emails_from_text(text: &str) -> String {
    EMAIL_RE.replace_all(text, EMAIL_PLACEHOLDER).into_owned()
}

pub fn remove_phone_numbers_from_text(text: &str) -> String {
    PHONE_RES.iter().fold(text.to_string(), |acc, re| {
        re.replace_all(&acc, PHONE_PLACEHOLDER).into_owned()
    })
}

/// Mentions, then emails, then phone numbers
pub fn redact_pii(text: &str) -> String {
    let text = remove_usernames_from_text(text);
    let text = remove_emails_from_text(&text);
    remove_phone_numbers_from_text(&text)
}

#[derive(Debug, Clone)]
pub struct Anonymizer {
    pub salt: String,
    pub hash_authors: bool,
    pub remove_pii: bool,
}

impl Default for Anonymizer {
    fn default() -> Self {
        Self { salt: DEFAULT_SALT.to_string(), hash_authors: true, remove_pii: true }
    }
}

impl Anonymizer {
    pub fn new(salt: &str) -> Self {
        Self { salt: salt.to_string(), ..Default::default() }
    }

    fn hash_cell(&self, cell: &Value) -> Value {
        match cell {
            Value::Null => Value::Null,
            Value::String(s) => Value::String(hash_username(s, &self.salt)),
            // Numeric usernames survive CSV type inference as numbers
            other => Value::String(hash_username(&other.to_string(), &self.salt)),
        }
    }

    fn redact_cell(cell: &Value) -> Value {
        match cell {
            Value::String(s) => Value::String(redact_pii(s)),
            other => other.clone(),
        }
    }

    /// Hashes `author_column` and scrubs PII from each of `text_columns`. Columns the
    /// table doesn't have are left alone.
    pub fn anonymize_table(&self, table: &Table, author_column: &str, text_columns: &[&str]) -> Table {
        let mut out = table.clone();
        if self.hash_authors && out.has_column(author_column) {
            info!("Hashing {} column...", author_column);
            out = out.map_column(author_column, |cell| self.hash_cell(cell));
        }
        if self.remove_pii {
            for column in text_columns {
                if out.has_column(column) {
                    info!("Removing PII from {} column...", column);
                    out = out.map_column(column, Self::redact_cell);
                }
            }
        }
        out
    }

    pub fn anonymize_comments(&self, comments: &Table) -> Table {
        self.anonymize_table(comments, "author", &["body"])
    }

    pub fn anonymize_submissions(&self, submissions: &Table) -> Table {
        self.anonymize_table(submissions, "author", &["selftext", "title"])
    }
}
