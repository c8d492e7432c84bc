use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Error, Result};
use serde_json::Value;

/*================================================================================
=                            CONFIG GETTER METHODS                               =
================================================================================*/

/// A trait for extracting values from JSON kwargs with type conversion
pub trait FromValue: Sized {
    /// Try to convert a JSON value to Self
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromValue for usize {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_u64().map(|v| v as usize)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for Vec<String> {
    // Lists of strings only; a single string is promoted to a one-element list
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect(),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Get a value from a JSON config with a default
pub fn get_default<T: FromValue>(config: &Value, key: &str, default: T) -> T {
    match config.get(key) {
        Some(value) => T::from_value(value).unwrap_or(default),
        None => default,
    }
}

/// Reads a .yaml/.yml or .json config into a JSON value
pub fn parse_config(config: &Path) -> Result<Value, Error> {
    let file = File::open(config).with_context(|| format!("Failed to open config {:?}", config))?;
    let reader = BufReader::new(file);

    let ext = config.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parsed_config: Value = match ext {
        "json" => serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse JSON config {:?}", config))?,
        "yaml" | "yml" => {
            let yaml_value: serde_yaml::Value = serde_yaml::from_reader(reader)
                .with_context(|| format!("Failed to parse YAML config {:?}", config))?;
            serde_json::to_value(yaml_value)?
        }
        _ => {
            return Err(anyhow!("Weird config format: {:?}", config));
        }
    };
    Ok(parsed_config)
}

/*================================================================================
=                            CELL COERCION                                       =
================================================================================*/

/// Textual view of a cell. Null is the empty string, scalars use their display form.
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Owned(if *b { "True".to_string() } else { "False".to_string() }),
        other => Cow::Owned(other.to_string()),
    }
}

/// Numeric view of a cell. Anything that can't be read as a finite number is 0.
pub fn cell_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Boolean view of a flag cell, `None` when the cell carries no boolean meaning.
pub fn cell_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}
