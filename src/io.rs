use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, ensure, Context, Error, Result};
use mj_io::{read_pathbuf_to_mem, write_mem_to_pathbuf};
use serde_json::{Number, Value};
use tracing::{error, info};

use crate::table::Table;

/*================================================================================
=                            TABLE FORMATS                                       =
================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Jsonl,
}

impl TableFormat {
    /// Format from the file name, looking through compression suffixes (`x.jsonl.gz`)
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Bad table path {:?}", path))?
            .to_lowercase();
        let name = ["gz", "zst", "zstd"]
            .iter()
            .fold(name, |n, ext| n.strip_suffix(&format!(".{}", ext)).map(String::from).unwrap_or(n));
        if name.ends_with(".csv") {
            Ok(TableFormat::Csv)
        } else if name.ends_with(".jsonl") || name.ends_with(".json") {
            Ok(TableFormat::Jsonl)
        } else {
            Err(anyhow!("Unknown table format: {:?}", path))
        }
    }
}

/// How a CSV column's cells are read. Decided over the whole column, so a text column
/// holding `0042` next to words keeps every cell as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bool,
    Number,
    Text,
}

fn parse_bool(field: &str) -> Option<bool> {
    match field {
        "True" => Some(true),
        "False" => Some(false),
        _ => None,
    }
}

/// A number only if writing it back gives `field` again (`1.50`, `007`, `1e5` stay text)
fn parse_number(field: &str) -> Option<Value> {
    let value = match field.parse::<i64>() {
        Ok(i) => Value::from(i),
        Err(_) => Value::Number(field.parse::<f64>().ok().and_then(Number::from_f64)?),
    };
    if value.to_string() == field {
        Some(value)
    } else {
        None
    }
}

/// Bool when every non-empty cell is True/False, Number when every non-empty cell is a
/// losslessly printable number, else Text. Empty cells don't vote.
pub fn infer_column<'a, I>(fields: I) -> ColumnKind
where
    I: IntoIterator<Item = &'a str>,
{
    let mut all_bool = true;
    let mut all_number = true;
    let mut any = false;
    for field in fields.into_iter().filter(|f| !f.is_empty()) {
        any = true;
        all_bool &= parse_bool(field).is_some();
        all_number &= parse_number(field).is_some();
        if !all_bool && !all_number {
            return ColumnKind::Text;
        }
    }
    match (any, all_bool, all_number) {
        (false, _, _) => ColumnKind::Text,
        (true, true, _) => ColumnKind::Bool,
        (true, false, true) => ColumnKind::Number,
        _ => ColumnKind::Text,
    }
}

/// Cell value of a CSV field in a column of `kind`. Empty is always null.
pub fn parse_cell(field: &str, kind: ColumnKind) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    let parsed = match kind {
        ColumnKind::Bool => parse_bool(field).map(Value::Bool),
        ColumnKind::Number => parse_number(field),
        ColumnKind::Text => None,
    };
    parsed.unwrap_or_else(|| Value::String(field.to_string()))
}

// CSV rendering of a cell, the inverse of `parse_cell` for scalars
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => String::from("True"),
        Value::Bool(false) => String::from("False"),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/*================================================================================
=                            READING                                             =
================================================================================*/

fn read_csv(path: &PathBuf) -> Result<Table, Error> {
    let data = read_pathbuf_to_mem(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(false).from_reader(data);
    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("Bad CSV header in {:?}", path))?
        .iter()
        .map(String::from)
        .collect();
    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Bad CSV record in {:?}", path))?;
    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|idx| infer_column(records.iter().map(|r| r.get(idx).unwrap_or(""))))
        .collect();

    let mut table = Table::new(columns);
    for record in &records {
        table.push_row(record.iter().zip(&kinds).map(|(field, kind)| parse_cell(field, *kind)).collect())?;
    }
    Ok(table)
}

fn read_jsonl(path: &PathBuf) -> Result<Table, Error> {
    let data = read_pathbuf_to_mem(path)?;
    let mut records: Vec<Value> = Vec::new();
    for (lineno, line) in data.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(&line)
            .with_context(|| format!("Bad JSON on line {} of {:?}", lineno + 1, path))?;
        records.push(record);
    }
    Ok(Table::from_records(records))
}

pub fn try_load_table(path: &Path) -> Result<Table, Error> {
    let path = path.to_path_buf();
    ensure!(path.exists(), "No such file {:?}", path);
    match TableFormat::from_path(&path)? {
        TableFormat::Csv => read_csv(&path),
        TableFormat::Jsonl => read_jsonl(&path),
    }
}

/// Loads a CSV or JSONL table. Any failure is logged and yields an empty table, so one
/// unreadable dump doesn't stop the other from being cleaned.
pub fn load_table(path: &Path) -> Table {
    match try_load_table(path) {
        Ok(table) => {
            info!("Loaded {} rows from {:?}", table.len(), path);
            table
        }
        Err(e) => {
            error!("Error loading data from {:?}: {:#}", path, e);
            Table::default()
        }
    }
}

/*================================================================================
=                            WRITING                                             =
================================================================================*/

fn csv_bytes(table: &Table) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.values().iter().map(render_cell))?;
    }
    writer.into_inner().map_err(|e| anyhow!("Failed to flush CSV: {}", e))
}

fn jsonl_bytes(table: &Table) -> Result<Vec<u8>, Error> {
    let mut output_bytes: Vec<u8> = Vec::new();
    for record in table.to_records() {
        output_bytes.extend(serde_json::to_vec(&record)?);
        output_bytes.push(b'\n');
    }
    Ok(output_bytes)
}

/// Writes `table` in the format named by the path. CSV output always carries the header,
/// even with zero rows.
pub fn write_table(table: &Table, path: &Path) -> Result<(), Error> {
    let output_bytes = match TableFormat::from_path(path)? {
        TableFormat::Csv => csv_bytes(table)?,
        TableFormat::Jsonl => jsonl_bytes(table)?,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
        }
    }
    write_mem_to_pathbuf(&output_bytes, &path.to_path_buf())?;
    info!("Wrote {} rows to {:?}", table.len(), path);
    Ok(())
}

/// `<output_dir>/<prefix>_<file name of input>`
pub fn output_path(input: &Path, output_dir: &Path, prefix: &str) -> Result<PathBuf, Error> {
    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Bad input path {:?}", input))?;
    Ok(output_dir.join(format!("{}_{}", prefix, file_name)))
}
