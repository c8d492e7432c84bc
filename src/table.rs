use anyhow::{ensure, Error, Result};
use fxhash::{FxHashMap, FxHashSet};
use serde_json::{Map, Value};
use tracing::warn;

/*================================================================================
=                            RECORD TABLE                                        =
================================================================================*/
/*
In-memory table of forum records. Every row carries one cell per column, in column order.
Every operation borrows the table and hands back a new one, so an earlier stage's output is
never touched by a later stage.

Referencing a column the table doesn't have is never an error: the operation logs a warning
and returns an unchanged copy. Comment and submission dumps have different schemas and the
same stages run over both.
*/

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keep {
    First,
    Last,
    // Drop every row whose key occurs more than once
    DropAll,
}

impl Keep {
    pub fn parse(keep: &str) -> Result<Self, Error> {
        match keep.to_lowercase().as_str() {
            "first" => Ok(Keep::First),
            "last" => Ok(Keep::Last),
            "none" | "false" | "drop_all" => Ok(Keep::DropAll),
            other => Err(anyhow::anyhow!("keep must be one of {{first, last, none}}, not {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Read-only view of one row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Cell by column name, null when the column is absent
    pub fn get(&self, column: &str) -> &'a Value {
        match self.columns.iter().position(|c| c == column) {
            Some(idx) => &self.values[idx],
            None => &NULL,
        }
    }

    pub fn at(&self, idx: usize) -> &'a Value {
        self.values.get(idx).unwrap_or(&NULL)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

/// Mutable view of one row inside a copy of the table
#[derive(Debug)]
pub struct RowMut<'a> {
    columns: &'a [String],
    values: &'a mut Vec<Value>,
}

impl<'a> RowMut<'a> {
    pub fn get(&self, column: &str) -> &Value {
        match self.columns.iter().position(|c| c == column) {
            Some(idx) => &self.values[idx],
            None => &NULL,
        }
    }

    /// Overwrites a cell. Setting a column the table doesn't have does nothing.
    pub fn set(&mut self, column: &str, value: Value) -> bool {
        match self.columns.iter().position(|c| c == column) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Builds a table from JSON objects. The column set is the union of keys in first-seen
    /// order; a record missing a key gets a null cell. Non-object records are skipped.
    pub fn from_records(records: Vec<Value>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut objects: Vec<Map<String, Value>> = Vec::with_capacity(records.len());
        for record in records {
            match record {
                Value::Object(map) => {
                    for key in map.keys() {
                        if seen.insert(key.clone()) {
                            columns.push(key.clone());
                        }
                    }
                    objects.push(map);
                }
                other => warn!("Skipping non-object record: {}", other),
            }
        }

        let rows = objects
            .into_iter()
            .map(|mut map| {
                columns
                    .iter()
                    .map(|c| map.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let map: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                Value::Object(map)
            })
            .collect()
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), Error> {
        ensure!(
            row.len() == self.columns.len(),
            "Row has {} cells but table has {} columns",
            row.len(),
            self.columns.len()
        );
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// The column-or-default accessor every stage goes through. A missing column is logged
    /// and reported as `None`, which the caller turns into an identity transform.
    pub fn require_column(&self, column: &str, stage: &str) -> Option<usize> {
        let idx = self.column_index(column);
        if idx.is_none() {
            warn!("'{}' column not found. Skipping {}.", column, stage);
        }
        idx
    }

    pub fn row(&self, idx: usize) -> Option<Row<'_>> {
        self.rows.get(idx).map(|values| Row { columns: &self.columns, values })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row { columns: &self.columns, values })
    }

    /// Cells of one column, `None` when the column is absent
    pub fn column_values(&self, column: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Rows for which `predicate` holds, in their original order
    pub fn filter<F>(&self, predicate: F) -> Table
    where
        F: Fn(Row<'_>) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|values| predicate(Row { columns: &self.columns, values: values.as_slice() }))
            .cloned()
            .collect();
        Table { columns: self.columns.clone(), rows }
    }

    /// Applies `f` to every cell of `column`
    pub fn map_column<F>(&self, column: &str, f: F) -> Table
    where
        F: Fn(&Value) -> Value,
    {
        let Some(idx) = self.require_column(column, "column mapping") else {
            return self.clone();
        };
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row[idx] = f(&row[idx]);
                row
            })
            .collect();
        Table { columns: self.columns.clone(), rows }
    }

    /// Applies `f` to a mutable view of every row of a copy of the table
    pub fn map_rows<F>(&self, f: F) -> Table
    where
        F: Fn(&mut RowMut<'_>),
    {
        let mut out = self.clone();
        let columns = &out.columns;
        for values in out.rows.iter_mut() {
            f(&mut RowMut { columns, values });
        }
        out
    }

    /// Unique rows over the combination of `keys`. If any key column is absent the whole
    /// table comes back unchanged rather than being deduplicated on a partial key.
    pub fn drop_duplicates(&self, keys: &[String], keep: Keep) -> Table {
        let mut key_idxs = Vec::with_capacity(keys.len());
        for key in keys {
            match self.require_column(key, "duplicate elimination") {
                Some(idx) => key_idxs.push(idx),
                None => return self.clone(),
            }
        }

        let row_key = |row: &Vec<Value>| -> Vec<String> {
            key_idxs.iter().map(|&i| row[i].to_string()).collect()
        };

        let keep_mask: Vec<bool> = match keep {
            Keep::First => {
                let mut seen: FxHashSet<Vec<String>> = FxHashSet::default();
                self.rows.iter().map(|row| seen.insert(row_key(row))).collect()
            }
            Keep::Last => {
                let mut seen: FxHashSet<Vec<String>> = FxHashSet::default();
                let mut mask: Vec<bool> = self.rows.iter().rev().map(|row| seen.insert(row_key(row))).collect();
                mask.reverse();
                mask
            }
            Keep::DropAll => {
                let keyed: Vec<Vec<String>> = self.rows.iter().map(row_key).collect();
                let mut counts: FxHashMap<&Vec<String>, usize> = FxHashMap::default();
                for key in &keyed {
                    *counts.entry(key).or_insert(0) += 1;
                }
                keyed.iter().map(|key| counts[key] == 1).collect()
            }
        };

        let rows = self
            .rows
            .iter()
            .zip(keep_mask)
            .filter_map(|(row, keep)| if keep { Some(row.clone()) } else { None })
            .collect();
        Table { columns: self.columns.clone(), rows }
    }
}
