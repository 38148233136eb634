//! Row-major shot table with a uniform column set.

use serde::Serialize;
use serde_json::{Map, Value};

use understat_api::types::ShotRecord;

/// Shots from one or more matches plus the columns every row is read through.
///
/// Columns start with [`ShotRecord::COLUMNS`]; any upstream key a record
/// carries beyond those is appended the first time it is seen. Rows that lack
/// a column read as null.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShotTable {
    columns: Vec<String>,
    rows: Vec<ShotRecord>,
}

impl Default for ShotTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ShotTable {
    pub fn new() -> Self {
        Self {
            columns: ShotRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_records(records: Vec<ShotRecord>) -> Self {
        let mut table = Self::new();
        table.extend(records);
        table
    }

    /// Concatenates tables in order, taking the union of their columns.
    pub fn concat(tables: impl IntoIterator<Item = ShotTable>) -> Self {
        let mut out = Self::new();
        for table in tables {
            for column in table.columns {
                out.add_column(column);
            }
            out.rows.extend(table.rows);
        }
        out
    }

    pub fn push(&mut self, record: ShotRecord) {
        for key in record.extra.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ShotRecord>) {
        for record in records {
            self.push(record);
        }
    }

    fn add_column(&mut self, column: String) {
        if !self.columns.contains(&column) {
            self.columns.push(column);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ShotRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same columns, only the rows matching `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(&ShotRecord) -> bool) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Each row as JSON values aligned with [`columns`](Self::columns).
    pub fn value_rows(&self) -> Vec<Vec<Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut fields = record_fields(row);
                self.columns
                    .iter()
                    .map(|c| fields.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect()
    }

    /// Each row as an object keyed by every column; absent values are null.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.value_rows()
            .into_iter()
            .map(|row| self.columns.iter().cloned().zip(row).collect())
            .collect()
    }

    /// Each row as display strings; null becomes an empty string.
    pub fn string_rows(&self) -> Vec<Vec<String>> {
        self.value_rows()
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }
}

fn record_fields(record: &ShotRecord) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    }
}

/// Renders one cell the way a delimited-text export expects it.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
