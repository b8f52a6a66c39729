//! Flat tabular storage
//!
//! Every stage reads a CSV table and writes a new one. [`Table`] keeps the
//! header row and every cell as text so that columns a stage does not
//! interpret are carried through untouched and in position.

pub mod error;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{CommentRecord, COMMENT_DATE_FORMAT};

pub use error::{TableError, TableResult};

/// Column names shared by the stages
pub mod columns {
    pub const POST_TITLE: &str = "Post_Title";
    pub const POST_DATE: &str = "Post_Date";
    pub const EXTRACTED_DATE: &str = "Extracted_Date";
    pub const COMMENT_AUTHOR: &str = "Comment_Author";
    pub const COMMENT_KARMA: &str = "Comment_Karma";
    pub const COMMENT_DATE: &str = "Comment_Date";
    pub const COMMENT_TEXT: &str = "Comment_Text";
    pub const PICK: &str = "Pick";
    pub const ODDS: &str = "Odds";
    pub const SPORT: &str = "Sport";
    pub const UNIT: &str = "Unit";
    pub const RESULT: &str = "Result";
    pub const PREVIOUS_PICK_RESULT: &str = "Previous_Pick_Result";

    /// Columns appended by the extraction stage, in order
    pub const EXTRACTION: [&str; 4] = [PICK, ODDS, SPORT, UNIT];
}

/// An in-memory table of text cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the header
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) -> TableResult<()> {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.headers.len() {
            return Err(TableError::RowWidth {
                row: self.rows.len(),
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Load a CSV file with a header row
    pub fn load_csv(path: &Path) -> TableResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(path)
            .map_err(|e| TableError::csv(path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| TableError::csv(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| TableError::csv(path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded table");
        Ok(Self { headers, rows })
    }

    /// Write the table as CSV with a header row
    pub fn save_csv(&self, path: &Path) -> TableResult<()> {
        ensure_parent(path)?;
        let mut writer = csv::Writer::from_path(path).map_err(|e| TableError::csv(path, e))?;

        writer
            .write_record(&self.headers)
            .map_err(|e| TableError::csv(path, e))?;
        for row in &self.rows {
            writer.write_record(row).map_err(|e| TableError::csv(path, e))?;
        }
        writer.flush().map_err(|e| TableError::io(path, e))?;

        tracing::debug!(path = %path.display(), rows = self.rows.len(), "Saved table");
        Ok(())
    }

    /// Write the table as a pretty-printed JSON array of records
    pub fn save_json(&self, path: &Path) -> TableResult<()> {
        ensure_parent(path)?;
        let records: Vec<Value> = self.records().map(Value::Object).collect();
        let file = File::create(path).map_err(|e| TableError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &records).map_err(|e| TableError::json(path, e))?;
        writer.flush().map_err(|e| TableError::io(path, e))
    }

    /// Write the table as JSON Lines, one record per line
    pub fn save_jsonl(&self, path: &Path) -> TableResult<()> {
        ensure_parent(path)?;
        let file = File::create(path).map_err(|e| TableError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        for record in self.records() {
            serde_json::to_writer(&mut writer, &record).map_err(|e| TableError::json(path, e))?;
            writer.write_all(b"\n").map_err(|e| TableError::io(path, e))?;
        }
        writer.flush().map_err(|e| TableError::io(path, e))
    }

    /// Rows as JSON objects keyed by header, in column order
    pub fn records(&self) -> impl Iterator<Item = Map<String, Value>> + '_ {
        self.rows.iter().map(|row| {
            self.headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                .collect()
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of a column the caller cannot work without
    pub fn require_column(&self, name: &str) -> TableResult<usize> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Cell value; `None` when the column does not exist
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// All values of a column, top to bottom
    pub fn column(&self, name: &str) -> TableResult<Vec<&str>> {
        let col = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r[col].as_str()).collect())
    }

    /// Replace a column's values, appending the column if it is new
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> TableResult<()> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        match self.column_index(name) {
            Some(col) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[col] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Insert a new column at `index`
    pub fn insert_column(&mut self, index: usize, name: &str, values: Vec<String>) -> TableResult<()> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        let index = index.min(self.headers.len());
        self.headers.insert(index, name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(index, value);
        }
        Ok(())
    }

    /// Remove a column if present; returns whether it existed
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(col) = self.column_index(name) else {
            return false;
        };
        self.headers.remove(col);
        for row in &mut self.rows {
            row.remove(col);
        }
        true
    }

    /// Keep only the contiguous columns from `start` to `end`, inclusive
    pub fn slice_columns(&mut self, start: &str, end: &str) -> TableResult<()> {
        let from = self.require_column(start)?;
        let to = self.require_column(end)?;
        if from > to {
            return Err(TableError::ColumnOrder {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        self.headers = self.headers[from..=to].to_vec();
        for row in &mut self.rows {
            *row = row[from..=to].to_vec();
        }
        Ok(())
    }

    /// Keep rows for which `keep` returns true
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[String]) -> bool) {
        self.rows.retain(|row| keep(row));
    }

    /// Drop every row past the first `n`
    pub fn truncate(&mut self, n: usize) {
        self.rows.truncate(n);
    }

    /// Mutable access to one column's cells
    pub fn column_mut(&mut self, name: &str) -> TableResult<impl Iterator<Item = &mut String>> {
        let col = self.require_column(name)?;
        Ok(self.rows.iter_mut().map(move |r| &mut r[col]))
    }

    /// Typed comment records for the rows, in table order
    ///
    /// `Comment_Text` is required. Author, date and karma are read when the
    /// columns exist; empty authors are treated as absent.
    pub fn comment_records(&self) -> TableResult<Vec<CommentRecord>> {
        use columns::*;

        let text_col = self.require_column(COMMENT_TEXT)?;
        let author_col = self.column_index(COMMENT_AUTHOR);
        let date_col = self.column_index(COMMENT_DATE);
        let karma_col = self.column_index(COMMENT_KARMA);

        Ok(self
            .rows
            .iter()
            .map(|row| CommentRecord {
                author: author_col
                    .map(|c| row[c].trim())
                    .filter(|a| !a.is_empty())
                    .map(str::to_string),
                text: row[text_col].clone(),
                timestamp: date_col.and_then(|c| {
                    NaiveDateTime::parse_from_str(row[c].trim(), COMMENT_DATE_FORMAT).ok()
                }),
                score: karma_col
                    .and_then(|c| row[c].trim().parse().ok())
                    .unwrap_or_default(),
            })
            .collect())
    }
}

fn ensure_parent(path: &Path) -> TableResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| TableError::io(parent, e))
        }
        _ => Ok(()),
    }
}
