//! Core record types for representing member datasets

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A parsed dataset from a single CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names, in header order
    pub columns: Vec<String>,
    /// Row data, in file order
    pub rows: Vec<RowRecord>,
    /// Source file path
    pub source_path: PathBuf,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            source_path,
        }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the header declares a column
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// One row: an ordered mapping from column name to an optional text value.
///
/// `None` means the value is absent. The empty string is a present value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    fields: Vec<(String, Option<String>)>,
}

impl RowRecord {
    /// Create a new empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs, keeping their order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name, value.map(Into::into));
        }
        record
    }

    /// Number of columns on this record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check whether the column exists, whatever its value
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Get a present value by column name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Set a column, replacing the value in place if it already exists
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Add a column only if it does not exist yet.
    ///
    /// Returns `true` if the column was added.
    pub fn insert_if_absent(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.fields.push((name.to_string(), Some(value.to_string())));
        true
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// `(column, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }
}
