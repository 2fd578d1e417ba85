/// In-memory table: a name, distinct column titles and a set of rows
use super::iterator::TableIterator;
use super::row::Row;
use crate::error::{DbError, Result};
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    titles: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table. Titles must be distinct (exact, case-sensitive
    /// comparison).
    pub fn new(name: impl Into<String>, titles: Vec<String>) -> Result<Self> {
        for (i, title) in titles.iter().enumerate() {
            if titles[i + 1..].contains(title) {
                return Err(DbError::DuplicateColumn(title.clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            titles,
            rows: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_count(&self) -> usize {
        self.titles.len()
    }

    /// Title of column `k`.
    pub fn title(&self, k: usize) -> Option<&str> {
        self.titles.get(k).map(String::as_str)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// 0-based position of the column titled `title`.
    pub fn column_index(&self, title: &str) -> Option<usize> {
        self.titles.iter().position(|t| t == title)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order. Callers should not rely on the order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Add `row` unless an equal row is already present. Returns whether the
    /// row was added.
    pub fn add(&mut self, row: Row) -> Result<bool> {
        if row.len() != self.column_count() {
            return Err(DbError::WrongRowLength {
                expected: self.column_count(),
                found: row.len(),
            });
        }
        if self.rows.contains(&row) {
            return Ok(false);
        }
        self.rows.push(row);
        Ok(true)
    }

    pub fn iterator(&self) -> TableIterator<'_> {
        TableIterator::new(self)
    }

    /// Write every row indented by two spaces, fields separated by spaces.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.rows {
            writeln!(out, "  {}", row)?;
        }
        Ok(())
    }
}
