//! Table catalog owned by one interpreter session

use crate::error::{DbError, Result};
use crate::types::Table;
use ahash::AHashMap;

/// Name -> table mapping. Registering a table under an existing name
/// replaces the old one.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    tables: AHashMap<String, Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `table` under its own name, returning the table it replaced.
    pub fn insert(&mut self, table: Table) -> Option<Table> {
        self.tables.insert(table.name().to_string(), table)
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// Like `get`, but a missing table is an `UnknownTable` error.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.get(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.get_mut(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
