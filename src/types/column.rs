/// Column selectors and value sources
///
/// A selector is parsed as an [`UnresolvedColumn`]. Resolving it against the
/// active iterators consumes it and yields a [`Column`], which can no longer
/// be resolved. Literal operands are built directly as [`Column::Constant`].
use super::iterator::TableIterator;
use crate::error::{DbError, Result};
use std::fmt;

/// `[table.]column` as written in a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedColumn {
    table: Option<String>,
    name: String,
}

impl UnresolvedColumn {
    pub fn new(table: Option<String>, name: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Bind to the first iterator whose table matches the qualifier (if any)
    /// and has a column with this name.
    pub fn resolve(self, iterators: &[TableIterator<'_>]) -> Result<Column> {
        for (iterator, iter) in iterators.iter().enumerate() {
            let table = iter.table();
            if let Some(qualifier) = &self.table {
                if table.name() != qualifier {
                    continue;
                }
            }
            if let Some(field) = table.column_index(&self.name) {
                return Ok(Column::Resolved {
                    name: self.name,
                    iterator,
                    field,
                });
            }
            if self.table.is_some() {
                break;
            }
        }
        Err(DbError::UnknownColumn(self.to_string()))
    }
}

impl fmt::Display for UnresolvedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Field `field` of the current row of `iterators[iterator]`.
    Resolved {
        name: String,
        iterator: usize,
        field: usize,
    },
    /// Fixed value, e.g. a literal in a condition.
    Constant(String),
}

impl Column {
    pub fn constant(value: impl Into<String>) -> Self {
        Column::Constant(value.into())
    }

    /// Column title, or the value itself for a constant.
    pub fn name(&self) -> &str {
        match self {
            Column::Resolved { name, .. } => name.as_str(),
            Column::Constant(value) => value.as_str(),
        }
    }

    /// Current value. `None` only if the bound iterator has no current row.
    pub fn value<'s, 'a: 's>(&'s self, iterators: &[TableIterator<'a>]) -> Option<&'s str> {
        match self {
            Column::Resolved { iterator, field, .. } => {
                iterators.get(*iterator).and_then(|it| it.value(*field))
            }
            Column::Constant(value) => Some(value.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Row, Table};

    fn table(name: &str, titles: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(name, titles.iter().map(|t| t.to_string()).collect()).unwrap();
        for row in rows {
            table.add(Row::from(*row)).unwrap();
        }
        table
    }

    #[test]
    fn test_resolve_unqualified() {
        let r = table("R", &["x", "z"], &[&["1", "a"]]);
        let s = table("S", &["y"], &[&["2"]]);
        let iterators = vec![r.iterator(), s.iterator()];

        let col = UnresolvedColumn::new(None, "y").resolve(&iterators).unwrap();
        assert_eq!(col, Column::Resolved { name: "y".into(), iterator: 1, field: 0 });
        assert_eq!(col.value(&iterators), Some("2"));

        let col = UnresolvedColumn::new(None, "z").resolve(&iterators).unwrap();
        assert_eq!(col.value(&iterators), Some("a"));
    }

    #[test]
    fn test_resolve_qualified() {
        let r = table("R", &["x"], &[&["1"]]);
        let s = table("S", &["x"], &[&["2"]]);
        let iterators = vec![r.iterator(), s.iterator()];

        let col = UnresolvedColumn::new(Some("S".into()), "x").resolve(&iterators).unwrap();
        assert_eq!(col.value(&iterators), Some("2"));

        // Unqualified picks the first source that has the column.
        let col = UnresolvedColumn::new(None, "x").resolve(&iterators).unwrap();
        assert_eq!(col.value(&iterators), Some("1"));
    }

    #[test]
    fn test_resolve_failures() {
        let r = table("R", &["x"], &[]);
        let iterators = vec![r.iterator()];

        let err = UnresolvedColumn::new(None, "w").resolve(&iterators).unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn(ref c) if c == "w"));

        // Qualifier names a table that is not being scanned.
        let err = UnresolvedColumn::new(Some("S".into()), "y").resolve(&iterators).unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn(ref c) if c == "S.y"));
    }

    #[test]
    fn test_constant() {
        let col = Column::constant("Jim");
        assert_eq!(col.name(), "Jim");
        assert_eq!(col.value(&[]), Some("Jim"));
    }
}
