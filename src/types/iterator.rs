/// Positional cursor over a table's rows
///
/// The cursor borrows its table, so the table cannot change underneath it.
/// The row count is fixed when the cursor is created.
use super::row::Row;
use super::table::Table;

#[derive(Debug, Clone)]
pub struct TableIterator<'a> {
    table: &'a Table,
    end: usize,
    /// `None` once the cursor has run past the last row.
    position: Option<usize>,
}

impl<'a> TableIterator<'a> {
    /// A cursor positioned on the first row, or exhausted if there is none.
    pub fn new(table: &'a Table) -> Self {
        let end = table.len();
        Self {
            table,
            end,
            position: if end > 0 { Some(0) } else { None },
        }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Move to the next row and return it. Returns `None`, and stays
    /// exhausted, when no row remains.
    pub fn advance(&mut self) -> Option<&'a Row> {
        self.position = match self.position {
            Some(p) if p + 1 < self.end => Some(p + 1),
            _ => None,
        };
        self.current()
    }

    /// Return to the first row.
    pub fn reset(&mut self) {
        self.position = if self.end > 0 { Some(0) } else { None };
    }

    pub fn has_row(&self) -> bool {
        self.position.is_some()
    }

    pub fn current(&self) -> Option<&'a Row> {
        let table = self.table;
        self.position.and_then(|p| table.rows().get(p))
    }

    /// Field `k` of the current row.
    pub fn value(&self, k: usize) -> Option<&'a str> {
        self.current().and_then(|row| row.get(k))
    }
}
