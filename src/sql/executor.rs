/// Select execution: scan or nested-loop join, filter, project
///
/// Algorithm (two sources):
/// FOR each row of iterator 0:
///     reset iterator 1
///     FOR each row of iterator 1:
///         IF all conditions hold: add projected row to destination
///
/// Time complexity: O(n * m), every condition re-evaluated per pair.
/// No index, no pushdown, no sort. The destination's dedup-insert applies,
/// so distinct pairs with equal projections collapse into one row.
use super::condition::Condition;
use crate::error::{DbError, Result};
use crate::types::{Column, Row, Table, TableIterator};
use tracing::debug;

pub struct QueryExecutor<'a> {
    iterators: Vec<TableIterator<'a>>,
    columns: Vec<Column>,
    conditions: Vec<Condition>,
}

impl<'a> QueryExecutor<'a> {
    /// All columns and conditions must already be resolved against
    /// `iterators`, which must hold one or two cursors.
    pub fn new(
        iterators: Vec<TableIterator<'a>>,
        columns: Vec<Column>,
        conditions: Vec<Condition>,
    ) -> Result<Self> {
        if iterators.is_empty() || iterators.len() > 2 {
            return Err(DbError::syntax(format!(
                "select needs one or two source tables, got {}",
                iterators.len()
            )));
        }
        Ok(Self {
            iterators,
            columns,
            conditions,
        })
    }

    /// Fill `dest` and return the number of rows added to it.
    pub fn execute(mut self, dest: &mut Table) -> Result<usize> {
        if dest.column_count() != self.columns.len() {
            return Err(DbError::WrongRowLength {
                expected: dest.column_count(),
                found: self.columns.len(),
            });
        }

        let added = if self.iterators.len() == 1 {
            self.scan(dest)?
        } else {
            self.nested_loop(dest)?
        };

        debug!(
            sources = self.iterators.len(),
            columns = self.columns.len(),
            conditions = self.conditions.len(),
            added,
            table = dest.name(),
            "select executed"
        );
        Ok(added)
    }

    fn scan(&mut self, dest: &mut Table) -> Result<usize> {
        let mut added = 0;
        while self.iterators[0].has_row() {
            if self.emit(dest)? {
                added += 1;
            }
            if self.iterators[0].advance().is_none() {
                break;
            }
        }
        Ok(added)
    }

    fn nested_loop(&mut self, dest: &mut Table) -> Result<usize> {
        let mut added = 0;
        while self.iterators[0].has_row() {
            self.iterators[1].reset();
            while self.iterators[1].has_row() {
                if self.emit(dest)? {
                    added += 1;
                }
                if self.iterators[1].advance().is_none() {
                    break;
                }
            }
            if self.iterators[0].advance().is_none() {
                break;
            }
        }
        Ok(added)
    }

    /// Test the conditions at the current position and, if they hold, add
    /// the projected row.
    fn emit(&self, dest: &mut Table) -> Result<bool> {
        if !Condition::test_all(&self.conditions, &self.iterators) {
            return Ok(false);
        }
        let values: Option<Vec<String>> = self
            .columns
            .iter()
            .map(|c| c.value(&self.iterators).map(str::to_string))
            .collect();
        match values {
            Some(values) => dest.add(Row::new(values)),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::condition::Relation;
    use crate::types::UnresolvedColumn;

    fn table(name: &str, titles: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(name, titles.iter().map(|t| t.to_string()).collect()).unwrap();
        for row in rows {
            table.add(Row::from(*row)).unwrap();
        }
        table
    }

    fn resolve(names: &[&str], iterators: &[TableIterator<'_>]) -> Vec<Column> {
        names
            .iter()
            .map(|n| UnresolvedColumn::new(None, *n).resolve(iterators).unwrap())
            .collect()
    }

    fn rows(table: &Table) -> Vec<String> {
        table.rows().iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_single_source_filter() {
        let students = table(
            "students",
            &["SID", "Lastname"],
            &[&["101", "Knowles"], &["102", "Chan"], &["103", "Xavier"]],
        );
        let iterators = vec![students.iterator()];
        let columns = resolve(&["Lastname"], &iterators);
        let sid = resolve(&["SID"], &iterators).remove(0);
        let conditions = vec![Condition::with_literal(sid, Relation::Gt, "101")];

        let mut dest = table("out", &["Lastname"], &[]);
        let added = QueryExecutor::new(iterators, columns, conditions)
            .unwrap()
            .execute(&mut dest)
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(rows(&dest), vec!["Chan", "Xavier"]);
    }

    #[test]
    fn test_join_on_equality() {
        let r = table("R", &["x"], &[&["1"], &["2"]]);
        let s = table("S", &["y"], &[&["2"], &["3"]]);
        let iterators = vec![r.iterator(), s.iterator()];
        let columns = resolve(&["x", "y"], &iterators);
        let mut operands = resolve(&["x", "y"], &iterators);
        let right = operands.pop().unwrap();
        let left = operands.pop().unwrap();
        let conditions = vec![Condition::new(left, Relation::Eq, right)];

        let mut dest = table("out", &["x", "y"], &[]);
        QueryExecutor::new(iterators, columns, conditions)
            .unwrap()
            .execute(&mut dest)
            .unwrap();
        assert_eq!(rows(&dest), vec!["2 2"]);
    }

    #[test]
    fn test_cross_product_order() {
        let r = table("R", &["x"], &[&["1"], &["2"]]);
        let s = table("S", &["y"], &[&["a"], &["b"]]);
        let iterators = vec![r.iterator(), s.iterator()];
        let columns = resolve(&["x", "y"], &iterators);

        let mut dest = table("out", &["x", "y"], &[]);
        QueryExecutor::new(iterators, columns, vec![])
            .unwrap()
            .execute(&mut dest)
            .unwrap();
        assert_eq!(rows(&dest), vec!["1 a", "1 b", "2 a", "2 b"]);
    }

    #[test]
    fn test_projection_collapses_duplicates() {
        let r = table("R", &["x", "k"], &[&["1", "p"], &["1", "q"]]);
        let iterators = vec![r.iterator()];
        let columns = resolve(&["x"], &iterators);

        let mut dest = table("out", &["x"], &[]);
        let added = QueryExecutor::new(iterators, columns, vec![])
            .unwrap()
            .execute(&mut dest)
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(dest.len(), 1);
    }

    #[test]
    fn test_empty_sources() {
        let r = table("R", &["x"], &[&["1"]]);
        let s = table("S", &["y"], &[]);
        let iterators = vec![r.iterator(), s.iterator()];
        let columns = resolve(&["x", "y"], &iterators);

        let mut dest = table("out", &["x", "y"], &[]);
        let added = QueryExecutor::new(iterators, columns, vec![])
            .unwrap()
            .execute(&mut dest)
            .unwrap();
        assert_eq!(added, 0);
    }

    #[test]
    fn test_source_count_checked() {
        assert!(QueryExecutor::new(vec![], vec![], vec![]).is_err());
    }
}
