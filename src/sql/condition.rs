/// WHERE-clause conditions
///
/// Every relation compares the two operands' current values as strings, so
/// `'9' > '10'` holds. No numeric coercion is done.
use crate::error::DbError;
use crate::types::{Column, TableIterator};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl Relation {
    /// Whether a three-way comparison result satisfies this relation.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Relation::Lt => ordering == Ordering::Less,
            Relation::Gt => ordering == Ordering::Greater,
            Relation::Le => ordering != Ordering::Greater,
            Relation::Ge => ordering != Ordering::Less,
            Relation::Eq => ordering == Ordering::Equal,
            Relation::Ne => ordering != Ordering::Equal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Lt => "<",
            Relation::Gt => ">",
            Relation::Le => "<=",
            Relation::Ge => ">=",
            Relation::Eq => "=",
            Relation::Ne => "!=",
        }
    }
}

impl FromStr for Relation {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Relation::Lt),
            ">" => Ok(Relation::Gt),
            "<=" => Ok(Relation::Le),
            ">=" => Ok(Relation::Ge),
            "=" => Ok(Relation::Eq),
            "!=" => Ok(Relation::Ne),
            other => Err(DbError::InvalidRelation(other.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `left RELATION right` over resolved columns or constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    left: Column,
    relation: Relation,
    right: Column,
}

impl Condition {
    pub fn new(left: Column, relation: Relation, right: Column) -> Self {
        Self { left, relation, right }
    }

    /// `left RELATION 'value'`
    pub fn with_literal(left: Column, relation: Relation, value: impl Into<String>) -> Self {
        Self::new(left, relation, Column::constant(value))
    }

    /// Evaluate against the current rows of `iterators`. An operand whose
    /// iterator has no current row never satisfies anything.
    pub fn test(&self, iterators: &[TableIterator<'_>]) -> bool {
        match (self.left.value(iterators), self.right.value(iterators)) {
            (Some(left), Some(right)) => self.relation.holds(left.cmp(right)),
            _ => false,
        }
    }

    /// Conjunction of `conditions`; true when the list is empty.
    pub fn test_all(conditions: &[Condition], iterators: &[TableIterator<'_>]) -> bool {
        conditions.iter().all(|c| c.test(iterators))
    }
}
