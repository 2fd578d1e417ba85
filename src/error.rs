//! Error types for the tinyrel query interpreter
//!
//! Every failure a statement can hit is a query error: the session reports it
//! and skips to the next statement. The variants only exist so callers (and
//! tests) can tell the cases apart.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    /// Unrecognized statement, token mismatch, bad literal.
    #[error("{0}")]
    Syntax(String),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// Raised by `print` for a name with no catalog entry.
    #[error("table {0} does not exist")]
    TableDoesNotExist(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("inserted row has wrong length: expected {expected}, got {found}")]
    WrongRowLength { expected: usize, found: usize },

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("{0} is not a valid relation")]
    InvalidRelation(String),

    /// A separator was missing or dangling in a comma-separated list.
    #[error("{0}")]
    Commas(String),

    /// Persisted table could not be found, read or written.
    #[error("{0}")]
    Storage(String),

    #[error("malformed table data: {0}")]
    MalformedData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        DbError::Syntax(msg.into())
    }

    pub fn commas(msg: impl Into<String>) -> Self {
        DbError::Commas(msg.into())
    }
}
