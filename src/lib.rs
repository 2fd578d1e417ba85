//! tinyrel: a tiny relational query interpreter
//!
//! Statements (`create`, `load`, `store`, `insert`, `print`, `select`,
//! `exit`/`quit`) run against an in-memory catalog of string-valued tables.
//!
//! ## Architecture
//! - Data model: `Table` (distinct titles, set-like rows), `Row`, `Column`
//! - Cursor: `TableIterator`, positional, resettable
//! - Query layer: recursive-descent `Interpreter` + nested-loop `QueryExecutor`
//! - Persistence: comma-separated `.db` text files
//!
//! All comparisons are string comparisons; `'9' > '10'`.

pub mod config;
pub mod catalog;
pub mod storage;
pub mod types;
pub mod sql;

mod error;

pub use config::SessionConfig;
pub use error::{DbError, Result};
pub use catalog::Catalog;
pub use sql::{run_script, Flow, Interpreter, Tokenizer};
pub use types::{Column, Row, Table, TableIterator, UnresolvedColumn};
