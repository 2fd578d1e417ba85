//! Table, row and column model

pub mod column;
pub mod iterator;
pub mod row;
pub mod table;

pub use column::{Column, UnresolvedColumn};
pub use iterator::TableIterator;
pub use row::Row;
pub use table::Table;
