//! Session catalog: table name -> Table

mod registry;

pub use registry::Catalog;
