//! Persistence of tables as `.db` text files

pub mod db_file;

pub use db_file::{format_table, parse_table, read_table, write_table};
