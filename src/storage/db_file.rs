//! `.db` table files
//!
//! Format: one header line of comma-joined column titles, then one
//! comma-joined line per row, each line ending in `\n`. There is no quoting,
//! so a value containing a comma does not survive a store/load round trip.

use crate::error::{DbError, Result};
use crate::types::{Row, Table};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Read the table stored at `path`, naming it `name`.
pub fn read_table(path: &Path, name: &str) -> Result<Table> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DbError::Storage(format!("could not find {}.db", name)),
        _ => DbError::Storage(format!("problem reading from {}.db", name)),
    })?;
    let table = parse_table(BufReader::new(file), name)?;
    info!(table = name, rows = table.len(), path = %path.display(), "table loaded");
    Ok(table)
}

/// Parse the `.db` format from any reader.
pub fn parse_table<R: BufRead>(reader: R, name: &str) -> Result<Table> {
    let reading = |_| DbError::Storage(format!("problem reading from {}.db", name));
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.map_err(reading)?,
        None => return Err(DbError::MalformedData("missing header in DB file".into())),
    };
    let titles: Vec<String> = split_line(&header);
    let mut table = Table::new(name, titles)?;

    for (n, line) in lines.enumerate() {
        let line = line.map_err(reading)?;
        let fields = split_line(&line);
        if fields.len() != table.column_count() {
            return Err(DbError::MalformedData(format!(
                "row {} of {}.db has {} fields, header has {}",
                n + 1,
                name,
                fields.len(),
                table.column_count()
            )));
        }
        table.add(Row::new(fields))?;
    }
    Ok(table)
}

/// Write `table` to `path`, replacing any existing file.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let trouble = |_| DbError::Storage(format!("trouble writing to {}.db", table.name()));
    let file = File::create(path).map_err(trouble)?;
    let mut out = BufWriter::new(file);
    format_table(&mut out, table).map_err(trouble)?;
    out.flush().map_err(trouble)?;
    info!(table = table.name(), rows = table.len(), path = %path.display(), "table stored");
    Ok(())
}

pub fn format_table<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    writeln!(out, "{}", table.titles().join(","))?;
    for row in table.rows() {
        writeln!(out, "{}", row.values().join(","))?;
    }
    debug!(table = table.name(), "table formatted");
    Ok(())
}

fn split_line(line: &str) -> Vec<String> {
    line.trim_end_matches('\r')
        .split(',')
        .map(str::to_string)
        .collect()
}
