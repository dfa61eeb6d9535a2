//! CSV output of flattened account users.
//!
//! The table always starts with the header row, followed by one row per user
//! in retrieval order.

use std::{fs::File, io, path::Path};
use tracing::{info, instrument};

use crate::{account_users::UserRow, error::Result};

/// Write the header and the given rows as CSV.
pub fn write_csv<W: io::Write>(writer: W, rows: &[UserRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(UserRow::HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) the file at `path` and write the table to it.
#[instrument(skip(path, rows), fields(path = %path.as_ref().display(), rows = rows.len()))]
pub fn write_csv_file<P: AsRef<Path>>(path: P, rows: &[UserRow]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv(io::BufWriter::new(file), rows)?;
    info!("wrote account users");
    Ok(())
}
