//! CSV export of merged records

use crate::error::{Error, Result};
use crate::record::RowRecord;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Union of the columns of `rows`, in first-seen order
pub fn export_header(rows: &[RowRecord]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut header = Vec::new();

    for row in rows {
        for column in row.columns() {
            if seen.insert(column) {
                header.push(column);
            }
        }
    }

    header
}

/// Write `rows` to a CSV file.
///
/// Nothing is created when `rows` is empty. Returns the number of rows
/// written.
pub fn write_csv<P: AsRef<Path>>(rows: &[RowRecord], path: P) -> Result<usize> {
    let path = path.as_ref();

    if rows.is_empty() {
        info!(path = %path.display(), "no records to export, skipping write");
        return Ok(0);
    }

    let file = File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_rows(rows, BufWriter::new(file), path.to_path_buf())?;

    info!(path = %path.display(), rows = rows.len(), "exported merged records");
    Ok(rows.len())
}

/// Render `rows` as CSV text (useful for testing)
pub fn write_csv_string(rows: &[RowRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(rows, &mut buffer, PathBuf::from("<memory>"))?;
    Ok(String::from_utf8(buffer)?)
}

fn write_rows<W: Write>(rows: &[RowRecord], writer: W, path: PathBuf) -> Result<()> {
    let header = export_header(rows);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let csv_err = |e: csv::Error| Error::Csv {
        path: path.clone(),
        source: e,
    };

    csv_writer.write_record(&header).map_err(csv_err)?;

    for row in rows {
        // Columns a record does not carry, or carries without a value, stay empty
        let cells = header.iter().map(|column| row.get(column).unwrap_or(""));
        csv_writer.write_record(cells).map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| Error::FileWrite {
        path: path.clone(),
        source: e,
    })
}
