//! CSV loader for member datasets

use crate::error::{Error, Result};
use crate::record::{Dataset, RowRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Parse a CSV file into a Dataset
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let dataset = read_dataset(BufReader::new(file), path.to_path_buf())?;
    info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Parse CSV from a string (useful for testing)
pub fn parse_csv_str(content: &str, source_name: &str) -> Result<Dataset> {
    read_dataset(content.as_bytes(), PathBuf::from(source_name))
}

fn read_dataset<R: Read>(reader: R, path: PathBuf) -> Result<Dataset> {
    // Blank lines are skipped by the csv reader itself. Trimming also applies
    // inside quoted fields: `"  x  "` is read as `x`.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.clone(),
        source: e,
    })?;

    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(Error::CsvParse {
            path,
            message: "no columns found in CSV".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?;

        // A whitespace-only line trims down to nothing; treat it as blank
        if record.iter().all(str::is_empty) {
            continue;
        }

        if record.len() > columns.len() {
            warn!(
                row = row_idx + 1,
                path = %path.display(),
                "row has more cells than columns, truncating"
            );
        }

        // Short rows leave the trailing columns absent
        let row = RowRecord::from_pairs(
            columns
                .iter()
                .enumerate()
                .map(|(i, name)| (name.as_str(), record.get(i))),
        );
        rows.push(row);
    }

    Ok(Dataset {
        columns,
        rows,
        source_path: path,
    })
}
