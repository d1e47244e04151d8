//! Delimited-text file decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, TableError};
use crate::model::{CellValue, Row};

use super::{Decoded, FileFormat};

/// Decode a CSV file: the header row becomes the labels, every data
/// cell stays a string (type inference is deferred to the table).
/// Short records pad with `Null`, long records truncate to the header.
pub(crate) fn decode(path: &Path) -> Result<Decoded> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(TableError::EmptyPayload(path.display().to_string()));
    }
    let labels: Vec<String> = headers.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells: Vec<CellValue> = record
            .iter()
            .take(labels.len())
            .map(|field| CellValue::Str(field.to_string()))
            .collect();
        cells.resize(labels.len(), CellValue::Null);
        rows.push(Row::new(cells));
    }

    Ok(Decoded {
        labels,
        rows,
        format: FileFormat::Csv,
    })
}
