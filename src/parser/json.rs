//! Object-payload (JSON) file decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Result, TableError};
use crate::model::{CellValue, Row};

use super::{Decoded, FileFormat};

/// The two payload shapes a writer produces: a sequence of
/// row-mappings (full-table saves) or one label-to-values mapping
/// (chunked saves). Both normalize to rows here.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Rows(Vec<IndexMap<String, CellValue>>),
    Columns(IndexMap<String, Vec<CellValue>>),
}

pub(crate) fn decode(path: &Path) -> Result<Decoded> {
    let file = File::open(path)?;
    let payload: Payload = serde_json::from_reader(BufReader::new(file))?;

    let (labels, rows) = match payload {
        Payload::Rows(maps) => {
            let first = maps
                .first()
                .ok_or_else(|| TableError::EmptyPayload(path.display().to_string()))?;
            let labels: Vec<String> = first.keys().cloned().collect();
            let rows = maps
                .into_iter()
                .map(|mut map| {
                    let cells = labels
                        .iter()
                        .map(|label| map.shift_remove(label).unwrap_or(CellValue::Null))
                        .collect();
                    Row::new(cells)
                })
                .collect();
            (labels, rows)
        }
        Payload::Columns(columns) => {
            if columns.is_empty() {
                return Err(TableError::EmptyPayload(path.display().to_string()));
            }
            let labels: Vec<String> = columns.keys().cloned().collect();
            let height = columns.values().map(Vec::len).max().unwrap_or(0);
            let columns: Vec<Vec<CellValue>> = columns.into_values().collect();
            let rows = (0..height)
                .map(|i| {
                    let cells = columns
                        .iter()
                        .map(|col| col.get(i).cloned().unwrap_or(CellValue::Null))
                        .collect();
                    Row::new(cells)
                })
                .collect();
            (labels, rows)
        }
    };

    Ok(Decoded {
        labels,
        rows,
        format: FileFormat::Json,
    })
}
