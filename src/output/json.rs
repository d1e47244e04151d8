//! Object-payload (JSON) file encoder

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{CellValue, Row, Table};

/// Full-table shape: a sequence of row-mappings in label order.
pub(crate) fn write_rows(table: &Table, path: &Path, rows: &[Row]) -> Result<()> {
    let payload: Vec<IndexMap<&str, &CellValue>> = rows
        .iter()
        .map(|row| {
            table
                .labels()
                .iter()
                .map(String::as_str)
                .zip(row.cells.iter())
                .collect()
        })
        .collect();

    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), &payload)?;
    Ok(())
}

/// Chunk shape: one label-to-values mapping per file. Asymmetric with
/// [`write_rows`] on purpose; the decoder accepts both shapes.
pub(crate) fn write_columns(table: &Table, path: &Path, rows: &[Row]) -> Result<()> {
    let payload: IndexMap<&str, Vec<&CellValue>> = table
        .labels()
        .iter()
        .enumerate()
        .map(|(col, label)| {
            let values = rows.iter().filter_map(|row| row.get(col)).collect();
            (label.as_str(), values)
        })
        .collect();

    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), &payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::with_labels("t", vec!["id".to_string(), "name".to_string()]);
        t.push_row(vec![CellValue::Int(1), CellValue::from("ann")])
            .unwrap();
        t.push_row(vec![CellValue::Int(2), CellValue::Null]).unwrap();
        t
    }

    #[test]
    fn rows_shape_is_a_mapping_sequence() {
        let t = table();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        write_rows(&t, &path, t.rows()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            r#"[{"id":1,"name":"ann"},{"id":2,"name":null}]"#
        );
    }

    #[test]
    fn columns_shape_is_a_label_keyed_mapping() {
        let t = table();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t1.json");
        write_columns(&t, &path, t.rows()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, r#"{"id":[1,2],"name":["ann",null]}"#);
    }
}
