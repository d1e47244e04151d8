//! Delimited-text file encoder

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::model::{CellValue, Row, Table};

/// Write rows as CSV, always with a header line. `Null` cells become
/// empty fields.
pub(crate) fn write(table: &Table, path: &Path, rows: &[Row]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer.write_record(table.labels())?;
    for row in rows {
        writer.write_record(row.cells.iter().map(field))?;
    }
    writer.flush()?;
    Ok(())
}

fn field(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        other => other.display().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_rows_with_empty_null_fields() {
        let mut table = Table::with_labels("t", vec!["a".to_string(), "b".to_string()]);
        table
            .push_row(vec![CellValue::Int(1), CellValue::Null])
            .unwrap();
        table
            .push_row(vec![CellValue::from("x"), CellValue::Float(2.5)])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        write(&table, &path, table.rows()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a,b\n1,\nx,2.5\n");
    }
}
