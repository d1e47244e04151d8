//! Plain-text report encoder
//!
//! Layout: a 10-wide left-justified gutter holding the 1-based row
//! number (empty on the header line), then each field left-justified
//! to the column's cached width plus five, with one trailing space.
//! Widths come from [`Table::max_length`], so a stale cache renders a
//! stale layout; callers refresh widths after mutating.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::{Row, Table};

pub(crate) fn write(table: &Table, path: &Path, rows: &[Row], first_row_number: usize) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    write_line(&mut out, table, "", table.labels().iter().map(String::as_str))?;
    for (i, row) in rows.iter().enumerate() {
        let number = (first_row_number + i).to_string();
        let fields: Vec<String> = row
            .cells
            .iter()
            .map(|cell| cell.display().into_owned())
            .collect();
        write_line(&mut out, table, &number, fields.iter().map(String::as_str))?;
    }
    out.flush()?;
    Ok(())
}

fn write_line<'a, W: Write>(
    out: &mut W,
    table: &Table,
    gutter: &str,
    fields: impl Iterator<Item = &'a str>,
) -> std::io::Result<()> {
    write!(out, "{gutter:<10}")?;
    for (col, field) in fields.enumerate() {
        let width = table.max_length().get(col).copied().unwrap_or(0) + 5;
        write!(out, "{field:<width$} ")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::CellValue;

    #[test]
    fn gutter_and_padded_fields() {
        let mut table = Table::with_labels("t", vec!["id".to_string(), "name".to_string()]);
        table
            .push_row(vec![CellValue::from("1"), CellValue::from("ann")])
            .unwrap();
        table
            .push_row(vec![CellValue::from("2"), CellValue::Null])
            .unwrap();
        table.refresh_widths(); // id -> 1, name -> 4 ("None")

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        write(&table, &path, table.rows(), 1).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "          id     name      ");
        assert_eq!(lines[1], "1         1      ann       ");
        assert_eq!(lines[2], "2         2      None      ");
    }

    #[test]
    fn chunk_numbering_stays_global() {
        let mut table = Table::with_labels("t", vec!["v".to_string()]);
        for v in ["a", "b"] {
            table.push_row(vec![CellValue::from(v)]).unwrap();
        }
        table.refresh_widths();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t2.txt");
        write(&table, &path, &table.rows()[1..], 2).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.lines().nth(1).unwrap().starts_with("2         b"));
    }
}
