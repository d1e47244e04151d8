//! Concatenation and splitting of tables

use crate::error::{Result, TableError};
use crate::model::Table;

impl Table {
    /// Union of two tables with identical schemas: self's rows followed
    /// by other's, widths taken as the element-wise maximum. Fails with
    /// [`TableError::LabelMismatch`] when the labels differ.
    pub fn concat(&self, other: &Table) -> Result<Table> {
        if self.labels != other.labels {
            return Err(TableError::LabelMismatch {
                expected: self.labels.clone(),
                found: other.labels.clone(),
            });
        }
        let mut rows = self.rows.clone();
        rows.extend(other.rows.iter().cloned());
        let mut result = self.derive(rows);
        result.max_length = self
            .max_length
            .iter()
            .zip(other.max_length.iter())
            .map(|(a, b)| *a.max(b))
            .collect();
        Ok(result)
    }

    /// Partition at a row boundary: rows `[0, at)` and `[at, end)`.
    /// Labels and widths are carried over, not recomputed. `at` may be
    /// 0 (empty first part) but not exceed the row count.
    pub fn split(&self, at: usize) -> Result<(Table, Table)> {
        if at > self.rows.len() {
            return Err(TableError::IndexOutOfRange {
                index: at,
                len: self.rows.len(),
            });
        }
        let first = self.derive(self.rows[..at].to_vec());
        let second = self.derive(self.rows[at..].to_vec());
        Ok((first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::CellValue;

    fn table(name: &str, labels: &[&str], rows: &[&[&str]]) -> Table {
        let mut t = Table::with_labels(name, labels.iter().map(|l| l.to_string()).collect());
        for row in rows {
            t.push_row(row.iter().map(|&v| CellValue::from(v)).collect())
                .unwrap();
        }
        t.refresh_widths();
        t
    }

    #[test]
    fn concat_appends_rows_and_maxes_widths() {
        let a = table("a", &["x", "y"], &[&["1", "long"], &["2", "yy"]]);
        let b = table("b", &["x", "y"], &[&["333", "z"]]);
        let joined = a.concat(&b).unwrap();
        assert_eq!(joined.row_count(), 3);
        assert_eq!(joined.rows()[2].cells[0], CellValue::from("333"));
        assert_eq!(joined.max_length(), &[3, 4]);
        assert_eq!(joined.labels(), a.labels());
    }

    #[test]
    fn concat_rejects_different_labels() {
        let a = table("a", &["x", "y"], &[]);
        let b = table("b", &["x", "z"], &[]);
        assert!(matches!(
            a.concat(&b),
            Err(TableError::LabelMismatch { .. })
        ));
    }

    #[test]
    fn split_partitions_at_the_boundary() {
        let t = table("t", &["v"], &[&["a"], &["b"], &["c"], &["d"]]);
        let (head, tail) = t.split(3).unwrap();
        assert_eq!(head.row_count(), 3);
        assert_eq!(tail.row_count(), 1);
        assert_eq!(tail.rows()[0].cells[0], CellValue::from("d"));
        assert_eq!(head.max_length(), t.max_length());

        let (empty, all) = t.split(0).unwrap();
        assert_eq!(empty.row_count(), 0);
        assert_eq!(all.row_count(), 4);
    }

    #[test]
    fn split_past_the_end_fails() {
        let t = table("t", &["v"], &[&["a"]]);
        assert!(matches!(
            t.split(2),
            Err(TableError::IndexOutOfRange { index: 2, len: 1 })
        ));
    }
}
