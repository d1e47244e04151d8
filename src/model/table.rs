//! Table and Row data structures

use indexmap::IndexMap;

use crate::error::{CoercionReport, Result, TableError};
use crate::parser::FileFormat;

use super::value::{infer_column_type, CellType, CellValue};

/// A row in the table: cell values in column order.
///
/// Every row in a table holds exactly one cell per column label, in
/// schema order; [`Table::push_row`] enforces the arity.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Get a cell value by column index.
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// Column addressing: 0-based position or label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    Index(usize),
    Label(String),
}

impl From<usize> for ColumnKey {
    fn from(index: usize) -> Self {
        ColumnKey::Index(index)
    }
}

impl From<&str> for ColumnKey {
    fn from(label: &str) -> Self {
        ColumnKey::Label(label.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(label: String) -> Self {
        ColumnKey::Label(label)
    }
}

/// The central tabular container.
///
/// A table starts empty; the first successful load fixes its column
/// labels, and every later load or concatenation is checked against
/// them. Display widths and inferred column types are memoized caches:
/// they are recomputed by [`Table::refresh_widths`] and the
/// [`Table::column_types`] family, never invalidated behind the
/// caller's back, so they go stale after mutation until refreshed.
///
/// Tables are plain single-threaded values with no internal locking;
/// sharing one across threads while mutating it is out of contract.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub(crate) name: String,
    pub(crate) labels: Vec<String>,
    pub(crate) rows: Vec<Row>,
    pub(crate) max_length: Vec<usize>,
    pub(crate) types_by_index: Vec<CellType>,
    pub(crate) types_by_label: IndexMap<String, CellType>,
    pub(crate) source_format: Option<FileFormat>,
}

impl Table {
    /// Create an empty table; `name` is the default save target stem.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a table with its labels already fixed.
    pub fn with_labels(name: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            name: name.into(),
            labels,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    /// Cached per-column display widths (stale after mutation until
    /// [`Table::refresh_widths`] is called).
    pub fn max_length(&self) -> &[usize] {
        &self.max_length
    }

    /// Format the table was last loaded from, used as the save default.
    pub fn source_format(&self) -> Option<FileFormat> {
        self.source_format
    }

    /// Append a row, enforcing one cell per column.
    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<()> {
        if cells.len() != self.labels.len() {
            return Err(TableError::RowCountMismatch {
                expected: self.labels.len(),
                found: cells.len(),
            });
        }
        self.rows.push(Row::new(cells));
        Ok(())
    }

    /// Resolve a column key to its 0-based position.
    pub fn column_index(&self, key: impl Into<ColumnKey>) -> Result<usize> {
        match key.into() {
            ColumnKey::Index(i) if i < self.labels.len() => Ok(i),
            ColumnKey::Index(i) => Err(TableError::ColumnNotFound(format!("#{i}"))),
            ColumnKey::Label(label) => self
                .labels
                .iter()
                .position(|l| *l == label)
                .ok_or(TableError::ColumnNotFound(label)),
        }
    }

    /// Recompute per-column display widths from the current rows.
    ///
    /// Widths consider cell values only, never the header labels. An
    /// empty table gets width 0 for every column.
    pub fn refresh_widths(&mut self) {
        self.max_length = (0..self.labels.len())
            .map(|col| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.display().chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
    }

    /// Re-infer every column's type and return them by position.
    pub fn column_types(&mut self) -> &[CellType] {
        self.infer_types();
        &self.types_by_index
    }

    /// Re-infer every column's type and return them by label.
    pub fn column_types_by_label(&mut self) -> &IndexMap<String, CellType> {
        self.infer_types();
        &self.types_by_label
    }

    /// Full inference pass refreshing both type maps.
    pub(crate) fn infer_types(&mut self) {
        self.types_by_index = (0..self.labels.len())
            .map(|col| infer_column_type(self.rows.iter().filter_map(|row| row.get(col))))
            .collect();
        self.types_by_label = self
            .labels
            .iter()
            .cloned()
            .zip(self.types_by_index.iter().copied())
            .collect();
    }

    /// Rows `[start, stop)` in 1-based numbering; `stop` defaults to
    /// `start + 1`, so the default is a single row. The end is clamped
    /// to the row count; `start == 0` is out of range.
    pub fn rows_by_number(&self, start: usize, stop: Option<usize>) -> Result<&[Row]> {
        let (begin, end) = self.number_range(start, stop)?;
        Ok(&self.rows[begin..end])
    }

    /// Same range as [`Table::rows_by_number`], but returned as a new
    /// table with cloned rows and copied label/width metadata.
    pub fn rows_by_number_copy(&self, start: usize, stop: Option<usize>) -> Result<Table> {
        let (begin, end) = self.number_range(start, stop)?;
        Ok(self.derive(self.rows[begin..end].to_vec()))
    }

    fn number_range(&self, start: usize, stop: Option<usize>) -> Result<(usize, usize)> {
        if start == 0 {
            return Err(TableError::IndexOutOfRange {
                index: start,
                len: self.rows.len(),
            });
        }
        let begin = (start - 1).min(self.rows.len());
        let end = stop
            .unwrap_or(start + 1)
            .saturating_sub(1)
            .min(self.rows.len());
        Ok((begin, end.max(begin)))
    }

    /// Rows whose first-column value is a member of `keys`.
    pub fn rows_by_index(&self, keys: &[CellValue]) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|row| row.get(0).is_some_and(|cell| keys.contains(cell)))
            .collect()
    }

    /// Same selection as [`Table::rows_by_index`], as a new table.
    pub fn rows_by_index_copy(&self, keys: &[CellValue]) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.get(0).is_some_and(|cell| keys.contains(cell)))
            .cloned()
            .collect();
        self.derive(rows)
    }

    /// Read the first row's cell in the given column.
    pub fn value(&self, column: impl Into<ColumnKey>) -> Result<&CellValue> {
        let col = self.column_index(column)?;
        self.rows
            .first()
            .and_then(|row| row.get(col))
            .ok_or(TableError::IndexOutOfRange {
                index: 0,
                len: self.rows.len(),
            })
    }

    /// Read a whole column.
    pub fn values(&self, column: impl Into<ColumnKey>) -> Result<Vec<CellValue>> {
        let col = self.column_index(column)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.get(col))
            .cloned()
            .collect())
    }

    /// Write one cell (`row` is 0-based), coercing the value to the
    /// column's freshly re-inferred type. Coercion failure and bad row
    /// indices abort with an error.
    pub fn set_value(
        &mut self,
        value: CellValue,
        column: impl Into<ColumnKey>,
        row: usize,
    ) -> Result<()> {
        let col = self.column_index(column)?;
        self.infer_types();
        let target = self.types_by_index[col];
        if row >= self.rows.len() {
            return Err(TableError::IndexOutOfRange {
                index: row,
                len: self.rows.len(),
            });
        }
        self.rows[row].cells[col] = value.coerce(target)?;
        Ok(())
    }

    /// Write a whole column, coercing each value to the column's
    /// re-inferred type. A length mismatch aborts; per-cell coercion
    /// failures leave that cell unmodified and are collected into the
    /// returned report while the batch continues.
    pub fn set_values(
        &mut self,
        values: Vec<CellValue>,
        column: impl Into<ColumnKey>,
    ) -> Result<CoercionReport> {
        let col = self.column_index(column)?;
        if values.len() != self.rows.len() {
            return Err(TableError::RowCountMismatch {
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.infer_types();
        let target = self.types_by_index[col];
        let label = self.labels[col].clone();

        let mut report = CoercionReport::default();
        for (row, value) in values.into_iter().enumerate() {
            match value.coerce(target) {
                Ok(cell) => self.rows[row].cells[col] = cell,
                Err(_) => report.record(row, &label, value.display().into_owned(), target),
            }
        }
        Ok(report)
    }

    /// Explicitly retype whole columns, the only route to a boolean
    /// column. Unknown columns abort; per-cell failures are collected
    /// like in [`Table::set_values`].
    pub fn set_column_types<K>(
        &mut self,
        assignments: impl IntoIterator<Item = (K, CellType)>,
    ) -> Result<CoercionReport>
    where
        K: Into<ColumnKey>,
    {
        let mut report = CoercionReport::default();
        for (key, target) in assignments {
            let col = self.column_index(key)?;
            let label = self.labels[col].clone();
            for row in 0..self.rows.len() {
                let current = &self.rows[row].cells[col];
                match current.coerce(target) {
                    Ok(cell) => self.rows[row].cells[col] = cell,
                    Err(_) => {
                        let value = current.display().into_owned();
                        report.record(row, &label, value, target);
                    }
                }
            }
        }
        Ok(report)
    }

    /// New table carrying this table's label/width metadata and format,
    /// with the given rows and empty type caches.
    pub(crate) fn derive(&self, rows: Vec<Row>) -> Table {
        Table {
            name: self.name.clone(),
            labels: self.labels.clone(),
            rows,
            max_length: self.max_length.clone(),
            types_by_index: Vec::new(),
            types_by_label: IndexMap::new(),
            source_format: self.source_format,
        }
    }

    /// Merge decoded file contents: the first merge fixes the labels,
    /// later merges must match them exactly and contribute nothing on
    /// failure.
    pub(crate) fn merge_decoded(
        &mut self,
        labels: Vec<String>,
        rows: Vec<Row>,
        format: FileFormat,
    ) -> Result<()> {
        if self.labels.is_empty() {
            self.labels = labels;
        } else if self.labels != labels {
            return Err(TableError::LabelMismatch {
                expected: self.labels.clone(),
                found: labels,
            });
        }
        self.rows.extend(rows);
        self.source_format = Some(format);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::with_labels(
            "sample",
            vec!["id".to_string(), "score".to_string(), "note".to_string()],
        );
        for (id, score, note) in [
            ("1", "10", "aa"),
            ("2", "20", "bbb"),
            ("3", "30", "c"),
            ("4", "40", "dd"),
            ("5", "50", "eeee"),
        ] {
            t.push_row(vec![id.into(), score.into(), note.into()])
                .unwrap();
        }
        t.refresh_widths();
        t
    }

    #[test]
    fn push_row_enforces_arity() {
        let mut t = Table::with_labels("t", vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(
            t.push_row(vec![CellValue::from("1")]),
            Err(TableError::RowCountMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn widths_track_longest_rendered_value() {
        let t = sample();
        assert_eq!(t.max_length(), &[1, 2, 4]);
    }

    #[test]
    fn column_types_recompute_and_agree_across_maps() {
        let mut t = sample();
        assert_eq!(
            t.column_types(),
            &[CellType::Int, CellType::Int, CellType::Str]
        );
        let by_label = t.column_types_by_label().clone();
        assert_eq!(by_label["score"], CellType::Int);
        // Idempotent re-inference
        assert_eq!(t.column_types_by_label(), &by_label);
    }

    #[test]
    fn rows_by_number_is_start_inclusive_stop_exclusive() {
        let t = sample();
        let slice = t.rows_by_number(2, Some(4)).unwrap();
        assert_eq!(slice.len(), 2);
        assert_eq!(slice[0].cells[0], CellValue::from("2"));
        assert_eq!(slice[1].cells[0], CellValue::from("3"));
        // Default is a single row
        assert_eq!(t.rows_by_number(5, None).unwrap().len(), 1);
        assert!(t.rows_by_number(0, None).is_err());
    }

    #[test]
    fn rows_by_number_copy_is_private() {
        let t = sample();
        let mut copy = t.rows_by_number_copy(1, Some(3)).unwrap();
        assert_eq!(copy.row_count(), 2);
        assert_eq!(copy.labels(), t.labels());
        assert_eq!(copy.max_length(), t.max_length());
        copy.set_value(99i64.into(), "score", 0).unwrap();
        assert_eq!(t.rows()[0].cells[1], CellValue::from("10"));
    }

    #[test]
    fn rows_by_index_is_membership_on_first_column() {
        let t = sample();
        let hits = t.rows_by_index(&["2".into(), "5".into(), "9".into()]);
        assert_eq!(hits.len(), 2);
        let copy = t.rows_by_index_copy(&["3".into()]);
        assert_eq!(copy.row_count(), 1);
        assert_eq!(copy.rows()[0].cells[2], CellValue::from("c"));
    }

    #[test]
    fn value_reads_first_row() {
        let t = sample();
        assert_eq!(t.value("note").unwrap(), &CellValue::from("aa"));
        assert_eq!(t.value(0usize).unwrap(), &CellValue::from("1"));
        assert_eq!(t.values("id").unwrap().len(), 5);
        assert_eq!(t.values(1usize).unwrap()[4], CellValue::from("50"));
        assert!(matches!(
            t.value("missing"),
            Err(TableError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn set_value_coerces_to_current_column_type() {
        let mut t = sample();
        // score infers int, so a float narrows on write
        t.set_value(CellValue::Float(7.9), "score", 1).unwrap();
        assert_eq!(t.rows()[1].cells[1], CellValue::Int(7));
        assert!(matches!(
            t.set_value("abc".into(), "score", 0),
            Err(TableError::TypeCoercion { .. })
        ));
        assert!(matches!(
            t.set_value(1i64.into(), "score", 99),
            Err(TableError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn set_values_skips_bad_cells_and_reports() {
        let mut t = sample();
        let report = t
            .set_values(
                vec!["1".into(), "x".into(), "3".into(), "4".into(), "5".into()],
                "score",
            )
            .unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].row, 1);
        assert_eq!(report.failures[0].column, "score");
        // Failed cell untouched, the rest written
        assert_eq!(t.rows()[1].cells[1], CellValue::from("20"));
        assert_eq!(t.rows()[2].cells[1], CellValue::Int(3));
    }

    #[test]
    fn set_values_rejects_length_mismatch() {
        let mut t = sample();
        assert!(matches!(
            t.set_values(vec!["1".into()], "score"),
            Err(TableError::RowCountMismatch {
                expected: 5,
                found: 1
            })
        ));
    }

    #[test]
    fn set_column_types_reaches_bool() {
        let mut t = sample();
        let report = t.set_column_types([("note", CellType::Bool)]).unwrap();
        assert!(report.is_clean());
        assert_eq!(t.rows()[0].cells[2], CellValue::Bool(true));
        // A bool column re-infers as int
        assert_eq!(t.column_types()[2], CellType::Int);
    }

    #[test]
    fn merge_decoded_rejects_label_drift() {
        let mut t = sample();
        let err = t
            .merge_decoded(
                vec!["id".to_string(), "other".to_string(), "note".to_string()],
                vec![],
                FileFormat::Csv,
            )
            .unwrap_err();
        assert!(matches!(err, TableError::LabelMismatch { .. }));
        assert_eq!(t.row_count(), 5);
    }
}
