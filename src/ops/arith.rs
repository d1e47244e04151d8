//! Row-to-row arithmetic on numeric columns

use crate::error::{Result, TableError};
use crate::model::{CellType, CellValue, ColumnKey, Table};

/// Binary operators applicable to a numeric cell across two rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    /// True division, always producing a float.
    Div,
    /// Floor division, rounding toward negative infinity.
    FloorDiv,
}

impl Table {
    /// Apply `op` to one column across two rows.
    ///
    /// `row1` and `row2` are 1-based. The column must currently infer
    /// as int or float; operands are coerced to that type before
    /// computing, so string-loaded numerics behave as numbers. With
    /// `new_row` set, a modified copy of row1 is appended and both
    /// source rows stay untouched; otherwise row1's cell is replaced
    /// in place. A zero divisor fails with
    /// [`TableError::DivisionByZero`] naming row2.
    pub fn apply(
        &mut self,
        op: ArithOp,
        column: impl Into<ColumnKey>,
        row1: usize,
        row2: usize,
        new_row: bool,
    ) -> Result<()> {
        let col = self.column_index(column)?;
        let kind = self.column_types()[col];
        if !matches!(kind, CellType::Int | CellType::Float) {
            return Err(TableError::NonNumericColumn {
                column: self.labels()[col].clone(),
                kind,
            });
        }

        let len = self.row_count();
        for row in [row1, row2] {
            if row == 0 || row > len {
                return Err(TableError::IndexOutOfRange { index: row, len });
            }
        }

        let a = self.rows()[row1 - 1].cells[col].coerce(kind)?;
        let b = self.rows()[row2 - 1].cells[col].coerce(kind)?;
        let result = compute(op, &a, &b, row2)?;

        if new_row {
            let mut row = self.rows()[row1 - 1].clone();
            row.cells[col] = result;
            self.rows.push(row);
        } else {
            self.rows[row1 - 1].cells[col] = result;
        }
        Ok(())
    }

    pub fn add(&mut self, column: impl Into<ColumnKey>, row1: usize, row2: usize, new_row: bool) -> Result<()> {
        self.apply(ArithOp::Add, column, row1, row2, new_row)
    }

    pub fn sub(&mut self, column: impl Into<ColumnKey>, row1: usize, row2: usize, new_row: bool) -> Result<()> {
        self.apply(ArithOp::Sub, column, row1, row2, new_row)
    }

    pub fn mul(&mut self, column: impl Into<ColumnKey>, row1: usize, row2: usize, new_row: bool) -> Result<()> {
        self.apply(ArithOp::Mul, column, row1, row2, new_row)
    }

    pub fn div(&mut self, column: impl Into<ColumnKey>, row1: usize, row2: usize, new_row: bool) -> Result<()> {
        self.apply(ArithOp::Div, column, row1, row2, new_row)
    }

    pub fn floor_div(&mut self, column: impl Into<ColumnKey>, row1: usize, row2: usize, new_row: bool) -> Result<()> {
        self.apply(ArithOp::FloorDiv, column, row1, row2, new_row)
    }
}

fn compute(op: ArithOp, a: &CellValue, b: &CellValue, divisor_row: usize) -> Result<CellValue> {
    match (a, b) {
        (CellValue::Int(a), CellValue::Int(b)) => {
            if matches!(op, ArithOp::Div | ArithOp::FloorDiv) && *b == 0 {
                return Err(TableError::DivisionByZero { row: divisor_row });
            }
            Ok(match op {
                ArithOp::Add => CellValue::Int(a + b),
                ArithOp::Sub => CellValue::Int(a - b),
                ArithOp::Mul => CellValue::Int(a * b),
                ArithOp::Div => CellValue::Float(*a as f64 / *b as f64),
                ArithOp::FloorDiv => CellValue::Int(floor_div(*a, *b)),
            })
        }
        (CellValue::Float(a), CellValue::Float(b)) => {
            if matches!(op, ArithOp::Div | ArithOp::FloorDiv) && *b == 0.0 {
                return Err(TableError::DivisionByZero { row: divisor_row });
            }
            Ok(CellValue::Float(match op {
                ArithOp::Add => a + b,
                ArithOp::Sub => a - b,
                ArithOp::Mul => a * b,
                ArithOp::Div => a / b,
                ArithOp::FloorDiv => (a / b).floor(),
            }))
        }
        // Coercion to the inferred column type rules this out
        _ => Err(TableError::TypeCoercion {
            value: b.display().into_owned(),
            target: CellType::Float,
        }),
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}
