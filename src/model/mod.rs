//! Data model for tabular data representation

mod table;
mod value;

pub use table::{ColumnKey, Row, Table};
pub use value::{classify_str, infer_column_type, CellType, CellValue};
