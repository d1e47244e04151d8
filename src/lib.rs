//! tabula - In-memory tabular data container
//!
//! Loads rows from delimited-text (CSV) or object-payload (JSON) files,
//! infers per-column scalar types, exposes row/column access and
//! mutation, supports concatenation and splitting, performs row-to-row
//! arithmetic on numeric columns, and writes the result back to disk,
//! optionally chunked across numbered files.
//!
//! Everything is synchronous and single-threaded: tables are plain
//! values with no internal locking, and file I/O is blocking with
//! scoped handles.

pub mod error;
pub mod model;
pub mod ops;
pub mod output;
pub mod parser;

pub use error::{CoercionFailure, CoercionReport, Result, TableError};
pub use model::{CellType, CellValue, ColumnKey, Row, Table};
pub use ops::ArithOp;
pub use output::SaveOptions;
pub use parser::FileFormat;
