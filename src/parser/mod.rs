//! Loading tables from delimited-text and object-payload files

mod csv;
mod json;

use std::path::Path;

use crate::error::{Result, TableError};
use crate::model::{Row, Table};

/// On-disk formats a table can be read from or written to.
///
/// `Report` is write-only: the plain-text rendering has no decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Report,
}

impl FileFormat {
    /// File extension used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
            FileFormat::Report => "txt",
        }
    }

    /// Dispatch on a path's extension.
    pub fn from_path(path: &Path) -> Result<FileFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "txt" => Ok(FileFormat::Report),
            other => Err(TableError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// One decoded source file, not yet merged into a table.
pub(crate) struct Decoded {
    pub labels: Vec<String>,
    pub rows: Vec<Row>,
    pub format: FileFormat,
}

pub(crate) fn decode(path: &Path) -> Result<Decoded> {
    match FileFormat::from_path(path)? {
        FileFormat::Csv => csv::decode(path),
        FileFormat::Json => json::decode(path),
        FileFormat::Report => Err(TableError::UnsupportedFormat("txt".to_string())),
    }
}

impl Table {
    /// Load one or more source files into the table.
    ///
    /// The first file establishes the column labels; every later file
    /// (across calls too) must carry exactly the same header or the
    /// load fails with [`TableError::LabelMismatch`], contributing no
    /// rows from the failing file. Files already merged by the same
    /// call stay merged. After all files are read, display widths are
    /// recomputed and column types re-inferred.
    pub fn load<P: AsRef<Path>>(&mut self, paths: impl IntoIterator<Item = P>) -> Result<()> {
        for path in paths {
            let decoded = decode(path.as_ref())?;
            self.merge_decoded(decoded.labels, decoded.rows, decoded.format)?;
        }
        self.refresh_widths();
        self.infer_types();
        Ok(())
    }
}
