//! Writing tables back to disk

mod csv;
mod json;
mod report;

use std::path::PathBuf;

use crate::error::{Result, TableError};
use crate::model::Table;
use crate::parser::FileFormat;

/// Options controlling how a table is written out.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    target: Option<String>,
    max_rows: Option<usize>,
    format: Option<FileFormat>,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output name or stem; defaults to the table's name. The format
    /// extension is appended when missing.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Split the output into consecutive chunks of at most `max_rows`
    /// rows, written to `<stem><i>.<ext>` with `i` starting at 1.
    /// A value of 0 is treated as 1.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Output format; defaults to the format the table was loaded from.
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl Table {
    /// Write the table to disk.
    ///
    /// The format falls back to [`Table::source_format`]; a table that
    /// was never loaded and has no explicit format fails with
    /// [`TableError::UnsupportedFormat`]. Chunked JSON output is
    /// transposed to a label-to-values mapping, unchunked JSON stays a
    /// row-mapping sequence; the decoder understands both shapes.
    pub fn save(&self, options: &SaveOptions) -> Result<()> {
        let format = options
            .format
            .or(self.source_format())
            .ok_or_else(|| TableError::UnsupportedFormat("none".to_string()))?;
        let stem = options.target.as_deref().unwrap_or(self.name());

        match options.max_rows {
            None => {
                let path = ensure_extension(stem, format.extension());
                match format {
                    FileFormat::Csv => csv::write(self, &path, self.rows()),
                    FileFormat::Json => json::write_rows(self, &path, self.rows()),
                    FileFormat::Report => report::write(self, &path, self.rows(), 1),
                }
            }
            Some(max_rows) => {
                let max_rows = max_rows.max(1);
                for (index, chunk) in self.rows().chunks(max_rows).enumerate() {
                    let path = chunk_path(stem, index + 1, format.extension());
                    match format {
                        FileFormat::Csv => csv::write(self, &path, chunk)?,
                        FileFormat::Json => json::write_columns(self, &path, chunk)?,
                        FileFormat::Report => {
                            // Row numbers stay global across chunks
                            report::write(self, &path, chunk, index * max_rows + 1)?
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn ensure_extension(stem: &str, ext: &str) -> PathBuf {
    let suffix = format!(".{ext}");
    if stem.ends_with(&suffix) {
        PathBuf::from(stem)
    } else {
        PathBuf::from(format!("{stem}{suffix}"))
    }
}

fn chunk_path(stem: &str, index: usize, ext: &str) -> PathBuf {
    let suffix = format!(".{ext}");
    let stem = stem.strip_suffix(suffix.as_str()).unwrap_or(stem);
    PathBuf::from(format!("{stem}{index}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_appended_only_when_missing() {
        assert_eq!(ensure_extension("out", "csv"), PathBuf::from("out.csv"));
        assert_eq!(ensure_extension("out.csv", "csv"), PathBuf::from("out.csv"));
        assert_eq!(
            ensure_extension("out.json", "csv"),
            PathBuf::from("out.json.csv")
        );
    }

    #[test]
    fn chunk_names_are_numbered_from_one() {
        assert_eq!(chunk_path("out", 1, "json"), PathBuf::from("out1.json"));
        assert_eq!(chunk_path("out.json", 2, "json"), PathBuf::from("out2.json"));
    }

    #[test]
    fn save_without_any_format_fails() {
        let table = Table::new("fresh");
        let err = table.save(&SaveOptions::new()).unwrap_err();
        assert!(matches!(err, TableError::UnsupportedFormat(_)));
    }
}
