//! Low-level CSV access: open a file and load its cells as text.

use std::path::Path;

use crate::error::IoError;

/// Header names plus every data row as raw strings.
///
/// Rows may be shorter than the header; absent trailing cells read as empty.
#[derive(Debug)]
pub(crate) struct RawTable {
    pub(crate) headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Number of data rows.
    pub(crate) fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cells of column `j`, top to bottom.
    pub(crate) fn column(&self, j: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(j).map_or("", String::as_str))
    }
}

/// Read a headed CSV file into memory.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Csv`] on malformed CSV, or [`IoError::Validation`] if the file
/// has no header row.
pub(crate) fn read_raw(path: &Path) -> Result<RawTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IoError::Validation {
            count: 1,
            details: format!("{} has no header row", path.display()),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn short_rows_read_as_empty() {
        let f = write_tmp("a,b\n1,2\n3\n");
        let table = read_raw(f.path()).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column(1).collect::<Vec<_>>(), vec!["2", ""]);
    }

    #[test]
    fn empty_file_has_no_header() {
        let f = write_tmp("");
        assert!(matches!(
            read_raw(f.path()).unwrap_err(),
            IoError::Validation { .. }
        ));
    }

    #[test]
    fn missing_file() {
        let err = read_raw(Path::new("/tmp/wavematch_no_such_file.csv")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
