//! CSV writer for per-offset score columns.

use std::path::Path;

use tracing::debug;

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// Name of the leading index column written by [`write_columns`].
pub const INDEX_HEADER: &str = "offset";

/// Write equal-length numeric columns to a CSV file.
///
/// The first column is [`INDEX_HEADER`] holding the row index, followed by
/// one column per `(name, values)` pair in the given order. Values are
/// written with full round-trip precision.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the columns differ in length, or
/// [`IoError::Csv`] if the file cannot be written.
pub fn write_columns(path: &Path, columns: &[(&str, &[f64])]) -> Result<(), IoError> {
    let n_rows = columns.first().map_or(0, |(_, v)| v.len());
    let mut errors = ValidationCollector::new();
    for (name, values) in columns {
        if values.len() != n_rows {
            errors.push(format!(
                "column '{name}' has {} rows, expected {n_rows}",
                values.len()
            ));
        }
    }
    errors.finish()?;

    let mut writer = csv::Writer::from_path(path)?;
    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(INDEX_HEADER);
    header.extend(columns.iter().map(|(name, _)| *name));
    writer.write_record(&header)?;

    let mut record = Vec::with_capacity(columns.len() + 1);
    for row in 0..n_rows {
        record.clear();
        record.push(row.to_string());
        record.extend(columns.iter().map(|(_, values)| values[row].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    debug!(path = %path.display(), n_rows, n_columns = columns.len(), "wrote columns");
    Ok(())
}
