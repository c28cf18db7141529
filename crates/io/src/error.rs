//! Error types for wavematch-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the wavematch-io crate.
///
/// Covers missing files, CSV syntax and I/O failures, and table contents that
/// cannot be turned into numeric columns.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader or writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a requested column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a reference file does not reduce to exactly one column.
    #[error(
        "expected one usable column in {}, found {}: [{}]",
        path.display(),
        columns.len(),
        columns.join(", ")
    )]
    AmbiguousReference {
        /// Path to the file that was inspected.
        path: PathBuf,
        /// Usable columns left after dropping auxiliary ones.
        columns: Vec<String>,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}
