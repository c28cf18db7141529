//! High-level measurement and reference table readers.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::csv_read::{self, RawTable};
use crate::error::IoError;
use crate::table::{Column, MeasurementTable, RejectedColumn};
use crate::validate::{Cell, ValidationCollector, is_unnamed, parse_cell};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading measurement and reference tables.
///
/// The [`Default`] drops unnamed auxiliary columns and picks the reference
/// column automatically when only one remains.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Reference column to select; `None` requires exactly one usable column.
    reference_column: Option<String>,
    /// Whether to drop `Unnamed*` and empty-header columns.
    drop_unnamed: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            reference_column: None,
            drop_unnamed: true,
        }
    }
}

impl ReaderConfig {
    /// Set the reference column name, or `None` to select it automatically.
    pub fn with_reference_column(mut self, name: Option<impl Into<String>>) -> Self {
        self.reference_column = name.map(Into::into);
        self
    }

    /// Enable or disable dropping of unnamed auxiliary columns.
    pub fn with_drop_unnamed(mut self, drop: bool) -> Self {
        self.drop_unnamed = drop;
        self
    }

    pub fn reference_column(&self) -> Option<&str> {
        self.reference_column.as_deref()
    }

    pub fn drop_unnamed(&self) -> bool {
        self.drop_unnamed
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `reference_column` is blank.
    pub fn validate(&self) -> Result<(), IoError> {
        if let Some(name) = &self.reference_column
            && name.trim().is_empty()
        {
            return Err(IoError::Validation {
                count: 1,
                details: "reference_column must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

/// Indices of the columns kept after the unnamed-column rule.
fn kept_columns(raw: &RawTable, config: &ReaderConfig, path: &Path) -> Vec<usize> {
    let kept: Vec<usize> = (0..raw.headers.len())
        .filter(|&j| !(config.drop_unnamed && is_unnamed(&raw.headers[j])))
        .collect();
    let dropped = raw.headers.len() - kept.len();
    if dropped > 0 {
        debug!(path = %path.display(), dropped, "dropped unnamed columns");
    }
    kept
}

// ---------------------------------------------------------------------------
// read_measurements
// ---------------------------------------------------------------------------

/// Problems listed per rejected column before the rest are counted.
const MAX_LISTED_PROBLEMS: usize = 5;

/// Read every numeric channel of a measurement table.
///
/// Each column is trimmed of trailing missing cells, so channels may differ
/// in length. A column with a missing or non-numeric cell before its last
/// value, or with no values at all, is returned as a
/// [`RejectedColumn`] in its file position; the other
/// columns are unaffected.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Csv`], or
/// [`IoError::Validation`] for problems with the file as a whole: duplicate
/// headers or no measurement columns.
pub fn read_measurements(path: &Path, config: &ReaderConfig) -> Result<MeasurementTable, IoError> {
    config.validate()?;
    let raw = csv_read::read_raw(path)?;
    let mut errors = ValidationCollector::new();

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for j in kept_columns(&raw, config, path) {
        let name = &raw.headers[j];
        if !seen.insert(name.as_str()) {
            errors.push(format!("duplicate column '{name}'"));
            continue;
        }
        let entry = read_channel(&raw, j).map_err(|problems| {
            let reason = summarize(&problems);
            warn!(path = %path.display(), column = %name, %reason, "rejected measurement column");
            RejectedColumn::new(name.clone(), reason)
        });
        entries.push(entry);
    }
    if entries.is_empty() && seen.is_empty() {
        errors.push(format!("{} has no measurement columns", path.display()));
    }
    errors.finish()?;

    let table = MeasurementTable::new(entries);
    info!(
        path = %path.display(),
        n_channels = table.len(),
        n_rejected = table.rejected().count(),
        n_rows = raw.n_rows(),
        "read measurements"
    );
    Ok(table)
}

/// Parses column `j`, or lists every problem found in it.
fn read_channel(raw: &RawTable, j: usize) -> Result<Column, Vec<String>> {
    let text: Vec<&str> = raw.column(j).collect();
    let cells: Vec<Cell> = text.iter().map(|s| parse_cell(s)).collect();
    let Some(last) = cells.iter().rposition(|c| matches!(c, Cell::Value(_))) else {
        return Err(vec!["no values".to_string()]);
    };

    // Row numbers are 1-based and count the header line.
    let mut problems = Vec::new();
    let mut values = Vec::with_capacity(last + 1);
    for (row, cell) in cells.iter().enumerate() {
        match *cell {
            Cell::Value(v) => values.push(v),
            Cell::Missing if row > last => {}
            Cell::Missing => problems.push(format!("row {}: missing value", row + 2)),
            Cell::Invalid => problems.push(format!("row {}: cannot parse {:?}", row + 2, text[row])),
        }
    }
    if problems.is_empty() {
        Ok(Column::new(raw.headers[j].clone(), values))
    } else {
        Err(problems)
    }
}

fn summarize(problems: &[String]) -> String {
    let mut reason = problems
        .iter()
        .take(MAX_LISTED_PROBLEMS)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ");
    if problems.len() > MAX_LISTED_PROBLEMS {
        reason.push_str(&format!(" (and {} more)", problems.len() - MAX_LISTED_PROBLEMS));
    }
    reason
}

// ---------------------------------------------------------------------------
// read_reference
// ---------------------------------------------------------------------------

/// Read the reference waveform.
///
/// Drops unnamed auxiliary columns and columns without any value, then drops
/// every row with a missing value in any remaining column, then selects the
/// configured column or the single remaining one.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Csv`] | malformed CSV |
/// | [`IoError::Validation`] | a non-numeric cell in a usable column |
/// | [`IoError::MissingColumn`] | the configured column is absent |
/// | [`IoError::AmbiguousReference`] | zero or several columns remain and none is configured |
pub fn read_reference(path: &Path, config: &ReaderConfig) -> Result<Column, IoError> {
    config.validate()?;
    let raw = csv_read::read_raw(path)?;

    let mut errors = ValidationCollector::new();
    let mut usable: Vec<(usize, Vec<Cell>)> = Vec::new();
    for j in kept_columns(&raw, config, path) {
        let text: Vec<&str> = raw.column(j).collect();
        let cells: Vec<Cell> = text.iter().map(|s| parse_cell(s)).collect();
        if !cells.iter().any(|c| matches!(c, Cell::Value(_))) {
            debug!(column = %raw.headers[j], "dropped empty reference column");
            continue;
        }
        for (row, cell) in cells.iter().enumerate() {
            if *cell == Cell::Invalid {
                errors.push(format!(
                    "column '{}' row {}: cannot parse {:?}",
                    raw.headers[j],
                    row + 2,
                    text[row]
                ));
            }
        }
        usable.push((j, cells));
    }
    errors.finish()?;

    let complete_rows: Vec<usize> = (0..raw.n_rows())
        .filter(|&row| usable.iter().all(|(_, cells)| matches!(cells[row], Cell::Value(_))))
        .collect();
    let dropped_rows = raw.n_rows() - complete_rows.len();
    if dropped_rows > 0 {
        debug!(path = %path.display(), dropped_rows, "dropped incomplete reference rows");
    }

    let (j, cells) = match config.reference_column() {
        Some(name) => usable
            .iter()
            .find(|(j, _)| raw.headers[*j] == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: path.to_path_buf(),
            })?,
        None => match usable.as_slice() {
            [only] => only,
            _ => {
                return Err(IoError::AmbiguousReference {
                    path: path.to_path_buf(),
                    columns: usable.iter().map(|(j, _)| raw.headers[*j].clone()).collect(),
                });
            }
        },
    };

    let values: Vec<f64> = complete_rows
        .iter()
        .filter_map(|&row| match cells[row] {
            Cell::Value(v) => Some(v),
            _ => None,
        })
        .collect();
    info!(
        path = %path.display(),
        column = %raw.headers[*j],
        n_samples = values.len(),
        "read reference"
    );
    Ok(Column::new(raw.headers[*j].clone(), values))
}
