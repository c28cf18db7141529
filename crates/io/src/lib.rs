//! # wavematch-io
//!
//! Read measurement and reference tables from CSV files and write score
//! tables back out. Bridges text files into the `&[f64]` slices used by the
//! detection crates.

mod csv_read;
mod error;
mod reader;
mod table;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_measurements, read_reference};
pub use table::{Column, MeasurementTable, RejectedColumn};
pub use writer::{INDEX_HEADER, write_columns};
