//! CSV Table Loader
//! Reads one catalog CSV into an in-memory table using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Load a CSV file using Polars, inferring per-column types from content.
///
/// The resulting columns match the file's header row. A malformed row is a
/// fatal parse error, not a skipped line.
pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.is_file() {
        return Err(LoaderError::FileNotFound(path.to_path_buf()));
    }

    // Lazy scan, then collect; the catalog tables are small enough that the
    // inference window covers them whole.
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()?
        .collect()?;

    Ok(df)
}
