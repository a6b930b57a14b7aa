//! Catalog Tables
//! The three immutable tables every analysis step reads from.

use polars::prelude::DataFrame;
use std::path::Path;

use crate::data::{load_csv, LoaderError};

/// The loaded catalog: colors, sets and themes. Immutable after load.
#[derive(Debug)]
pub struct Catalog {
    pub colors: DataFrame,
    pub sets: DataFrame,
    pub themes: DataFrame,
}

impl Catalog {
    /// Load `colors.csv`, `sets.csv` and `themes.csv` from a directory.
    pub fn load(dir: &Path) -> Result<Self, LoaderError> {
        Ok(Self {
            colors: load_csv(&dir.join("colors.csv"))?,
            sets: load_csv(&dir.join("sets.csv"))?,
            themes: load_csv(&dir.join("themes.csv"))?,
        })
    }
}
