//! Data module - catalog CSV loading

mod catalog;
mod loader;

pub use catalog::Catalog;
pub use loader::{load_csv, LoaderError};
