//! Analysis module - aggregations, year series and joins

mod aggregator;
mod joiner;
mod series;

pub use aggregator::{AggregationError, Aggregator};
pub use joiner::{JoinError, Joiner};
pub use series::{SeriesError, YearSeries};
