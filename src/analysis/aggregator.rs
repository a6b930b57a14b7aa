//! Aggregation Module
//! Sort-based and group-by summaries over the catalog tables.

use polars::prelude::*;
use thiserror::Error;

use crate::analysis::YearSeries;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Sort/group/aggregate operations over the catalog tables.
pub struct Aggregator;

impl Aggregator {
    /// First `n` rows after a stable sort on `field`; equal keys keep source
    /// row order.
    pub fn top_n(
        df: &DataFrame,
        field: &str,
        n: usize,
        descending: bool,
    ) -> Result<DataFrame, AggregationError> {
        let sorted = df.sort(
            [field],
            SortMultipleOptions::default()
                .with_order_descending(descending)
                .with_maintain_order(true),
        )?;
        Ok(sorted.head(Some(n)))
    }

    /// Number of sets released per year, ordered by year.
    pub fn count_by_year(df: &DataFrame) -> Result<YearSeries, AggregationError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col("year")])
            .agg([col("set_num").count().alias("set_count")])
            .collect()?;
        Self::year_series(&grouped, "set_count")
    }

    /// Number of distinct themes with a release per year.
    pub fn distinct_themes_by_year(df: &DataFrame) -> Result<YearSeries, AggregationError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col("year")])
            .agg([col("theme_id").n_unique().alias("theme_count")])
            .collect()?;
        Self::year_series(&grouped, "theme_count")
    }

    /// Arithmetic mean of part counts per year.
    pub fn mean_parts_by_year(df: &DataFrame) -> Result<YearSeries, AggregationError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col("year")])
            .agg([col("num_parts").mean().alias("mean_parts")])
            .collect()?;
        Self::year_series(&grouped, "mean_parts")
    }

    /// Transparent vs opaque color tallies. The `is_trans` column carries
    /// `"t"`/`"f"` tokens, not parsed booleans.
    pub fn transparency_counts(colors: &DataFrame) -> Result<(usize, usize), AggregationError> {
        let transparent = colors
            .clone()
            .lazy()
            .filter(col("is_trans").eq(lit("t")))
            .collect()?
            .height();
        let opaque = colors
            .clone()
            .lazy()
            .filter(col("is_trans").eq(lit("f")))
            .collect()?
            .height();
        Ok((transparent, opaque))
    }

    /// Materialize a grouped frame into an ordered year series.
    fn year_series(df: &DataFrame, value_col: &str) -> Result<YearSeries, AggregationError> {
        let years = df.column("year")?.cast(&DataType::Int32)?;
        let years = years.i32()?;
        let values = df.column(value_col)?.cast(&DataType::Float64)?;
        let values = values.f64()?;

        let points = years
            .into_iter()
            .zip(values)
            .filter_map(|(year, value)| Some((year?, value?)))
            .collect();
        Ok(YearSeries::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets_fixture() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "set_num".into(),
                vec!["700.1-1", "700.2-1", "1309-1", "310-1"],
            ),
            Column::new(
                "name".into(),
                vec![
                    "Large Gift Set",
                    "Medium Gift Set",
                    "Town Plan Board",
                    "Filling Station",
                ],
            ),
            Column::new("year".into(), vec![1949i32, 1949, 1950, 1956]),
            Column::new("theme_id".into(), vec![577i64, 577, 50, 50]),
            Column::new("num_parts".into(), vec![700i64, 100, 300, 50]),
        ])
        .unwrap()
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let top = Aggregator::top_n(&sets_fixture(), "num_parts", 2, true).unwrap();
        let parts: Vec<i64> = top
            .column("num_parts")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(parts, vec![700, 300]);

        let all = Aggregator::top_n(&sets_fixture(), "num_parts", 10, true).unwrap();
        assert_eq!(all.height(), 4);
    }

    #[test]
    fn top_n_keeps_source_order_for_ties() {
        let df = DataFrame::new(vec![
            Column::new("set_num".into(), vec!["a-1", "b-1", "c-1"]),
            Column::new("num_parts".into(), vec![100i64, 100, 100]),
        ])
        .unwrap();
        let top = Aggregator::top_n(&df, "num_parts", 3, true).unwrap();
        let order: Vec<&str> = top
            .column("set_num")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(order, vec!["a-1", "b-1", "c-1"]);
    }

    #[test]
    fn count_by_year_matches_row_counts() {
        let sets = sets_fixture();
        let counts = Aggregator::count_by_year(&sets).unwrap();
        assert_eq!(counts.get(1949).unwrap(), 2.0);
        assert_eq!(counts.get(1950).unwrap(), 1.0);

        let total: f64 = counts.iter().map(|(_, count)| count).sum();
        assert_eq!(total as usize, sets.height());
    }

    #[test]
    fn count_by_year_omits_absent_years() {
        let counts = Aggregator::count_by_year(&sets_fixture()).unwrap();
        assert!(counts.get(1951).is_err());
    }

    #[test]
    fn mean_parts_by_year_averages_each_year() {
        let means = Aggregator::mean_parts_by_year(&sets_fixture()).unwrap();
        assert_eq!(means.get(1949).unwrap(), 400.0);
        assert_eq!(means.get(1950).unwrap(), 300.0);
    }

    #[test]
    fn distinct_themes_by_year_deduplicates_theme_ids() {
        let df = DataFrame::new(vec![
            Column::new("set_num".into(), vec!["a-1", "b-1", "c-1"]),
            Column::new("year".into(), vec![1999i32, 1999, 1999]),
            Column::new("theme_id".into(), vec![158i64, 158, 50]),
        ])
        .unwrap();
        let themes = Aggregator::distinct_themes_by_year(&df).unwrap();
        assert_eq!(themes.get(1999).unwrap(), 2.0);
    }

    #[test]
    fn transparency_counts_split_the_color_table() {
        let colors = DataFrame::new(vec![
            Column::new("id".into(), vec![0i64, 36, 40]),
            Column::new("name".into(), vec!["Black", "Trans-Red", "Trans-Black"]),
            Column::new("rgb".into(), vec!["05131D", "C91A09", "635F52"]),
            Column::new("is_trans".into(), vec!["f", "t", "t"]),
        ])
        .unwrap();
        assert_eq!(Aggregator::transparency_counts(&colors).unwrap(), (2, 1));
    }
}
