//! Year Series
//! Ordered mapping from calendar year to one aggregated value.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Year {0} not present in series")]
    YearNotFound(i32),
}

/// Ordered `(year, value)` points produced by the per-year group-bys.
///
/// Years with no source rows are simply absent; they are never zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    points: Vec<(i32, f64)>,
}

impl YearSeries {
    /// Build a series from `(year, value)` points, ordering by year.
    pub fn new(mut points: Vec<(i32, f64)>) -> Self {
        points.sort_by_key(|&(year, _)| year);
        Self { points }
    }

    /// Direct lookup of a single year. An absent year is an error, never a
    /// silent default.
    pub fn get(&self, year: i32) -> Result<f64, SeriesError> {
        self.points
            .binary_search_by_key(&year, |&(y, _)| y)
            .map(|idx| self.points[idx].1)
            .map_err(|_| SeriesError::YearNotFound(year))
    }

    /// Contiguous sub-series with years in `[lo, hi]`. A range outside the
    /// observed domain yields an empty series, not an error.
    pub fn slice(&self, lo: i32, hi: i32) -> YearSeries {
        let start = self.points.partition_point(|&(y, _)| y < lo);
        let end = self.points.partition_point(|&(y, _)| y <= hi);
        YearSeries {
            points: self.points[start..end].to_vec(),
        }
    }

    /// All but the trailing `n` points.
    pub fn drop_last(&self, n: usize) -> YearSeries {
        YearSeries {
            points: self.points[..self.len().saturating_sub(n)].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().copied()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, value)| value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> YearSeries {
        YearSeries::new(vec![(1950, 5.0), (1949, 7.0), (1956, 12.0), (1953, 4.0)])
    }

    #[test]
    fn points_are_ordered_by_year() {
        let years: Vec<i32> = series().iter().map(|(year, _)| year).collect();
        assert_eq!(years, vec![1949, 1950, 1953, 1956]);
    }

    #[test]
    fn get_returns_the_year_value() {
        assert_eq!(series().get(1950).unwrap(), 5.0);
    }

    #[test]
    fn get_on_a_missing_year_is_an_error() {
        let err = series().get(1951).unwrap_err();
        assert!(matches!(err, SeriesError::YearNotFound(1951)));
    }

    #[test]
    fn slice_is_inclusive_on_both_bounds() {
        let sliced = series().slice(1950, 1953);
        assert_eq!(sliced.len(), 2);
        assert_eq!(sliced.get(1950).unwrap(), 5.0);
        assert_eq!(sliced.get(1953).unwrap(), 4.0);
    }

    #[test]
    fn slice_outside_the_domain_is_empty() {
        assert!(series().slice(1960, 1970).is_empty());
    }

    #[test]
    fn drop_last_trims_trailing_points() {
        let trimmed = series().drop_last(2);
        let years: Vec<i32> = trimmed.iter().map(|(year, _)| year).collect();
        assert_eq!(years, vec![1949, 1950]);
        assert!(series().drop_last(10).is_empty());
    }
}
