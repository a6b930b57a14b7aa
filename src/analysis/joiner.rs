//! Join Module
//! Per-key counts and equi-joins to attach theme names to derived tables.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Relational operations between the sets and themes tables.
pub struct Joiner;

impl Joiner {
    /// Rows per distinct `key_field` value as `{key, set_count}`, largest
    /// count first.
    pub fn count_by_key(df: &DataFrame, key_field: &str) -> Result<DataFrame, JoinError> {
        let counts = df
            .clone()
            .lazy()
            .group_by([col(key_field)])
            .agg([len().alias("set_count")])
            .sort(
                ["set_count"],
                SortMultipleOptions::default().with_order_descending(true),
            )
            .collect()?;
        Ok(counts)
    }

    /// Standard inner equi-join on `on`. Keys missing from either side are
    /// silently dropped; duplicate keys produce the cross-product of matches.
    pub fn inner_join(
        left: &DataFrame,
        right: &DataFrame,
        on: &str,
    ) -> Result<DataFrame, JoinError> {
        let joined = left
            .clone()
            .lazy()
            .join(
                right.clone().lazy(),
                [col(on)],
                [col(on)],
                JoinArgs::new(JoinType::Inner),
            )
            .collect()?;
        Ok(joined)
    }

    /// Ids of every theme whose name matches exactly.
    pub fn theme_ids_by_name(themes: &DataFrame, name: &str) -> Result<Vec<i64>, JoinError> {
        let matched = themes
            .clone()
            .lazy()
            .filter(col("name").eq(lit(name)))
            .select([col("id")])
            .collect()?;
        let ids = matched.column("id")?.cast(&DataType::Int64)?;
        Ok(ids.i64()?.into_iter().flatten().collect())
    }

    /// Sets whose `theme_id` is one of `ids`.
    pub fn sets_in_themes(sets: &DataFrame, ids: &[i64]) -> Result<DataFrame, JoinError> {
        let Some((first, rest)) = ids.split_first() else {
            return Ok(sets.clear());
        };

        let mut mask = col("theme_id").eq(lit(*first));
        for id in rest {
            mask = mask.or(col("theme_id").eq(lit(*id)));
        }
        Ok(sets.clone().lazy().filter(mask).collect()?)
    }
}
