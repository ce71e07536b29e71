//! Data Cleaner Module
//! Row deduplication and mean imputation of missing numeric values.

use polars::prelude::*;
use thiserror::Error;

use super::numeric_columns;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Outcome of a fill-missing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImputeOutcome {
    /// Numeric columns had their nulls replaced with column means.
    Filled,
    /// The table has no numeric columns; nothing was changed.
    NoNumericColumns,
}

/// Handles the two user-invoked cleaning operations. Both are idempotent
/// when reapplied to already-clean data.
pub struct DataCleaner;

impl DataCleaner {
    /// Remove rows that duplicate an earlier row across all columns, keeping
    /// the first occurrence. Surviving row order is preserved.
    pub fn remove_duplicates(df: &DataFrame) -> Result<DataFrame, CleanError> {
        let deduped = df
            .clone()
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        Ok(deduped)
    }

    /// Fill nulls in every numeric column with that column's mean, computed
    /// over the original non-null values. Non-numeric columns are untouched.
    pub fn fill_missing(df: &DataFrame) -> Result<(DataFrame, ImputeOutcome), CleanError> {
        let numeric = numeric_columns(df);
        if numeric.is_empty() {
            return Ok((df.clone(), ImputeOutcome::NoNumericColumns));
        }

        let fills: Vec<Expr> = numeric
            .iter()
            .map(|name| col(name.as_str()).fill_null(col(name.as_str()).mean()))
            .collect();

        let filled = df.clone().lazy().with_columns(fills).collect()?;
        Ok((filled, ImputeOutcome::Filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FileLoader;

    fn sample() -> DataFrame {
        FileLoader::load(b"a,b\n1,2\n1,2\n3,\n".to_vec(), "data.csv").unwrap()
    }

    #[test]
    fn deduplicate_keeps_first_occurrence() {
        let df = sample();
        let deduped = DataCleaner::remove_duplicates(&df).unwrap();

        assert_eq!(deduped.height(), 2);
        assert_eq!(deduped.column("a").unwrap().i64().unwrap().get(0), Some(1));
        assert_eq!(deduped.column("a").unwrap().i64().unwrap().get(1), Some(3));
    }

    #[test]
    fn deduplicate_is_idempotent() {
        let once = DataCleaner::remove_duplicates(&sample()).unwrap();
        let twice = DataCleaner::remove_duplicates(&once).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn impute_uses_mean_of_original_values() {
        // After dedup: rows (1,2) and (3,null); mean of b's non-nulls is 2.
        let deduped = DataCleaner::remove_duplicates(&sample()).unwrap();
        let (filled, outcome) = DataCleaner::fill_missing(&deduped).unwrap();

        assert_eq!(outcome, ImputeOutcome::Filled);
        let b = filled.column("b").unwrap();
        assert_eq!(b.null_count(), 0);
        assert_eq!(b.f64().unwrap().get(1), Some(2.0));
    }

    #[test]
    fn impute_leaves_no_nulls_and_matches_hand_computed_mean() {
        let df = df!("x" => [Some(1.0f64), None, Some(3.0)]).unwrap();
        let (filled, _) = DataCleaner::fill_missing(&df).unwrap();

        let x = filled.column("x").unwrap().f64().unwrap().clone();
        assert_eq!(x.get(0), Some(1.0));
        assert_eq!(x.get(1), Some(2.0));
        assert_eq!(x.get(2), Some(3.0));
    }

    #[test]
    fn impute_is_idempotent() {
        let df = df!("x" => [Some(1.0f64), None, Some(3.0)]).unwrap();
        let (once, _) = DataCleaner::fill_missing(&df).unwrap();
        let (twice, _) = DataCleaner::fill_missing(&once).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn impute_warns_when_no_numeric_columns() {
        let df = df!("name" => [Some("ada"), None, Some("grace")]).unwrap();
        let (unchanged, outcome) = DataCleaner::fill_missing(&df).unwrap();

        assert_eq!(outcome, ImputeOutcome::NoNumericColumns);
        assert!(unchanged.equals_missing(&df));
        assert_eq!(unchanged.column("name").unwrap().null_count(), 1);
    }
}
