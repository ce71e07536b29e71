//! Column Projection Module

use polars::prelude::*;

/// Restricts a table to a chosen column subset.
pub struct Projector;

impl Projector {
    /// Select `columns` in the given order. An empty selection yields an
    /// empty-column frame rather than an error; downstream stages tolerate it.
    pub fn select(df: &DataFrame, columns: &[String]) -> PolarsResult<DataFrame> {
        if columns.is_empty() {
            return Ok(DataFrame::empty());
        }
        df.select(columns.iter().map(|name| name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "a" => [1i64, 2, 3],
            "b" => ["x", "y", "z"],
            "c" => [0.5f64, 1.5, 2.5],
        )
        .unwrap()
    }

    #[test]
    fn keeps_requested_columns_in_requested_order() {
        let df = sample();
        let projected = Projector::select(&df, &["c".into(), "a".into()]).unwrap();

        assert_eq!(
            projected
                .get_column_names()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>(),
            vec!["c", "a"]
        );
        assert_eq!(projected.height(), 3);
    }

    #[test]
    fn empty_selection_yields_empty_frame() {
        let projected = Projector::select(&sample(), &[]).unwrap();
        assert_eq!(projected.width(), 0);
    }

    #[test]
    fn unknown_column_is_an_error() {
        assert!(Projector::select(&sample(), &["nope".into()]).is_err());
    }
}
