//! Data module - loading, cleaning and projection

mod cleaner;
mod loader;
mod projector;

pub use cleaner::{CleanError, DataCleaner, ImputeOutcome};
pub use loader::{FileLoader, LoadError};
pub use projector::Projector;

use polars::prelude::*;

/// Get list of numeric column names, in table order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| {
            matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            )
        })
        .map(|col| col.name().to_string())
        .collect()
}
