//! Cleaned, read-only population table.

use super::columns::STATE;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Column '{0}' is missing from the dataset")]
    Missing(String),
    #[error("Column '{0}' has no non-null values")]
    Empty(String),
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
}

/// One row per state, numeric columns as nullable `Float64`.
///
/// Built once by [`DatasetLoader`](super::DatasetLoader) and never mutated;
/// per-request derived values live in [`DerivedView`](super::DerivedView).
#[derive(Debug, Clone)]
pub struct PopulationTable {
    df: DataFrame,
}

impl PopulationTable {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Get the number of states.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// State names in file order.
    pub fn states(&self) -> Vec<String> {
        self.df
            .column(STATE)
            .ok()
            .and_then(|col| col.str().ok())
            .map(|ca| {
                ca.into_iter()
                    .map(|s| s.unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Values of a numeric column in file order, `None` for nulls.
    ///
    /// Fails when the column is absent or holds no value at all.
    pub fn numeric(&self, name: &str) -> Result<Vec<Option<f64>>, ColumnError> {
        let column = self
            .df
            .column(name)
            .map_err(|_| ColumnError::Missing(name.to_string()))?;

        let values: Vec<Option<f64>> = column
            .f64()
            .map_err(|_| ColumnError::NotNumeric(name.to_string()))?
            .into_iter()
            .collect();

        if values.iter().all(Option::is_none) {
            return Err(ColumnError::Empty(name.to_string()));
        }

        Ok(values)
    }
}
