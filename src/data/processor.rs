//! Data Processor Module
//! Per-request derived values: ratios, orderings and top-N selection.

use super::columns::{POPULATION, RURAL_POPULATION, URBAN_POPULATION};
use super::table::{ColumnError, PopulationTable};
use std::cmp::Ordering;

/// Element-wise `num / den`; `None` when either side is null or `den` is zero.
pub fn ratio(num: &[Option<f64>], den: &[Option<f64>]) -> Vec<Option<f64>> {
    num.iter()
        .zip(den)
        .map(|(n, d)| match (n, d) {
            (Some(n), Some(d)) if *d != 0.0 => Some(n / d),
            _ => None,
        })
        .collect()
}

/// Element-wise `num / den * 100`.
pub fn percentage(num: &[Option<f64>], den: &[Option<f64>]) -> Vec<Option<f64>> {
    ratio(num, den)
        .into_iter()
        .map(|v| v.map(|r| r * 100.0))
        .collect()
}

/// Row indices sorted by value, largest first. Nulls go last and ties keep
/// file order.
pub fn descending_order(values: &[Option<f64>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| match (values[a], values[b]) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    order
}

/// The first `n` indices of [`descending_order`].
pub fn top_n(values: &[Option<f64>], n: usize) -> Vec<usize> {
    let mut order = descending_order(values);
    order.truncate(n);
    order
}

/// Each value as a percentage of the sum of all non-null values.
pub fn population_share(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let total: f64 = values.iter().flatten().sum();
    values
        .iter()
        .map(|v| match v {
            Some(v) if total != 0.0 => Some(v / total * 100.0),
            _ => None,
        })
        .collect()
}

/// Rural and urban shares of each state's population, computed fresh for
/// every dashboard and never written back into the table.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    /// Rural Population (%)
    pub rural_pct: Vec<Option<f64>>,
    /// Urban Population (%)
    pub urban_pct: Vec<Option<f64>>,
}

impl DerivedView {
    pub fn compute(table: &PopulationTable) -> Result<Self, ColumnError> {
        let population = table.numeric(POPULATION)?;
        let rural = table.numeric(RURAL_POPULATION)?;
        let urban = table.numeric(URBAN_POPULATION)?;

        Ok(Self {
            rural_pct: percentage(&rural, &population),
            urban_pct: percentage(&urban, &population),
        })
    }
}
