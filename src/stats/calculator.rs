//! Statistics Calculator Module
//! Column sums, Pearson correlation and the dataset summary.

use crate::data::columns::*;
use crate::data::{top_n, ColumnError, PopulationTable};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Columns compared in the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [&str; 3] = [LITERACY_RATE, URBAN_POPULATION, DENSITY];

/// Number of states in the growth pie.
pub const TOP_GROWTH_COUNT: usize = 10;

/// Aggregate for one bar of the category totals chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub label: &'static str,
    pub total: f64,
}

/// Square, symmetric Pearson matrix. `NaN` where a pair has fewer than two
/// complete rows or no variance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthEntry {
    pub state: String,
    pub growth: Option<f64>,
}

/// Everything the dashboard aggregates, in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub states: usize,
    pub total_population: f64,
    pub category_totals: Vec<CategoryTotal>,
    pub top_growth: Vec<GrowthEntry>,
    pub correlation: CorrelationMatrix,
}

/// Handles the descriptive statistics behind the charts.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Sum of the non-null values.
    pub fn column_sum(values: &[Option<f64>]) -> f64 {
        values.iter().flatten().sum()
    }

    /// Pearson r over the rows where both sides are present.
    pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y)
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip();

        if xs.len() < 2 {
            return f64::NAN;
        }

        let cov = xs.iter().covariance(ys.iter());
        let denom = xs.iter().std_dev() * ys.iter().std_dev();
        let r = cov / denom;

        if r.is_finite() {
            r.clamp(-1.0, 1.0)
        } else {
            f64::NAN
        }
    }

    /// Pairwise Pearson matrix over the given columns.
    pub fn correlation_matrix(columns: &[Vec<Option<f64>>]) -> Vec<Vec<f64>> {
        let n = columns.len();
        let mut matrix = vec![vec![f64::NAN; n]; n];

        for i in 0..n {
            for j in i..n {
                let r = Self::pearson(&columns[i], &columns[j]);
                matrix[i][j] = r;
                matrix[j][i] = r;
            }
        }

        matrix
    }

    /// Correlation of literacy, urban population and density.
    pub fn heatmap_correlation(table: &PopulationTable) -> Result<CorrelationMatrix, ColumnError> {
        let columns = CORRELATION_COLUMNS
            .iter()
            .map(|name| table.numeric(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorrelationMatrix {
            labels: CORRELATION_COLUMNS.iter().map(|s| s.to_string()).collect(),
            values: Self::correlation_matrix(&columns),
        })
    }

    /// Total males and females.
    pub fn gender_totals(table: &PopulationTable) -> Result<(f64, f64), ColumnError> {
        let males = Self::column_sum(&table.numeric(MALES)?);
        let females = Self::column_sum(&table.numeric(FEMALES)?);
        Ok((males, females))
    }

    /// Sums in the fixed order Males, Females, Urban Population, Rural Population.
    pub fn category_totals(table: &PopulationTable) -> Result<[CategoryTotal; 4], ColumnError> {
        let total = |name: &'static str| -> Result<CategoryTotal, ColumnError> {
            Ok(CategoryTotal {
                label: name,
                total: Self::column_sum(&table.numeric(name)?),
            })
        };

        Ok([
            total(MALES)?,
            total(FEMALES)?,
            total(URBAN_POPULATION)?,
            total(RURAL_POPULATION)?,
        ])
    }

    /// Highest decadal growth first, at most [`TOP_GROWTH_COUNT`] states.
    pub fn top_growth(table: &PopulationTable) -> Result<Vec<GrowthEntry>, ColumnError> {
        let growth = table.numeric(DECADAL_GROWTH)?;
        let states = table.states();

        Ok(top_n(&growth, TOP_GROWTH_COUNT)
            .into_iter()
            .map(|i| GrowthEntry {
                state: states[i].clone(),
                growth: growth[i],
            })
            .collect())
    }
}

impl DatasetSummary {
    pub fn compute(table: &PopulationTable) -> Result<Self, ColumnError> {
        Ok(Self {
            states: table.height(),
            total_population: StatsCalculator::column_sum(&table.numeric(POPULATION)?),
            category_totals: StatsCalculator::category_totals(table)?.to_vec(),
            top_growth: StatsCalculator::top_growth(table)?,
            correlation: StatsCalculator::heatmap_correlation(table)?,
        })
    }
}
