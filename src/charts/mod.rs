//! Charts module - Static PNG chart rendering

mod palette;
mod plotter;
mod renderer;

pub use palette::{coolwarm, VIRIDIS_10};
pub use plotter::ChartPlotter;
pub use renderer::ChartRenderer;

use crate::data::{ColumnError, PopulationTable};
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Column(#[from] ColumnError),
    #[error("{chart}: no rows left to plot")]
    NothingToPlot { chart: &'static str },
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(err.to_string())
    }
}

/// The seven dashboard charts, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Gender,
    RuralUrban,
    Density,
    Correlation,
    CategoryTotals,
    GrowthTop10,
    PopulationShare,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Gender,
        ChartKind::RuralUrban,
        ChartKind::Density,
        ChartKind::Correlation,
        ChartKind::CategoryTotals,
        ChartKind::GrowthTop10,
        ChartKind::PopulationShare,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Gender => "Gender Distribution",
            ChartKind::RuralUrban => "Rural vs Urban Population Distribution by State (Percentage)",
            ChartKind::Density => "Distribution of Population Density Across States",
            ChartKind::Correlation => "Correlation: Literacy, Urban Population, Density",
            ChartKind::CategoryTotals => {
                "Total Population by Category (Males, Females, Urban, Rural)"
            }
            ChartKind::GrowthTop10 => "Top 10 States by Highest Decadal Growth (%)",
            ChartKind::PopulationShare => "Population Percentage by State",
        }
    }

    /// URL-safe name, used by the web routes.
    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Gender => "gender",
            ChartKind::RuralUrban => "rural-urban",
            ChartKind::Density => "density",
            ChartKind::Correlation => "correlation",
            ChartKind::CategoryTotals => "category-totals",
            ChartKind::GrowthTop10 => "growth-top10",
            ChartKind::PopulationShare => "population-share",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Canvas size in pixels.
    pub fn size(self) -> (u32, u32) {
        match self {
            ChartKind::Gender => (640, 420),
            ChartKind::RuralUrban => (1600, 1000),
            ChartKind::Density => (1600, 1000),
            ChartKind::Correlation => (800, 600),
            ChartKind::CategoryTotals => (900, 580),
            ChartKind::GrowthTop10 => (1000, 1000),
            ChartKind::PopulationShare => (1500, 1000),
        }
    }

    /// Render this chart from the table to PNG bytes.
    pub fn render(self, table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        match self {
            ChartKind::Gender => ChartPlotter::gender_pie(table),
            ChartKind::RuralUrban => ChartPlotter::rural_urban_bars(table),
            ChartKind::Density => ChartPlotter::density_bars(table),
            ChartKind::Correlation => ChartPlotter::correlation_heatmap(table),
            ChartKind::CategoryTotals => ChartPlotter::category_totals(table),
            ChartKind::GrowthTop10 => ChartPlotter::growth_top10_pie(table),
            ChartKind::PopulationShare => ChartPlotter::population_share_line(table),
        }
    }
}
