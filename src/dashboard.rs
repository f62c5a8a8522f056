//! Dashboard generation: every chart, in presentation order, from one table.

use crate::charts::{ChartError, ChartKind};
use crate::data::PopulationTable;
use std::time::Instant;
use tracing::{debug, info};

/// One rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub png: Vec<u8>,
}

impl RenderedChart {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// The seven charts of one dashboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub charts: Vec<RenderedChart>,
}

impl Dashboard {
    pub fn get(&self, kind: ChartKind) -> Option<&RenderedChart> {
        self.charts.iter().find(|chart| chart.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedChart> {
        self.charts.iter()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Render all charts. Stops at the first chart that fails.
pub fn generate_dashboard(table: &PopulationTable) -> Result<Dashboard, ChartError> {
    generate_dashboard_with_progress(table, |_, _| {})
}

/// Same as [`generate_dashboard`], calling `progress(done, total)` after
/// each chart.
pub fn generate_dashboard_with_progress<F>(
    table: &PopulationTable,
    mut progress: F,
) -> Result<Dashboard, ChartError>
where
    F: FnMut(usize, usize),
{
    let started = Instant::now();
    let total = ChartKind::ALL.len();
    let mut charts = Vec::with_capacity(total);

    for (i, kind) in ChartKind::ALL.into_iter().enumerate() {
        let chart_started = Instant::now();
        let png = kind.render(table)?;
        debug!(
            chart = kind.slug(),
            bytes = png.len(),
            elapsed_ms = chart_started.elapsed().as_millis() as u64,
            "chart rendered"
        );
        charts.push(RenderedChart { kind, png });
        progress(i + 1, total);
    }

    info!(
        charts = charts.len(),
        states = table.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dashboard generated"
    );
    Ok(Dashboard { charts })
}
