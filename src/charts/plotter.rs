//! Chart Plotter Module
//! The seven dashboard charts, each a pure function from the table to PNG bytes.
//!
//! Category axes use segmented coordinates so that every state gets its own
//! slot, labelled at the slot center.

use super::palette::*;
use super::renderer::{ChartRenderer, FONT};
use super::{ChartError, ChartKind};
use crate::data::columns::*;
use crate::data::{descending_order, population_share, top_n, DerivedView, PopulationTable};
use crate::stats::{StatsCalculator, TOP_GROWTH_COUNT};
use plotters::coord::ranged1d::SegmentedCoord;
use plotters::coord::types::RangedCoordi32;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::warn;

/// Fixed y-axis ceiling of the density chart; taller bars are clipped.
pub const DENSITY_Y_MAX: f64 = 12000.0;
/// Density gridline spacing.
pub const DENSITY_Y_STEP: f64 = 500.0;

const TITLE_SIZE: i32 = 28;
const STATE_LABEL_SIZE: i32 = 13;

/// One segment per category, indices `0..count`.
fn category_range(count: usize) -> SegmentedCoord<RangedCoordi32> {
    (0..(count as i32 - 1).max(0)).into_segmented()
}

fn segment_label(names: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) if *i >= 0 => names.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Label for a row axis drawn top-down: segment 0 is the last name.
fn flipped_label(names: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => {
            let row = names.len() as i32 - 1 - *i;
            if row >= 0 {
                names.get(row as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        }
        _ => String::new(),
    }
}

fn correlation_annotation(r: f64) -> String {
    if r.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", r)
    }
}

/// Creates the dashboard charts with plotters.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Male vs female totals as a two-slice pie.
    pub fn gender_pie(table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        let kind = ChartKind::Gender;
        let (males, females) = StatsCalculator::gender_totals(table)?;
        if males + females <= 0.0 {
            return Err(ChartError::NothingToPlot { chart: kind.title() });
        }

        let sizes = [males, females];
        let colors = [MALE_BLUE, FEMALE_PINK];
        let labels = ["Male", "Female"];

        ChartRenderer::render_png(kind.size(), |root| {
            let area = root.titled(kind.title(), (FONT, 22))?;
            let (width, height) = area.dim_in_pixel();
            let center = (width as i32 / 2, height as i32 / 2);
            let radius = f64::from(width.min(height)) * 0.36;

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.label_style((FONT, 16).into_font().color(&BLACK));
            pie.percentages((FONT, 15).into_font().color(&BLACK));
            area.draw(&pie)?;
            Ok(())
        })
    }

    /// Rural and urban share of each state, overlapping bars, most
    /// populous state first.
    pub fn rural_urban_bars(table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        let kind = ChartKind::RuralUrban;
        let view = DerivedView::compute(table)?;
        let population = table.numeric(POPULATION)?;
        let states = table.states();

        let order = descending_order(&population);
        let names: Vec<String> = order.iter().map(|&row| states[row].clone()).collect();

        let mut rural = Vec::with_capacity(order.len());
        let mut urban = Vec::with_capacity(order.len());
        for (slot, &row) in order.iter().enumerate() {
            match view.rural_pct[row] {
                Some(pct) => rural.push((slot as i32, pct)),
                None => warn!(chart = kind.slug(), state = %states[row], column = RURAL_POPULATION, "skipping null share"),
            }
            match view.urban_pct[row] {
                Some(pct) => urban.push((slot as i32, pct)),
                None => warn!(chart = kind.slug(), state = %states[row], column = URBAN_POPULATION, "skipping null share"),
            }
        }

        if rural.is_empty() && urban.is_empty() {
            return Err(ChartError::NothingToPlot { chart: kind.title() });
        }

        ChartRenderer::render_png(kind.size(), |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(kind.title(), (FONT, TITLE_SIZE))
                .margin(20)
                .x_label_area_size(200)
                .y_label_area_size(70)
                .build_cartesian_2d(category_range(names.len()), 0f64..100f64)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .bold_line_style(GRID_GRAY)
                .light_line_style(WHITE)
                .x_labels(names.len())
                .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(&names, v))
                .x_label_style(
                    (FONT, STATE_LABEL_SIZE)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .y_labels(11)
                .x_desc("State")
                .y_desc("Population (%)")
                .axis_desc_style((FONT, 18))
                .draw()?;

            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(RURAL_SKY.filled())
                        .margin(4)
                        .data(rural.iter().copied()),
                )?
                .label("Rural Population (%)")
                .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], RURAL_SKY.filled()));

            // Drawn second so it sits over the rural bar
            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(URBAN_ORANGE.filled())
                        .margin(4)
                        .data(urban.iter().copied()),
                )?
                .label("Urban Population (%)")
                .legend(|(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 14, y + 6)], URBAN_ORANGE.filled())
                });

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.9))
                .border_style(&BLACK)
                .label_font((FONT, 16))
                .draw()?;
            Ok(())
        })
    }

    /// Density per state, densest first, on a fixed 0..12000 axis.
    pub fn density_bars(table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        let kind = ChartKind::Density;
        let density = table.numeric(DENSITY)?;
        let states = table.states();

        let order = descending_order(&density);
        let names: Vec<String> = order.iter().map(|&row| states[row].clone()).collect();

        let mut bars = Vec::with_capacity(order.len());
        for (slot, &row) in order.iter().enumerate() {
            match density[row] {
                Some(value) => bars.push((slot as i32, value.clamp(0.0, DENSITY_Y_MAX))),
                None => warn!(chart = kind.slug(), state = %states[row], column = DENSITY, "skipping null density"),
            }
        }

        let y_labels = (DENSITY_Y_MAX / DENSITY_Y_STEP) as usize + 1;

        ChartRenderer::render_png(kind.size(), |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(kind.title(), (FONT, TITLE_SIZE))
                .margin(20)
                .x_label_area_size(200)
                .y_label_area_size(80)
                .build_cartesian_2d(category_range(names.len()), 0f64..DENSITY_Y_MAX)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .bold_line_style(GRID_GRAY)
                .light_line_style(WHITE)
                .x_labels(names.len())
                .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(&names, v))
                .x_label_style(
                    (FONT, STATE_LABEL_SIZE)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .y_labels(y_labels)
                .y_label_formatter(&|v: &f64| format!("{:.0}", v))
                .x_desc("State")
                .y_desc("Population Density (per km²)")
                .axis_desc_style((FONT, 18))
                .draw()?;

            chart.draw_series(
                Histogram::vertical(&chart)
                    .style(DENSITY_PURPLE.filled())
                    .margin(4)
                    .data(bars.iter().copied()),
            )?;
            Ok(())
        })
    }

    /// Annotated Pearson matrix of literacy, urban population and density.
    pub fn correlation_heatmap(table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        let kind = ChartKind::Correlation;
        let matrix = StatsCalculator::heatmap_correlation(table)?;
        let n = matrix.labels.len();
        let labels = &matrix.labels;

        ChartRenderer::render_png(kind.size(), |root| {
            let area = root.titled(kind.title(), (FONT, 22))?;
            let (width, _) = area.dim_in_pixel();
            let (cells_area, bar_area) = area.split_horizontally(width as i32 - 110);

            let mut chart = ChartBuilder::on(&cells_area)
                .margin(15)
                .x_label_area_size(50)
                .y_label_area_size(150)
                .build_cartesian_2d(category_range(n), category_range(n))?;

            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(n)
                .y_labels(n)
                .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(labels, v))
                .y_label_formatter(&|v: &SegmentValue<i32>| flipped_label(labels, v))
                .label_style((FONT, 14))
                .draw()?;

            // Row 0 is drawn at the top
            chart.draw_series(matrix.values.iter().enumerate().flat_map(|(i, row)| {
                let y = (n - 1 - i) as i32;
                row.iter().enumerate().map(move |(j, &r)| {
                    let x = j as i32;
                    Rectangle::new(
                        [
                            (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                            (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                        ],
                        coolwarm(r).filled(),
                    )
                })
            }))?;

            chart.draw_series(matrix.values.iter().enumerate().flat_map(|(i, row)| {
                let y = (n - 1 - i) as i32;
                row.iter().enumerate().map(move |(j, &r)| {
                    let ink = if r.abs() > 0.6 { WHITE } else { BLACK };
                    Text::new(
                        correlation_annotation(r),
                        (SegmentValue::CenterOf(j as i32), SegmentValue::CenterOf(y)),
                        (FONT, 22)
                            .into_font()
                            .color(&ink)
                            .pos(Pos::new(HPos::Center, VPos::Center)),
                    )
                })
            }))?;

            // Color bar
            let mut scale = ChartBuilder::on(&bar_area)
                .margin_top(20)
                .margin_bottom(65)
                .margin_right(15)
                .y_label_area_size(45)
                .build_cartesian_2d(0f64..1f64, -1f64..1f64)?;

            scale
                .configure_mesh()
                .disable_mesh()
                .disable_x_axis()
                .y_labels(5)
                .y_label_formatter(&|v: &f64| format!("{:.1}", v))
                .label_style((FONT, 13))
                .draw()?;

            const STEPS: usize = 100;
            scale.draw_series((0..STEPS).map(|k| {
                let lo = -1.0 + 2.0 * k as f64 / STEPS as f64;
                let hi = -1.0 + 2.0 * (k + 1) as f64 / STEPS as f64;
                Rectangle::new([(0.0, lo), (1.0, hi)], coolwarm((lo + hi) / 2.0).filled())
            }))?;
            Ok(())
        })
    }

    /// Four bars: total males, females, urban and rural population.
    pub fn category_totals(table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        let kind = ChartKind::CategoryTotals;
        let totals = StatsCalculator::category_totals(table)?;
        let colors = [MALE_BLUE, FEMALE_PINK, URBAN_ORANGE, RURAL_GREEN];
        let names: Vec<String> = totals.iter().map(|t| t.label.to_string()).collect();
        let y_max = ChartRenderer::headroom(totals.iter().map(|t| t.total).fold(0.0, f64::max));

        ChartRenderer::render_png(kind.size(), |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(kind.title(), (FONT, 20))
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(80)
                .build_cartesian_2d(category_range(names.len()), 0f64..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .bold_line_style(GRID_GRAY)
                .light_line_style(WHITE)
                .x_labels(names.len())
                .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(&names, v))
                .y_label_formatter(&|v: &f64| ChartRenderer::format_count(*v))
                .x_desc("Category")
                .y_desc("Population")
                .label_style((FONT, 14))
                .axis_desc_style((FONT, 16))
                .draw()?;

            for (slot, (entry, color)) in totals.iter().zip(colors).enumerate() {
                chart.draw_series(
                    Histogram::vertical(&chart)
                        .style(color.filled())
                        .margin(20)
                        .data(std::iter::once((slot as i32, entry.total))),
                )?;
            }
            Ok(())
        })
    }

    /// Pie of the ten fastest-growing states, colored along viridis by rank.
    pub fn growth_top10_pie(table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        let kind = ChartKind::GrowthTop10;
        let growth = table.numeric(DECADAL_GROWTH)?;
        let states = table.states();

        let mut sizes = Vec::with_capacity(TOP_GROWTH_COUNT);
        let mut colors = Vec::with_capacity(TOP_GROWTH_COUNT);
        let mut labels = Vec::with_capacity(TOP_GROWTH_COUNT);
        for (rank, row) in top_n(&growth, TOP_GROWTH_COUNT).into_iter().enumerate() {
            match growth[row] {
                Some(value) if value > 0.0 => {
                    sizes.push(value);
                    colors.push(VIRIDIS_10[rank % VIRIDIS_10.len()]);
                    labels.push(states[row].clone());
                }
                other => warn!(
                    chart = kind.slug(),
                    state = %states[row],
                    growth = ?other,
                    "skipping slice without positive growth"
                ),
            }
        }

        if sizes.is_empty() {
            return Err(ChartError::NothingToPlot { chart: kind.title() });
        }

        ChartRenderer::render_png(kind.size(), |root| {
            let area = root.titled(kind.title(), (FONT, TITLE_SIZE))?;
            let (width, height) = area.dim_in_pixel();
            let center = (width as i32 / 2, height as i32 / 2);
            let radius = f64::from(width.min(height)) * 0.34;

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(140.0);
            pie.label_style((FONT, 17).into_font().color(&BLACK));
            pie.percentages((FONT, 15).into_font().color(&WHITE));
            area.draw(&pie)?;
            Ok(())
        })
    }

    /// Each state's share of the national population, most populous first.
    pub fn population_share_line(table: &PopulationTable) -> Result<Vec<u8>, ChartError> {
        let kind = ChartKind::PopulationShare;
        let population = table.numeric(POPULATION)?;
        let states = table.states();

        let order = descending_order(&population);
        let sorted: Vec<Option<f64>> = order.iter().map(|&row| population[row]).collect();
        let share = population_share(&sorted);
        let names: Vec<String> = order.iter().map(|&row| states[row].clone()).collect();

        let mut points = Vec::with_capacity(share.len());
        for (slot, value) in share.iter().enumerate() {
            match value {
                Some(pct) => points.push((slot as i32, *pct)),
                None => warn!(chart = kind.slug(), state = %names[slot], column = POPULATION, "skipping null population"),
            }
        }

        if points.is_empty() {
            return Err(ChartError::NothingToPlot { chart: kind.title() });
        }

        let y_max = ChartRenderer::headroom(points.iter().map(|&(_, y)| y).fold(0.0, f64::max));

        ChartRenderer::render_png(kind.size(), |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(kind.title(), (FONT, TITLE_SIZE))
                .margin(20)
                .x_label_area_size(200)
                .y_label_area_size(70)
                .build_cartesian_2d(category_range(names.len()), 0f64..y_max)?;

            chart
                .configure_mesh()
                .bold_line_style(GRID_GRAY)
                .light_line_style(WHITE)
                .x_labels(names.len())
                .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(&names, v))
                .x_label_style(
                    (FONT, STATE_LABEL_SIZE)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .y_label_formatter(&|v: &f64| format!("{:.1}", v))
                .x_desc("State")
                .y_desc("Population (%)")
                .axis_desc_style((FONT, 18))
                .draw()?;

            chart
                .draw_series(LineSeries::new(
                    points
                        .iter()
                        .map(|&(x, y)| (SegmentValue::CenterOf(x), y)),
                    LINE_BLUE.stroke_width(2),
                ))?
                .label("Population (%)")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], LINE_BLUE.stroke_width(2)));

            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((SegmentValue::CenterOf(x), y), 5, LINE_BLUE.filled())),
            )?;

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.9))
                .border_style(&BLACK)
                .label_font((FONT, 16))
                .draw()?;
            Ok(())
        })
    }
}
