//! Chart Viewer Widget
//! Right side scrollable panel showing the rendered chart images.
//! Supports responsive multi-column layout based on available width.

use crate::charts::ChartKind;
use crate::dashboard::Dashboard;
use egui::{ColorImage, RichText, ScrollArea, TextureHandle, TextureOptions};
use image::ImageError;

const CHART_SPACING: f32 = 15.0;
const CARD_WIDTH: f32 = 780.0;

/// Decode PNG bytes into an egui image.
pub fn decode_png(png: &[u8]) -> Result<ColorImage, ImageError> {
    let rgba = image::load_from_memory(png)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Scrollable chart display area. Cards wrap into as many columns as fit.
#[derive(Default)]
pub struct ChartViewer {
    charts: Vec<(ChartKind, TextureHandle)>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.charts.clear();
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Upload every chart of `dashboard` as a texture, replacing the old ones.
    pub fn set_dashboard(&mut self, ctx: &egui::Context, dashboard: &Dashboard) -> Result<(), ImageError> {
        let mut charts = Vec::with_capacity(dashboard.len());
        for chart in dashboard.iter() {
            let image = decode_png(&chart.png)?;
            let texture = ctx.load_texture(chart.kind.slug(), image, TextureOptions::LINEAR);
            charts.push((chart.kind, texture));
        }
        self.charts = charts;
        Ok(())
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Charts").size(20.0));
            });
            return;
        }

        let avail_width = ui.available_width();
        let num_columns = ((avail_width / (CARD_WIDTH + CHART_SPACING)).floor() as usize).max(1);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in self.charts.chunks(num_columns) {
                    ui.horizontal_top(|ui| {
                        for (kind, texture) in row {
                            Self::draw_card(ui, *kind, texture);
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, kind: ChartKind, texture: &TextureHandle) {
        let card_width = CARD_WIDTH - 20.0;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(card_width);
                ui.vertical(|ui| {
                    ui.label(RichText::new(kind.title()).size(16.0).strong());
                    ui.add_space(8.0);
                    ui.add(egui::Image::new(texture).max_width(card_width));
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartRenderer;

    #[test]
    fn decodes_rendered_png() {
        let png = ChartRenderer::render_png((20, 10), |_| Ok(())).unwrap();
        let image = decode_png(&png).unwrap();
        assert_eq!(image.size, [20, 10]);
        assert!(image.pixels.iter().all(|p| *p == egui::Color32::WHITE));
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_png(b"not a png").is_err());
    }
}
