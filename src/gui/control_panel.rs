//! Control Panel Widget
//! Left side panel with the data source, the generate button and progress.

use egui::{Color32, RichText};
use std::path::{Path, PathBuf};

/// Left side control panel with file selection and generation controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub state_count: usize,
    pub progress: f32,
    pub status: String,
    pub generate_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            state_count: 0,
            progress: 0.0,
            status: "Ready".to_string(),
            generate_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully loaded table.
    pub fn set_loaded(&mut self, path: &Path, state_count: usize) {
        self.csv_path = Some(path.to_path_buf());
        self.state_count = state_count;
        self.generate_enabled = state_count > 0;
        self.set_progress(0.0, &format!("Loaded {} states", state_count));
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Population Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });

                if self.state_count > 0 {
                    ui.label(
                        RichText::new(format!("{} states", self.state_count))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.generate_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Generate Dashboard").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Generate;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);
        ui.label(RichText::new(&self.status).size(11.0).color(self.status_color()));

        action
    }

    fn status_color(&self) -> Color32 {
        if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        }
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Generate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_enables_generation() {
        let mut panel = ControlPanel::new();
        assert!(!panel.generate_enabled);

        panel.set_loaded(Path::new("data/population.csv"), 36);
        assert!(panel.generate_enabled);
        assert_eq!(panel.status, "Loaded 36 states");
        assert_eq!(panel.status_color(), Color32::GRAY);

        panel.set_progress(0.0, "Error: Column 'State' is missing");
        assert_eq!(panel.status_color(), Color32::from_rgb(220, 53, 69));
    }
}
