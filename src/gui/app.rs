//! Demo Shell Main Application
//! Main window with control panel and chart viewer.

use crate::dashboard::{generate_dashboard_with_progress, Dashboard};
use crate::data::{DatasetLoader, PopulationTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Generation result from background thread
enum GenResult {
    Progress(f32, String),
    Complete(Dashboard),
    Error(String),
}

/// CSV loading result from background thread
enum LoadResult {
    Complete { path: PathBuf, table: PopulationTable },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    table: Option<Arc<PopulationTable>>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    gen_rx: Option<Receiver<GenResult>>,
    is_generating: bool,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, table: Option<(PathBuf, PopulationTable)>) -> Self {
        let mut control_panel = ControlPanel::new();
        let table = table.map(|(path, table)| {
            control_panel.set_loaded(&path, table.height());
            Arc::new(table)
        });

        Self {
            table,
            control_panel,
            chart_viewer: ChartViewer::new(),
            gen_rx: None,
            is_generating: false,
            load_rx: None,
            is_loading: false,
        }
    }

    /// Pick a CSV and load it off the UI thread.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.chart_viewer.clear();
            self.control_panel.set_progress(0.0, "Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            thread::spawn(move || {
                let result = match DatasetLoader::load_csv(&path) {
                    Ok(table) => LoadResult::Complete { path, table },
                    Err(e) => LoadResult::Error(e.to_string()),
                };
                let _ = tx.send(result);
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { path, table }) => {
                info!(path = %path.display(), states = table.height(), "dataset replaced");
                self.control_panel.set_loaded(&path, table.height());
                self.table = Some(Arc::new(table));
                self.is_loading = false;
            }
            Ok(LoadResult::Error(e)) => {
                error!(error = %e, "dataset load failed");
                self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                self.is_loading = false;
            }
            Err(_) => self.load_rx = Some(rx),
        }
    }

    /// Start generation in background thread
    fn start_generation(&mut self) {
        let Some(table) = self.table.clone() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };

        let (tx, rx) = channel();
        self.gen_rx = Some(rx);
        self.is_generating = true;
        self.control_panel.set_progress(1.0, "Generating charts...");

        thread::spawn(move || Self::run_generation(tx, &table));
    }

    /// Run generation (called from background thread)
    fn run_generation(tx: Sender<GenResult>, table: &PopulationTable) {
        let progress_tx = tx.clone();
        let result = generate_dashboard_with_progress(table, |done, total| {
            let pct = done as f32 / total as f32 * 100.0;
            let _ = progress_tx.send(GenResult::Progress(
                pct,
                format!("Rendered chart {}/{}", done, total),
            ));
        });

        let _ = tx.send(match result {
            Ok(dashboard) => GenResult::Complete(dashboard),
            Err(e) => GenResult::Error(e.to_string()),
        });
    }

    /// Check for generation results
    fn check_generation_results(&mut self, ctx: &egui::Context) {
        let Some(rx) = self.gen_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                GenResult::Progress(progress, status) => {
                    self.control_panel.set_progress(progress, &status);
                }
                GenResult::Complete(dashboard) => {
                    match self.chart_viewer.set_dashboard(ctx, &dashboard) {
                        Ok(()) => self.control_panel.set_progress(
                            100.0,
                            &format!("Complete! {} charts ready", dashboard.len()),
                        ),
                        Err(e) => self.control_panel.set_progress(0.0, &format!("Error: {}", e)),
                    }
                    self.is_generating = false;
                    should_keep_receiver = false;
                }
                GenResult::Error(e) => {
                    error!(error = %e, "dashboard generation failed");
                    self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                    self.is_generating = false;
                    should_keep_receiver = false;
                }
            }
        }

        if should_keep_receiver {
            self.gen_rx = Some(rx);
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        self.check_generation_results(ctx);

        if self.is_loading || self.is_generating {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                match self.control_panel.show(ui) {
                    ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                    ControlPanelAction::Generate => {
                        if !self.is_generating {
                            self.start_generation();
                        }
                    }
                    ControlPanelAction::None => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

/// Open the demo window, optionally with a table already loaded.
pub fn run(initial: Option<(PathBuf, PopulationTable)>) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Population Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Population Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, initial)))),
    )
    .map_err(|e| anyhow::anyhow!("Demo window failed: {e}"))
}
