//! GUI module - Demo shell components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::{run, DashboardApp};
pub use chart_viewer::{decode_png, ChartViewer};
pub use control_panel::{ControlPanel, ControlPanelAction};
