//! Popdash - State Population Dashboard
//!
//! Loads a state-level population CSV, cleans its numeric columns and renders
//! a fixed set of static PNG charts. The web and desktop shells both call
//! [`generate_dashboard`].

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod gui;
pub mod stats;
pub mod web;

pub use charts::{ChartError, ChartKind};
pub use dashboard::{generate_dashboard, Dashboard, RenderedChart};
pub use data::{DatasetLoader, LoaderError, PopulationTable};
