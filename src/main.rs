//! Popdash - State Population Dashboard
//!
//! `popdash [web|demo]` loads the configured CSV and either serves the
//! dashboard over HTTP or opens the desktop demo.

use anyhow::Context;
use popdash::config::{AppConfig, Shell};
use popdash::web::{serve, AppState};
use popdash::DatasetLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let shell_arg = std::env::args().nth(1);
    let config = AppConfig::load()
        .and_then(|c| c.with_shell_arg(shell_arg.as_deref()))
        .context("Failed to read configuration")?;

    init_logging(&config.log_filter);
    info!(shell = %config.shell, data = %config.data_path.display(), "starting");

    let table = DatasetLoader::load_csv(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    match config.shell {
        Shell::Web => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(serve(AppState::new(table), &config.bind_address()))
        }
        Shell::Demo => popdash::gui::run(Some((config.data_path.clone(), table))),
    }
}
