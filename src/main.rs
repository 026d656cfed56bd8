#![forbid(unsafe_code)]

mod app;
mod config;
mod constants;
mod fatal;
mod history;
mod refresh;
mod render;
mod watcher;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use eframe::{NativeOptions, egui};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use app::PreviewApp;
use constants::files::CONFIG_FILE;

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = PathBuf::from(CONFIG_FILE);

    // The startup load only sizes and places the window; every refresh
    // re-reads the file after this.
    let startup = match config::load(&config_path) {
        Ok(config) => config,
        Err(err) => fatal::report_fatal_error(&err),
    };
    info!(config = ?startup, "loaded startup configuration");

    let (x, y, width, height) = app::window_geometry(&startup);
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ROI Preview")
            .with_decorations(false)
            .with_resizable(false)
            .with_position(egui::pos2(x as f32, y as f32))
            .with_inner_size(egui::vec2(width as f32, height as f32)),
        ..Default::default()
    };

    eframe::run_native(
        "roi-preview",
        options,
        Box::new(move |cc| Ok(Box::new(PreviewApp::new(cc, config_path, &startup)))),
    )
    .map_err(|err| anyhow!("Failed to launch preview window: {err}"))
}
