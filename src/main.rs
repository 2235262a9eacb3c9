mod app;
mod state;
mod ui;

use std::path::PathBuf;

use analytica::data::correlation::DEFAULT_MAX_COLS;
use app::AnalyticaApp;
use clap::Parser;
use eframe::egui;
use log::LevelFilter;
use state::AppState;

/// Desktop viewer for dataset analysis results.
#[derive(Debug, Parser)]
#[command(name = "analytica", version, about)]
struct Cli {
    /// Analysis result (JSON) to open at start.
    file: Option<PathBuf>,

    /// Maximum number of columns shown in the correlation heatmap.
    #[arg(long, default_value_t = DEFAULT_MAX_COLS)]
    max_cols: usize,
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if std::env::var("RUST_LOG").is_err() {
        builder.filter_module("analytica", LevelFilter::Info);
    }
    builder.format_timestamp_millis().init();
}

fn main() -> eframe::Result {
    init_logging();
    let cli = Cli::parse();

    let mut state = AppState::new(cli.max_cols);
    if let Some(path) = &cli.file {
        if let Err(e) = state.open(path) {
            state.report_error(&e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Analytica – Analysis Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(AnalyticaApp::new(state)))),
    )
}
