use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use analytica::data::model::{AnalysisResult, Direction};

use crate::state::{AppState, MAX_COLS_LIMIT};

// ---------------------------------------------------------------------------
// Left side panel – column summary
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Summary");
    ui.separator();

    let mut max_cols = state.max_cols;
    if ui
        .add(egui::Slider::new(&mut max_cols, 1..=MAX_COLS_LIMIT).text("Heatmap columns"))
        .changed()
    {
        state.set_max_cols(max_cols);
    }
    ui.separator();

    let analysis = match &state.analysis {
        Some(a) => a,
        None => {
            ui.label("No analysis loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(&analysis.meta.filename);
            ui.label(format!(
                "{} rows × {} cols",
                analysis.meta.rows, analysis.meta.cols
            ));
            ui.separator();

            columns_section(ui, analysis);
            trends_section(ui, analysis);
        });
}

fn columns_section(ui: &mut Ui, analysis: &AnalysisResult) {
    egui::CollapsingHeader::new(RichText::new("Columns").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for col in &analysis.columns {
                let missing = analysis.missing.get(&col.name).copied().unwrap_or(0);
                let semantic = col
                    .inferred_semantic
                    .as_deref()
                    .map(|s| format!(", {s}"))
                    .unwrap_or_default();

                let header = format!("{}  ({}{semantic})", col.name, col.dtype);
                egui::CollapsingHeader::new(header)
                    .id_salt(&col.name)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.label(format!("missing: {missing}"));
                        if let Some(stats) = analysis.numeric_stats.get(&col.name) {
                            egui::Grid::new(("stats", &col.name))
                                .num_columns(2)
                                .show(ui, |ui: &mut Ui| {
                                    for (label, value) in [
                                        ("count", stats.count),
                                        ("mean", stats.mean),
                                        ("std", stats.std),
                                        ("min", stats.min),
                                        ("p25", stats.p25),
                                        ("median", stats.median),
                                        ("p75", stats.p75),
                                        ("max", stats.max),
                                    ] {
                                        ui.label(label);
                                        ui.label(format_stat(value));
                                        ui.end_row();
                                    }
                                });
                        }
                    });
            }
        });
}

fn trends_section(ui: &mut Ui, analysis: &AnalysisResult) {
    if analysis.trends.is_empty() {
        return;
    }
    egui::CollapsingHeader::new(RichText::new("Trends").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for trend in &analysis.trends {
                let (arrow, color) = match trend.direction {
                    Some(Direction::Up) => ("▲", Color32::from_rgb(22, 163, 74)),
                    Some(Direction::Down) => ("▼", Color32::from_rgb(220, 38, 38)),
                    None => ("–", Color32::GRAY),
                };
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new(arrow).color(color));
                    ui.label(format!(
                        "{}  slope {:.4}, r² {:.2}",
                        trend.column, trend.slope, trend.r2
                    ));
                });
            }
        });
}

fn format_stat(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_else(|| "–".to_string())
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

pub fn insights(ui: &mut Ui, analysis: &AnalysisResult) {
    ui.heading("Insights");
    if analysis.insights.is_empty() {
        ui.label(RichText::new("No insights generated.").weak());
        return;
    }
    for insight in &analysis.insights {
        ui.label(format!("•  {insight}"));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open analysis…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.heatmap.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export heatmap CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source_path {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open analysis result")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            state.report_error(&e);
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export correlation matrix")
        .add_filter("CSV", &["csv"])
        .set_file_name("correlations.csv")
        .save_file();

    if let Some(path) = file {
        match state.export_heatmap(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => state.report_error(&e),
        }
    }
}
