use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{heatmap, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AnalyticaApp {
    pub state: AppState,
}

impl AnalyticaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AnalyticaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: column summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: insights, preview, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            analysis_view(ui, &self.state);
        });
    }
}

fn analysis_view(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an analysis result to view it  (File → Open analysis…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            panels::insights(ui, analysis);
            ui.separator();

            table::preview_table(ui, analysis);

            if let Some(series) = &state.trend {
                ui.separator();
                plot::trend_plot(ui, series);
            }

            if state.has_correlations() {
                ui.separator();
                ui.heading("Correlation Heatmap");
                heatmap::correlation_heatmap(ui, &state.heatmap);
            }
        });
}
