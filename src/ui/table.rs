use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use analytica::data::model::{AnalysisResult, PreviewRow};

/// Render the raw preview sample as a striped table.
pub fn preview_table(ui: &mut Ui, analysis: &AnalysisResult) {
    ui.heading(format!(
        "Preview ({} rows, {} cols)",
        analysis.meta.rows, analysis.meta.cols
    ));

    if analysis.preview.is_empty() {
        ui.label(RichText::new("No preview available.").weak());
        return;
    }
    let headers = analysis.preview_headers();

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), headers.len())
                .header(22.0, |mut header| {
                    for h in &headers {
                        header.col(|ui: &mut Ui| {
                            ui.strong(h);
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, analysis.preview.len(), |mut row| {
                        let record = &analysis.preview[row.index()];
                        for h in &headers {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell_text(record, h));
                            });
                        }
                    });
                });
        });
}

/// Display text of one cell; absent cells are blank.
fn cell_text(row: &PreviewRow, column: &str) -> String {
    row.get(column).map(ToString::to_string).unwrap_or_default()
}
