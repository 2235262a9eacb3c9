use chrono::{DateTime, Utc};
use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use analytica::data::trend::TrendSeries;

const LINE_COLOR: Color32 = Color32::from_rgb(37, 99, 235);

// ---------------------------------------------------------------------------
// Trend plot
// ---------------------------------------------------------------------------

/// Render the quick-look trend chart.
pub fn trend_plot(ui: &mut Ui, series: &TrendSeries) {
    ui.heading(series.title());

    let points: PlotPoints = series
        .points
        .iter()
        .map(|p| [p.x.as_f64(), p.y])
        .collect();

    let line = Line::new(points)
        .name(&series.y_column)
        .color(LINE_COLOR)
        .width(1.5);

    let mut plot = Plot::new("trend_plot")
        .height(280.0)
        .y_axis_label(series.y_column.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);

    plot = if series.is_datetime() {
        plot.x_axis_formatter(|mark, _range| format_date(mark.value))
            .label_formatter(|_name, value| {
                format!("{}\n{:.3}", format_datetime(value.x), value.y)
            })
    } else {
        plot.x_axis_label("row index")
            .label_formatter(|_name, value| format!("row {:.0}\n{:.3}", value.x, value.y))
    };

    plot.show(ui, |plot_ui| {
        plot_ui.line(line);
    });
}

fn instant(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Axis tick label for an epoch-millisecond coordinate.
fn format_date(millis: f64) -> String {
    instant(millis)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Hover label for an epoch-millisecond coordinate.
fn format_datetime(millis: f64) -> String {
    instant(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
