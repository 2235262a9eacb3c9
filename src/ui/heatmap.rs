use std::f32::consts::FRAC_PI_4;

use eframe::egui::epaint::TextShape;
use eframe::egui::{
    pos2, vec2, Align2, Color32, FontId, Mesh, Pos2, Rect, RichText, ScrollArea, Sense, Shape,
    Ui, Vec2,
};

use analytica::color::{color_for, label_color_for, legend_stops, to_color32};
use analytica::data::correlation::ReducedMatrix;

// Layout, in points.
const CELL: f32 = 28.0;
const PAD_LEFT: f32 = 140.0;
const PAD_TOP: f32 = 120.0;
const LEGEND_HEIGHT: f32 = 12.0;

const LABEL_COLOR: Color32 = Color32::from_rgb(17, 24, 39);
const CAPTION_COLOR: Color32 = Color32::from_rgb(55, 65, 81);

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

fn canvas_size(n: usize) -> Vec2 {
    let grid = n as f32 * CELL;
    vec2(PAD_LEFT + grid + 20.0, PAD_TOP + grid + 36.0)
}

/// Cell under a point given relative to the canvas origin.
fn cell_at(local: Vec2, n: usize) -> Option<(usize, usize)> {
    let col = (local.x - PAD_LEFT) / CELL;
    let row = (local.y - PAD_TOP) / CELL;
    if col < 0.0 || row < 0.0 {
        return None;
    }
    let (i, j) = (row as usize, col as usize);
    (i < n && j < n).then_some((i, j))
}

fn tooltip_label(matrix: &ReducedMatrix, i: usize, j: usize) -> String {
    format!(
        "{} ↔ {}: {:.2}",
        matrix.keys[i], matrix.keys[j], matrix.cells[i][j]
    )
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

/// Render the reduced correlation matrix with labels and a legend.
///
/// An empty matrix renders a short notice instead of a chart.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &ReducedMatrix) {
    if matrix.is_empty() {
        ui.label(RichText::new("No correlations to display.").weak());
        return;
    }

    ScrollArea::horizontal()
        .id_salt("heatmap_scroll")
        .show(ui, |ui: &mut Ui| {
            let n = matrix.len();
            let grid = n as f32 * CELL;
            let (response, painter) = ui.allocate_painter(canvas_size(n), Sense::hover());
            let origin = response.rect.min;
            let at = |x: f32, y: f32| -> Pos2 { origin + vec2(x, y) };

            painter.text(
                at(PAD_LEFT + grid / 2.0, 20.0),
                Align2::CENTER_CENTER,
                "Correlation (Pearson ρ)",
                FontId::proportional(12.0),
                CAPTION_COLOR,
            );

            // Column labels, rotated -45° and ending just above their column.
            let angle = -FRAC_PI_4;
            let along = vec2(angle.cos(), angle.sin());
            let across = vec2(-angle.sin(), angle.cos());
            for (j, key) in matrix.keys.iter().enumerate() {
                let galley =
                    painter.layout_no_wrap(key.clone(), FontId::proportional(11.0), LABEL_COLOR);
                let anchor = at(PAD_LEFT + j as f32 * CELL + CELL / 2.0, PAD_TOP - 8.0);
                let pos = anchor - along * galley.size().x - across * galley.size().y;
                painter.add(TextShape::new(pos, galley, LABEL_COLOR).with_angle(angle));
            }

            for (i, key) in matrix.keys.iter().enumerate() {
                painter.text(
                    at(PAD_LEFT - 8.0, PAD_TOP + i as f32 * CELL + CELL / 2.0),
                    Align2::RIGHT_CENTER,
                    key,
                    FontId::proportional(11.0),
                    LABEL_COLOR,
                );
            }

            let hovered = response
                .hover_pos()
                .and_then(|pos| cell_at(pos - origin, n));

            for (i, row) in matrix.cells.iter().enumerate() {
                for (j, &v) in row.iter().enumerate() {
                    let rect = Rect::from_min_size(
                        at(PAD_LEFT + j as f32 * CELL, PAD_TOP + i as f32 * CELL),
                        vec2(CELL - 1.0, CELL - 1.0),
                    );
                    painter.rect_filled(rect, 0.0, to_color32(color_for(v)));
                    if hovered == Some((i, j)) {
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            format!("{v:.2}"),
                            FontId::proportional(9.0),
                            label_color_for(v),
                        );
                    }
                }
            }

            let legend = Rect::from_min_size(
                at(PAD_LEFT, PAD_TOP + grid + 10.0),
                vec2(grid, LEGEND_HEIGHT),
            );
            paint_legend(&painter, legend);

            if let Some((i, j)) = hovered {
                response.on_hover_text_at_pointer(tooltip_label(matrix, i, j));
            }
        });
}

/// Gradient bar plus `-1 / 0 / +1` captions under it.
fn paint_legend(painter: &eframe::egui::Painter, rect: Rect) {
    let stops = legend_stops();
    let mut mesh = Mesh::default();
    for (offset, color) in stops {
        let x = rect.left() + rect.width() * offset;
        let color = to_color32(color);
        mesh.colored_vertex(pos2(x, rect.top()), color);
        mesh.colored_vertex(pos2(x, rect.bottom()), color);
    }
    for k in 0..(stops.len() as u32 - 1) {
        let base = 2 * k;
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 2, base + 3);
    }
    painter.add(Shape::mesh(mesh));

    let y = rect.bottom() + 8.0;
    let font = FontId::proportional(10.0);
    for (x, align, text) in [
        (rect.left(), Align2::LEFT_CENTER, "-1"),
        (rect.center().x, Align2::CENTER_CENTER, "0"),
        (rect.right(), Align2::RIGHT_CENTER, "+1"),
    ] {
        painter.text(pos2(x, y), align, text, font.clone(), CAPTION_COLOR);
    }
}
