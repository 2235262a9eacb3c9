/// Rendering layer: egui widgets drawing the derived artifacts.
pub mod heatmap;
pub mod panels;
pub mod plot;
pub mod table;
