//! Turns a precomputed dataset analysis into render-ready visuals: a trend
//! series for the first numeric column and a reduced correlation matrix with
//! its diverging color scale.

pub mod color;
pub mod data;

pub use color::{color_for, legend_stops, Rgb};
pub use data::correlation::{reduce, ReducedMatrix, SymmetricPairs, DEFAULT_MAX_COLS};
pub use data::model::{AnalysisResult, ColumnDescriptor, CorrelationMap, PreviewRow};
pub use data::trend::{build_series, AxisValue, PlotPoint, TrendSeries};
