use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::model::{AnalysisResult, CellValue, ColumnDescriptor, PreviewRow};

// ---------------------------------------------------------------------------
// Plot points
// ---------------------------------------------------------------------------

/// X coordinate of a trend point: a preview row index or a parsed instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisValue {
    Index(usize),
    Instant(DateTime<Utc>),
}

impl AxisValue {
    /// Numeric form for plotting: the index itself, or epoch milliseconds.
    pub fn as_f64(&self) -> f64 {
        match self {
            AxisValue::Index(i) => *i as f64,
            AxisValue::Instant(t) => t.timestamp_millis() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: AxisValue,
    /// Always finite.
    pub y: f64,
}

/// Which x axis the series was built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XAxis {
    RowIndex,
    Datetime(String),
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date-like string. Strings without an offset are read as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(parsed.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, fmt) {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    parse_partial_date(raw)
}

/// `YYYY-MM` and `YYYY`, both read as the first day of the period.
fn parse_partial_date(raw: &str) -> Option<DateTime<Utc>> {
    let padded = match raw.len() {
        4 if raw.bytes().all(|b| b.is_ascii_digit()) => format!("{raw}-01-01"),
        7 => format!("{raw}-01"),
        _ => return None,
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Interpret a preview cell as an instant.
///
/// Numbers are epoch milliseconds; zero, null and empty cells are not dates.
fn cell_instant(cell: &CellValue) -> Option<DateTime<Utc>> {
    match cell {
        CellValue::String(s) => parse_instant(s),
        CellValue::Integer(ms) if *ms != 0 => Utc.timestamp_millis_opt(*ms).single(),
        CellValue::Float(ms) if *ms != 0.0 && ms.is_finite() => {
            Utc.timestamp_millis_opt(ms.trunc() as i64).single()
        }
        _ => None,
    }
}

fn cell_number(row: &PreviewRow, column: &str) -> Option<f64> {
    row.get(column)?.as_finite_f64()
}

// ---------------------------------------------------------------------------
// Series builder
// ---------------------------------------------------------------------------

/// First column whose inferred semantic is `datetime`.
pub fn datetime_column(columns: &[ColumnDescriptor]) -> Option<&str> {
    columns
        .iter()
        .find(|c| c.is_datetime())
        .map(|c| c.name.as_str())
}

/// Build the trend points for `numeric_column` over the preview.
///
/// Uses the first datetime column as x when one exists, row index otherwise.
/// Rows whose x or y cannot be read are skipped; preview order is kept.
pub fn build_series(
    columns: &[ColumnDescriptor],
    preview: &[PreviewRow],
    numeric_column: Option<&str>,
) -> Vec<PlotPoint> {
    let Some(y_col) = numeric_column else {
        return Vec::new();
    };
    if preview.is_empty() {
        return Vec::new();
    }

    let points: Vec<PlotPoint> = match datetime_column(columns) {
        Some(x_col) => preview
            .iter()
            .filter_map(|row| {
                let x = row.get(x_col).and_then(cell_instant)?;
                let y = cell_number(row, y_col)?;
                Some(PlotPoint { x: AxisValue::Instant(x), y })
            })
            .collect(),
        None => preview
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let y = cell_number(row, y_col)?;
                Some(PlotPoint { x: AxisValue::Index(i), y })
            })
            .collect(),
    };

    log::debug!(
        "trend series for '{y_col}': {} of {} preview rows kept",
        points.len(),
        preview.len()
    );
    points
}

// ---------------------------------------------------------------------------
// TrendSeries – builder output plus the axis choice for labelling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub y_column: String,
    pub x_axis: XAxis,
    pub points: Vec<PlotPoint>,
}

impl TrendSeries {
    /// Build the quick-look series: first numeric column of the analysis
    /// against its first datetime column (or row index).
    ///
    /// Returns `None` when there is nothing to plot.
    pub fn from_analysis(analysis: &AnalysisResult) -> Option<Self> {
        let y_column = analysis.first_numeric_column()?;
        let points = build_series(&analysis.columns, &analysis.preview, Some(y_column));
        if points.is_empty() {
            return None;
        }
        let x_axis = match datetime_column(&analysis.columns) {
            Some(col) => XAxis::Datetime(col.to_string()),
            None => XAxis::RowIndex,
        };
        Some(Self {
            y_column: y_column.to_string(),
            x_axis,
            points,
        })
    }

    /// Chart title, e.g. `Sample Trend (price vs date)`.
    pub fn title(&self) -> String {
        match &self.x_axis {
            XAxis::Datetime(col) => format!("Sample Trend ({} vs {col})", self.y_column),
            XAxis::RowIndex => format!("Sample Trend ({} vs row index)", self.y_column),
        }
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self.x_axis, XAxis::Datetime(_))
    }
}
