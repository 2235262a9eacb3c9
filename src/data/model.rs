use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the preview table
// ---------------------------------------------------------------------------

/// A dynamically-typed preview cell as delivered by the analysis service.
///
/// Anything that is not a scalar (arrays, objects) is kept as its JSON text in
/// [`CellValue::Other`] so the table can still show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    Other(String),
}

impl From<JsonValue> for CellValue {
    fn from(val: JsonValue) -> Self {
        match val {
            JsonValue::String(s) => CellValue::String(s),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    CellValue::Float(f)
                } else {
                    CellValue::Other(n.to_string())
                }
            }
            JsonValue::Bool(b) => CellValue::Bool(b),
            JsonValue::Null => CellValue::Null,
            other => CellValue::Other(other.to_string()),
        }
    }
}

impl From<CellValue> for JsonValue {
    fn from(val: CellValue) -> Self {
        match val {
            CellValue::String(s) => JsonValue::String(s),
            CellValue::Integer(i) => JsonValue::from(i),
            CellValue::Float(f) => JsonValue::from(f),
            CellValue::Bool(b) => JsonValue::Bool(b),
            CellValue::Null => JsonValue::Null,
            CellValue::Other(text) => serde_json::from_str(&text).unwrap_or(JsonValue::String(text)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "null"),
            CellValue::Other(text) => write!(f, "{text}"),
        }
    }
}

impl CellValue {
    /// Coerce the cell to a finite number.
    ///
    /// Strings are trimmed before parsing, booleans count as 1/0. Null and
    /// blank strings count as 0; compound values never coerce.
    pub fn as_finite_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(f) => *f,
            CellValue::Bool(b) => f64::from(u8::from(*b)),
            CellValue::Null => 0.0,
            CellValue::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().ok()?
                }
            }
            CellValue::Other(_) => return None,
        };
        v.is_finite().then_some(v)
    }
}

// ---------------------------------------------------------------------------
// Wire types of the analysis service
// ---------------------------------------------------------------------------

/// One row of the tabular preview: column name → cell, in source column order.
pub type PreviewRow = IndexMap<String, CellValue>;

/// Pairwise Pearson coefficients. Neither symmetric nor complete.
pub type CorrelationMap = IndexMap<String, IndexMap<String, f64>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub rows: u64,
    #[serde(default)]
    pub cols: u64,
}

/// Column metadata produced by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(default)]
    pub dtype: String,
    #[serde(default, alias = "inferredSemantic")]
    pub inferred_semantic: Option<String>,
}

impl ColumnDescriptor {
    pub fn is_datetime(&self) -> bool {
        self.inferred_semantic.as_deref() == Some("datetime")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendInfo {
    pub column: String,
    pub slope: f64,
    pub r2: f64,
    #[serde(default)]
    pub direction: Option<Direction>,
}

// ---------------------------------------------------------------------------
// AnalysisResult – the complete response of the analysis service
// ---------------------------------------------------------------------------

/// The full analysis payload. Every collection defaults to empty so a sparse
/// response still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub preview: Vec<PreviewRow>,
    #[serde(default)]
    pub missing: IndexMap<String, u64>,
    #[serde(default, alias = "numericStats")]
    pub numeric_stats: IndexMap<String, NumericStats>,
    #[serde(default)]
    pub correlations: CorrelationMap,
    #[serde(default)]
    pub trends: Vec<TrendInfo>,
    #[serde(default)]
    pub insights: Vec<String>,
}

impl AnalysisResult {
    /// First numeric column in the analyzer's own key order.
    pub fn first_numeric_column(&self) -> Option<&str> {
        self.numeric_stats.keys().next().map(String::as_str)
    }

    /// Table headers: the keys of the first preview row.
    pub fn preview_headers(&self) -> Vec<String> {
        self.preview
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}
