use std::path::{Path, PathBuf};

use super::model::AnalysisResult;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing analysis JSON in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an analysis result saved by the analysis service.
///
/// Expected shape (every collection may be omitted):
///
/// ```json
/// {
///   "meta": { "filename": "sales.csv", "rows": 1200, "cols": 6 },
///   "columns": [{ "name": "date", "dtype": "object", "inferred_semantic": "datetime" }],
///   "preview": [{ "date": "2024-01-01", "revenue": 120.5 }],
///   "missing": { "revenue": 3 },
///   "numeric_stats": { "revenue": { "count": 1197, "mean": 98.1, ... } },
///   "correlations": { "revenue": { "units": 0.87 } },
///   "trends": [{ "column": "revenue", "slope": 0.4, "r2": 0.62, "direction": "up" }],
///   "insights": ["revenue rises over time"]
/// }
/// ```
pub fn load_file(path: &Path) -> Result<AnalysisResult, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "json" {
        return Err(LoadError::UnsupportedExtension(ext));
    }

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let analysis = parse_analysis(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "Loaded analysis of '{}' ({} rows, {} cols, {} preview rows, {} correlated columns)",
        analysis.meta.filename,
        analysis.meta.rows,
        analysis.meta.cols,
        analysis.preview.len(),
        analysis.correlations.len()
    );
    Ok(analysis)
}

/// Parse an analysis payload from JSON text.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(
            file,
            r#"{{"meta": {{"filename": "x.csv", "rows": 3, "cols": 2}}, "insights": ["a"]}}"#
        )
        .expect("write");

        let analysis = load_file(file.path()).expect("load");
        assert_eq!(analysis.meta.rows, 3);
        assert_eq!(analysis.insights, vec!["a"]);
    }

    #[test]
    fn rejects_other_extensions() {
        let err = load_file(Path::new("data.parquet")).expect_err("unsupported");
        assert!(matches!(err, LoadError::UnsupportedExtension(ref e) if e == "parquet"));
        assert_eq!(err.to_string(), "unsupported file extension: .parquet");
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".JSON")
            .tempfile()
            .expect("tempfile");
        write!(file, "{{ not json").expect("write");

        let err = load_file(file.path()).expect_err("invalid json");
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().starts_with("parsing analysis JSON in"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_file(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
