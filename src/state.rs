use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use analytica::data::correlation::{reduce, ReducedMatrix};
use analytica::data::export::export_matrix;
use analytica::data::loader::load_file;
use analytica::data::model::AnalysisResult;
use analytica::data::trend::TrendSeries;

/// Upper bound offered by the "max columns" slider.
pub const MAX_COLS_LIMIT: usize = 40;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded analysis (None until user opens a file).
    pub analysis: Option<AnalysisResult>,

    /// Where the current analysis came from.
    pub source_path: Option<PathBuf>,

    /// Reduced correlation matrix for the heatmap (cached).
    pub heatmap: ReducedMatrix,

    /// Quick-look trend series (cached). None suppresses the chart.
    pub trend: Option<TrendSeries>,

    /// Heatmap column bound.
    pub max_cols: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(max_cols: usize) -> Self {
        Self {
            analysis: None,
            source_path: None,
            heatmap: ReducedMatrix::default(),
            trend: None,
            max_cols,
            status_message: None,
        }
    }

    /// Ingest a newly loaded analysis, replacing everything derived from the
    /// previous one.
    pub fn set_analysis(&mut self, analysis: AnalysisResult) {
        self.heatmap = reduce(&analysis.correlations, self.max_cols);
        self.trend = TrendSeries::from_analysis(&analysis);
        self.analysis = Some(analysis);
        self.status_message = None;
    }

    /// Load an analysis JSON from disk into the state.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let analysis =
            load_file(path).with_context(|| format!("opening {}", path.display()))?;
        self.set_analysis(analysis);
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Change the heatmap bound and rebuild the matrix.
    pub fn set_max_cols(&mut self, max_cols: usize) {
        self.max_cols = max_cols;
        if let Some(analysis) = &self.analysis {
            self.heatmap = reduce(&analysis.correlations, max_cols);
        }
    }

    /// Whether the heatmap section should be shown at all.
    pub fn has_correlations(&self) -> bool {
        self.analysis
            .as_ref()
            .is_some_and(|a| !a.correlations.is_empty())
    }

    pub fn export_heatmap(&self, path: &Path) -> Result<()> {
        export_matrix(&self.heatmap, path)
            .with_context(|| format!("exporting heatmap to {}", path.display()))
    }

    /// Record a failure for the status bar.
    pub fn report_error(&mut self, err: &anyhow::Error) {
        log::error!("{err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analysis() -> AnalysisResult {
        serde_json::from_value(json!({
            "meta": {"filename": "s.csv", "rows": 3, "cols": 3},
            "preview": [{"a": 1, "b": 2}, {"a": 2, "b": 5}],
            "numeric_stats": {"a": {}, "b": {}},
            "correlations": {"a": {"b": 0.9, "c": 0.2}, "b": {"c": -0.4}}
        }))
        .expect("analysis")
    }

    #[test]
    fn set_analysis_builds_both_artifacts() {
        let mut state = AppState::new(12);
        state.status_message = Some("old".into());
        state.set_analysis(analysis());
        assert_eq!(state.heatmap.keys, vec!["b", "a", "c"]);
        assert_eq!(state.trend.as_ref().map(|t| t.points.len()), Some(2));
        assert!(state.has_correlations());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn changing_max_cols_rebuilds_heatmap() {
        let mut state = AppState::new(12);
        state.set_analysis(analysis());
        state.set_max_cols(1);
        assert_eq!(state.heatmap.keys, vec!["b"]);
        assert_eq!(state.heatmap.cells, vec![vec![1.0]]);
    }

    #[test]
    fn new_analysis_replaces_the_old_one() {
        let mut state = AppState::new(12);
        state.set_analysis(analysis());
        state.set_analysis(AnalysisResult::default());
        assert!(state.heatmap.is_empty());
        assert!(state.trend.is_none());
        assert!(!state.has_correlations());
    }

    #[test]
    fn open_failure_keeps_previous_state() {
        let mut state = AppState::new(12);
        state.set_analysis(analysis());
        let err = state.open(Path::new("missing.json")).expect_err("missing file");
        state.report_error(&err);
        assert!(state.has_correlations());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error: opening missing.json")));
    }
}
