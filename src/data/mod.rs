/// Data layer: wire types, loading, and the two visual derivations.
///
/// Architecture:
/// ```text
///   analysis.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → AnalysisResult
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌─────────────┐      ┌──────────┐
///   │ correlation  │      │  trend    │  first numeric column → PlotPoints
///   └─────────────┘      └──────────┘
///        │  ReducedMatrix
///        ▼
///   ┌──────────┐
///   │  export   │  matrix → CSV
///   └──────────┘
/// ```
pub mod correlation;
pub mod export;
pub mod loader;
pub mod model;
pub mod trend;
