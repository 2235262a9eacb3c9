use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use analytica::data::model::{
    AnalysisResult, CellValue, ColumnDescriptor, Direction, Meta, NumericStats, PreviewRow,
    TrendInfo,
};

/// Write a deterministic sample analysis result for the viewer.
#[derive(Debug, Parser)]
struct Args {
    /// Output path.
    #[arg(default_value = "sample_analysis.json")]
    output: PathBuf,

    /// Number of daily rows to generate.
    #[arg(long, default_value_t = 60)]
    rows: usize,
}

/// Normal sample via Box-Muller.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + std_dev * z
}

// ---------------------------------------------------------------------------
// Summary statistics for the generated columns
// ---------------------------------------------------------------------------

fn mean(v: &[f64]) -> f64 {
    v.iter().sum::<f64>() / v.len() as f64
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let (ma, mb) = (mean(a), mean(b));
    let cov: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    let va: f64 = a.iter().map(|x| (x - ma).powi(2)).sum();
    let vb: f64 = b.iter().map(|y| (y - mb).powi(2)).sum();
    let r = cov / (va * vb).sqrt();
    if r.is_finite() {
        (r * 1000.0).round() / 1000.0
    } else {
        0.0
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn stats(v: &[f64]) -> NumericStats {
    let mut sorted = v.to_vec();
    sorted.sort_by(f64::total_cmp);
    let m = mean(v);
    let var = v.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (v.len() - 1).max(1) as f64;
    NumericStats {
        count: Some(v.len() as f64),
        mean: Some(m),
        std: Some(var.sqrt()),
        min: sorted.first().copied(),
        p25: Some(quantile(&sorted, 0.25)),
        median: Some(quantile(&sorted, 0.5)),
        p75: Some(quantile(&sorted, 0.75)),
        max: sorted.last().copied(),
    }
}

/// Least-squares slope against row index and its r².
fn linear_trend(column: &str, v: &[f64]) -> TrendInfo {
    let xs: Vec<f64> = (0..v.len()).map(|i| i as f64).collect();
    let (mx, my) = (mean(&xs), mean(v));
    let sxy: f64 = xs.iter().zip(v).map(|(x, y)| (x - mx) * (y - my)).sum();
    let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let r = pearson(&xs, v);
    let direction = if r * r < 0.1 {
        None
    } else if slope > 0.0 {
        Some(Direction::Up)
    } else {
        Some(Direction::Down)
    };
    TrendInfo {
        column: column.to_string(),
        slope,
        r2: r * r,
        direction,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let n = args.rows.max(2);
    let mut rng = StdRng::seed_from_u64(42);

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("start date")?;
    let mut series: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for i in 0..n {
        let t = i as f64;
        let temperature = 12.0 + 8.0 * (t / 9.0).sin() + gauss(&mut rng, 0.0, 1.0);
        let price = 20.0 - 0.04 * t + gauss(&mut rng, 0.0, 0.3);
        let units = 100.0 + 1.5 * t + 2.0 * temperature + gauss(&mut rng, 0.0, 4.0);
        let revenue = units * price;
        let returns = gauss(&mut rng, 5.0, 2.0).max(0.0).round();
        for (name, value) in [
            ("revenue", revenue),
            ("units", units),
            ("price", price),
            ("temperature", temperature),
            ("returns", returns),
        ] {
            series.entry(name).or_default().push(value);
        }
    }

    let mut preview: Vec<PreviewRow> = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = PreviewRow::new();
        let date = start + Duration::days(i as i64);
        row.insert("date".into(), CellValue::String(date.format("%Y-%m-%d").to_string()));
        for (name, values) in &series {
            row.insert(name.to_string(), CellValue::Float((values[i] * 100.0).round() / 100.0));
        }
        row.insert("region".into(), CellValue::String(["north", "south"][i % 2].into()));
        preview.push(row);
    }
    // A couple of dirty cells, as a real upload would have.
    if n > 7 {
        preview[3].insert("date".into(), CellValue::String("not a date".into()));
        preview[7].insert("revenue".into(), CellValue::Null);
    }

    // Upper triangle only: the viewer has to close the map itself.
    let names: Vec<&str> = series.keys().copied().collect();
    let mut correlations = IndexMap::new();
    for (i, a) in names.iter().enumerate() {
        let inner: IndexMap<String, f64> = names[i + 1..]
            .iter()
            .map(|b| (b.to_string(), pearson(&series[a], &series[b])))
            .collect();
        correlations.insert(a.to_string(), inner);
    }

    let mut columns = vec![ColumnDescriptor {
        name: "date".into(),
        dtype: "object".into(),
        inferred_semantic: Some("datetime".into()),
    }];
    columns.extend(names.iter().map(|name| ColumnDescriptor {
        name: name.to_string(),
        dtype: "float64".into(),
        inferred_semantic: None,
    }));
    columns.push(ColumnDescriptor {
        name: "region".into(),
        dtype: "object".into(),
        inferred_semantic: Some("categorical".into()),
    });

    let trends: Vec<TrendInfo> = series.iter().map(|(name, v)| linear_trend(name, v)).collect();
    let insights = trends
        .iter()
        .filter_map(|t| match t.direction {
            Some(Direction::Up) => Some(format!("{} trends upward (r² = {:.2})", t.column, t.r2)),
            Some(Direction::Down) => Some(format!("{} trends downward (r² = {:.2})", t.column, t.r2)),
            None => None,
        })
        .collect();

    let analysis = AnalysisResult {
        meta: Meta {
            filename: "sample_sales.csv".into(),
            rows: n as u64,
            cols: columns.len() as u64,
        },
        missing: columns
            .iter()
            .map(|c| (c.name.clone(), u64::from(c.name == "revenue" && n > 7)))
            .collect(),
        numeric_stats: series.iter().map(|(name, v)| (name.to_string(), stats(v))).collect(),
        columns,
        preview,
        correlations,
        trends,
        insights,
    };

    let json = serde_json::to_string_pretty(&analysis).context("serializing analysis")?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote sample analysis ({n} rows, {} columns) to {}",
        analysis.columns.len(),
        args.output.display()
    );
    Ok(())
}
