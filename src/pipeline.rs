//! One regression run, end to end.
//!
//! ```text
//!  text ─► parse ─► detect numeric ─► select X/Y ─► sample ─► normalize
//!                                                              │
//!  RegressionRun ◄─ plot series ◄─ metrics ◄─ predict ◄─ train ◄┘
//! ```
//!
//! Every stage that can fail returns early; nothing from a failed run is
//! kept. All buffers belong to the call and are dropped when it returns.

use std::path::Path;

use serde::Serialize;

use crate::config::RegressionConfig;
use crate::data::loader::{parse_csv, read_source};
use crate::data::model::Sample;
use crate::data::sample::build_sample;
use crate::data::schema::{detect_numeric_columns, select_columns, ColumnSelection};
use crate::error::Result;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::regression::metrics::Metrics;
use crate::regression::scale::ScaleParams;
use crate::regression::trainer::FittedLine;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Observed and predicted points sorted by X, ready for a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub x_label: String,
    pub y_label: String,
    pub observed: Vec<[f64; 2]>,
    pub predicted: Vec<[f64; 2]>,
}

impl PlotSeries {
    /// `predictions[i]` belongs to `sample.points[i]`.
    pub fn new(selection: &ColumnSelection, sample: &Sample, predictions: &[f64]) -> Self {
        let mut rows: Vec<(f64, f64, f64)> = sample
            .points
            .iter()
            .zip(predictions)
            .map(|(p, &pred)| (p.x, p.y, pred))
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));

        PlotSeries {
            x_label: selection.x.clone(),
            y_label: selection.y.clone(),
            observed: rows.iter().map(|&(x, y, _)| [x, y]).collect(),
            predicted: rows.iter().map(|&(x, _, p)| [x, p]).collect(),
        }
    }
}

/// Everything a successful run produces. Owned by the caller; a new run
/// replaces it wholesale.
#[derive(Debug, Clone)]
pub struct RegressionRun {
    pub selection: ColumnSelection,
    pub rows: usize,
    pub sample: Sample,
    pub scale: ScaleParams,
    pub line: FittedLine,
    /// Original-scale prediction for each sample point, in sample order.
    pub predictions: Vec<f64>,
    pub metrics: Metrics,
    pub series: PlotSeries,
}

/// Serializable summary of a run, used for export.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub x_column: &'a str,
    pub y_column: &'a str,
    pub rows: usize,
    pub samples: usize,
    pub weight: f64,
    pub bias: f64,
    pub final_loss: f64,
    pub scale: &'a ScaleParams,
    pub metrics: &'a Metrics,
    pub series: &'a PlotSeries,
}

impl RegressionRun {
    pub fn report(&self) -> RunReport<'_> {
        RunReport {
            x_column: &self.selection.x,
            y_column: &self.selection.y,
            rows: self.rows,
            samples: self.sample.len(),
            weight: self.line.weight,
            bias: self.line.bias,
            final_loss: self.line.loss,
            scale: &self.scale,
            metrics: &self.metrics,
            series: &self.series,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: RegressionConfig,
}

impl Pipeline {
    pub fn new(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Read `path` and run on its contents.
    pub fn run_path(&self, path: &Path, sink: &mut dyn ProgressSink) -> Result<RegressionRun> {
        sink.report(&ProgressEvent::FetchStarted {
            source: path.display().to_string(),
        });
        let text = read_source(path)?;
        self.run_text(&text, sink)
    }

    /// Run on CSV text already in memory.
    pub fn run_text(&self, text: &str, sink: &mut dyn ProgressSink) -> Result<RegressionRun> {
        let mode = self.config.data.numeric_parse;
        let policy = self.config.degenerate;

        let table = parse_csv(text)?;
        sink.report(&ProgressEvent::Parsed {
            rows: table.len(),
            columns: table.headers.len(),
        });

        let numeric = detect_numeric_columns(&table, mode, &self.config.schema);
        log::info!("numeric columns: {numeric:?}");
        let selection = select_columns(&numeric)?;
        sink.report(&ProgressEvent::ColumnsSelected {
            x: selection.x.clone(),
            y: selection.y.clone(),
        });

        let sample = build_sample(&table, &selection, mode)?;
        let rows = table.len();
        drop(table);

        sink.report(&ProgressEvent::Normalizing);
        let scale = ScaleParams::fit(&sample, &selection, policy)?;
        let normalized = scale.normalize(&sample);

        let trainer = self.config.trainer();
        sink.report(&ProgressEvent::TrainingStarted {
            epochs: trainer.epochs(),
        });
        let line = trainer.fit(&normalized, sink)?;
        sink.report(&ProgressEvent::TrainingComplete);

        let predictions = line.predict_original(&normalized, &scale);
        let metrics = Metrics::compute(&sample.ys(), &predictions, policy)?;
        log::info!(
            "X = {}, Y = {}: mse={:.4}, mae={:.4}, r2={:.4}",
            selection.x,
            selection.y,
            metrics.mse,
            metrics.mae,
            metrics.r2
        );

        let series = PlotSeries::new(&selection, &sample, &predictions);
        sink.report(&ProgressEvent::Ready);

        Ok(RegressionRun {
            selection,
            rows,
            sample,
            scale,
            line,
            predictions,
            metrics,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Point;
    use crate::error::RegressionError;
    use crate::progress::NoopSink;

    fn seeded() -> Pipeline {
        let mut config = RegressionConfig::default();
        config.training.seed = Some(42);
        Pipeline::new(config)
    }

    #[test]
    fn series_are_sorted_and_aligned() {
        let selection = ColumnSelection {
            x: "a".into(),
            y: "b".into(),
        };
        let sample: Sample = [(3.0, 30.0), (1.0, 10.0), (2.0, 20.0)]
            .iter()
            .map(|&(x, y)| Point { x, y })
            .collect();
        let series = PlotSeries::new(&selection, &sample, &[31.0, 11.0, 21.0]);
        assert_eq!(series.observed, vec![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]);
        assert_eq!(series.predicted, vec![[1.0, 11.0], [2.0, 21.0], [3.0, 31.0]]);
        assert_eq!(series.x_label, "a");
        assert_eq!(series.y_label, "b");
    }

    #[test]
    fn emits_status_in_order() {
        let mut messages = Vec::new();
        let mut sink = |e: &ProgressEvent| messages.push(e.clone());
        seeded().run_text("x,y\n1,3\n2,5\n3,7\n4,9", &mut sink).unwrap();

        assert!(matches!(messages[0], ProgressEvent::Parsed { rows: 4, columns: 2 }));
        assert_eq!(
            messages[1],
            ProgressEvent::ColumnsSelected {
                x: "x".into(),
                y: "y".into()
            }
        );
        assert_eq!(messages[2], ProgressEvent::Normalizing);
        assert_eq!(messages[3], ProgressEvent::TrainingStarted { epochs: 250 });
        let epochs = messages
            .iter()
            .filter(|m| matches!(m, ProgressEvent::Epoch { .. }))
            .count();
        assert_eq!(epochs, 10);
        assert_eq!(messages[messages.len() - 2], ProgressEvent::TrainingComplete);
        assert_eq!(messages[messages.len() - 1], ProgressEvent::Ready);
    }

    #[test]
    fn schema_failure_stops_before_training() {
        let mut messages = Vec::new();
        let mut sink = |e: &ProgressEvent| messages.push(e.clone());
        let err = seeded()
            .run_text("x,label\n1,a\n2,b\n3,c\n4,d", &mut sink)
            .unwrap_err();
        assert!(matches!(err, RegressionError::TooFewNumericColumns { found: 1 }));
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn missing_file_reports_fetch_start_then_fails() {
        let mut messages = Vec::new();
        let mut sink = |e: &ProgressEvent| messages.push(e.clone());
        let err = seeded()
            .run_path(Path::new("no/such/games.csv"), &mut sink)
            .unwrap_err();
        assert!(matches!(err, RegressionError::Fetch { .. }));
        assert!(matches!(messages.as_slice(), [ProgressEvent::FetchStarted { .. }]));
    }

    #[test]
    fn report_serializes_to_json() {
        let run = seeded()
            .run_text("x,y\n1,3\n2,5\n3,7\n4,9", &mut NoopSink)
            .unwrap();
        let json = serde_json::to_value(run.report()).unwrap();
        assert_eq!(json["x_column"], "x");
        assert_eq!(json["y_column"], "y");
        assert_eq!(json["samples"], 4);
        assert_eq!(json["series"]["observed"].as_array().unwrap().len(), 4);
        assert!(json["metrics"]["r2"].as_f64().unwrap() > 0.99);
    }
}
