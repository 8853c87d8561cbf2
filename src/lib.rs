//! Schema-agnostic linear regression over CSV files.
//!
//! Hand [`Pipeline`] some CSV text with an unknown header. It finds the
//! numeric columns, takes the first as X and the last as Y, fits
//! `y = w * x + b` with Adam on min-max normalized data and scores the fit
//! with MSE, MAE and R².
//!
//! ```no_run
//! use rusty_fit::{LogSink, Pipeline, RegressionConfig};
//!
//! let pipeline = Pipeline::new(RegressionConfig::load()?);
//! let run = pipeline.run_text("x,y\n1,3\n2,5\n3,7\n4,9", &mut LogSink)?;
//! println!("R² = {:.4}", run.metrics.r2);
//! # Ok::<(), rusty_fit::RegressionError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod regression;

pub use config::RegressionConfig;
pub use error::{RegressionError, Result};
pub use pipeline::{Pipeline, PlotSeries, RegressionRun, RunReport};
pub use progress::{LogSink, NoopSink, ProgressEvent, ProgressSink};
