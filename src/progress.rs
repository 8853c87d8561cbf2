//! Status reporting for a regression run.
//!
//! The pipeline never talks to a UI directly. It emits [`ProgressEvent`]s
//! into whatever [`ProgressSink`] the caller hands it: a closure, a channel
//! sender, the log, or nothing at all.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    FetchStarted { source: String },
    Parsed { rows: usize, columns: usize },
    ColumnsSelected { x: String, y: String },
    Normalizing,
    TrainingStarted { epochs: usize },
    Epoch { epoch: usize, epochs: usize, loss: f64 },
    TrainingComplete,
    Ready,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::FetchStarted { source } => write!(f, "Loading {source} ..."),
            ProgressEvent::Parsed { rows, columns } => write!(
                f,
                "CSV loaded ({rows} rows, {columns} columns), detecting numeric columns..."
            ),
            ProgressEvent::ColumnsSelected { x, y } => {
                write!(f, "Using X = \"{x}\" and Y = \"{y}\"")
            }
            ProgressEvent::Normalizing => write!(f, "Preparing data and normalizing..."),
            ProgressEvent::TrainingStarted { epochs } => {
                write!(f, "Training model ({epochs} epochs)...")
            }
            ProgressEvent::Epoch {
                epoch,
                epochs,
                loss,
            } => write!(f, "Training... epoch {epoch}/{epochs}, loss: {loss:.6}"),
            ProgressEvent::TrainingComplete => {
                write!(f, "Training complete, generating predictions...")
            }
            ProgressEvent::Ready => write!(f, "All done, see the chart and metrics."),
        }
    }
}

/// Anything that accepts status updates.
pub trait ProgressSink {
    fn report(&mut self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn report(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn report(&mut self, _event: &ProgressEvent) {}
}

/// Writes every event to the log at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&mut self, event: &ProgressEvent) {
        log::info!("{event}");
    }
}
