use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use eframe::egui;
use rusty_fit::{
    Pipeline, ProgressEvent, ProgressSink, RegressionConfig, RegressionError, RegressionRun,
};

// ---------------------------------------------------------------------------
// Worker messages
// ---------------------------------------------------------------------------

/// What the training thread sends back to the UI.
pub enum WorkerMessage {
    Progress(ProgressEvent),
    Finished(Result<RegressionRun, RegressionError>),
}

/// Forwards progress to the UI thread and wakes it up.
struct ChannelSink {
    tx: Sender<WorkerMessage>,
    ctx: egui::Context,
}

impl ProgressSink for ChannelSink {
    fn report(&mut self, event: &ProgressEvent) {
        // The receiver is gone only when the window closed mid-run.
        let _ = self.tx.send(WorkerMessage::Progress(event.clone()));
        self.ctx.request_repaint();
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: RegressionConfig,

    /// Result of the last successful run; this is also the plot state.
    pub run: Option<RegressionRun>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub status_is_error: bool,

    /// Whether a run is in progress. The trigger is disabled meanwhile.
    pub loading: bool,

    worker: Option<Receiver<WorkerMessage>>,
}

impl AppState {
    pub fn new(config: RegressionConfig) -> Self {
        Self {
            config,
            run: None,
            status_message: None,
            status_is_error: false,
            loading: false,
            worker: None,
        }
    }

    /// Drop everything the previous run left behind.
    pub fn reset(&mut self) {
        self.run = None;
        self.status_message = None;
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    /// Start a run on `path` in a background thread.
    pub fn start_run(&mut self, path: PathBuf, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        self.reset();

        let (tx, rx) = mpsc::channel();
        let pipeline = Pipeline::new(self.config.clone());
        let ctx = ctx.clone();

        let spawned = std::thread::Builder::new()
            .name("regression".into())
            .spawn(move || {
                let mut sink = ChannelSink {
                    tx: tx.clone(),
                    ctx: ctx.clone(),
                };
                let result = pipeline.run_path(&path, &mut sink);
                let _ = tx.send(WorkerMessage::Finished(result));
                ctx.request_repaint();
            });

        match spawned {
            Ok(_) => {
                self.loading = true;
                self.worker = Some(rx);
            }
            Err(e) => {
                log::error!("Failed to start training thread: {e}");
                self.set_error(format!("Error: {e}"));
            }
        }
    }

    /// Drain messages from the running worker, if any.
    pub fn poll_worker(&mut self) {
        let Some(rx) = self.worker.take() else {
            return;
        };

        loop {
            match rx.try_recv() {
                Ok(WorkerMessage::Progress(event)) => {
                    self.status_message = Some(event.to_string());
                    self.status_is_error = false;
                }
                Ok(WorkerMessage::Finished(result)) => {
                    self.finish(result);
                    return;
                }
                Err(TryRecvError::Empty) => {
                    self.worker = Some(rx);
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    self.set_error("Error: training thread stopped unexpectedly".into());
                    self.loading = false;
                    return;
                }
            }
        }
    }

    fn finish(&mut self, result: Result<RegressionRun, RegressionError>) {
        match result {
            Ok(run) => {
                log::info!(
                    "Fitted {} on {} with {} points",
                    run.selection.y,
                    run.selection.x,
                    run.sample.len()
                );
                self.run = Some(run);
            }
            Err(e) => {
                log::error!("Regression failed: {e}");
                self.set_error(format!("Error: {e}"));
            }
        }
        self.loading = false;
        self.worker = None;
    }
}
