use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::optimizer::Adam;
use super::scale::ScaleParams;
use crate::data::model::{Point, Sample};
use crate::error::{RegressionError, Result};
use crate::progress::{ProgressEvent, ProgressSink};

pub const DEFAULT_EPOCHS: usize = 250;
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_REPORT_EVERY: usize = 25;

/// Loss observed at one epoch, before that epoch's update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochLoss {
    pub epoch: usize,
    pub loss: f64,
}

// ---------------------------------------------------------------------------
// FittedLine – result of one training run
// ---------------------------------------------------------------------------

/// `y = weight * x + bias` in normalized coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedLine {
    pub weight: f64,
    pub bias: f64,
    /// Loss of the last epoch.
    pub loss: f64,
    pub history: Vec<EpochLoss>,
}

impl FittedLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.weight * x + self.bias
    }

    /// Predict every X of `normalized` and map the results back onto the
    /// original Y scale.
    pub fn predict_original(&self, normalized: &Sample, scale: &ScaleParams) -> Vec<f64> {
        let y = scale.y();
        normalized
            .points
            .iter()
            .map(|p| y.invert(self.predict(p.x)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Trainer
// ---------------------------------------------------------------------------

/// Fits a single-input line with Adam on full-batch mean squared error.
///
/// Runs exactly `epochs` epochs; there is no convergence check. Each epoch
/// visits the points in a freshly shuffled order, computes loss and
/// gradients at the current parameters and applies one optimizer step.
#[derive(Debug, Clone)]
pub struct Trainer {
    epochs: usize,
    learning_rate: f64,
    report_every: usize,
    seed: Option<u64>,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Trainer {
    pub fn new() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            learning_rate: DEFAULT_LEARNING_RATE,
            report_every: DEFAULT_REPORT_EVERY,
            seed: None,
        }
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Report progress at every epoch index divisible by `report_every`.
    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every.max(1);
        self
    }

    /// Fix the RNG seed used for initialisation and shuffling.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Train on an already normalized sample.
    pub fn fit(&self, normalized: &Sample, sink: &mut dyn ProgressSink) -> Result<FittedLine> {
        if normalized.is_empty() {
            return Err(RegressionError::EmptySample);
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        log::debug!("training with seed {seed}");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Glorot-uniform for a 1x1 kernel, zero bias.
        let limit = 3.0_f64.sqrt();
        let mut params = [rng.random_range(-limit..limit), 0.0];
        let mut optimizer = Adam::new(self.learning_rate);

        let mut order: Vec<usize> = (0..normalized.len()).collect();
        let mut history = Vec::with_capacity(self.epochs);

        for epoch in 0..self.epochs {
            order.shuffle(&mut rng);
            let (loss, grads) = loss_and_gradients(&params, &normalized.points, &order);
            optimizer.step(&mut params, &grads);

            log::debug!(
                "Epoch {epoch}: loss={loss:.6}, weight={:.6}, bias={:.6}",
                params[0],
                params[1]
            );
            if epoch % self.report_every == 0 {
                sink.report(&ProgressEvent::Epoch {
                    epoch,
                    epochs: self.epochs,
                    loss,
                });
            }
            history.push(EpochLoss { epoch, loss });
        }

        let [weight, bias] = params;
        let loss = history.last().map(|h| h.loss).unwrap_or(f64::NAN);
        log::info!("fitted weight={weight:.6}, bias={bias:.6}, loss={loss:.6}");
        Ok(FittedLine {
            weight,
            bias,
            loss,
            history,
        })
    }
}

/// Mean squared error of `w * x + b` and its gradient with respect to
/// `[w, b]`, accumulated in `order`.
fn loss_and_gradients(params: &[f64; 2], points: &[Point], order: &[usize]) -> (f64, [f64; 2]) {
    let [w, b] = *params;
    let n = points.len() as f64;
    let mut loss_sum = 0.0;
    let mut grad_w = 0.0;
    let mut grad_b = 0.0;

    for &i in order {
        let Point { x, y } = points[i];
        let error = w * x + b - y;
        loss_sum += error * error;
        grad_w += error * x;
        grad_b += error;
    }

    let scale = 2.0 / n;
    (loss_sum / n, [grad_w * scale, grad_b * scale])
}
