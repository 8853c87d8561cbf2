use serde::Serialize;

use super::scale::DegeneratePolicy;
use crate::error::{RegressionError, Result};

/// Fit quality on the original Y scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub mse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl Metrics {
    /// Score `y_pred` against `y_true`.
    ///
    /// * `mse = mean((t - p)²)`
    /// * `mae = mean(|t - p|)`
    /// * `r2  = 1 - Σ(t - p)² / Σ(t - mean(t))²`
    ///
    /// When every true value is the same the R² denominator is zero. Under
    /// [`DegeneratePolicy::Reject`] that is [`RegressionError::ZeroVariance`];
    /// under `Propagate` the non-finite quotient is returned as is.
    pub fn compute(y_true: &[f64], y_pred: &[f64], policy: DegeneratePolicy) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(RegressionError::LengthMismatch {
                expected: y_true.len(),
                actual: y_pred.len(),
            });
        }
        if y_true.is_empty() {
            return Err(RegressionError::EmptySample);
        }

        let n = y_true.len() as f64;
        let mean = y_true.iter().sum::<f64>() / n;

        let mut se = 0.0;
        let mut ae = 0.0;
        let mut ss_tot = 0.0;
        for (t, p) in y_true.iter().zip(y_pred) {
            let diff = t - p;
            se += diff * diff;
            ae += diff.abs();
            ss_tot += (t - mean) * (t - mean);
        }

        if ss_tot == 0.0 && policy == DegeneratePolicy::Reject {
            return Err(RegressionError::ZeroVariance);
        }

        Ok(Metrics {
            mse: se / n,
            mae: ae / n,
            r2: 1.0 - se / ss_tot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_values() {
        let y_true = [3.0, -0.5, 2.0, 7.0];
        let y_pred = [2.5, 0.0, 2.0, 8.0];
        let m = Metrics::compute(&y_true, &y_pred, DegeneratePolicy::Reject).unwrap();
        assert!((m.mse - 0.375).abs() < 1e-12);
        assert!((m.mae - 0.5).abs() < 1e-12);
        // mean 2.875, ss_tot 29.1875, ss_res 1.5
        assert!((m.r2 - (1.0 - 1.5 / 29.1875)).abs() < 1e-12);
    }

    #[test]
    fn perfect_prediction() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let m = Metrics::compute(&y, &y, DegeneratePolicy::Reject).unwrap();
        assert_eq!(m.mse, 0.0);
        assert_eq!(m.mae, 0.0);
        assert!((m.r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn worse_than_mean_is_negative() {
        let y_true = [1.0, 2.0, 3.0];
        let y_pred = [3.0, 2.0, 1.0];
        let m = Metrics::compute(&y_true, &y_pred, DegeneratePolicy::Reject).unwrap();
        assert!(m.r2 < 0.0);
    }

    #[test]
    fn zero_variance_is_named_under_reject() {
        let err = Metrics::compute(&[5.0, 5.0, 5.0], &[4.0, 5.0, 6.0], DegeneratePolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, RegressionError::ZeroVariance));
    }

    #[test]
    fn zero_variance_is_non_finite_under_propagate() {
        let off = Metrics::compute(&[5.0, 5.0, 5.0], &[4.0, 5.0, 6.0], DegeneratePolicy::Propagate)
            .unwrap();
        assert!(!off.r2.is_finite());
        assert!(off.mse.is_finite());
        let exact =
            Metrics::compute(&[5.0, 5.0], &[5.0, 5.0], DegeneratePolicy::Propagate).unwrap();
        assert!(exact.r2.is_nan());
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = Metrics::compute(&[1.0, 2.0], &[1.0], DegeneratePolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            RegressionError::LengthMismatch { expected: 2, actual: 1 }
        ));
    }
}
