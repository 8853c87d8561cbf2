use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::model::{Point, Sample};
use crate::data::schema::ColumnSelection;
use crate::error::{RegressionError, Result};

/// What to do when an axis or target has no spread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Fail with a named error before dividing by zero.
    #[default]
    Reject,
    /// Divide anyway and let NaN / infinity flow into the results.
    Propagate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

// ---------------------------------------------------------------------------
// AxisRange – min/max of one axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            AxisRange {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |r, v| AxisRange {
                min: r.min.min(v),
                max: r.max.max(v),
            },
        )
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map `v` into `[0, 1]`.
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }

    /// Map a normalized value back onto the original scale.
    pub fn invert(&self, v: f64) -> f64 {
        v * self.span() + self.min
    }
}

// ---------------------------------------------------------------------------
// ScaleParams – both axes, fixed once computed
// ---------------------------------------------------------------------------

/// Min/max of both axes of a sample.
///
/// The same parameters normalize the training data and invert the
/// predictions, so they are computed once and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleParams {
    x: AxisRange,
    y: AxisRange,
}

impl ScaleParams {
    /// Compute the ranges of `sample`.
    ///
    /// Under [`DegeneratePolicy::Reject`] an axis whose values are all equal
    /// fails with [`RegressionError::ZeroRange`]; `selection` names the
    /// offending column.
    pub fn fit(
        sample: &Sample,
        selection: &ColumnSelection,
        policy: DegeneratePolicy,
    ) -> Result<Self> {
        if sample.is_empty() {
            return Err(RegressionError::EmptySample);
        }
        let x = AxisRange::of(sample.points.iter().map(|p| p.x));
        let y = AxisRange::of(sample.points.iter().map(|p| p.y));

        if policy == DegeneratePolicy::Reject {
            for (axis, range, column) in [(Axis::X, x, &selection.x), (Axis::Y, y, &selection.y)] {
                if range.span() == 0.0 {
                    return Err(RegressionError::ZeroRange {
                        axis,
                        column: column.clone(),
                    });
                }
            }
        }

        log::debug!(
            "scale: x in [{}, {}], y in [{}, {}]",
            x.min,
            x.max,
            y.min,
            y.max
        );
        Ok(ScaleParams { x, y })
    }

    pub fn x(&self) -> AxisRange {
        self.x
    }

    pub fn y(&self) -> AxisRange {
        self.y
    }

    /// Normalized copy of `sample`, same order.
    pub fn normalize(&self, sample: &Sample) -> Sample {
        sample
            .points
            .iter()
            .map(|p| Point {
                x: self.x.normalize(p.x),
                y: self.y.normalize(p.y),
            })
            .collect()
    }
}
