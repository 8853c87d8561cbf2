use std::path::PathBuf;

use thiserror::Error;

use crate::regression::scale::Axis;

pub type Result<T> = std::result::Result<T, RegressionError>;

/// Every way a regression run can end early.
///
/// All variants are terminal for the run that produced them. The `Display`
/// output is the status text shown to the user.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error(
        "could not read {}: {source}. Check that the file exists and that the path is correct.",
        path.display()
    )]
    Fetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("fewer than 2 numeric columns detected ({found} found). Check the CSV.")]
    TooFewNumericColumns { found: usize },

    #[error("no numeric pairs left after cleaning")]
    EmptySample,

    #[error("degenerate input: {axis} column '{column}' has a single distinct value, cannot normalize")]
    ZeroRange { axis: Axis, column: String },

    #[error("degenerate input: target values have zero variance, R² is undefined")]
    ZeroVariance,

    #[error("true and predicted values differ in length ({expected} vs {actual})")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RegressionError {
    pub fn config(message: impl Into<String>) -> Self {
        RegressionError::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_carries_remediation_hint() {
        let err = RegressionError::Fetch {
            path: PathBuf::from("games.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("games.csv"));
        assert!(msg.contains("Check that the file exists"));
    }

    #[test]
    fn schema_error_reports_count() {
        let err = RegressionError::TooFewNumericColumns { found: 1 };
        assert_eq!(
            err.to_string(),
            "fewer than 2 numeric columns detected (1 found). Check the CSV."
        );
    }
}
