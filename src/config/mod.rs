use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Deserializer};

use crate::data::schema::{NumericParse, SchemaConfig};
use crate::error::{RegressionError, Result};
use crate::regression::scale::DegeneratePolicy;
use crate::regression::trainer::{
    Trainer, DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE, DEFAULT_REPORT_EVERY,
};

const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Optional per-directory overrides.
pub const LOCAL_CONFIG_FILE: &str = "rusty-fit.toml";

const ENV_PREFIX: &str = "RUSTY_FIT__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegressionConfig {
    pub data: DataConfig,
    pub schema: SchemaConfig,
    pub training: TrainingConfig,
    pub degenerate: DegeneratePolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// CSV read by the "Load & fit" action.
    pub path: PathBuf,
    pub numeric_parse: NumericParse,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub report_every: usize,
    /// `None` (written as `0`) draws a fresh seed per run.
    #[serde(default, deserialize_with = "deserialize_non_zero")]
    pub seed: Option<u64>,
}

fn deserialize_non_zero<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u64::deserialize(deserializer)?;
    Ok((value != 0).then_some(value))
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                path: PathBuf::from("games.csv"),
                numeric_parse: NumericParse::default(),
            },
            schema: SchemaConfig::default(),
            training: TrainingConfig {
                epochs: DEFAULT_EPOCHS,
                learning_rate: DEFAULT_LEARNING_RATE,
                report_every: DEFAULT_REPORT_EVERY,
                seed: None,
            },
            degenerate: DegeneratePolicy::default(),
        }
    }
}

impl RegressionConfig {
    /// Built-in defaults, then `rusty-fit.toml` if present, then
    /// `RUSTY_FIT__*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Self::defaults()
                .merge(Toml::file(LOCAL_CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Built-in defaults overridden by the given TOML text.
    pub fn from_toml_str(overrides: &str) -> Result<Self> {
        Self::from_figment(Self::defaults().merge(Toml::string(overrides)))
    }

    fn defaults() -> Figment {
        Figment::from(Toml::string(DEFAULT_CONFIG))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| RegressionError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.training;
        if t.epochs == 0 {
            return Err(RegressionError::config("training.epochs must be at least 1"));
        }
        if t.report_every == 0 {
            return Err(RegressionError::config(
                "training.report_every must be at least 1",
            ));
        }
        if !(t.learning_rate.is_finite() && t.learning_rate > 0.0) {
            return Err(RegressionError::config(format!(
                "training.learning_rate must be a positive number, got {}",
                t.learning_rate
            )));
        }
        if self.schema.sample_rows == 0 {
            return Err(RegressionError::config("schema.sample_rows must be at least 1"));
        }
        Ok(())
    }

    pub fn trainer(&self) -> Trainer {
        Trainer::new()
            .with_epochs(self.training.epochs)
            .with_learning_rate(self.training.learning_rate)
            .with_report_every(self.training.report_every)
            .with_seed(self.training.seed)
    }
}
