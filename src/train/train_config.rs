use serde::{Serialize, Deserialize};
use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::optim::{finite_diff::FiniteDifference, sgd::Sgd};
use crate::train::iteration_stats::IterationStats;

/// Hyperparameters and control hooks for a `train_loop` run.
///
/// # Fields
/// - `epsilon`        — finite-difference perturbation size
/// - `learning_rate`  — gradient descent step size
/// - `cost_threshold` — training stops once the cost is at or below this
/// - `init_min`/`init_max` — uniform range for the initial weights and biases
/// - `seed`           — RNG seed for initialization; entropy when `None`
/// - `max_iterations` — optional cap; `None` loops until the threshold is met
/// - `log_every`      — iterations between `info!` cost lines (0 disables);
///                      every iteration is also logged at `debug!`
/// - `progress_tx`    — optional channel sender; one `IterationStats` per
///                      iteration. If the receiver is dropped the loop stops.
/// - `stop_flag`      — optional atomic flag; when set from another thread the
///                      loop stops after the current iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epsilon: f32,
    pub learning_rate: f32,
    pub cost_threshold: f32,
    pub init_min: f32,
    pub init_max: f32,
    pub seed: Option<u64>,
    pub max_iterations: Option<usize>,
    pub log_every: usize,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epsilon: 0.1,
            learning_rate: 0.1,
            cost_threshold: 0.01,
            init_min: 0.0,
            init_max: 1.0,
            seed: None,
            max_iterations: None,
            log_every: 1,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the given step sizes and threshold and
    /// defaults for everything else.
    pub fn new(epsilon: f32, learning_rate: f32, cost_threshold: f32) -> Self {
        TrainConfig {
            epsilon,
            learning_rate,
            cost_threshold,
            ..TrainConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        FiniteDifference { epsilon: self.epsilon }.validate()?;
        Sgd::new(self.learning_rate).validate()?;
        if !self.cost_threshold.is_finite() || self.cost_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "cost_threshold must be finite and non-negative, got {}",
                self.cost_threshold
            )));
        }
        if !Matrix::is_sampling_range(self.init_min, self.init_max) {
            return Err(Error::InvalidConfig(format!(
                "init range [{}, {}) is empty or too wide to sample",
                self.init_min, self.init_max
            )));
        }
        Ok(())
    }

    /// Serializes the hyperparameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes hyperparameters from a JSON file. Missing fields take
    /// their default values.
    pub fn load_json(path: &str) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
