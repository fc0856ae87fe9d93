use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info, warn};

use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::loss::cost::cost;
use crate::network::network::Network;
use crate::optim::finite_diff::FiniteDifference;
use crate::optim::sgd::Sgd;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_step;

/// Why `train_loop` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Converged,
    MaxIterations,
    StopRequested,
    ReceiverDropped,
}

#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub iterations: usize,
    pub initial_cost: f32,
    pub final_cost: f32,
    pub stop_reason: StopReason,
}

impl TrainOutcome {
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Estimates the gradient and descends it until the cost is at or below
/// `config.cost_threshold`.
///
/// # Arguments
/// - `network` — randomized network; modified in place
/// - `data`    — training set, visited in row order on every cost evaluation
/// - `config`  — hyperparameters, optional progress channel, optional stop flag
///
/// # Termination
/// With no `max_iterations`, no `stop_flag` and no `progress_tx`, the loop
/// only ends once the threshold is reached and never returns otherwise.
/// It also ends early if:
/// - `config.max_iterations` iterations have run, **or**
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop(network: &mut Network, data: &Dataset, config: &TrainConfig) -> Result<TrainOutcome> {
    config.validate()?;
    let estimator = FiniteDifference::new(config.epsilon)?;
    let optimizer = Sgd::new(config.learning_rate);
    let mut gradient = network.zeros_like();

    let initial_cost = cost(network, data)?;
    info!(
        "training {:?} ({} parameters) on {} examples, initial cost {initial_cost:.6}",
        network.architecture(),
        network.parameter_count(),
        data.len()
    );

    let mut current = initial_cost;
    let mut iteration = 0;

    let stop_reason = loop {
        if current <= config.cost_threshold {
            break StopReason::Converged;
        }
        if config.max_iterations.is_some_and(|max| iteration >= max) {
            break StopReason::MaxIterations;
        }
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break StopReason::StopRequested;
            }
        }

        let t_start = Instant::now();
        current = train_step(network, &mut gradient, data, &estimator, &optimizer)?;
        iteration += 1;

        if config.log_every > 0 && iteration % config.log_every == 0 {
            info!("iteration {iteration}: cost = {current:.6}");
        } else {
            debug!("iteration {iteration}: cost = {current:.6}");
        }

        if let Some(ref tx) = config.progress_tx {
            let stats = IterationStats {
                iteration,
                cost: current,
                elapsed_us: t_start.elapsed().as_micros() as u64,
            };
            if tx.send(stats).is_err() {
                break StopReason::ReceiverDropped;
            }
        }
    };

    match stop_reason {
        StopReason::Converged => info!("converged after {iteration} iterations, cost {current:.6}"),
        other => warn!("stopped ({other:?}) after {iteration} iterations, cost {current:.6}"),
    }

    Ok(TrainOutcome {
        iterations: iteration,
        initial_cost,
        final_cost: current,
        stop_reason,
    })
}
