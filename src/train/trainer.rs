use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    data::dataset::Dataset,
    error::Result,
    loss::cost::cost,
    network::network::Network,
    optim::{finite_diff::FiniteDifference, sgd::Sgd},
    train::train_config::TrainConfig,
};

/// Builds a network for `architecture` and randomizes it in
/// `[config.init_min, config.init_max)`, seeded from `config.seed` when set.
pub fn init_network(architecture: &[usize], config: &TrainConfig) -> Result<Network> {
    let mut network = Network::new(architecture)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    network.randomize(&mut rng, config.init_min, config.init_max)?;
    Ok(network)
}

/// One estimate-and-update step. Returns the cost after the update.
pub fn train_step(
    network: &mut Network,
    gradient: &mut Network,
    data: &Dataset,
    estimator: &FiniteDifference,
    optimizer: &Sgd,
) -> Result<f32> {
    #[cfg(feature = "rayon")]
    estimator.estimate_parallel(network, gradient, data)?;
    #[cfg(not(feature = "rayon"))]
    estimator.estimate(network, gradient, data)?;

    optimizer.step(network, gradient)?;
    cost(network, data)
}
