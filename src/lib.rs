pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod data;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use data::dataset::{BooleanGate, Dataset};
pub use loss::{cost::cost, mse::MseLoss};
pub use optim::{finite_diff::FiniteDifference, sgd::Sgd};
pub use train::{init_network, train_loop, train_step, TrainConfig, TrainOutcome};
