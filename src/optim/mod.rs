pub mod finite_diff;
pub mod sgd;

pub use finite_diff::FiniteDifference;
pub use sgd::Sgd;
