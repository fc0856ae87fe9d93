pub mod mse;
pub mod cost;

pub use mse::MseLoss;
pub use cost::cost;
