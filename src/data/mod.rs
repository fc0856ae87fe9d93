pub mod dataset;

pub use dataset::{BooleanGate, Dataset};
