/// Nonlinearity applied element-wise after a layer's affine transform.
///
/// Only `Sigmoid` is wired into the forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f32) -> f32 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}
