use crate::{error::{Error, Result}, network::network::Network};

pub struct Sgd {
    pub learning_rate: f32,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Sgd {
        Sgd { learning_rate }
    }

    /// `p -= learning_rate * g` for every weight and bias.
    ///
    /// `gradient` must have the same shape as `network`.
    pub fn step(&self, network: &mut Network, gradient: &Network) -> Result<()> {
        network.ensure_same_shape(gradient)?;
        for (layer, grad) in network.layers.iter_mut().zip(&gradient.layers) {
            for (p, g) in layer.parameters_mut().zip(grad.parameters()) {
                *p -= self.learning_rate * g;
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}
