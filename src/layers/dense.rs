use rand::Rng;

use crate::{activation::activation::ActivationFunction, error::Result, math::matrix::Matrix};

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub size: usize,
    /// Output of this layer after the nonlinearity, `1 x size`.
    pub neurons: Matrix,
    /// `input_size x size`
    pub weights: Matrix,
    /// `1 x size`
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

impl Layer {
    /// Zero-initialized layer; call [`Layer::randomize`] before training.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        Layer {
            size,
            neurons: Matrix::zeros(1, size),
            weights: Matrix::zeros(input_size, size),
            biases: Matrix::zeros(1, size),
            activator: activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.as_slice().len() + self.biases.as_slice().len()
    }

    /// Randomizes weights, then biases. Neurons are left alone.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, min: f32, max: f32) -> Result<()> {
        self.weights.randomize(rng, min, max)?;
        self.biases.randomize(rng, min, max)
    }

    /// `neurons = activation(input * weights + biases)`, written in place.
    pub fn feed_from(&mut self, input: &Matrix) -> Result<()> {
        Matrix::multiply(&mut self.neurons, input, &self.weights)?;
        self.neurons.add_assign(&self.biases)?;
        self.neurons.activate(self.activator);
        Ok(())
    }

    /// Weights followed by biases, in row-major order.
    pub fn parameters(&self) -> impl Iterator<Item = &f32> {
        self.weights.as_slice().iter().chain(self.biases.as_slice())
    }

    pub fn parameters_mut(&mut self) -> impl Iterator<Item = &mut f32> {
        self.weights.as_mut_slice().iter_mut().chain(self.biases.as_mut_slice().iter_mut())
    }

    /// Mutable access to parameter `idx` in [`Layer::parameters`] order.
    pub(crate) fn parameter_mut(&mut self, idx: usize) -> &mut f32 {
        let n_weights = self.weights.as_slice().len();
        if idx < n_weights {
            &mut self.weights.as_mut_slice()[idx]
        } else {
            &mut self.biases.as_mut_slice()[idx - n_weights]
        }
    }
}
