use rand::Rng;

use crate::{
    activation::activation::ActivationFunction,
    error::{Error, Result},
    layers::dense::Layer,
    math::matrix::Matrix,
};

/// Fully-connected sigmoid network.
///
/// Activations are `[input, layers[0].neurons, layers[1].neurons, ...]`, one
/// more than the number of layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub input: Matrix,
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a zero-initialized network from layer widths, e.g. `[2, 2, 1]`.
    pub fn new(architecture: &[usize]) -> Result<Network> {
        if architecture.len() < 2 {
            return Err(Error::InvalidArchitecture(format!(
                "need at least an input and an output width, got {architecture:?}"
            )));
        }
        if let Some(pos) = architecture.iter().position(|&w| w == 0) {
            return Err(Error::InvalidArchitecture(format!(
                "width at position {pos} is zero in {architecture:?}"
            )));
        }

        let layers = architecture
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], ActivationFunction::Sigmoid))
            .collect();

        Ok(Network {
            input: Matrix::zeros(1, architecture[0]),
            layers,
        })
    }

    /// A zeroed network with the same shape, used to hold gradient estimates.
    pub fn zeros_like(&self) -> Network {
        let mut res = self.clone();
        res.input.fill(0.0);
        for layer in &mut res.layers {
            layer.weights.fill(0.0);
            layer.biases.fill(0.0);
            layer.neurons.fill(0.0);
        }
        res
    }

    pub fn architecture(&self) -> Vec<usize> {
        std::iter::once(self.input.cols())
            .chain(self.layers.iter().map(|l| l.size))
            .collect()
    }

    pub fn input_width(&self) -> usize {
        self.input.cols()
    }

    pub fn output_width(&self) -> usize {
        self.output().cols()
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Randomizes every weight and bias in `[min, max)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, min: f32, max: f32) -> Result<()> {
        for layer in &mut self.layers {
            layer.randomize(rng, min, max)?;
        }
        Ok(())
    }

    pub fn input(&self) -> &Matrix {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Matrix {
        &mut self.input
    }

    pub fn output(&self) -> &Matrix {
        // `new` guarantees at least one layer.
        self.layers.last().map_or(&self.input, |l| &l.neurons)
    }

    pub fn set_input(&mut self, row: &Matrix) -> Result<()> {
        self.input.copy_from(row)
    }

    /// Runs every layer in order, overwriting all activations.
    ///
    /// The input slot must already hold the sample.
    pub fn forward(&mut self) -> Result<()> {
        for i in 0..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let prev = done.last().map_or(&self.input, |l| &l.neurons);
            rest[0].feed_from(prev)?;
        }
        Ok(())
    }

    /// Loads `row`, runs a forward pass and returns a copy of the output.
    pub fn predict(&mut self, row: &Matrix) -> Result<Matrix> {
        self.set_input(row)?;
        self.forward()?;
        Ok(self.output().clone())
    }

    pub fn ensure_same_shape(&self, other: &Network) -> Result<()> {
        if self.layers.len() != other.layers.len() {
            return Err(Error::mismatch(
                "network shape",
                (self.layers.len(), 0),
                (other.layers.len(), 0),
            ));
        }
        for (a, b) in self.layers.iter().zip(&other.layers) {
            if a.weights.shape() != b.weights.shape() {
                return Err(Error::mismatch("network shape", a.weights.shape(), b.weights.shape()));
            }
            if a.biases.shape() != b.biases.shape() {
                return Err(Error::mismatch("network shape", a.biases.shape(), b.biases.shape()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shapes_follow_architecture() {
        let net = Network::new(&[2, 3, 1]).unwrap();
        assert_eq!(net.layers.len(), 2);
        assert_eq!(net.input.shape(), (1, 2));
        assert_eq!(net.layers[0].weights.shape(), (2, 3));
        assert_eq!(net.layers[0].biases.shape(), (1, 3));
        assert_eq!(net.layers[1].weights.shape(), (3, 1));
        assert_eq!(net.layers[1].neurons.shape(), (1, 1));
        assert_eq!(net.architecture(), vec![2, 3, 1]);
        assert_eq!(net.parameter_count(), 2 * 3 + 3 + 3 + 1);
    }

    #[test]
    fn rejects_bad_architectures() {
        assert!(matches!(Network::new(&[]), Err(Error::InvalidArchitecture(_))));
        assert!(matches!(Network::new(&[4]), Err(Error::InvalidArchitecture(_))));
        assert!(matches!(Network::new(&[2, 0, 1]), Err(Error::InvalidArchitecture(_))));
    }

    #[test]
    fn randomize_leaves_activations_untouched() {
        let mut net = Network::new(&[2, 2, 1]).unwrap();
        net.randomize(&mut StdRng::seed_from_u64(1), 0.0, 1.0).unwrap();
        assert!(net.layers.iter().all(|l| l.neurons.as_slice().iter().all(|&x| x == 0.0)));
        assert!(net.layers[0].weights.as_slice().iter().any(|&x| x != 0.0));
    }

    #[test]
    fn forward_is_deterministic() {
        let mut net = Network::new(&[2, 2, 1]).unwrap();
        net.randomize(&mut StdRng::seed_from_u64(5), -1.0, 1.0).unwrap();
        let x = Matrix::from_rows(&[vec![1.0, 0.0]]).unwrap();

        let first = net.predict(&x).unwrap();
        let second = net.predict(&x).unwrap();
        assert_eq!(first, second);
        assert!(first.as_slice()[0] > 0.0 && first.as_slice()[0] < 1.0);
    }

    #[test]
    fn forward_matches_hand_computation() {
        let mut net = Network::new(&[1, 1, 1]).unwrap();
        net.layers[0].weights.set(0, 0, 2.0).unwrap();
        net.layers[0].biases.set(0, 0, -1.0).unwrap();
        net.layers[1].weights.set(0, 0, 1.0).unwrap();

        let out = net.predict(&Matrix::from_rows(&[vec![0.5]]).unwrap()).unwrap();
        // hidden = sigmoid(0) = 0.5, out = sigmoid(0.5)
        let expected = 1.0 / (1.0 + (-0.5f32).exp());
        assert_eq!(out.as_slice(), &[expected]);
    }

    #[test]
    fn set_input_checks_width() {
        let mut net = Network::new(&[2, 1]).unwrap();
        assert!(net.set_input(&Matrix::zeros(1, 3)).is_err());
    }

    #[test]
    fn zeros_like_matches_shape() {
        let mut net = Network::new(&[2, 2, 1]).unwrap();
        net.randomize(&mut StdRng::seed_from_u64(2), 0.0, 1.0).unwrap();
        let g = net.zeros_like();
        net.ensure_same_shape(&g).unwrap();
        assert!(g.layers.iter().all(|l| l.parameters().all(|&p| p == 0.0)));

        let other = Network::new(&[2, 3, 1]).unwrap();
        assert!(net.ensure_same_shape(&other).is_err());
    }
}
