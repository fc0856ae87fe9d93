use log::debug;

use crate::{
    data::dataset::Dataset,
    error::{Error, Result},
    loss::cost::cost,
    network::network::Network,
};

/// One-sided forward-difference gradient estimator.
///
/// Parameters are visited layer by layer; inside a layer all weights come
/// first (row-major), then the biases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    pub epsilon: f32,
}

impl FiniteDifference {
    /// `epsilon` must be finite and positive; every parameter is nudged
    /// upward by it.
    pub fn new(epsilon: f32) -> Result<FiniteDifference> {
        let estimator = FiniteDifference { epsilon };
        estimator.validate()?;
        Ok(estimator)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Writes `(cost(p + eps) - cost(p)) / eps` for every parameter `p` of
    /// `network` into the matching cell of `gradient`.
    ///
    /// Each parameter is restored to its exact original value before the
    /// next one is perturbed.
    pub fn estimate(&self, network: &mut Network, gradient: &mut Network, data: &Dataset) -> Result<()> {
        network.ensure_same_shape(gradient)?;
        let base = cost(network, data)?;

        for l in 0..network.layers.len() {
            for p in 0..network.layers[l].parameter_count() {
                let perturbed = self.perturbed_cost(network, data, l, p)?;
                *gradient.layers[l].parameter_mut(p) = (perturbed - base) / self.epsilon;
            }
        }

        debug!(
            "estimated {} partials around cost {base:.6}",
            network.parameter_count()
        );
        Ok(())
    }

    /// Same result as [`FiniteDifference::estimate`], with the perturbations
    /// spread over rayon workers. Each worker owns a private replica of
    /// `network`, so no worker ever sees another's perturbed parameter.
    #[cfg(feature = "rayon")]
    pub fn estimate_parallel(&self, network: &mut Network, gradient: &mut Network, data: &Dataset) -> Result<()> {
        use rayon::prelude::*;

        network.ensure_same_shape(gradient)?;
        let base = cost(network, data)?;

        let source: &Network = network;
        let slots: Vec<(usize, usize)> = source
            .layers
            .iter()
            .enumerate()
            .flat_map(|(l, layer)| (0..layer.parameter_count()).map(move |p| (l, p)))
            .collect();

        let partials = slots
            .par_iter()
            .map_init(
                || source.clone(),
                |replica, &(l, p)| {
                    self.perturbed_cost(replica, data, l, p)
                        .map(|perturbed| (perturbed - base) / self.epsilon)
                },
            )
            .collect::<Result<Vec<f32>>>()?;

        for (&(l, p), g) in slots.iter().zip(partials) {
            *gradient.layers[l].parameter_mut(p) = g;
        }

        debug!("estimated {} partials in parallel around cost {base:.6}", slots.len());
        Ok(())
    }

    fn perturbed_cost(&self, network: &mut Network, data: &Dataset, layer: usize, param: usize) -> Result<f32> {
        let saved = *network.layers[layer].parameter_mut(param);
        *network.layers[layer].parameter_mut(param) = saved + self.epsilon;
        let res = cost(network, data);
        *network.layers[layer].parameter_mut(param) = saved;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;
    use crate::optim::sgd::Sgd;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy() -> (Network, Dataset) {
        let mut net = Network::new(&[1, 1]).unwrap();
        net.layers[0].weights.set(0, 0, 0.3).unwrap();
        net.layers[0].biases.set(0, 0, 0.1).unwrap();
        let data = Dataset::from_rows(&[vec![1.0]], &[vec![0.0]]).unwrap();
        (net, data)
    }

    #[test]
    fn gradient_sign_follows_cost_slope() {
        let (mut net, data) = toy();
        let mut grad = net.zeros_like();
        let fd = FiniteDifference::new(0.01).unwrap();

        // cost = sigmoid(w + b)^2 grows with w
        fd.estimate(&mut net, &mut grad, &data).unwrap();
        assert!(grad.layers[0].weights.get(0, 0).unwrap() > 0.0);
        assert!(grad.layers[0].biases.get(0, 0).unwrap() > 0.0);

        let before = cost(&mut net, &data).unwrap();
        Sgd::new(0.1).step(&mut net, &grad).unwrap();
        let after = cost(&mut net, &data).unwrap();
        assert!(after < before);
        assert!(net.layers[0].weights.get(0, 0).unwrap() < 0.3);
    }

    #[test]
    fn estimate_restores_parameters_exactly() {
        let data = Dataset::xor();
        let mut net = Network::new(&[2, 2, 1]).unwrap();
        net.randomize(&mut StdRng::seed_from_u64(9), 0.0, 1.0).unwrap();
        let snapshot = net.clone();
        let before = cost(&mut net, &data).unwrap();

        let mut grad = net.zeros_like();
        FiniteDifference::new(0.1).unwrap().estimate(&mut net, &mut grad, &data).unwrap();

        let after = cost(&mut net, &data).unwrap();
        assert_eq!(before.to_bits(), after.to_bits());
        for (a, b) in net.layers.iter().zip(&snapshot.layers) {
            assert_eq!(a.weights, b.weights);
            assert_eq!(a.biases, b.biases);
        }
    }

    #[test]
    fn estimate_matches_manual_difference() {
        let (mut net, data) = toy();
        let mut grad = net.zeros_like();
        let fd = FiniteDifference::new(0.1).unwrap();
        fd.estimate(&mut net, &mut grad, &data).unwrap();

        let base = cost(&mut net, &data).unwrap();
        let mut bumped = net.clone();
        *bumped.layers[0].weights.at_mut(0, 0).unwrap() += 0.1;
        let expected = (cost(&mut bumped, &data).unwrap() - base) / 0.1;

        assert_eq!(grad.layers[0].weights.get(0, 0).unwrap(), expected);
    }

    #[test]
    fn estimate_rejects_foreign_gradient_holder() {
        let (mut net, data) = toy();
        let mut grad = Network::new(&[1, 2]).unwrap();
        let err = FiniteDifference::new(0.1)
            .unwrap()
            .estimate(&mut net, &mut grad, &data)
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn rejects_degenerate_epsilon() {
        assert!(FiniteDifference::new(0.0).is_err());
        assert!(FiniteDifference::new(f32::INFINITY).is_err());
        assert!(FiniteDifference::new(-0.1).is_err());
        assert!(FiniteDifference::new(f32::NAN).is_err());
    }

    #[test]
    fn gradient_holder_input_is_never_touched() {
        let (mut net, data) = toy();
        let mut grad = net.zeros_like();
        FiniteDifference::new(0.1).unwrap().estimate(&mut net, &mut grad, &data).unwrap();
        assert_eq!(grad.input, Matrix::zeros(1, 1));
        assert_eq!(grad.layers[0].neurons, Matrix::zeros(1, 1));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_matches_sequential() {
        let data = Dataset::xor();
        let mut net = Network::new(&[2, 3, 1]).unwrap();
        net.randomize(&mut StdRng::seed_from_u64(4), -1.0, 1.0).unwrap();
        let fd = FiniteDifference::new(0.1).unwrap();

        let mut seq = net.zeros_like();
        let mut par = net.zeros_like();
        fd.estimate(&mut net, &mut seq, &data).unwrap();
        fd.estimate_parallel(&mut net, &mut par, &data).unwrap();

        for (a, b) in seq.layers.iter().zip(&par.layers) {
            assert_eq!(a.weights, b.weights);
            assert_eq!(a.biases, b.biases);
        }
    }
}
