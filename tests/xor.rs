use fdnet::{cost, init_network, train_loop, Dataset, Matrix, Network, TrainConfig};

/// Some initializations settle in a poor local optimum, so a handful of
/// seeds is tried and the first one that reaches the threshold is kept.
fn train_xor() -> Option<Network> {
    let data = Dataset::xor();
    for seed in 0..6 {
        let mut config = TrainConfig::new(0.1, 0.1, 0.01);
        config.seed = Some(seed);
        config.max_iterations = Some(300_000);
        config.log_every = 0;

        let mut network = init_network(&[2, 2, 1], &config).unwrap();
        let outcome = train_loop(&mut network, &data, &config).unwrap();
        if outcome.converged() {
            assert!(outcome.final_cost <= 0.01);
            assert!(outcome.final_cost < outcome.initial_cost);
            return Some(network);
        }
    }
    None
}

fn predict(network: &mut Network, a: f32, b: f32) -> f32 {
    let x = Matrix::from_rows(&[vec![a, b]]).unwrap();
    network.predict(&x).unwrap().get(0, 0).unwrap()
}

#[test]
fn learns_xor() {
    let mut network = train_xor().expect("no seed reached the cost threshold");

    assert!(cost(&mut network, &Dataset::xor()).unwrap() <= 0.01);
    assert!(predict(&mut network, 0.0, 0.0) < 0.3);
    assert!(predict(&mut network, 1.0, 1.0) < 0.3);
    assert!(predict(&mut network, 0.0, 1.0) > 0.7);
    assert!(predict(&mut network, 1.0, 0.0) > 0.7);
}
