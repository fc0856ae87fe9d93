use fdnet::{init_network, train_loop, BooleanGate, Dataset, Matrix, TrainConfig};

#[test]
fn learns_linearly_separable_gates() {
    for gate in [BooleanGate::And, BooleanGate::Or, BooleanGate::Nand] {
        let data = Dataset::truth_table(gate);
        let mut config = TrainConfig::new(0.1, 0.5, 0.02);
        config.seed = Some(11);
        config.max_iterations = Some(200_000);
        config.log_every = 0;

        let mut network = init_network(&[2, 1], &config).unwrap();
        let outcome = train_loop(&mut network, &data, &config).unwrap();
        assert!(outcome.converged(), "{gate:?} stopped at cost {}", outcome.final_cost);

        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let x = Matrix::from_rows(&[vec![f32::from(u8::from(a)), f32::from(u8::from(b))]]).unwrap();
            let y = network.predict(&x).unwrap().get(0, 0).unwrap();
            assert_eq!(y > 0.5, gate.eval(a, b), "{gate:?}({a}, {b}) -> {y}");
        }
    }
}
