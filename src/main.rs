// Trains a [2, 2, 1] network on a two-input boolean gate and prints the
// learned truth table.
//
//   fdnet [gate] [config.json]
//
// `gate` is one of and, or, nand, nor, xor, xnor (default xor).
use std::process::ExitCode;

use fdnet::{init_network, train_loop, BooleanGate, Dataset, TrainConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let gate: BooleanGate = match args.next() {
        Some(name) => name.parse()?,
        None => BooleanGate::Xor,
    };
    let config = match args.next() {
        Some(path) => TrainConfig::load_json(&path)?,
        None => TrainConfig::default(),
    };

    let data = Dataset::truth_table(gate);
    let mut network = init_network(&[2, 2, 1], &config)?;
    let outcome = train_loop(&mut network, &data, &config)?;
    println!("cost: {:.6} after {} iterations", outcome.final_cost, outcome.iterations);

    for i in 0..data.len() {
        let x = data.inputs().row(i)?;
        let y = network.predict(&x)?;
        println!("{} {} {:.6}", x.get(0, 0)?, x.get(0, 1)?, y.get(0, 0)?);
    }

    Ok(())
}
