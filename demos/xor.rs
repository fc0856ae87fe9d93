use fdnet::{cost, Dataset, FiniteDifference, Network, Sgd, train_step};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> fdnet::Result<()> {
    let data = Dataset::xor();

    let mut network = Network::new(&[2, 2, 1])?;
    network.randomize(&mut StdRng::seed_from_u64(7), 0.0, 1.0)?;
    let mut gradient = network.zeros_like();

    let estimator = FiniteDifference::new(0.1)?;
    let optimizer = Sgd::new(0.1);

    let mut loss = cost(&mut network, &data)?;
    let mut iteration = 0;
    while loss > 0.01 && iteration < 200_000 {
        loss = train_step(&mut network, &mut gradient, &data, &estimator, &optimizer)?;
        if iteration % 5000 == 0 {
            println!("Iteration {iteration}: cost = {loss:.6}");
        }
        iteration += 1;
    }
    println!("Final cost after {iteration} iterations: {loss:.6}");

    for i in 0..data.len() {
        let x = data.inputs().row(i)?;
        let y = network.predict(&x)?;
        println!("Input: {:?} -> Output: {:.4}", x.as_slice(), y.as_slice()[0]);
    }

    Ok(())
}
