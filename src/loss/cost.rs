use crate::{
    data::dataset::Dataset,
    error::{Error, Result},
    loss::mse::MseLoss,
    math::matrix::Matrix,
    network::network::Network,
};

/// Mean over examples of the per-example summed squared error.
///
/// Examples are visited in row order. Every example overwrites the network's
/// activations, so the network is left holding the last example's pass.
pub fn cost(network: &mut Network, data: &Dataset) -> Result<f32> {
    if data.input_width() != network.input_width() {
        return Err(Error::mismatch(
            "cost inputs",
            (data.len(), network.input_width()),
            data.inputs().shape(),
        ));
    }
    if data.target_width() != network.output_width() {
        return Err(Error::mismatch(
            "cost targets",
            (data.len(), network.output_width()),
            data.targets().shape(),
        ));
    }

    let mut target = Matrix::zeros(1, data.target_width());
    let mut total = 0.0;

    for i in 0..data.len() {
        Matrix::copy_row_into(network.input_mut(), data.inputs(), i)?;
        Matrix::copy_row_into(&mut target, data.targets(), i)?;
        network.forward()?;
        total += MseLoss::loss(network.output().as_slice(), target.as_slice());
    }

    Ok(total / data.len() as f32)
}
