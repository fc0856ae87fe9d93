use std::str::FromStr;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Paired training examples: row `i` of `inputs` maps to row `i` of `targets`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Matrix,
    targets: Matrix,
}

impl Dataset {
    pub fn new(inputs: Matrix, targets: Matrix) -> Result<Dataset> {
        if inputs.rows() != targets.rows() {
            return Err(Error::InvalidData(format!(
                "{} input rows but {} target rows",
                inputs.rows(),
                targets.rows()
            )));
        }
        if inputs.rows() == 0 {
            return Err(Error::InvalidData("dataset must not be empty".to_owned()));
        }
        Ok(Dataset { inputs, targets })
    }

    pub fn from_rows(inputs: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<Dataset> {
        Dataset::new(Matrix::from_rows(inputs)?, Matrix::from_rows(targets)?)
    }

    /// Four-row truth table of a two-input gate.
    pub fn truth_table(gate: BooleanGate) -> Dataset {
        let mut inputs = Matrix::zeros(4, 2);
        let mut targets = Matrix::zeros(4, 1);
        for (i, (a, b)) in [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .enumerate()
        {
            let row = &mut inputs.as_mut_slice()[i * 2..i * 2 + 2];
            row[0] = f32::from(u8::from(a));
            row[1] = f32::from(u8::from(b));
            targets.as_mut_slice()[i] = f32::from(u8::from(gate.eval(a, b)));
        }
        Dataset { inputs, targets }
    }

    pub fn xor() -> Dataset {
        Dataset::truth_table(BooleanGate::Xor)
    }

    pub fn inputs(&self) -> &Matrix {
        &self.inputs
    }

    pub fn targets(&self) -> &Matrix {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.inputs.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn input_width(&self) -> usize {
        self.inputs.cols()
    }

    pub fn target_width(&self) -> usize {
        self.targets.cols()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanGate {
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl BooleanGate {
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            BooleanGate::And => a && b,
            BooleanGate::Or => a || b,
            BooleanGate::Nand => !(a && b),
            BooleanGate::Nor => !(a || b),
            BooleanGate::Xor => a != b,
            BooleanGate::Xnor => a == b,
        }
    }
}

impl FromStr for BooleanGate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(BooleanGate::And),
            "or" => Ok(BooleanGate::Or),
            "nand" => Ok(BooleanGate::Nand),
            "nor" => Ok(BooleanGate::Nor),
            "xor" => Ok(BooleanGate::Xor),
            "xnor" => Ok(BooleanGate::Xnor),
            other => Err(Error::InvalidData(format!("unknown gate `{other}`"))),
        }
    }
}
