use rand::Rng;
use std::fmt;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};

/// Dense row-major matrix of `f32`.
///
/// Element `(i, j)` lives at `data[i * cols + j]`; every access goes through
/// [`Matrix::offset`]. Each matrix owns its buffer, so extracting a row or a
/// column always copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::new(rows, cols)
    }

    /// Builds a matrix from nested rows. All rows must share a non-zero length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Matrix> {
        let first = rows
            .first()
            .ok_or_else(|| Error::InvalidData("matrix needs at least one row".to_owned()))?;
        let cols = first.len();
        if cols == 0 {
            return Err(Error::InvalidData("matrix rows must not be empty".to_owned()));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidData(format!(
                    "row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Matrix {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Uniformly random matrix in `[min, max)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R, min: f32, max: f32) -> Result<Matrix> {
        let mut res = Matrix::new(rows, cols);
        res.randomize(rng, min, max)?;
        Ok(res)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    fn check_index(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows {
            return Err(Error::IndexOutOfBounds { axis: "row", index: i, len: self.rows });
        }
        if j >= self.cols {
            return Err(Error::IndexOutOfBounds { axis: "column", index: j, len: self.cols });
        }
        Ok(())
    }

    pub fn get(&self, i: usize, j: usize) -> Result<f32> {
        self.check_index(i, j)?;
        Ok(self.data[self.offset(i, j)])
    }

    pub fn set(&mut self, i: usize, j: usize, value: f32) -> Result<()> {
        self.check_index(i, j)?;
        let idx = self.offset(i, j);
        self.data[idx] = value;
        Ok(())
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut f32> {
        self.check_index(i, j)?;
        let idx = self.offset(i, j);
        Ok(&mut self.data[idx])
    }

    /// True when `[min, max)` is non-empty and its width fits in an `f32`.
    pub fn is_sampling_range(min: f32, max: f32) -> bool {
        min.is_finite() && max.is_finite() && min < max && (max - min).is_finite()
    }

    /// Fills every element with an independent uniform sample in `[min, max)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, min: f32, max: f32) -> Result<()> {
        if !Matrix::is_sampling_range(min, max) {
            return Err(Error::InvalidRange { min, max });
        }
        for x in self.data.iter_mut() {
            *x = rng.gen_range(min..max);
        }
        Ok(())
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn copy_from(&mut self, source: &Matrix) -> Result<()> {
        if self.shape() != source.shape() {
            return Err(Error::mismatch("copy_from", self.shape(), source.shape()));
        }
        self.data.copy_from_slice(&source.data);
        Ok(())
    }

    /// Copies row `i` of `source` into a new `1 x cols` matrix.
    pub fn row(&self, i: usize) -> Result<Matrix> {
        let mut dest = Matrix::new(1, self.cols);
        Matrix::copy_row_into(&mut dest, self, i)?;
        Ok(dest)
    }

    /// Copies column `j` of `source` into a new `rows x 1` matrix.
    pub fn column(&self, j: usize) -> Result<Matrix> {
        let mut dest = Matrix::new(self.rows, 1);
        Matrix::copy_column_into(&mut dest, self, j)?;
        Ok(dest)
    }

    pub fn copy_row_into(dest: &mut Matrix, source: &Matrix, i: usize) -> Result<()> {
        if i >= source.rows {
            return Err(Error::IndexOutOfBounds { axis: "row", index: i, len: source.rows });
        }
        if dest.shape() != (1, source.cols) {
            return Err(Error::mismatch("copy_row_into", (1, source.cols), dest.shape()));
        }
        let start = source.offset(i, 0);
        dest.data.copy_from_slice(&source.data[start..start + source.cols]);
        Ok(())
    }

    pub fn copy_column_into(dest: &mut Matrix, source: &Matrix, j: usize) -> Result<()> {
        if j >= source.cols {
            return Err(Error::IndexOutOfBounds { axis: "column", index: j, len: source.cols });
        }
        if dest.shape() != (source.rows, 1) {
            return Err(Error::mismatch("copy_column_into", (source.rows, 1), dest.shape()));
        }
        for i in 0..source.rows {
            dest.data[i] = source.data[source.offset(i, j)];
        }
        Ok(())
    }

    /// `dest = a * b`.
    ///
    /// Each element is a plain `f32` sum over `k` ascending, starting from 0.
    pub fn multiply(dest: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
        if a.cols != b.rows {
            return Err(Error::mismatch("multiply", (a.cols, b.cols), b.shape()));
        }
        if dest.shape() != (a.rows, b.cols) {
            return Err(Error::mismatch("multiply", (a.rows, b.cols), dest.shape()));
        }

        for i in 0..dest.rows {
            for j in 0..dest.cols {
                let mut sum = 0.0;
                for k in 0..a.cols {
                    sum += a.data[a.offset(i, k)] * b.data[b.offset(k, j)];
                }
                let idx = dest.offset(i, j);
                dest.data[idx] = sum;
            }
        }

        Ok(())
    }

    /// `dest = a + b`, element-wise.
    pub fn add(dest: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
        if a.shape() != b.shape() {
            return Err(Error::mismatch("add", a.shape(), b.shape()));
        }
        if dest.shape() != a.shape() {
            return Err(Error::mismatch("add", a.shape(), dest.shape()));
        }
        for ((d, x), y) in dest.data.iter_mut().zip(&a.data).zip(&b.data) {
            *d = x + y;
        }
        Ok(())
    }

    /// `self += other`, element-wise.
    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::mismatch("add_assign", self.shape(), other.shape()));
        }
        for (d, x) in self.data.iter_mut().zip(&other.data) {
            *d += x;
        }
        Ok(())
    }

    pub fn activate(&mut self, activation: ActivationFunction) {
        for x in self.data.iter_mut() {
            *x = activation.function(*x);
        }
    }

    pub fn apply_sigmoid(&mut self) {
        self.activate(ActivationFunction::Sigmoid);
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            write!(f, "| ")?;
            for x in row {
                write!(f, "{x:.6} ")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
