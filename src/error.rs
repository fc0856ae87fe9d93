/// Everything that can go wrong inside the library.
///
/// None of these terminate the process; the caller decides whether a
/// mismatch is fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("dimension mismatch in {op}: expected {}x{}, found {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    DimensionMismatch {
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("{axis} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        axis: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("invalid range: min {min} must be finite and below max {max}")]
    InvalidRange { min: f32, max: f32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn mismatch(op: &'static str, expected: (usize, usize), found: (usize, usize)) -> Error {
        Error::DimensionMismatch { op, expected, found }
    }
}
