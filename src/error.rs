use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Permutations of incompatible degrees were combined.
    #[error("degree mismatch: expected {expected}, got {actual}")]
    DegreeMismatch { expected: usize, actual: usize },

    /// A point lies outside the one-based domain [1, degree], or an image
    /// vector fails to be a bijection on it.
    #[error("point {point} outside domain [1, {degree}]")]
    Domain { point: usize, degree: usize },

    #[error("{0} not supported")]
    Unsupported(&'static str),

    /// A structural invariant failed after construction claimed completion.
    #[error("invariant violated: {0}")]
    InvariantViolated(&'static str),

    #[error("automorphism oracle failure: {0}")]
    OracleFailure(&'static str),
}
