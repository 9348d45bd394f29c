use thiserror::Error;

/// Error type returned by dense factorization routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseFactorizationError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Matrix is not numerically positive definite.  Reports the
    /// column at which the factorization broke down.
    #[error("Cholesky factorization failed at column {0}")]
    Cholesky(usize),
}
