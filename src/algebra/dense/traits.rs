#![allow(non_snake_case)]

use crate::algebra::{DenseFactorizationError, Matrix};

/// Updatable Cholesky factorization `A = L*L^T` of a symmetric positive
/// definite matrix.
///
/// Implementors maintain the factor of a matrix whose rows and columns can
/// be appended and removed one at a time without refactoring from scratch.
/// The pivoting solvers consume the factorization only through this trait.
pub trait FactorCholesky<T> {
    /// Computes the factorization of `A`.  Only the lower triangle of `A`
    /// is referenced.  On failure the factorization is left empty.
    fn factor(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError>;

    /// Solves `A*x = b` in place, with `b` passed in `x`.
    fn solve(&self, x: &mut [T]);

    /// Extends the factorization by one row and column.  `col` holds the
    /// new column of `A`, including its diagonal entry as the final element.
    ///
    /// Returns false, leaving the factorization unchanged, if the new
    /// diagonal pivot of `L` (squared) is not larger than `perturbation`.
    fn add_row_and_column(&mut self, col: &[T], perturbation: T) -> bool;

    /// Removes row and column `idx` from the factorization.
    fn delete_row_and_column(&mut self, idx: usize);

    /// Resets the factorization to size zero.  Storage is retained.
    fn clear(&mut self);

    /// Makes room for a factorization of dimension `n`.
    fn ensure_capacity(&mut self, n: usize);

    /// Current dimension of the factorization.
    fn size(&self) -> usize;

    /// Estimates the infinity-norm condition number of `A`, which must be
    /// the matrix currently factored.
    fn condition_estimate(&self, A: &Matrix<T>) -> Result<T, DenseFactorizationError>;
}
