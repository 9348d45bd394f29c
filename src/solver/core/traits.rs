//! Interface shared by the pivoting solvers.
//!
//! The [default solver](crate::solver::implementations::default) implements
//! every method.  Implementations that only handle the plain LCP may rely on
//! the provided defaults, which report the bounded form as unimplemented.

#![allow(non_snake_case)]

use super::{LcpError, SolverStatus, VariableState};
use crate::algebra::*;

/// A solver for linear complementarity problems.
///
/// The plain LCP is to find `z` and `w` with
///
/// ```text
/// w = M*z + q,   z >= 0,   w >= 0,   z'w = 0
/// ```
///
/// The bounded form (BLCP) additionally gives each variable bounds
/// `lo <= z <= hi`, with `w >= 0` at the lower bound, `w <= 0` at the upper
/// bound and `w = 0` strictly between them.
pub trait LcpSolver<T: FloatT> {
    /// Solves the LCP defined by `M` and `q`.  The solution is written to
    /// `z` and the final variable states to `state`.  If warm starting is
    /// enabled the incoming `state` is used as the initial basis guess.
    fn solve(
        &mut self,
        z: &mut [T],
        state: &mut [VariableState],
        M: &Matrix<T>,
        q: &[T],
    ) -> Result<SolverStatus, LcpError>;

    /// Solves the BLCP defined by `M`, `q` and the bounds `lo` and `hi`.
    /// The first `nub` variables must be unbounded and are kept basic.
    #[allow(clippy::too_many_arguments)]
    fn solve_bounded(
        &mut self,
        _z: &mut [T],
        _w: &mut [T],
        _state: &mut [VariableState],
        _M: &Matrix<T>,
        _q: &[T],
        _lo: &[T],
        _hi: &[T],
        _nub: usize,
    ) -> Result<SolverStatus, LcpError> {
        Ok(SolverStatus::Unimplemented)
    }

    /// Recomputes `z` for a new `q` using the basis of the last solve,
    /// without pivoting.
    fn resolve(
        &mut self,
        z: &mut [T],
        q: &[T],
        state: &mut [VariableState],
    ) -> Result<(), LcpError>;

    /// true if [`solve_bounded`](LcpSolver::solve_bounded) is implemented
    fn is_bounded_supported(&self) -> bool {
        false
    }

    /// true if the incoming variable states are used as a starting basis
    fn is_warm_start_supported(&self) -> bool {
        false
    }

    /// Number of pivoting rounds in the last solve.
    fn iteration_count(&self) -> u32;

    /// Number of individual variable state changes in the last solve.
    fn pivot_count(&self) -> u32;

    /// Number of basis additions rejected as numerically singular in the
    /// last solve.
    fn failed_pivot_count(&self) -> u32;

    /// Feasibility tolerance used in the last solve.
    fn last_solve_tol(&self) -> T;
}
