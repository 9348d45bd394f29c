#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::core::VariableState;
use thiserror::Error;

/// Error type returned by [`check_solution`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolutionCheckError {
    #[error("inputs have inconsistent lengths")]
    Dimension,
    #[error("w[{index}] differs from (M*z + q)[{index}] by {error:e}")]
    Residual { index: usize, error: f64 },
    #[error("z[{index}] = {value:e} lies outside its bounds")]
    OutOfBounds { index: usize, value: f64 },
    #[error("variable {index} is basic but w = {value:e}")]
    BasicWithNonzeroW { index: usize, value: f64 },
    #[error("variable {index} is at its lower bound but z = {z:e}, w = {w:e}")]
    LowerBoundViolated { index: usize, z: f64, w: f64 },
    #[error("variable {index} is at its upper bound but z = {z:e}, w = {w:e}")]
    UpperBoundViolated { index: usize, z: f64, w: f64 },
}

fn f<T: FloatT>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// `‖M*z + q - w‖∞`
pub fn residual_norm<T: FloatT>(M: &Matrix<T>, q: &[T], z: &[T], w: &[T]) -> T {
    let mut r = q.to_vec();
    M.gemv(&mut r, z, T::one(), T::one());
    r.norm_inf_diff(w)
}

/// Largest entry of the natural residual `z - mid(lo, hi, z - w)`, which
/// vanishes exactly when `z` and `w` satisfy the bounded complementarity
/// conditions.
pub fn complementarity_residual<T: FloatT>(z: &[T], w: &[T], lo: &[T], hi: &[T]) -> T {
    z.iter()
        .zip(w)
        .zip(lo.iter().zip(hi))
        .map(|((&zi, &wi), (&l, &h))| {
            let proj = T::min(h, T::max(l, zi - wi));
            T::abs(zi - proj)
        })
        .fold(T::zero(), T::max)
}

/// Verifies a bounded LCP solution against its variable states.
///
/// The tolerance is raised to `100 ε max(‖z‖∞, ‖w‖∞)` when that is larger,
/// so that large solutions are not held to an unreachable absolute
/// accuracy.
#[allow(clippy::too_many_arguments)]
pub fn check_solution<T: FloatT>(
    M: &Matrix<T>,
    q: &[T],
    lo: &[T],
    hi: &[T],
    z: &[T],
    w: &[T],
    state: &[VariableState],
    tol: T,
) -> Result<(), SolutionCheckError> {
    let n = q.len();
    if M.size() != (n, n) || [lo.len(), hi.len(), z.len(), w.len(), state.len()] != [n; 5] {
        return Err(SolutionCheckError::Dimension);
    }

    let mag = T::max(z.norm_inf(), w.norm_inf());
    let c: T = (100.).as_T();
    let tol = T::max(tol, c * T::epsilon() * mag);

    let mut r = q.to_vec();
    M.gemv(&mut r, z, T::one(), T::one());

    for i in 0..n {
        let (zi, wi) = (z[i], w[i]);
        let error = T::abs(r[i] - wi);
        if !(error <= tol) {
            return Err(SolutionCheckError::Residual {
                index: i,
                error: f(error),
            });
        }
        if !(zi >= lo[i] - tol && zi <= hi[i] + tol) {
            return Err(SolutionCheckError::OutOfBounds {
                index: i,
                value: f(zi),
            });
        }
        match state[i] {
            VariableState::ZBasic => {
                if wi.abs() > tol {
                    return Err(SolutionCheckError::BasicWithNonzeroW {
                        index: i,
                        value: f(wi),
                    });
                }
            }
            VariableState::WLower => {
                if (zi - lo[i]).abs() > tol || wi < -tol {
                    return Err(SolutionCheckError::LowerBoundViolated {
                        index: i,
                        z: f(zi),
                        w: f(wi),
                    });
                }
            }
            VariableState::WUpper => {
                if (zi - hi[i]).abs() > tol || wi > tol {
                    return Err(SolutionCheckError::UpperBoundViolated {
                        index: i,
                        z: f(zi),
                        w: f(wi),
                    });
                }
            }
        }
    }
    Ok(())
}

/// [`check_solution`] for a plain LCP, with `lo = 0` and `hi = +∞`
pub fn check_lcp_solution<T: FloatT>(
    M: &Matrix<T>,
    q: &[T],
    z: &[T],
    w: &[T],
    state: &[VariableState],
    tol: T,
) -> Result<(), SolutionCheckError> {
    let lo = vec![T::zero(); q.len()];
    let hi = vec![T::infinity(); q.len()];
    check_solution(M, q, &lo, &hi, z, w, state, tol)
}
