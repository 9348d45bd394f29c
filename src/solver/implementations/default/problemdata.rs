#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::core::LcpError;

// ---------------
// Data type for the default problem format
// ---------------

/// Cached copy of the problem data for the [`DefaultSolver`](super::DefaultSolver).
///
/// A plain LCP is stored as a bounded problem with `lo = 0`, `hi = +∞`
/// and an empty unbounded prefix.

#[derive(Debug, Default)]
pub struct DefaultProblemData<T> {
    pub M: Matrix<T>,
    pub q: Vec<T>,
    pub lo: Vec<T>,
    pub hi: Vec<T>,
    pub n: usize,
    pub nub: usize,
    /// largest magnitude entry of `q`
    pub qnorm: T,
    /// infinity norm of `M`
    pub Mnorm: T,
}

impl<T> DefaultProblemData<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            M: Matrix::zeros((0, 0)),
            q: vec![],
            lo: vec![],
            hi: vec![],
            n: 0,
            nub: 0,
            qnorm: T::zero(),
            Mnorm: T::zero(),
        }
    }

    /// Validates and stores a plain LCP
    pub fn load_lcp(&mut self, M: &Matrix<T>, q: &[T]) -> Result<(), LcpError> {
        check_matrix_and_q(M, q)?;
        let n = q.len();
        self.store(M, q);
        self.lo.clear();
        self.lo.resize(n, T::zero());
        self.hi.clear();
        self.hi.resize(n, T::infinity());
        self.nub = 0;
        Ok(())
    }

    /// Validates and stores a bounded LCP
    pub fn load_blcp(
        &mut self,
        M: &Matrix<T>,
        q: &[T],
        lo: &[T],
        hi: &[T],
        nub: usize,
    ) -> Result<(), LcpError> {
        check_matrix_and_q(M, q)?;
        check_bounds(q.len(), lo, hi, nub)?;
        self.store(M, q);
        self.lo.clear();
        self.lo.extend_from_slice(lo);
        self.hi.clear();
        self.hi.extend_from_slice(hi);
        self.nub = nub;
        Ok(())
    }

    /// Replaces `q`, keeping everything else
    pub fn update_q(&mut self, q: &[T]) -> Result<(), LcpError> {
        check_length("q", self.n, q.len())?;
        if !q.is_finite() {
            return Err(LcpError::NonFiniteData("q"));
        }
        self.q.copy_from(q);
        self.qnorm = q.norm_inf();
        Ok(())
    }

    fn store(&mut self, M: &Matrix<T>, q: &[T]) {
        self.M.copy_from(M);
        self.q.clear();
        self.q.extend_from_slice(q);
        self.n = q.len();
        self.qnorm = q.norm_inf();
        self.Mnorm = M.norm_inf();
    }

    /// Threshold below which a rate of change along a pivoted column of
    /// `M` counts as zero.  Scales with `M` only, never with `q`.
    pub fn slope_tolerance(&self) -> T {
        let c: T = (100.).as_T();
        c * T::epsilon() * T::max(T::one(), self.Mnorm)
    }

    /// true if any variable has a finite upper bound
    pub fn is_bounded(&self) -> bool {
        self.hi.iter().any(|h| h.is_finite())
    }
}

pub(crate) fn check_length(name: &'static str, expected: usize, found: usize) -> Result<(), LcpError> {
    if expected != found {
        return Err(LcpError::DimensionMismatch {
            name,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_matrix_and_q<T: FloatT>(M: &Matrix<T>, q: &[T]) -> Result<(), LcpError> {
    if !M.is_square() {
        return Err(LcpError::NonSquareMatrix {
            rows: M.nrows(),
            cols: M.ncols(),
        });
    }
    check_length("q", M.nrows(), q.len())?;

    if !M.data().is_finite() {
        return Err(LcpError::NonFiniteData("M"));
    }
    if !q.is_finite() {
        return Err(LcpError::NonFiniteData("q"));
    }

    // the factorization only reads the lower triangle
    let symtol = T::epsilon() * (1e4).as_T() * T::max(T::one(), M.norm_inf());
    if !M.is_symmetric(symtol) {
        return Err(LcpError::AsymmetricMatrix);
    }
    Ok(())
}

fn check_bounds<T: FloatT>(n: usize, lo: &[T], hi: &[T], nub: usize) -> Result<(), LcpError> {
    check_length("lo", n, lo.len())?;
    check_length("hi", n, hi.len())?;
    if nub > n {
        return Err(LcpError::PrefixTooLarge { nub, n });
    }

    for (i, (&l, &h)) in lo.iter().zip(hi).enumerate() {
        if l.is_nan() || h.is_nan() {
            return Err(LcpError::InconsistentBounds(i));
        }
        let lo_free = l == T::neg_infinity();
        let hi_free = h == T::infinity();
        if i < nub {
            if !(lo_free && hi_free) {
                return Err(LcpError::BoundedPrefixVariable(i));
            }
        } else if lo_free && hi_free {
            return Err(LcpError::UnboundedVariable(i));
        } else if l == T::infinity() || h == T::neg_infinity() || l > h {
            return Err(LcpError::InconsistentBounds(i));
        }
    }
    Ok(())
}
