#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::solver::core::VariableState;

// ---------------
// Variables type for the default problem format
// ---------------

/// Working values of the [`DefaultSolver`](super::DefaultSolver).
///
/// Between rounds every non-basic `z[i]` sits exactly on the bound named by
/// its state, and every basic `w[i]` is zero.

#[derive(Debug, Clone, Default)]
pub struct DefaultVariables<T> {
    pub z: Vec<T>,
    pub w: Vec<T>,
    pub state: Vec<VariableState>,
}

impl<T> DefaultVariables<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        Self {
            z: vec![T::zero(); n],
            w: vec![T::zero(); n],
            state: vec![VariableState::WLower; n],
        }
    }

    pub(crate) fn resize(&mut self, n: usize) {
        self.z.resize(n, T::zero());
        self.w.resize(n, T::zero());
        self.state.resize(n, VariableState::WLower);
    }

    /// Cold start: prefix variables basic, the rest at the bound that is
    /// finite, preferring the lower one.
    pub(crate) fn initialize(&mut self, data: &DefaultProblemData<T>) {
        self.resize(data.n);
        for i in 0..data.n {
            self.state[i] = if i < data.nub {
                VariableState::ZBasic
            } else {
                default_bound_state(data.lo[i])
            };
        }
        self.pin_to_bounds(data);
    }

    /// Warm start from `incoming`.  States that name an infinite bound are
    /// replaced by the cold start choice and prefix variables are forced
    /// basic.
    pub(crate) fn initialize_warm(
        &mut self,
        data: &DefaultProblemData<T>,
        incoming: &[VariableState],
    ) {
        self.resize(data.n);
        for i in 0..data.n {
            self.state[i] = if i < data.nub {
                VariableState::ZBasic
            } else {
                match incoming[i] {
                    VariableState::ZBasic => VariableState::ZBasic,
                    VariableState::WLower if data.lo[i].is_finite() => VariableState::WLower,
                    VariableState::WUpper if data.hi[i].is_finite() => VariableState::WUpper,
                    _ => default_bound_state(data.lo[i]),
                }
            };
        }
        self.pin_to_bounds(data);
    }

    /// Sets every non-basic `z[i]` to the bound named by its state
    pub(crate) fn pin_to_bounds(&mut self, data: &DefaultProblemData<T>) {
        for (i, (z, s)) in self.z.iter_mut().zip(self.state.iter()).enumerate() {
            match s {
                VariableState::ZBasic => {}
                VariableState::WLower => *z = data.lo[i],
                VariableState::WUpper => *z = data.hi[i],
            }
        }
    }

    /// Recomputes `z` and `w` in closed form from the current basis.
    ///
    /// With the non-basic `z` pinned, the basic `z` solve
    /// `M[B,B] z[B] = -(q[B] + M[B,N] z[N])` and `w = M*z + q` follows.
    pub(crate) fn recompute(
        &mut self,
        data: &DefaultProblemData<T>,
        basis: &Basis<T>,
        work: &mut Vec<T>,
    ) {
        let (z, w) = (&mut self.z, &mut self.w);
        let basic = basis.basic();

        for &i in basic {
            z[i] = T::zero();
        }
        w.copy_from(&data.q);
        data.M.gemv(w, z, T::one(), T::one());

        work.clear();
        work.extend(basic.iter().map(|&i| -w[i]));
        basis.solve(work);

        for (&i, &zi) in basic.iter().zip(work.iter()) {
            z[i] = zi;
            if zi != T::zero() {
                for (wr, &mri) in w.iter_mut().zip(data.M.col_slice(i)) {
                    *wr += mri * zi;
                }
            }
        }
        for &i in basic {
            w[i] = T::zero();
        }
    }

    /// The state that would repair variable `i` and the size of its
    /// violation, or `None` if it is consistent within `tol`.
    ///
    /// A basic variable outside its bounds requests the violated bound.  A
    /// variable at its lower (upper) bound with `w < -tol` (`w > tol`)
    /// requests to become basic.
    pub fn violation(
        &self,
        data: &DefaultProblemData<T>,
        i: usize,
        tol: T,
    ) -> Option<(VariableState, T)> {
        let (z, w) = (self.z[i], self.w[i]);
        let (lo, hi) = (data.lo[i], data.hi[i]);
        match self.state[i] {
            VariableState::ZBasic => {
                if z - lo < -tol {
                    Some((VariableState::WLower, lo - z))
                } else if hi - z < -tol {
                    Some((VariableState::WUpper, z - hi))
                } else {
                    None
                }
            }
            VariableState::WLower => (w < -tol).then(|| (VariableState::ZBasic, -w)),
            VariableState::WUpper => (w > tol).then(|| (VariableState::ZBasic, w)),
        }
    }

    /// Number of variables violating their state by more than `tol`
    pub fn infeasibility_count(&self, data: &DefaultProblemData<T>, tol: T) -> usize {
        (0..data.n)
            .filter(|&i| self.violation(data, i, tol).is_some())
            .count()
    }

    /// true if every value is finite
    pub(crate) fn is_finite(&self) -> bool {
        self.z.is_finite() && self.w.is_finite()
    }
}

/// State of a non-basic variable with lower bound `lo` when no
/// other information is available
pub(crate) fn default_bound_state<T: FloatT>(lo: T) -> VariableState {
    if lo.is_finite() {
        VariableState::WLower
    } else {
        VariableState::WUpper
    }
}
