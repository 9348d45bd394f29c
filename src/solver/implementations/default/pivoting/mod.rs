//! Pivoting strategies for the default solver.
//!
//! Each round the driver collects the infeasible variables with
//! [`find_pivots`] and hands them to a [`PivotStrategy`], which changes the
//! states of one or more of them and updates the basis to match.

#![allow(non_snake_case)]

use super::{Basis, DefaultProblemData, DefaultSettings, DefaultVariables};
use crate::algebra::*;
use crate::solver::core::callbacks::EventSink;
use crate::solver::core::{SolverEvent, VariableState};
use enum_dispatch::*;

mod block;
mod ratio;
mod single;
pub(crate) use block::*;
pub(crate) use ratio::*;
pub(crate) use single::*;

/// A variable whose value violates its state, and the state that
/// would repair it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PivotRequest<T> {
    pub index: usize,
    pub to: VariableState,
    /// size of the violation
    pub magnitude: T,
}

/// Collects every variable that violates its state by more than `tol`,
/// in index order.
pub(crate) fn find_pivots<T: FloatT>(
    vars: &DefaultVariables<T>,
    data: &DefaultProblemData<T>,
    tol: T,
    requests: &mut Vec<PivotRequest<T>>,
) {
    requests.clear();
    requests.extend((0..data.n).filter_map(|i| {
        vars.violation(data, i, tol)
            .map(|(to, magnitude)| PivotRequest {
                index: i,
                to,
                magnitude,
            })
    }));
}

/// Orders requests by decreasing violation
pub(crate) fn by_magnitude_desc<T: FloatT>(
    a: &PivotRequest<T>,
    b: &PivotRequest<T>,
) -> std::cmp::Ordering {
    b.magnitude
        .partial_cmp(&a.magnitude)
        .unwrap_or(std::cmp::Ordering::Equal)
}

// ---------------
// shared state
// ---------------

/// Counters accumulated over one solve
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PivotStats<T> {
    pub pivots: u32,
    pub failed_pivots: u32,
    /// largest tolerance reached by escalation
    pub max_tol: T,
}

/// Scratch space reused between rounds and solves
#[derive(Debug, Default)]
pub(crate) struct PivotWorkspace<T> {
    pub requests: Vec<PivotRequest<T>>,
    /// drive direction, `dz` for basic and `dw` for non-basic entries
    pub mv: Vec<T>,
    pub rhs: Vec<T>,
    pub candidates: Vec<RatioCandidate<T>>,
    pub tied: Vec<RatioCandidate<T>>,
    /// true if `z` and `w` were updated incrementally in the last round
    pub tracked: bool,
    pub z_tracked: Vec<T>,
    pub w_tracked: Vec<T>,
}

impl<T> PivotWorkspace<T>
where
    T: FloatT,
{
    pub fn reset(&mut self, n: usize) {
        self.requests.clear();
        self.mv.clear();
        self.mv.resize(n, T::zero());
        self.tracked = false;
    }

    /// Remembers the incrementally updated values for comparison after
    /// the next recompute
    pub fn snapshot(&mut self, vars: &DefaultVariables<T>) {
        self.z_tracked.clear();
        self.z_tracked.extend_from_slice(&vars.z);
        self.w_tracked.clear();
        self.w_tracked.extend_from_slice(&vars.w);
    }

    /// Largest disagreement between the snapshot and `vars`
    pub fn drift(&self, vars: &DefaultVariables<T>) -> T {
        T::max(
            self.z_tracked.norm_inf_diff(&vars.z),
            self.w_tracked.norm_inf_diff(&vars.w),
        )
    }
}

/// Everything a strategy may read or modify during one round
pub(crate) struct PivotContext<'a, T>
where
    T: FloatT,
{
    pub data: &'a DefaultProblemData<T>,
    pub settings: &'a DefaultSettings<T>,
    pub vars: &'a mut DefaultVariables<T>,
    pub basis: &'a mut Basis<T>,
    pub work: &'a mut PivotWorkspace<T>,
    pub ratio: &'a mut RatioTests<T>,
    pub stats: &'a mut PivotStats<T>,
    pub events: EventSink<'a, T>,
    /// feasibility tolerance at the start of the round
    pub tol: T,
}

impl<'a, T> PivotContext<'a, T>
where
    T: FloatT,
{
    /// Value of the bound named by `state`
    pub fn bound(&self, i: usize, state: VariableState) -> T {
        match state {
            VariableState::WUpper => self.data.hi[i],
            _ => self.data.lo[i],
        }
    }

    /// Makes `i` basic.  On failure the basis is unchanged and the
    /// rejection is counted.
    pub fn make_basic(&mut self, i: usize, tol: T) -> bool {
        let from = self.vars.state[i];
        if self
            .basis
            .try_add(i, &self.data.M, self.settings.pivot_perturbation)
        {
            self.vars.state[i] = VariableState::ZBasic;
            self.vars.w[i] = T::zero();
            self.stats.pivots += 1;
            self.events.emit(SolverEvent::Pivot {
                index: i,
                from,
                to: VariableState::ZBasic,
            });
            true
        } else {
            self.stats.failed_pivots += 1;
            self.events.emit(SolverEvent::PivotRejected {
                index: i,
                tolerance: tol,
            });
            false
        }
    }

    /// Moves `i` out of the basis (if it is basic) and pins it to the
    /// bound named by `to`
    pub fn make_nonbasic(&mut self, i: usize, to: VariableState) {
        debug_assert!(!to.is_basic());
        let from = self.vars.state[i];
        if from.is_basic() {
            self.basis.remove(i);
        }
        self.vars.state[i] = to;
        self.vars.z[i] = self.bound(i, to);
        self.stats.pivots += 1;
        self.events.emit(SolverEvent::Pivot { index: i, from, to });
    }

    /// Doubles `tol` after a rejected pivot, if escalation is enabled
    pub fn escalate(&mut self, tol: T) -> T {
        if !self.settings.tolerance_escalation {
            return tol;
        }
        let to = tol * (2.0).as_T();
        self.stats.max_tol = T::max(self.stats.max_tol, to);
        self.events.emit(SolverEvent::ToleranceEscalated { from: tol, to });
        to
    }
}

/// Result of applying a strategy for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PivotOutcome {
    /// At least one state changed
    Applied,
    /// No admissible pivot exists
    NoPivot,
}

#[enum_dispatch]
pub(crate) trait PivotStrategy<T>
where
    T: FloatT,
{
    /// Changes variable states to repair some of the infeasibilities in
    /// `ctx.work.requests`
    fn apply(&mut self, ctx: &mut PivotContext<'_, T>) -> PivotOutcome;

    fn is_block(&self) -> bool;
}

#[enum_dispatch(PivotStrategy<T>)]
pub(crate) enum PivotStrategies<T>
where
    T: FloatT,
{
    SinglePivot(SinglePivot<T>),
    BlockPivot(BlockPivot<T>),
}

impl<T> PivotStrategies<T>
where
    T: FloatT,
{
    pub fn new(block_pivoting: bool) -> Self {
        if block_pivoting {
            BlockPivot::default().into()
        } else {
            SinglePivot::default().into()
        }
    }
}
