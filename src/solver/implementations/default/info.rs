use super::pivoting::PivotStats;
use crate::algebra::*;
use crate::io::PrintTarget;
use crate::solver::core::SolverStatus;
use crate::timers::*;

/// Statistics and diagnostics for the last solve of the
/// [`DefaultSolver`](super::DefaultSolver)

#[derive(Default, Debug)]
pub struct DefaultInfo<T> {
    pub status: SolverStatus,
    /// pivoting rounds
    pub iterations: u32,
    /// individual variable state changes
    pub pivots: u32,
    /// basis additions rejected as singular
    pub failed_pivots: u32,
    /// feasibility tolerance at the start of the solve
    pub tolerance: T,
    /// largest tolerance reached by escalation
    pub max_tolerance: T,
    /// block pivoting was requested for the solve
    pub block_pivoting: bool,
    /// block pivoting was abandoned after stalling
    pub block_pivoting_disabled: bool,
    /// `‖M*z + q - w‖∞`, if residuals were computed
    pub residual: T,
    /// largest violation of the complementarity conditions, if residuals
    /// were computed
    pub complementarity: T,
    /// condition estimate of the final basis, if residuals were computed
    pub basis_condition: T,
    pub solve_time: f64,

    pub(crate) stream: PrintTarget,
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, timers: &mut Timers) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.pivots = 0;
        self.failed_pivots = 0;
        self.tolerance = T::zero();
        self.max_tolerance = T::zero();
        self.block_pivoting = false;
        self.block_pivoting_disabled = false;
        self.residual = T::nan();
        self.complementarity = T::nan();
        self.basis_condition = T::nan();
        self.solve_time = 0f64;

        timers.reset();
    }

    pub(crate) fn finalize(&mut self, stats: &PivotStats<T>, timers: &Timers) {
        self.pivots = stats.pivots;
        self.failed_pivots = stats.failed_pivots;
        self.max_tolerance = T::max(self.tolerance, stats.max_tol);
        self.solve_time = timers.total_time().as_secs_f64();
    }
}
