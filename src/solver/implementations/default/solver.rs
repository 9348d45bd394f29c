#![allow(non_snake_case)]

use super::pivoting::*;
use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::core::callbacks::{Callback, EventSink, SolverCallbacks};
use crate::solver::core::{
    LcpError, LcpSolver, SolverEvent, SolverStatus, VariableState, _print_banner,
};
use crate::timers::*;
use itertools::izip;

/// Active set pivoting solver for LCP and BLCP problems.
///
/// The factorization of the final basis is kept after each solve, so that
/// [`resolve`](LcpSolver::resolve) can recompute the solution for a new `q`
/// without pivoting, and so that a following solve may be warm started
/// from the returned variable states.
///
/// ```
/// use pivotal::algebra::*;
/// use pivotal::solver::*;
///
/// let M = Matrix::from(&[[2., 1.], [1., 2.]]);
/// let q = [-5., -6.];
/// let mut z = [0.; 2];
/// let mut state = [VariableState::WLower; 2];
///
/// let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
/// let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();
///
/// assert_eq!(status, SolverStatus::Solved);
/// assert!((z[0] - 4. / 3.).abs() < 1e-12);
/// assert!((z[1] - 7. / 3.).abs() < 1e-12);
/// ```
pub struct DefaultSolver<T: FloatT = f64> {
    pub settings: DefaultSettings<T>,
    pub info: DefaultInfo<T>,
    /// values and states of the last solve
    pub variables: DefaultVariables<T>,
    pub timers: Option<Timers>,

    pub(crate) data: DefaultProblemData<T>,
    pub(crate) basis: Basis<T>,
    pub(crate) work: PivotWorkspace<T>,
    pub(crate) stats: PivotStats<T>,
    pub(crate) callbacks: SolverCallbacks<T>,
    // basis matches `data` and `variables.state`
    has_basis: bool,
}

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    pub fn new(settings: DefaultSettings<T>) -> Self {
        Self::with_factorization(settings, Box::new(CholeskyEngine::new(0)))
    }

    /// Creates a solver that maintains its basis with a user supplied
    /// Cholesky implementation
    pub fn with_factorization(
        settings: DefaultSettings<T>,
        factor: Box<dyn FactorCholesky<T> + Send>,
    ) -> Self {
        Self {
            settings,
            info: DefaultInfo::new(),
            variables: DefaultVariables::default(),
            timers: Some(Timers::default()),
            data: DefaultProblemData::new(),
            basis: Basis::with_factorization(factor),
            work: PivotWorkspace::default(),
            stats: PivotStats::default(),
            callbacks: SolverCallbacks::default(),
            has_basis: false,
        }
    }

    /// Sets a function that is called with every [`SolverEvent`]
    pub fn set_event_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&SolverEvent<T>) + Send + 'static,
    {
        self.callbacks.event_callback = Callback::Rust(Box::new(callback));
    }

    pub fn unset_event_callback(&mut self) {
        self.callbacks.event_callback = Callback::None;
    }

    /// Problem data stored by the last solve
    pub fn data(&self) -> &DefaultProblemData<T> {
        &self.data
    }

    /// Basic variables of the last solve, in factorization order
    pub fn basic_variables(&self) -> &[usize] {
        self.basis.basic()
    }

    fn run(&mut self, incoming: &[VariableState]) -> Result<SolverStatus, LcpError> {
        // timers live in an Option so that they can be borrowed
        // independently of the rest of the solver
        let mut timers = self.timers.take().unwrap_or_default();
        self.info.reset(&mut timers);
        self.stats = PivotStats::default();
        self.has_basis = false;

        let result;
        timeit! {timers => "solve"; {
            result = self.iterate(incoming, &mut timers);
        }}

        if let Ok(status) = result {
            self.has_basis = true;
            self.info.status = status;
            self.info.finalize(&self.stats, &timers);
            EventSink::new(
                &mut self.callbacks,
                &mut self.info.stream,
                self.settings.debug,
            )
            .emit(SolverEvent::Finished {
                status,
                iterations: self.info.iterations,
                pivots: self.info.pivots,
            });
            let _ = self.info.print_footer(&self.settings);
        }

        self.timers.replace(timers);
        result
    }

    fn iterate(
        &mut self,
        incoming: &[VariableState],
        timers: &mut Timers,
    ) -> Result<SolverStatus, LcpError> {
        let Self {
            settings,
            info,
            variables: vars,
            data,
            basis,
            work,
            stats,
            callbacks,
            ..
        } = self;
        let n = data.n;

        let tol = settings.solve_tolerance(&data.q);
        info.tolerance = tol;
        info.block_pivoting = settings.block_pivoting;
        stats.max_tol = tol;
        let mut ratio = RatioTests::new(&settings.ratio_test)?;

        notimeit! {timers; {
            let _ = _print_banner(&mut info.stream, settings.verbose);
            let _ = info.print_configuration(settings, data);
        }}

        EventSink::new(callbacks, &mut info.stream, settings.debug).emit(SolverEvent::Start {
            size: n,
            nub: data.nub,
            tolerance: tol,
            block_pivoting: settings.block_pivoting,
        });

        let demoted;
        timeit! {timers => "initialize"; {
            if settings.warm_start {
                vars.initialize_warm(data, incoming);
            } else {
                vars.initialize(data);
            }
            work.reset(n);
            demoted = basis.factor_from_states(data, &mut vars.state, settings.pivot_perturbation);
        }}
        for i in demoted? {
            EventSink::new(callbacks, &mut info.stream, settings.debug).emit(
                SolverEvent::BasisSalvage {
                    index: i,
                    to: vars.state[i],
                },
            );
        }
        vars.pin_to_bounds(data);

        let mut strategy = PivotStrategies::new(settings.block_pivoting);
        let mut stall = StallMonitor::new(settings.stall_window);
        let max_iterations = u64::from(settings.iteration_limit) * n as u64;
        let max_drift = settings.consistency_tol * T::max(T::one(), data.qnorm);
        let mut strikes = 0;

        notimeit! {timers; {
            let _ = info.print_status_header(settings);
        }}

        let status = loop {
            // compare the incrementally updated values with a fresh solve
            let tracked = work.tracked;
            if tracked {
                work.snapshot(vars);
            }
            vars.recompute(data, basis, &mut work.rhs);
            if tracked && work.drift(vars) > max_drift {
                strikes += 1;
                if strikes >= settings.consistency_strikes {
                    break SolverStatus::NumericError;
                }
            } else {
                strikes = 0;
            }

            find_pivots(vars, data, tol, &mut work.requests);
            let infeasible = work.requests.len();

            EventSink::new(callbacks, &mut info.stream, settings.debug).emit(SolverEvent::Round {
                iteration: info.iterations,
                infeasible,
            });
            notimeit! {timers; {
                let _ = info.print_status(settings, infeasible, basis.num_basic(), stats.pivots);
                let _ = info.print_variables(settings, vars);
            }}

            if infeasible == 0 {
                break if vars.is_finite() {
                    SolverStatus::Solved
                } else {
                    SolverStatus::NumericError
                };
            }
            if u64::from(info.iterations) >= max_iterations {
                break SolverStatus::IterationLimitExceeded;
            }

            if strategy.is_block() && stall.is_stalled(info.iterations, infeasible) {
                strategy = SinglePivot::default().into();
                info.block_pivoting_disabled = true;
                EventSink::new(callbacks, &mut info.stream, settings.debug).emit(
                    SolverEvent::BlockPivotingDisabled {
                        iteration: info.iterations,
                    },
                );
            }

            let mut ctx = PivotContext {
                data: &*data,
                settings: &*settings,
                vars: &mut *vars,
                basis: &mut *basis,
                work: &mut *work,
                ratio: &mut ratio,
                stats: &mut *stats,
                events: EventSink::new(callbacks, &mut info.stream, settings.debug),
                tol,
            };
            let outcome;
            timeit! {timers => "pivoting"; {
                outcome = strategy.apply(&mut ctx);
            }}
            info.iterations += 1;

            if outcome == PivotOutcome::NoPivot {
                if !strategy.is_block() {
                    break SolverStatus::NoSolution;
                }
                // a drive may still exchange variables the block round could not
                strategy = SinglePivot::default().into();
                info.block_pivoting_disabled = true;
                EventSink::new(callbacks, &mut info.stream, settings.debug).emit(
                    SolverEvent::BlockPivotingDisabled {
                        iteration: info.iterations,
                    },
                );
            }
        };

        if settings.compute_residual {
            info.residual = residual_norm(&data.M, &data.q, &vars.z, &vars.w);
            info.complementarity = complementarity_residual(&vars.z, &vars.w, &data.lo, &data.hi);
            info.basis_condition = basis.condition_estimate(&data.M).unwrap_or(T::nan());
        }

        Ok(status)
    }

    fn copy_solution(&self, z: &mut [T], state: &mut [VariableState]) {
        for (zo, so, &zi, &si) in izip!(z, state, &self.variables.z, &self.variables.state) {
            *zo = zi;
            *so = si;
        }
    }
}

impl<T> LcpSolver<T> for DefaultSolver<T>
where
    T: FloatT,
{
    fn solve(
        &mut self,
        z: &mut [T],
        state: &mut [VariableState],
        M: &Matrix<T>,
        q: &[T],
    ) -> Result<SolverStatus, LcpError> {
        self.settings.validate()?;
        check_length("z", q.len(), z.len())?;
        check_length("state", q.len(), state.len())?;
        self.data.load_lcp(M, q)?;

        let status = self.run(state)?;
        self.copy_solution(z, state);
        Ok(status)
    }

    #[allow(clippy::too_many_arguments)]
    fn solve_bounded(
        &mut self,
        z: &mut [T],
        w: &mut [T],
        state: &mut [VariableState],
        M: &Matrix<T>,
        q: &[T],
        lo: &[T],
        hi: &[T],
        nub: usize,
    ) -> Result<SolverStatus, LcpError> {
        self.settings.validate()?;
        check_length("z", q.len(), z.len())?;
        check_length("w", q.len(), w.len())?;
        check_length("state", q.len(), state.len())?;
        self.data.load_blcp(M, q, lo, hi, nub)?;

        let status = self.run(state)?;
        self.copy_solution(z, state);
        w.copy_from(&self.variables.w);
        Ok(status)
    }

    fn resolve(
        &mut self,
        z: &mut [T],
        q: &[T],
        state: &mut [VariableState],
    ) -> Result<(), LcpError> {
        if !self.has_basis {
            return Err(LcpError::NoFactorization);
        }
        let n = self.data.n;
        check_length("q", n, q.len())?;
        check_length("z", n, z.len())?;
        check_length("state", n, state.len())?;

        self.data.update_q(q)?;
        self.variables
            .recompute(&self.data, &self.basis, &mut self.work.rhs);
        self.copy_solution(z, state);
        Ok(())
    }

    fn is_bounded_supported(&self) -> bool {
        true
    }

    fn is_warm_start_supported(&self) -> bool {
        true
    }

    fn iteration_count(&self) -> u32 {
        self.info.iterations
    }

    fn pivot_count(&self) -> u32 {
        self.info.pivots
    }

    fn failed_pivot_count(&self) -> u32 {
        self.info.failed_pivots
    }

    fn last_solve_tol(&self) -> T {
        self.info.tolerance
    }
}

impl<T> ConfigurablePrintTarget for DefaultSolver<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}

impl<T> std::fmt::Debug for DefaultSolver<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultSolver")
            .field("settings", &self.settings)
            .field("info", &self.info)
            .field("basis", &self.basis)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VariableState::*;

    #[test]
    fn test_solve_small_lcp() {
        let M = Matrix::from(&[[2., 1.], [1., 2.]]);
        let q = [-3., 1.];
        let mut z = [0.; 2];
        let mut state = [WLower; 2];

        let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
        let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();
        assert_eq!(status, SolverStatus::Solved);
        assert_eq!(state, [ZBasic, WLower]);
        assert!((z[0] - 1.5).abs() < 1e-14);
        assert_eq!(z[1], 0.);
        assert!((solver.variables.w[1] - 2.5).abs() < 1e-14);
        assert_eq!(solver.iteration_count(), 1);
        assert_eq!(solver.pivot_count(), 1);
        assert_eq!(solver.basic_variables(), &[0]);
        assert!(solver.info.solve_time >= 0.);
    }

    #[test]
    fn test_solve_empty() {
        let M = Matrix::<f64>::zeros((0, 0));
        let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
        let status = solver.solve(&mut [], &mut [], &M, &[]).unwrap();
        assert_eq!(status, SolverStatus::Solved);
        assert_eq!(solver.iteration_count(), 0);

        // a zero sized basis may still be resolved against
        assert!(solver.resolve(&mut [], &[], &mut []).is_ok());
    }

    #[test]
    fn test_iteration_limit() {
        // warm started basic z0 goes negative and is dropped, entering z1
        // then drives w0 negative again, so 3 rounds are needed for n = 2
        let M = Matrix::from(&[[1., -0.9], [-0.9, 1.]]);
        let q = [0.7, -1.];
        let settings = DefaultSettingsBuilder::default()
            .iteration_limit(1)
            .build()
            .unwrap();
        let mut solver = DefaultSolver::<f64>::new(settings);

        let mut state = [ZBasic, WLower];
        let status = solver.solve(&mut [0.; 2], &mut state, &M, &q).unwrap();
        assert_eq!(status, SolverStatus::IterationLimitExceeded);
        assert_eq!(solver.iteration_count(), 2);
        assert_eq!(solver.info.status, status);
        assert_eq!(state, [WLower, ZBasic]);

        solver.settings.iteration_limit = 2;
        let mut state = [ZBasic, WLower];
        let status = solver.solve(&mut [0.; 2], &mut state, &M, &q).unwrap();
        assert_eq!(status, SolverStatus::Solved);
        assert_eq!(solver.iteration_count(), 3);
        assert_eq!(state, [ZBasic, ZBasic]);
    }

    #[test]
    fn test_no_solution() {
        // z = 0 and w = -1 + 0*z can never be made nonnegative
        let M = Matrix::from(&[[0.]]);
        let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
        let status = solver.solve(&mut [0.], &mut [WLower], &M, &[-1.]).unwrap();
        assert_eq!(status, SolverStatus::NoSolution);

        solver.settings.block_pivoting = true;
        let status = solver.solve(&mut [0.], &mut [WLower], &M, &[-1.]).unwrap();
        assert_eq!(status, SolverStatus::NoSolution);
        assert_eq!(solver.failed_pivot_count(), 1);
        assert!(solver.info.block_pivoting_disabled);
    }

    #[test]
    fn test_block_pivoting_falls_back_on_no_pivot() {
        // with z0 basic, z1 can only enter by pushing z0 out, which a
        // block round cannot do
        let M = Matrix::from(&[[1., 1.], [1., 1.]]);
        let q = [-1., -2.];
        let settings = DefaultSettingsBuilder::default()
            .block_pivoting(true)
            .build()
            .unwrap();
        let mut solver = DefaultSolver::<f64>::new(settings);

        let mut z = [0.; 2];
        let mut state = [ZBasic, WLower];
        let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();
        assert_eq!(status, SolverStatus::Solved);
        assert!(solver.info.block_pivoting_disabled);
        assert_eq!(solver.failed_pivot_count(), 1);
        assert_eq!(state, [WLower, ZBasic]);
        assert_eq!(z[0], 0.);
        assert!((z[1] - 2.).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_requires_basis() {
        let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
        assert_eq!(
            solver.resolve(&mut [0.], &[1.], &mut [WLower]),
            Err(LcpError::NoFactorization)
        );

        let M = Matrix::from(&[[1.]]);
        solver.solve(&mut [0.], &mut [WLower], &M, &[-2.]).unwrap();
        let mut z = [0.];
        let mut state = [WLower];
        solver.resolve(&mut z, &[-4.], &mut state).unwrap();
        assert_eq!(z, [4.]);
        assert_eq!(state, [ZBasic]);

        assert!(matches!(
            solver.resolve(&mut z, &[-4., 1.], &mut state),
            Err(LcpError::DimensionMismatch { name: "q", .. })
        ));
    }

    #[test]
    fn test_compute_residual() {
        let M = Matrix::from(&[[4., 1., 0.], [1., 4., 1.], [0., 1., 4.]]);
        let q = [-1., 2., -3.];
        let settings = DefaultSettingsBuilder::default()
            .compute_residual(true)
            .build()
            .unwrap();
        let mut solver = DefaultSolver::<f64>::new(settings);
        let mut z = [0.; 3];
        let mut state = [WLower; 3];
        solver.solve(&mut z, &mut state, &M, &q).unwrap();

        assert!(solver.info.residual < 1e-12);
        assert!(solver.info.complementarity < 1e-12);
        assert!(solver.info.basis_condition.is_finite());
        assert!(solver.info.basis_condition > 0.);
    }

    #[test]
    fn test_settings_checked_on_solve() {
        let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
        solver.settings.iteration_limit = 0;
        let M = Matrix::from(&[[1.]]);
        assert!(matches!(
            solver.solve(&mut [0.], &mut [WLower], &M, &[1.]),
            Err(LcpError::Settings(_))
        ));
    }
}
