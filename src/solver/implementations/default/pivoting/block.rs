use super::*;
use std::marker::PhantomData;

/// Repairs every infeasible variable at once.
///
/// Basic variables outside their bounds are pinned first.  The remaining
/// requests are then added to the basis in order of decreasing violation,
/// skipping any whose addition would make the basis singular.
#[derive(Debug, Default)]
pub(crate) struct BlockPivot<T> {
    phantom: PhantomData<T>,
}

impl<T> PivotStrategy<T> for BlockPivot<T>
where
    T: FloatT,
{
    fn apply(&mut self, ctx: &mut PivotContext<'_, T>) -> PivotOutcome {
        let mut requests = std::mem::take(&mut ctx.work.requests);
        let mut tol = ctx.tol;
        let mut npivots = 0;

        for r in requests.iter().filter(|r| !r.to.is_basic()) {
            ctx.make_nonbasic(r.index, r.to);
            npivots += 1;
        }

        requests.sort_by(by_magnitude_desc);
        for r in requests.iter().filter(|r| r.to.is_basic()) {
            if r.magnitude <= tol {
                continue;
            }
            if ctx.make_basic(r.index, tol) {
                npivots += 1;
            } else {
                tol = ctx.escalate(tol);
            }
        }

        ctx.work.requests = requests;
        ctx.work.tracked = false;

        if npivots == 0 {
            PivotOutcome::NoPivot
        } else {
            PivotOutcome::Applied
        }
    }

    fn is_block(&self) -> bool {
        true
    }
}

/// Detects block pivoting rounds that stop reducing the number of
/// infeasible variables.
#[derive(Debug, Clone)]
pub(crate) struct StallMonitor {
    best: usize,
    deadline: u32,
    window: u32,
}

impl StallMonitor {
    pub fn new(window: u32) -> Self {
        Self {
            best: usize::MAX,
            deadline: 0,
            window,
        }
    }

    /// Records the infeasibility count of round `iteration`.  Returns true
    /// once `window` rounds have passed without a new minimum.
    pub fn is_stalled(&mut self, iteration: u32, infeasible: usize) -> bool {
        if infeasible < self.best {
            self.best = infeasible;
            self.deadline = iteration.saturating_add(self.window);
            return false;
        }
        iteration > self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::Harness;
    use super::*;
    use VariableState::*;

    #[test]
    fn test_stall_monitor() {
        let mut stall = StallMonitor::new(2);
        assert!(!stall.is_stalled(0, 5));
        assert!(!stall.is_stalled(1, 5));
        assert!(!stall.is_stalled(2, 4));
        assert!(!stall.is_stalled(3, 6));
        assert!(!stall.is_stalled(4, 4));
        assert!(stall.is_stalled(5, 4));

        // a new minimum opens a fresh window
        assert!(!stall.is_stalled(6, 3));
        assert!(!stall.is_stalled(8, 3));
        assert!(stall.is_stalled(9, 3));
    }

    #[test]
    fn test_stall_monitor_huge_window() {
        let mut stall = StallMonitor::new(u32::MAX);
        assert!(!stall.is_stalled(7, 2));
        assert!(!stall.is_stalled(u32::MAX, 2));
    }

    #[test]
    fn test_block_pivot_round() {
        let M = Matrix::from(&[[2., 1.], [1., 2.]]);
        let mut data = DefaultProblemData::<f64>::new();
        data.load_lcp(&M, &[-3., -3.]).unwrap();

        let mut h = Harness::new(data, 1e-10);
        assert_eq!(h.work.requests.len(), 2);

        let mut strategy = PivotStrategies::new(true);
        assert!(strategy.is_block());
        assert_eq!(h.apply(&mut strategy), PivotOutcome::Applied);
        assert_eq!(h.vars.state, vec![ZBasic, ZBasic]);
        assert_eq!(h.stats.pivots, 2);

        h.refresh();
        assert!(h.work.requests.is_empty());
        assert!((h.vars.z[0] - 1.).abs() < 1e-12);
        assert!((h.vars.z[1] - 1.).abs() < 1e-12);
    }

    #[test]
    fn test_block_pivot_rejects_singular() {
        // identical rows: only one of the pair can join the basis
        let M = Matrix::from(&[[1., 1.], [1., 1.]]);
        let mut data = DefaultProblemData::<f64>::new();
        data.load_lcp(&M, &[-1., -1.]).unwrap();

        let mut h = Harness::new(data, 1e-10);
        let mut strategy = PivotStrategies::new(true);
        assert_eq!(h.apply(&mut strategy), PivotOutcome::Applied);
        assert_eq!(h.stats.pivots, 1);
        assert_eq!(h.stats.failed_pivots, 1);
        assert_eq!(h.stats.max_tol, 2e-10);

        h.refresh();
        assert!(h.work.requests.is_empty());
    }
}
