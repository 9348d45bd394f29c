use super::*;
use std::marker::PhantomData;
use VariableState::*;

/// Repairs the single worst infeasibility per round.
///
/// A basic variable outside its bounds is simply pinned to the violated
/// bound.  A non-basic variable with the wrong sign of `w` is driven away
/// from its bound while the basic variables follow, until `w` reaches
/// zero, the opposite bound is hit, or a basic variable reaches one of
/// its own bounds and leaves the basis.  The values are updated along
/// the drive so that the next round starts from the new point.
#[derive(Debug, Default)]
pub(crate) struct SinglePivot<T> {
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drive {
    /// the driven variable reached a consistent state
    Done,
    /// the driven variable could not enter the basis
    Rejected { progress: bool },
    /// nothing limits the drive
    Unbounded,
}

#[derive(Debug, Clone, Copy)]
enum DriveEvent<T> {
    Enter,
    Switch(VariableState),
    Block(RatioCandidate<T>),
}

impl<T> PivotStrategy<T> for SinglePivot<T>
where
    T: FloatT,
{
    fn apply(&mut self, ctx: &mut PivotContext<'_, T>) -> PivotOutcome {
        let mut requests = std::mem::take(&mut ctx.work.requests);
        requests.sort_by(by_magnitude_desc);
        let mut tol = ctx.tol;
        let mut outcome = PivotOutcome::NoPivot;
        ctx.work.tracked = false;

        for r in requests.iter() {
            if r.magnitude <= tol {
                continue;
            }
            if !r.to.is_basic() {
                ctx.make_nonbasic(r.index, r.to);
                outcome = PivotOutcome::Applied;
                break;
            }
            match drive(ctx, r.index, &mut tol) {
                Drive::Done => {
                    ctx.work.tracked = true;
                    outcome = PivotOutcome::Applied;
                    break;
                }
                Drive::Rejected { progress: true } => {
                    let i = r.index;
                    ctx.vars.z[i] = ctx.bound(i, ctx.vars.state[i]);
                    outcome = PivotOutcome::Applied;
                    break;
                }
                Drive::Rejected { progress: false } => continue,
                Drive::Unbounded => break,
            }
        }

        ctx.work.requests = requests;
        outcome
    }

    fn is_block(&self) -> bool {
        false
    }
}

fn drive<T: FloatT>(ctx: &mut PivotContext<'_, T>, r: usize, tol: &mut T) -> Drive {
    // direction in which z[r] leaves its bound
    let (p, opposite) = match ctx.vars.state[r] {
        WUpper => (-T::one(), WLower),
        _ => (T::one(), WUpper),
    };
    let slope_tol = ctx.data.slope_tolerance();
    let mut rejected = false;
    let mut progress = false;

    loop {
        direction(ctx, r);

        let mut step = T::infinity();
        let mut event = None;

        let mvr = ctx.work.mv[r];
        if !rejected && mvr > slope_tol {
            step = T::max(T::zero(), -p * ctx.vars.w[r]) / mvr;
            event = Some(DriveEvent::Enter);
        }

        let room = if p > T::zero() {
            ctx.data.hi[r] - ctx.vars.z[r]
        } else {
            ctx.vars.z[r] - ctx.data.lo[r]
        };
        if room < step {
            step = room;
            event = Some(DriveEvent::Switch(opposite));
        }

        if let Some(c) = blocking_variable(ctx, p, slope_tol, *tol) {
            if c.step < step {
                step = c.step;
                event = Some(DriveEvent::Block(c));
            }
        }

        match event {
            None if rejected => return Drive::Rejected { progress },
            None => return Drive::Unbounded,
            Some(DriveEvent::Enter) => {
                if ctx.make_basic(r, *tol) {
                    advance(ctx, r, p, step);
                    ctx.vars.w[r] = T::zero();
                    return Drive::Done;
                }
                rejected = true;
                *tol = ctx.escalate(*tol);
            }
            Some(DriveEvent::Switch(to)) => {
                advance(ctx, r, p, step);
                ctx.make_nonbasic(r, to);
                return Drive::Done;
            }
            Some(DriveEvent::Block(c)) => {
                advance(ctx, r, p, step);
                ctx.make_nonbasic(c.index, c.to);
                progress = true;
            }
        }
    }
}

// Rates of change for a unit increase of z[r]: dz for the basic
// variables and dw for the non-basic ones.
fn direction<T: FloatT>(ctx: &mut PivotContext<'_, T>, r: usize) {
    let M = &ctx.data.M;
    let Mr = M.col_slice(r);
    let basic = ctx.basis.basic();
    let work = &mut *ctx.work;

    work.rhs.clear();
    work.rhs.extend(basic.iter().map(|&j| -Mr[j]));
    ctx.basis.solve(&mut work.rhs);

    work.mv.clear();
    work.mv.extend_from_slice(Mr);
    for (&j, &x) in basic.iter().zip(work.rhs.iter()) {
        if x != T::zero() {
            for (m, &mij) in work.mv.iter_mut().zip(M.col_slice(j)) {
                *m += mij * x;
            }
        }
    }
    for (&j, &x) in basic.iter().zip(work.rhs.iter()) {
        work.mv[j] = x;
    }
}

// The basic variable that first reaches a bound as z[r] moves in
// direction p, if any.  Slopes are tested against `slope_tol`, steps
// against the feasibility tolerance `tol`.
fn blocking_variable<T: FloatT>(
    ctx: &mut PivotContext<'_, T>,
    p: T,
    slope_tol: T,
    tol: T,
) -> Option<RatioCandidate<T>> {
    let work = &mut *ctx.work;
    work.candidates.clear();

    for &i in ctx.basis.basic() {
        let slope = p * work.mv[i];
        let z = ctx.vars.z[i];
        let (lo, hi) = (ctx.data.lo[i], ctx.data.hi[i]);
        if slope < -slope_tol && lo.is_finite() {
            work.candidates.push(RatioCandidate {
                index: i,
                step: T::max(T::zero(), (z - lo) / -slope),
                slope,
                to: WLower,
            });
        } else if slope > slope_tol && hi.is_finite() {
            work.candidates.push(RatioCandidate {
                index: i,
                step: T::max(T::zero(), (hi - z) / slope),
                slope,
                to: WUpper,
            });
        }
    }

    let tmin = work
        .candidates
        .iter()
        .fold(T::infinity(), |m, c| T::min(m, c.step));
    if !tmin.is_finite() {
        return None;
    }

    work.tied.clear();
    work.tied.extend(
        work.candidates
            .iter()
            .filter(|c| c.step <= tmin + tol)
            .copied(),
    );
    let k = ctx.ratio.select(&work.tied, &*ctx.basis, slope_tol);
    work.tied.get(k).copied()
}

// Moves z[r] by p*step, updating every dependent value along mv.
fn advance<T: FloatT>(ctx: &mut PivotContext<'_, T>, r: usize, p: T, step: T) {
    if step == T::zero() {
        return;
    }
    let pt = p * step;
    let vars = &mut *ctx.vars;
    for (i, &mvi) in ctx.work.mv.iter().enumerate() {
        let d = pt * mvi;
        if i == r {
            vars.z[i] += pt;
            vars.w[i] += d;
        } else if vars.state[i].is_basic() {
            vars.z[i] += d;
        } else {
            vars.w[i] += d;
        }
    }
}
