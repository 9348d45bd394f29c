use super::{DebugFlags, SolverStatus, VariableState};
use crate::algebra::FloatT;
use crate::io::PrintTarget;
use std::io::Write;

// ---------------------------------
// solver events
// ---------------------------------

/// Events reported by the solver while it runs.  Each event is passed
/// to the user event callback, if one is set, and traced to the print
/// target when the matching [`DebugFlags`] bit is enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverEvent<T> {
    /// A solve is starting with the given feasibility tolerance.
    Start {
        size: usize,
        nub: usize,
        tolerance: T,
        block_pivoting: bool,
    },
    /// A pivoting round found `infeasible` violating variables.
    Round { iteration: u32, infeasible: usize },
    /// A variable changed state.
    Pivot {
        index: usize,
        from: VariableState,
        to: VariableState,
    },
    /// Adding a variable to the basis would have made it singular.
    PivotRejected { index: usize, tolerance: T },
    /// The feasibility tolerance was raised after a rejected pivot.
    ToleranceEscalated { from: T, to: T },
    /// Block pivoting stalled and the solver fell back to single pivots.
    BlockPivotingDisabled { iteration: u32 },
    /// A warm started basic variable could not be factored and was
    /// moved to a bound.
    BasisSalvage { index: usize, to: VariableState },
    /// A solve has terminated.
    Finished {
        status: SolverStatus,
        iterations: u32,
        pivots: u32,
    },
}

impl<T> SolverEvent<T> {
    /// The debug flag under which this event is traced
    pub fn debug_flag(&self) -> DebugFlags {
        match self {
            SolverEvent::Start { .. } => DebugFlags::TOL_UPDATE,
            SolverEvent::Round { .. } => DebugFlags::VARIABLES,
            SolverEvent::Pivot { .. } => DebugFlags::PIVOTS,
            SolverEvent::PivotRejected { .. } => DebugFlags::PIVOTS,
            SolverEvent::ToleranceEscalated { .. } => DebugFlags::TOL_UPDATE,
            SolverEvent::BlockPivotingDisabled { .. } => DebugFlags::BLOCK_PIVOT_CHANGE,
            SolverEvent::BasisSalvage { .. } => DebugFlags::PIVOTS,
            SolverEvent::Finished { .. } => DebugFlags::RETURNS,
        }
    }
}

impl<T> std::fmt::Display for SolverEvent<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SolverEvent::Start {
                size,
                nub,
                tolerance,
                block_pivoting,
            } => write!(
                f,
                "solve: n = {size}, nub = {nub}, tol = {tolerance:.3e}, block pivoting = {block_pivoting}"
            ),
            SolverEvent::Round {
                iteration,
                infeasible,
            } => write!(f, "iteration {iteration}: {infeasible} infeasible"),
            SolverEvent::Pivot { index, from, to } => write!(f, "pivot {index}: {from} -> {to}"),
            SolverEvent::PivotRejected { index, tolerance } => {
                write!(f, "pivot {index} rejected, tol = {tolerance:.3e}")
            }
            SolverEvent::ToleranceEscalated { from, to } => {
                write!(f, "tolerance raised {from:.3e} -> {to:.3e}")
            }
            SolverEvent::BlockPivotingDisabled { iteration } => {
                write!(f, "block pivoting disabled at iteration {iteration}")
            }
            SolverEvent::BasisSalvage { index, to } => {
                write!(f, "initial basis: variable {index} moved to {to}")
            }
            SolverEvent::Finished {
                status,
                iterations,
                pivots,
            } => write!(f, "{status}: {iterations} iterations, {pivots} pivots"),
        }
    }
}

// ---------------------------------
// enum for managing callbacks
// ---------------------------------

pub(crate) type EventCallbackFcn<E> = Box<dyn FnMut(&E) + Send>;

pub(crate) enum Callback<E> {
    None,
    Rust(EventCallbackFcn<E>),
}

impl<E> Callback<E> {
    // Call the callback function
    fn call(&mut self, event: &E) {
        match self {
            Callback::None => {}
            Callback::Rust(f) => f(event),
        }
    }
}

impl<E> std::fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callback::None => write!(f, "Callback::None"),
            Callback::Rust(_) => write!(f, "Callback::Rust"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct SolverCallbacks<T> {
    /// callback for solver events
    pub event_callback: Callback<SolverEvent<T>>,
}

impl<T> Default for SolverCallbacks<T> {
    fn default() -> Self {
        Self {
            event_callback: Callback::None,
        }
    }
}

/// Routes events to the user callback and to the trace output.
pub(crate) struct EventSink<'a, T> {
    pub callbacks: &'a mut SolverCallbacks<T>,
    pub out: &'a mut PrintTarget,
    pub debug: DebugFlags,
}

impl<'a, T> EventSink<'a, T>
where
    T: FloatT,
{
    pub fn new(
        callbacks: &'a mut SolverCallbacks<T>,
        out: &'a mut PrintTarget,
        debug: DebugFlags,
    ) -> Self {
        Self {
            callbacks,
            out,
            debug,
        }
    }

    pub fn emit(&mut self, event: SolverEvent<T>) {
        if self.debug.contains(event.debug_flag()) {
            // trace output is best effort
            let _ = writeln!(self.out, "{event}");
        }
        self.callbacks.event_callback.call(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ConfigurablePrintTarget;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_event_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);

        let mut callbacks = SolverCallbacks::<f64>::default();
        callbacks.event_callback = Callback::Rust(Box::new(move |e: &SolverEvent<f64>| {
            seen2.lock().unwrap().push(e.clone())
        }));
        let mut out = PrintTarget::default();
        out.print_to_buffer();

        let mut sink = EventSink::new(&mut callbacks, &mut out, DebugFlags::PIVOTS);
        sink.emit(SolverEvent::Pivot {
            index: 3,
            from: VariableState::WLower,
            to: VariableState::ZBasic,
        });
        sink.emit(SolverEvent::ToleranceEscalated { from: 1e-10, to: 2e-10 });

        // both reach the callback, only the pivot is traced
        assert_eq!(seen.lock().unwrap().len(), 2);
        let text = out.get_print_buffer().unwrap();
        assert_eq!(text, "pivot 3: L -> Z\n");
    }
}
