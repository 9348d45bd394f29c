use super::SettingsError;
use crate::algebra::DenseFactorizationError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    #[default]
    Unsolved,
    /// Solver terminated with a solution.
    Solved,
    /// No admissible pivot exists.  The problem has no solution, or the
    /// matrix is too ill conditioned to find one.
    NoSolution,
    /// Recomputed and updated variable values disagreed repeatedly, or the
    /// final values are not finite.
    NumericError,
    /// Iteration limit reached before a solution was found.
    IterationLimitExceeded,
    /// The requested problem form is not supported by this solver.
    Unimplemented,
}

impl SolverStatus {
    /// true for any status other than `Solved` and `Unsolved`
    pub fn is_errored(&self) -> bool {
        !matches!(*self, SolverStatus::Solved | SolverStatus::Unsolved)
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ---------------------------------
// Configuration errors
// ---------------------------------

/// Error type returned for malformed input, before any pivoting
/// takes place.  Outcomes of the pivoting itself are reported through
/// [`SolverStatus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LcpError {
    #[error("matrix must be square, found {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },
    #[error("matrix is not symmetric")]
    AsymmetricMatrix,
    #[error("length of {name} is {found}, expected {expected}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unbounded prefix of length {nub} exceeds problem size {n}")]
    PrefixTooLarge { nub: usize, n: usize },
    #[error("variable {0} lies in the unbounded prefix but has finite bounds")]
    BoundedPrefixVariable(usize),
    #[error("variable {0} lies outside the unbounded prefix but has no finite bound")]
    UnboundedVariable(usize),
    #[error("bounds of variable {0} are inconsistent")]
    InconsistentBounds(usize),
    #[error("{0} contains non-finite values")]
    NonFiniteData(&'static str),
    #[error("unbounded prefix is singular at variable {0}")]
    SingularPrefix(usize),
    #[error("no factorization available from a previous solve")]
    NoFactorization,
    #[error("factorization error: {0}")]
    Factorization(#[from] DenseFactorizationError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

pub(crate) fn _print_banner(out: &mut dyn std::io::Write, is_verbose: bool) -> std::io::Result<()> {
    if !is_verbose {
        return Ok(());
    }

    writeln!(out, "-------------------------------------------------------------")?;
    writeln!(
        out,
        "        pivotal v{}  -  LCP / BLCP pivoting solver",
        crate::VERSION
    )?;
    writeln!(out, "-------------------------------------------------------------")?;
    Ok(())
}

#[test]
fn test_status_is_errored() {
    assert!(!SolverStatus::Solved.is_errored());
    assert!(!SolverStatus::default().is_errored());
    assert!(SolverStatus::NoSolution.is_errored());
    assert!(SolverStatus::IterationLimitExceeded.is_errored());
    assert_eq!(SolverStatus::NumericError.to_string(), "NumericError");
}
