//! Solver implementations.
//!
//! Only the [`default`] active set solver is provided.  Alternative
//! solvers implement [`LcpSolver`](crate::solver::LcpSolver) and may
//! live alongside it.

pub mod default;
