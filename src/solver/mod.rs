//! Solver main module.
//!
//! This module contains the main types and traits of the pivoting solver.
//!
//! The solver comes with a [default implementation](crate::solver::implementations::default)
//! that handles both the plain LCP and its bounded form.   Custom solvers
//! implement the [`LcpSolver`] trait.

// internal module structure
pub(crate) mod core;
pub mod implementations;

//Here we expose only part of the solver internals
//and rearrange public modules a bit to give a more
//user friendly API

//user facing status, error and state types
pub use crate::solver::core::{
    states_from_str, states_to_string, LcpError, SolverStatus, StateParseError, VariableState,
};

//user facing traits required to define new implementations
pub use crate::solver::core::traits;
pub use crate::solver::core::LcpSolver;

//settings and event reporting
pub use crate::solver::core::{CoreSettings, DebugFlags, SettingsError, SolverEvent};

//Since we only have the default implementation, it is exposed at
//the top level as well
pub use crate::solver::implementations::default;
pub use crate::solver::implementations::default::*;
