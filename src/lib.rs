//! __pivotal__ is a Rust implementation of an active set pivoting solver for
//! linear complementarity problems.  Given a symmetric positive definite
//! matrix $M$ and a vector $q$, it finds $z$ and $w$ satisfying
//!
//! $$
//! w = M z + q, \quad z \ge 0, \quad w \ge 0, \quad z^T w = 0.
//! $$
//!
//! The bounded form (BLCP) replaces the sign constraints on $z$ with
//! bounds $l \le z \le u$, with $w \ge 0$ where $z_i = l_i$, $w \le 0$ where
//! $z_i = u_i$ and $w_i = 0$ strictly between the bounds.  A prefix of
//! variables may be unbounded on both sides, which is how equality
//! constraints of contact and friction problems are expressed.
//!
//! ## Features
//!
//! * __Warm starting__: the variable states of one solve seed the basis of
//!   the next, so that a sequence of closely related problems is solved in
//!   very few pivots.
//!
//! * __Updatable factorization__: the basis is held as a Cholesky
//!   factorization that is extended and downdated pivot by pivot.
//!
//! * __Re-solve__: after a solve, the solution for a new $q$ with the same
//!   basis is available without pivoting through
//!   [`resolve`](crate::solver::LcpSolver::resolve).
//!
//! * __Single or block pivoting__: block pivoting repairs all infeasible
//!   variables in one round and falls back to single pivots if it stalls.
//!
//! ## Example
//!
//! ```
//! use pivotal::algebra::*;
//! use pivotal::solver::*;
//!
//! let M = Matrix::from(&[[2., 1.], [1., 2.]]);
//! let q = [-3., 1.];
//! let mut z = [0.; 2];
//! let mut state = [VariableState::WLower; 2];
//!
//! let settings = DefaultSettingsBuilder::default()
//!     .compute_residual(true)
//!     .build()
//!     .unwrap();
//! let mut solver = DefaultSolver::<f64>::new(settings);
//! let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();
//!
//! assert_eq!(status, SolverStatus::Solved);
//! assert_eq!(states_to_string(&state), "ZL");
//! assert!(solver.info.residual < 1e-12);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod solver;
pub mod timers;
