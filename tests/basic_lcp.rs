#![allow(non_snake_case)]

mod common;

use pivotal::{algebra::*, solver::*};
use VariableState::*;

fn solve_lcp(settings: DefaultSettings<f64>, M: &Matrix<f64>, q: &[f64]) -> DefaultSolver<f64> {
    let n = q.len();
    let mut z = vec![0.; n];
    let mut state = vec![WLower; n];
    let mut solver = DefaultSolver::<f64>::new(settings);
    let status = solver.solve(&mut z, &mut state, M, q).unwrap();
    assert_eq!(status, SolverStatus::Solved);
    assert_eq!(z, solver.variables.z);
    assert_eq!(state, solver.variables.state);
    solver
}

fn block_settings() -> DefaultSettings<f64> {
    DefaultSettingsBuilder::default()
        .block_pivoting(true)
        .build()
        .unwrap()
}

#[test]
fn test_lcp_identity() {
    let M = Matrix::<f64>::identity(2);
    let q = [-1., -1.];

    let solver = solve_lcp(DefaultSettings::default(), &M, &q);
    assert_eq!(solver.variables.z, vec![1., 1.]);
    assert_eq!(solver.variables.w, vec![0., 0.]);
    assert_eq!(solver.variables.state, vec![ZBasic, ZBasic]);
    assert!(solver.pivot_count() <= 2);
    assert_eq!(solver.failed_pivot_count(), 0);

    let solver = solve_lcp(block_settings(), &M, &q);
    assert_eq!(solver.variables.z, vec![1., 1.]);
    assert_eq!(solver.iteration_count(), 1);
}

#[test]
fn test_lcp_coupled() {
    let M = Matrix::from(&[[2., 1.], [1., 2.]]);
    let q = [-3., -3.];

    for settings in [DefaultSettings::default(), block_settings()] {
        let solver = solve_lcp(settings, &M, &q);
        let z = &solver.variables.z;
        assert!((z[0] - 1.).abs() < 1e-12);
        assert!((z[1] - 1.).abs() < 1e-12);
        assert_eq!(solver.info.status, SolverStatus::Solved);
    }
}

#[test]
fn test_lcp_feasible_start() {
    // q >= 0 is solved by z = 0 without pivoting
    let M = Matrix::from(&[[2., 1.], [1., 2.]]);
    let solver = solve_lcp(DefaultSettings::default(), &M, &[1., 0.]);
    assert_eq!(solver.variables.z, vec![0., 0.]);
    assert_eq!(solver.variables.w, vec![1., 0.]);
    assert_eq!(solver.iteration_count(), 0);
    assert_eq!(solver.pivot_count(), 0);
}

#[test]
fn test_lcp_random() {
    let n = 50;
    let mut rng = common::rng(1234);
    let A = common::random_matrix(&mut rng, n, n);
    let M = common::gram(&A, 0.);
    let x = common::random_vector(&mut rng, n);
    let mut q = vec![0.; n];
    A.gemv(&mut q, &x, 1., 0.);

    let settings = DefaultSettingsBuilder::default()
        .compute_residual(true)
        .build()
        .unwrap();
    let solver = solve_lcp(settings, &M, &q);
    assert!(solver.iteration_count() <= 100 * n as u32);
    assert!(solver.info.residual < 1e-8);
    assert!(solver.info.complementarity < 1e-8);

    let v = &solver.variables;
    check_lcp_solution(&M, &q, &v.z, &v.w, &v.state, 1e-8).unwrap();
}

#[test]
fn test_lcp_interior_solution() {
    // if -M⁻¹q >= 0 it is the solution, with every variable basic
    let n = 20;
    let mut rng = common::rng(7);
    let M = common::random_spd(&mut rng, n, 1.);
    let x: Vec<f64> = common::random_vector(&mut rng, n)
        .iter()
        .map(|v| 1.5 + v)
        .collect();
    let mut q = vec![0.; n];
    M.gemv(&mut q, &x, -1., 0.);

    let solver = solve_lcp(DefaultSettings::default(), &M, &q);
    assert!(common::max_abs_diff(&solver.variables.z, &x) < 1e-10);
    assert!(solver.variables.state.iter().all(|s| s.is_basic()));
}

#[test]
fn test_block_and_single_agree() {
    let n = 30;
    for seed in 0..5 {
        let mut rng = common::rng(seed);
        let M = common::random_spd(&mut rng, n, 1.);
        let q = common::random_vector(&mut rng, n);

        let single = solve_lcp(DefaultSettings::default(), &M, &q);
        let block = solve_lcp(block_settings(), &M, &q);
        assert!(common::max_abs_diff(&single.variables.z, &block.variables.z) < 1e-9);
        assert_eq!(single.variables.state, block.variables.state);
    }
}

#[test]
fn test_lcp_large_q() {
    // the automatic tolerance grows with q but M stays well conditioned
    let M = Matrix::from(&[[2., 1.], [1., 2.]]);
    for s in [1., 1e6, 1e10, 2e10, 1e11, 1e200] {
        let q = [-3. * s, -3. * s];
        for settings in [DefaultSettings::default(), block_settings()] {
            let solver = solve_lcp(settings, &M, &q);
            assert_eq!(solver.variables.state, vec![ZBasic, ZBasic]);
            for &z in solver.variables.z.iter() {
                assert!((z / s - 1.).abs() < 1e-12);
            }
        }
    }
}

#[test]
fn test_block_pivoting_fallback() {
    let (M, q) = common::cycling_problem();

    let solver = solve_lcp(block_settings(), &M, &q);
    assert!(solver.info.block_pivoting);
    assert!(solver.info.block_pivoting_disabled);
    assert_eq!(solver.variables.state, vec![ZBasic, WLower, WLower]);
    assert!((solver.variables.z[0] - 5. / 14.).abs() < 1e-12);

    // single pivoting never needs the fallback
    let solver = solve_lcp(DefaultSettings::default(), &M, &q);
    assert!(!solver.info.block_pivoting_disabled);
    assert!((solver.variables.z[0] - 5. / 14.).abs() < 1e-12);
}

#[test]
fn test_lexicographic_ratio_test() {
    let settings = || {
        DefaultSettingsBuilder::default()
            .ratio_test("lexicographic".to_string())
            .build()
            .unwrap()
    };

    // warm started from z0 = z1 = 1, driving z2 up takes both basic
    // variables to zero at the same step
    let M = Matrix::from(&[
        [1., 0., 0.5], //
        [0., 1., 0.5],
        [0.5, 0.5, 1.],
    ]);
    let q = [-1., -1., -3.];
    for s in [DefaultSettings::default(), settings()] {
        let mut z = [0.; 3];
        let mut state = [ZBasic, ZBasic, WLower];
        let mut solver = DefaultSolver::<f64>::new(s);
        let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();
        assert_eq!(status, SolverStatus::Solved);
        assert_eq!(state, [WLower, WLower, ZBasic]);
        assert!(common::max_abs_diff(&z, &[0., 0., 3.]) < 1e-12);
    }

    let n = 25;
    let mut rng = common::rng(99);
    let M = common::random_spd(&mut rng, n, 0.5);
    let q = common::random_vector(&mut rng, n);
    let minimum = solve_lcp(DefaultSettings::default(), &M, &q);
    let lexicographic = solve_lcp(settings(), &M, &q);
    assert!(common::max_abs_diff(&minimum.variables.z, &lexicographic.variables.z) < 1e-9);
}

#[test]
fn test_lcp_f32() {
    let M = Matrix::<f32>::from(&[[2., 1.], [1., 2.]]);
    let q = [-3f32, -3.];
    let mut z = [0f32; 2];
    let mut state = [WLower; 2];
    let mut solver = DefaultSolver::<f32>::new(DefaultSettings::default());
    let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();
    assert_eq!(status, SolverStatus::Solved);
    assert!((z[0] - 1.).abs() < 1e-5);
    assert!((z[1] - 1.).abs() < 1e-5);
}
