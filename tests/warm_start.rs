#![allow(non_snake_case)]

mod common;

use pivotal::{algebra::*, solver::*};
use VariableState::*;

fn random_problem(seed: u64, n: usize) -> (Matrix<f64>, Vec<f64>) {
    let mut rng = common::rng(seed);
    let M = common::random_spd(&mut rng, n, 1.);
    let q = common::random_vector(&mut rng, n);
    (M, q)
}

#[test]
fn test_warm_resolve_same_problem() {
    let n = 40;
    let (M, q) = random_problem(21, n);

    let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
    assert!(solver.is_warm_start_supported());

    let mut z = vec![0.; n];
    let mut state = vec![WLower; n];
    let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();
    assert_eq!(status, SolverStatus::Solved);
    assert!(solver.iteration_count() > 0);

    // the final states are an optimal basis, so nothing moves
    let mut z2 = vec![0.; n];
    let mut state2 = state.clone();
    let status = solver.solve(&mut z2, &mut state2, &M, &q).unwrap();
    assert_eq!(status, SolverStatus::Solved);
    assert_eq!(solver.iteration_count(), 0);
    assert_eq!(solver.pivot_count(), 0);
    assert_eq!(state2, state);
    assert!(common::max_abs_diff(&z, &z2) < 1e-12);
}

#[test]
fn test_warm_start_perturbed() {
    let n = 40;
    for seed in 0..4 {
        let (M, q) = random_problem(seed, n);

        let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
        let mut z = vec![0.; n];
        let mut state = vec![WLower; n];
        solver.solve(&mut z, &mut state, &M, &q).unwrap();

        let mut rng = common::rng(100 + seed);
        let q2: Vec<f64> = q
            .iter()
            .zip(common::random_vector(&mut rng, n))
            .map(|(a, b)| a + 1e-6 * b)
            .collect();

        let mut cold = DefaultSolver::<f64>::new(DefaultSettings::default());
        let mut zc = vec![0.; n];
        let mut sc = vec![WLower; n];
        assert_eq!(
            cold.solve(&mut zc, &mut sc, &M, &q2).unwrap(),
            SolverStatus::Solved
        );

        assert_eq!(
            solver.solve(&mut z, &mut state, &M, &q2).unwrap(),
            SolverStatus::Solved
        );
        assert!(solver.iteration_count() <= cold.iteration_count());
        assert!(common::max_abs_diff(&z, &zc) < 1e-9);
    }
}

#[test]
fn test_warm_start_disabled() {
    let n = 20;
    let (M, q) = random_problem(5, n);

    let settings = DefaultSettingsBuilder::default()
        .warm_start(false)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::<f64>::new(settings);
    let mut z = vec![0.; n];
    let mut state = vec![WLower; n];
    solver.solve(&mut z, &mut state, &M, &q).unwrap();
    let cold_iterations = solver.iteration_count();

    // incoming states are ignored
    solver.solve(&mut z, &mut state, &M, &q).unwrap();
    assert_eq!(solver.iteration_count(), cold_iterations);
}

#[test]
fn test_warm_start_salvage() {
    // rows 0 and 1 are identical, so both cannot be basic
    let M = Matrix::from(&[
        [1., 1., 0.], //
        [1., 1., 0.],
        [0., 0., 2.],
    ]);
    let q = [-1., -1., -2.];

    let salvaged = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let salvaged2 = salvaged.clone();

    let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
    solver.set_event_callback(move |e: &SolverEvent<f64>| {
        if let SolverEvent::BasisSalvage { index, to } = e {
            salvaged2.lock().unwrap().push((*index, *to));
        }
    });

    let mut z = [0.; 3];
    let mut state = states_from_str("ZZZ").unwrap();
    let status = solver.solve(&mut z, &mut state, &M, &q).unwrap();

    assert_eq!(status, SolverStatus::Solved);
    assert_eq!(*salvaged.lock().unwrap(), vec![(1, WLower)]);
    assert_eq!(states_to_string(&state), "ZLZ");
    assert!((z[0] - 1.).abs() < 1e-12);
    assert!((z[2] - 1.).abs() < 1e-12);
}

#[test]
fn test_warm_start_infinite_bound_state() {
    // a state naming an infinite bound falls back to the finite one
    let M = Matrix::from(&[[1.]]);
    let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
    let mut z = [0.];
    let mut state = [WUpper];
    let status = solver.solve(&mut z, &mut state, &M, &[1.]).unwrap();
    assert_eq!(status, SolverStatus::Solved);
    assert_eq!(state, [WLower]);
    assert_eq!(z, [0.]);
}
