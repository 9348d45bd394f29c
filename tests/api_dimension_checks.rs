#![allow(non_snake_case)]

use pivotal::{algebra::*, solver::*};
use VariableState::*;

// a collection of tests to ensure that malformed problems are
// rejected before any pivoting takes place

const INF: f64 = f64::INFINITY;

fn blcp_data() -> (Matrix<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let M = Matrix::<f64>::identity(3);
    let q = vec![-1.; 3];
    let lo = vec![-INF, 0., -1.];
    let hi = vec![INF, INF, 1.];
    (M, q, lo, hi)
}

fn solve_blcp(
    M: &Matrix<f64>,
    q: &[f64],
    lo: &[f64],
    hi: &[f64],
    nub: usize,
) -> Result<SolverStatus, LcpError> {
    let n = q.len();
    let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
    let result = solver.solve_bounded(
        &mut vec![0.; n],
        &mut vec![0.; n],
        &mut vec![WLower; n],
        M,
        q,
        lo,
        hi,
        nub,
    );
    if result.is_err() {
        // nothing was attempted
        assert_eq!(solver.info.status, SolverStatus::Unsolved);
        assert_eq!(solver.pivot_count(), 0);
    }
    result
}

#[test]
fn api_dim_check_working() {
    let (M, q, lo, hi) = blcp_data();
    assert_eq!(solve_blcp(&M, &q, &lo, &hi, 1), Ok(SolverStatus::Solved));
}

#[test]
fn api_dim_check_bad_M() {
    let (_M, q, lo, hi) = blcp_data();
    let M = Matrix::<f64>::zeros((3, 2));
    assert_eq!(
        solve_blcp(&M, &q, &lo, &hi, 1),
        Err(LcpError::NonSquareMatrix { rows: 3, cols: 2 })
    );

    let M = Matrix::<f64>::identity(4);
    assert_eq!(
        solve_blcp(&M, &q, &lo, &hi, 1),
        Err(LcpError::DimensionMismatch {
            name: "q",
            expected: 4,
            found: 3
        })
    );

    let mut M = Matrix::<f64>::identity(3);
    M[(0, 2)] = 0.5;
    assert_eq!(
        solve_blcp(&M, &q, &lo, &hi, 1),
        Err(LcpError::AsymmetricMatrix)
    );

    let mut M = Matrix::<f64>::identity(3);
    M[(1, 1)] = f64::NAN;
    assert_eq!(
        solve_blcp(&M, &q, &lo, &hi, 1),
        Err(LcpError::NonFiniteData("M"))
    );
}

#[test]
fn api_dim_check_bad_bounds() {
    let (M, q, lo, hi) = blcp_data();

    assert!(matches!(
        solve_blcp(&M, &q, &lo[..2], &hi, 1),
        Err(LcpError::DimensionMismatch { name: "lo", .. })
    ));
    assert!(matches!(
        solve_blcp(&M, &q, &lo, &hi[..2], 1),
        Err(LcpError::DimensionMismatch { name: "hi", .. })
    ));
    assert_eq!(
        solve_blcp(&M, &q, &lo, &hi, 4),
        Err(LcpError::PrefixTooLarge { nub: 4, n: 3 })
    );

    // prefix variable 1 has a finite lower bound
    assert_eq!(
        solve_blcp(&M, &q, &lo, &hi, 2),
        Err(LcpError::BoundedPrefixVariable(1))
    );

    // non-prefix variable 0 has no finite bound
    assert_eq!(
        solve_blcp(&M, &q, &lo, &hi, 0),
        Err(LcpError::UnboundedVariable(0))
    );

    let mut bad = lo.clone();
    bad[2] = 2.;
    assert_eq!(
        solve_blcp(&M, &q, &bad, &hi, 1),
        Err(LcpError::InconsistentBounds(2))
    );
}

#[test]
fn api_dim_check_bad_outputs() {
    let M = Matrix::<f64>::identity(2);
    let q = [-1., -1.];
    let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());

    assert!(matches!(
        solver.solve(&mut [0.; 3], &mut [WLower; 2], &M, &q),
        Err(LcpError::DimensionMismatch { name: "z", .. })
    ));
    assert!(matches!(
        solver.solve(&mut [0.; 2], &mut [WLower; 1], &M, &q),
        Err(LcpError::DimensionMismatch { name: "state", .. })
    ));
    assert!(matches!(
        solver.solve_bounded(
            &mut [0.; 2],
            &mut [0.; 1],
            &mut [WLower; 2],
            &M,
            &q,
            &[0.; 2],
            &[INF; 2],
            0
        ),
        Err(LcpError::DimensionMismatch { name: "w", .. })
    ));
}

#[test]
fn api_bad_settings() {
    let result = DefaultSettingsBuilder::<f64>::default()
        .ratio_test("steepest".to_string())
        .build();
    assert!(result.is_err());

    let result = DefaultSettingsBuilder::<f64>::default()
        .stall_window(0)
        .build();
    assert!(result.is_err());

    // settings modified after construction are checked by the solve
    let mut solver = DefaultSolver::<f64>::new(DefaultSettings::default());
    solver.settings.pivot_perturbation = -1.;
    let M = Matrix::<f64>::identity(1);
    assert_eq!(
        solver.solve(&mut [0.], &mut [WLower], &M, &[-1.]),
        Err(LcpError::Settings(SettingsError::BadFieldValue(
            "pivot_perturbation"
        )))
    );
}
