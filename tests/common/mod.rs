#![allow(non_snake_case)]
#![allow(dead_code)]

use pivotal::algebra::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn random_vector(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub fn random_matrix(rng: &mut ChaCha8Rng, m: usize, n: usize) -> Matrix<f64> {
    let data: Vec<f64> = (0..m * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Matrix::new_from_slice((m, n), &data)
}

/// `A'A + shift*I`
pub fn gram(A: &Matrix<f64>, shift: f64) -> Matrix<f64> {
    let n = A.ncols();
    let mut M = Matrix::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            let s: f64 = A
                .col_slice(i)
                .iter()
                .zip(A.col_slice(j))
                .map(|(a, b)| a * b)
                .sum();
            M[(i, j)] = s;
        }
        M[(i, i)] += shift;
    }
    M
}

pub fn random_spd(rng: &mut ChaCha8Rng, n: usize, shift: f64) -> Matrix<f64> {
    let A = random_matrix(rng, n, n);
    gram(&A, shift)
}

pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0., f64::max)
}

/// A block pivoting cycle: full exchanges alternate between two bases
/// with two infeasible variables each.  The solution is `[5/14, 0, 0]`.
pub fn cycling_problem() -> (Matrix<f64>, Vec<f64>) {
    let M = Matrix::from(&[
        [14., 15., -11.], //
        [15., 17., -11.],
        [-11., -11., 10.],
    ]);
    (M, vec![-5., -2., 5.])
}
