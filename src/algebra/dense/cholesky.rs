#![allow(non_snake_case)]

use crate::algebra::{
    DenseFactorizationError, FactorCholesky, FloatT, Matrix, ShapedMatrix, VectorMath,
};

/// Dense Cholesky factorization with single row/column updates.
///
/// The lower triangular factor is stored row-wise in a square buffer
/// whose dimension (the capacity) only ever grows.
#[derive(Debug, Clone)]
pub struct CholeskyEngine<T> {
    /// lower triangular factor, row major with row stride `cap`
    L: Vec<T>,
    /// current dimension of the factor
    n: usize,
    /// row stride of `L`
    cap: usize,
    /// forward substitution workspace
    work: Vec<T>,
}

impl<T> Default for CholeskyEngine<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> CholeskyEngine<T>
where
    T: FloatT,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            L: vec![T::zero(); capacity * capacity],
            n: 0,
            cap: capacity,
            work: vec![T::zero(); capacity],
        }
    }

    /// Current capacity
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    fn entry(&self, i: usize, j: usize) -> T {
        self.L[i * self.cap + j]
    }
}

impl<T> FactorCholesky<T> for CholeskyEngine<T>
where
    T: FloatT,
{
    fn factor(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        if !A.is_square() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }
        let n = A.nrows();
        self.ensure_capacity(n);
        self.n = 0;

        let w = self.cap;
        for j in 0..n {
            for k in 0..=j {
                let mut s = A[(j, k)];
                for p in 0..k {
                    s -= self.L[j * w + p] * self.L[k * w + p];
                }
                if k < j {
                    self.L[j * w + k] = s / self.L[k * w + k];
                } else if s > T::zero() && s.is_finite() {
                    self.L[j * w + j] = s.sqrt();
                } else {
                    return Err(DenseFactorizationError::Cholesky(j));
                }
            }
        }
        self.n = n;
        Ok(())
    }

    fn solve(&self, x: &mut [T]) {
        let (n, w) = (self.n, self.cap);
        assert_eq!(x.len(), n);

        // L*y = b
        for i in 0..n {
            let row = &self.L[i * w..i * w + i + 1];
            let s = x[i] - row[..i].dot(&x[..i]);
            x[i] = s / row[i];
        }
        // L^T*x = y
        for i in (0..n).rev() {
            let mut s = x[i];
            for k in (i + 1)..n {
                s -= self.L[k * w + i] * x[k];
            }
            x[i] = s / self.L[i * w + i];
        }
    }

    fn add_row_and_column(&mut self, col: &[T], perturbation: T) -> bool {
        let n = self.n;
        assert_eq!(col.len(), n + 1);
        self.ensure_capacity(n + 1);

        let w = self.cap;
        let sol = &mut self.work[..n];
        for i in 0..n {
            let row = &self.L[i * w..i * w + i + 1];
            let s = col[i] - row[..i].dot(&sol[..i]);
            sol[i] = s / row[i];
        }
        let d = col[n] - sol.sumsq();

        // NB: negated test so that NaN is also rejected
        if !(d > perturbation) {
            return false;
        }

        self.L[n * w..n * w + n].copy_from_slice(sol);
        self.L[n * w + n] = d.sqrt();
        self.n += 1;
        true
    }

    fn delete_row_and_column(&mut self, idx: usize) {
        let (n, w) = (self.n, self.cap);
        assert!(idx < n);

        // Dropping row idx leaves the trailing rows one entry wider than
        // lower triangular.  Rotate each such diagonal entry into the
        // column to its left.
        for i in (idx + 1)..n {
            let a = self.L[i * w + i - 1];
            let b = self.L[i * w + i];
            let r = T::hypot(a, b);
            let c = a / r;
            let s = b / r;
            for k in i..n {
                let x = self.L[k * w + i - 1];
                let y = self.L[k * w + i];
                self.L[k * w + i - 1] = c * x + s * y;
                self.L[k * w + i] = c * y - s * x;
            }
        }
        for i in (idx + 1)..n {
            self.L.copy_within(i * w..i * w + i, (i - 1) * w);
        }
        self.n -= 1;
    }

    fn clear(&mut self) {
        self.n = 0;
    }

    fn ensure_capacity(&mut self, n: usize) {
        if n <= self.cap {
            return;
        }
        let mut L = vec![T::zero(); n * n];
        for i in 0..self.n {
            L[i * n..i * n + i + 1].copy_from_slice(&self.L[i * self.cap..i * self.cap + i + 1]);
        }
        self.L = L;
        self.cap = n;
        self.work.resize(n, T::zero());
    }

    fn size(&self) -> usize {
        self.n
    }

    // LINPACK style estimate.  Chooses a ±1 right hand side that makes
    // the solution of L*y = e large, then solves the two systems
    // L^T*r = y and A*z = r so that cond ≈ ‖A‖ ‖z‖ / ‖r‖.
    fn condition_estimate(&self, A: &Matrix<T>) -> Result<T, DenseFactorizationError> {
        let n = self.n;
        if A.size() != (n, n) {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }
        if n == 0 {
            return Ok(T::one());
        }

        let mut p = vec![T::zero(); n];
        let mut ppos = vec![T::zero(); n];
        let mut pneg = vec![T::zero(); n];
        let mut y = vec![T::zero(); n];

        for j in 0..n {
            let ljj = self.entry(j, j);
            let ypos = (T::one() - p[j]) / ljj;
            let yneg = (-T::one() - p[j]) / ljj;
            let mut npos = T::zero();
            let mut nneg = T::zero();
            for i in (j + 1)..n {
                ppos[i] = p[i] + ypos * self.entry(i, j);
                pneg[i] = p[i] + yneg * self.entry(i, j);
                npos += ppos[i].abs();
                nneg += pneg[i].abs();
            }
            if ypos.abs() + npos >= yneg.abs() + nneg {
                y[j] = ypos;
                p[(j + 1)..].copy_from_slice(&ppos[(j + 1)..]);
            } else {
                y[j] = yneg;
                p[(j + 1)..].copy_from_slice(&pneg[(j + 1)..]);
            }
        }

        // L^T r = y
        for i in (0..n).rev() {
            let mut s = y[i];
            for j in (i + 1)..n {
                s -= y[j] * self.entry(j, i);
            }
            y[i] = s / self.entry(i, i);
        }
        let rnorm = y.norm_inf();

        // A z = r
        self.solve(&mut y);
        let znorm = y.norm_inf();

        Ok(A.norm_inf() * znorm / rnorm)
    }
}
