#![allow(non_snake_case)]

use crate::algebra::{FloatT, Matrix, MatrixVectorMultiply, ShapedMatrix, VectorMath};
use std::ops::{Index, IndexMut};

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        for i in 0..n {
            mat[(i, i)] = T::one();
        }
        mat
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    /// Reshape to `size`, zeroing all entries.  The underlying
    /// storage is only ever grown, never released.
    pub fn resize(&mut self, size: (usize, usize)) -> &mut Self {
        let (m, n) = size;
        self.data.clear();
        self.data.resize(m * n, T::zero());
        self.m = m;
        self.n = n;
        self
    }

    /// Copy dimensions and contents of `src`, reusing storage
    pub fn copy_from(&mut self, src: &Matrix<T>) -> &mut Self {
        self.resize(src.size());
        self.data.copy_from(&src.data);
        self
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// true if `|A[i,j] - A[j,i]| <= tol` for all entries
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        for c in 0..self.n {
            for r in (c + 1)..self.m {
                if T::abs(self[(r, c)] - self[(c, r)]) > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Maximum absolute row sum
    pub fn norm_inf(&self) -> T {
        (0..self.m)
            .map(|r| (0..self.n).fold(T::zero(), |acc, c| acc + T::abs(self[(r, c)])))
            .fold(T::zero(), T::max)
    }

    /// Writes the principal submatrix `self[idx,idx]` into `out`
    pub fn principal_submatrix(&self, idx: &[usize], out: &mut Matrix<T>) {
        let k = idx.len();
        out.resize((k, k));
        for (jp, &j) in idx.iter().enumerate() {
            for (ip, &i) in idx.iter().enumerate() {
                out[(ip, jp)] = self[(i, j)];
            }
        }
    }
}

impl<T> ShapedMatrix for Matrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    #[inline]
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[idx.0 + self.m * idx.1]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        &mut self.data[idx.0 + self.m * idx.1]
    }
}

// construct from row-major nested arrays
impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut A = Matrix::zeros((R, C));
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                A[(r, c)] = v;
            }
        }
        A
    }
}

impl<T> MatrixVectorMultiply for Matrix<T>
where
    T: FloatT,
{
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(self.n, x.len());
        assert_eq!(self.m, y.len());

        if b == T::zero() {
            y.set(T::zero());
        } else if b != T::one() {
            y.scale(b);
        }
        for (c, &xc) in x.iter().enumerate() {
            let axc = a * xc;
            if axc == T::zero() {
                continue;
            }
            for (yr, &mrc) in y.iter_mut().zip(self.col_slice(c)) {
                *yr += mrc * axc;
            }
        }
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.nrows() {
            write!(f, "[ ")?;
            for j in 0..self.ncols() {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}
