/// Dense matrix in column major format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [4.  1.  0.]
///     [1.  4.  1.]
///     [0.  1.  4.]
/// ```
///
/// ```
/// use pivotal::algebra::Matrix;
///
/// let A : Matrix<f64> = Matrix::from(
///     &[[4., 1., 0.],
///       [1., 4., 1.],
///       [0., 1., 4.]]);
///
/// assert_eq!(A[(0, 1)], 1.);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

/// Trait for matrices with a known shape
pub trait ShapedMatrix {
    /// number of rows
    fn nrows(&self) -> usize;
    /// number of columns
    fn ncols(&self) -> usize;
    /// (rows, columns)
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    /// true if the matrix is square
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
