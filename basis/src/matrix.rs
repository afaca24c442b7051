//! Dense real matrix with value semantics, plus a symmetric eigen-solver.
//!
//! Storage is delegated to `nalgebra::DMatrix`. Element access follows the
//! row-major convention: `m[i]` is the i-th element when the rows are laid
//! out one after another, which is also the order `from_vec` consumes.
//!
//! Shape mismatches, out of range indices and inversion of singular matrices
//! are caller bugs and panic. Division by zero is not checked and yields
//! IEEE inf/NaN.

extern crate nalgebra as na;

use faer::{Mat, Side};
use na::DMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Matrix {
    /// 0 x 0 matrix.
    pub fn new() -> Self {
        Self {
            data: DMatrix::zeros(0, 0),
        }
    }

    pub fn zeros(n_row: usize, n_col: usize) -> Self {
        Self::from_value(n_row, n_col, 0.0)
    }

    pub fn from_value(n_row: usize, n_col: usize, val: f64) -> Self {
        Self {
            data: DMatrix::from_element(n_row, n_col, val),
        }
    }

    /// Fills the matrix row by row from `data`.
    pub fn from_vec(n_row: usize, n_col: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            n_row * n_col,
            "{} values cannot fill a {}x{} matrix",
            data.len(),
            n_row,
            n_col
        );
        Self {
            data: DMatrix::from_row_slice(n_row, n_col, &data),
        }
    }

    pub fn identity(n: usize) -> Self {
        Self {
            data: DMatrix::identity(n, n),
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Row-major copy of the elements.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.transpose().as_slice().to_vec()
    }

    pub fn trans(&self) -> Matrix {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Matrix inverse. Panics on non-square or singular input.
    pub fn inver(&self) -> Matrix {
        self.try_inver()
            .unwrap_or_else(|| panic!("matrix of size {}x{} is singular", self.rows(), self.cols()))
    }

    /// Matrix inverse, `None` when the matrix is singular.
    pub fn try_inver(&self) -> Option<Matrix> {
        assert_eq!(
            self.rows(),
            self.cols(),
            "inverse of a non-square {}x{} matrix",
            self.rows(),
            self.cols()
        );
        self.data.clone().try_inverse().map(|data| Self { data })
    }

    /// Matrix product, as opposed to the elementwise `*`.
    pub fn matmul(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.cols(),
            rhs.rows(),
            "cannot multiply {}x{} by {}x{}",
            self.rows(),
            self.cols(),
            rhs.rows(),
            rhs.cols()
        );
        Self {
            data: &self.data * &rhs.data,
        }
    }

    /// Square matrix with `diag` on the diagonal; `diag` may be a row or a column.
    pub fn from_diagonal(diag: &Matrix) -> Matrix {
        let n = diag.size();
        let mut ret = Matrix::zeros(n, n);
        for i in 0..n {
            ret[(i, i)] = diag[i];
        }
        ret
    }

    fn assert_same_shape(&self, other: &Matrix) {
        assert!(
            self.rows() == other.rows() && self.cols() == other.cols(),
            "shape mismatch: {}x{} vs {}x{}",
            self.rows(),
            self.cols(),
            other.rows(),
            other.cols()
        );
    }

    fn linear_to_2d(&self, i: usize) -> (usize, usize) {
        assert!(i < self.size(), "index {} out of range for size {}", i, self.size());
        (i / self.cols(), i % self.cols())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.rows() && j < self.cols(), "index ({}, {}) out of range", i, j);
        &self.data[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(i < self.rows() && j < self.cols(), "index ({}, {}) out of range", i, j);
        &mut self.data[(i, j)]
    }
}

impl Index<usize> for Matrix {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        let ij = self.linear_to_2d(i);
        &self.data[ij]
    }
}

impl IndexMut<usize> for Matrix {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        let ij = self.linear_to_2d(i);
        &mut self.data[ij]
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        Self { data: -self.data }
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -self.clone()
    }
}

// Elementwise operators. The compound forms do the work, the binary forms
// clone the left operand (or the matrix operand for scalar-first forms).
macro_rules! impl_matrix_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $sym:tt) => {
        impl $OpAssign<f64> for Matrix {
            fn $op_assign(&mut self, val: f64) {
                self.data.apply(|a| *a = *a $sym val);
            }
        }

        impl $OpAssign<&Matrix> for Matrix {
            fn $op_assign(&mut self, rhs: &Matrix) {
                self.assert_same_shape(rhs);
                self.data.zip_apply(&rhs.data, |a, b| *a = *a $sym b);
            }
        }

        impl $OpAssign<Matrix> for Matrix {
            fn $op_assign(&mut self, rhs: Matrix) {
                self.$op_assign(&rhs);
            }
        }

        impl $Op<f64> for Matrix {
            type Output = Matrix;
            fn $op(mut self, val: f64) -> Matrix {
                self.$op_assign(val);
                self
            }
        }

        impl $Op<f64> for &Matrix {
            type Output = Matrix;
            fn $op(self, val: f64) -> Matrix {
                self.clone() $sym val
            }
        }

        impl $Op<Matrix> for f64 {
            type Output = Matrix;
            fn $op(self, mut mat: Matrix) -> Matrix {
                mat.data.apply(|a| *a = self $sym *a);
                mat
            }
        }

        impl $Op<&Matrix> for f64 {
            type Output = Matrix;
            fn $op(self, mat: &Matrix) -> Matrix {
                self $sym mat.clone()
            }
        }

        impl $Op<&Matrix> for Matrix {
            type Output = Matrix;
            fn $op(mut self, rhs: &Matrix) -> Matrix {
                self.$op_assign(rhs);
                self
            }
        }

        impl $Op<Matrix> for Matrix {
            type Output = Matrix;
            fn $op(mut self, rhs: Matrix) -> Matrix {
                self.$op_assign(&rhs);
                self
            }
        }

        impl $Op<&Matrix> for &Matrix {
            type Output = Matrix;
            fn $op(self, rhs: &Matrix) -> Matrix {
                self.clone() $sym rhs
            }
        }
    };
}

impl_matrix_op!(Add, add, AddAssign, add_assign, +);
impl_matrix_op!(Sub, sub, SubAssign, sub_assign, -);
impl_matrix_op!(Mul, mul, MulAssign, mul_assign, *);
impl_matrix_op!(Div, div, DivAssign, div_assign, /);

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                write!(f, " {:14.8}", self[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Eigen-decomposition of a symmetric matrix, M = V diag(w) V^T.
///
/// Eigenvalues are sorted ascending and the columns of the eigenvector
/// matrix follow the same order. The input is not symmetrized.
#[derive(Debug, Clone)]
pub struct SymEigenSolver {
    eigenvalues: Matrix,
    eigenvectors: Matrix,
}

impl SymEigenSolver {
    /// Panics on a non-square matrix or when the decomposition produces
    /// non-finite values. Only the lower triangle of `mat` is read.
    pub fn new(mat: &Matrix) -> Self {
        assert_eq!(mat.rows(), mat.cols(), "eigen-decomposition of a non-square matrix");
        let n = mat.rows();
        if n == 0 {
            return Self {
                eigenvalues: Matrix::zeros(0, 1),
                eigenvectors: Matrix::zeros(0, 0),
            };
        }

        let lower = Mat::<f64>::from_fn(n, n, |i, j| mat[(i, j)]);
        let evd = lower.selfadjoint_eigendecomposition(Side::Lower);
        let s = evd.s().column_vector();
        let u = evd.u();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| s.read(a).total_cmp(&s.read(b)));

        let mut eigenvalues = Matrix::zeros(n, 1);
        let mut eigenvectors = Matrix::zeros(n, n);
        for (col, &src) in order.iter().enumerate() {
            eigenvalues[col] = s.read(src);
            for row in 0..n {
                eigenvectors[(row, col)] = u.read(row, src);
            }
        }
        assert!(
            eigenvalues.data.iter().all(|w| w.is_finite()),
            "symmetric eigen-decomposition did not converge (n = {})",
            n
        );

        Self {
            eigenvalues,
            eigenvectors,
        }
    }

    /// Ascending eigenvalues as an n x 1 matrix.
    pub fn eigen_val(&self) -> &Matrix {
        &self.eigenvalues
    }

    /// Orthonormal eigenvectors, one per column.
    pub fn eigen_vec(&self) -> &Matrix {
        &self.eigenvectors
    }
}
