//! Dense matrices over GF(2).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// Receives the row additions performed by [`Mat2::gauss`].
pub trait RowOps {
    /// Row `src` was added to row `dst`.
    fn row_add(&mut self, src: usize, dst: usize);
}

impl RowOps for () {
    fn row_add(&mut self, _src: usize, _dst: usize) {}
}

impl RowOps for Vec<(usize, usize)> {
    fn row_add(&mut self, src: usize, dst: usize) {
        self.push((src, dst));
    }
}

/// A matrix over GF(2), stored row-major.
///
/// As a parity map, row `i` lists the input wires whose XOR ends up on
/// output wire `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mat2 {
    data: Vec<Vec<bool>>,
    cols: usize,
}

impl Mat2 {
    /// The all-zero `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![vec![false; cols]; rows],
            cols,
        }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i][i] = true;
        }
        m
    }

    /// Build from 0/1 rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> CompileResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(CompileError::DimensionMismatch(format!(
                    "row {i} has {} entries, expected {cols}",
                    row.len()
                )));
            }
            data.push(row.into_iter().map(|b| b & 1 == 1).collect());
        }
        Ok(Self { data, cols })
    }

    /// The permutation matrix sending column `i` to row `perm[i]`.
    pub fn from_permutation(perm: &[u32]) -> Self {
        let mut m = Self::zeros(perm.len(), perm.len());
        for (i, &p) in perm.iter().enumerate() {
            m.data[p as usize][i] = true;
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row][col] = value;
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.data[row]
    }

    /// Add row `src` to row `dst`.
    pub fn row_add(&mut self, src: usize, dst: usize) {
        for c in 0..self.cols {
            let bit = self.data[src][c];
            self.data[dst][c] ^= bit;
        }
    }

    /// Add column `src` to column `dst`.
    pub fn col_add(&mut self, src: usize, dst: usize) {
        for row in &mut self.data {
            row[dst] ^= row[src];
        }
    }

    /// Exchange two rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows());
        for (r, row) in self.data.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                t.data[c][r] = bit;
            }
        }
        t
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Mat2) -> CompileResult<Mat2> {
        if self.cols != other.rows() {
            return Err(CompileError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows(),
                self.cols,
                other.rows(),
                other.cols
            )));
        }
        let mut out = Self::zeros(self.rows(), other.cols);
        for (r, row) in self.data.iter().enumerate() {
            for (k, _) in row.iter().enumerate().filter(|(_, bit)| **bit) {
                for c in 0..other.cols {
                    out.data[r][c] ^= other.data[k][c];
                }
            }
        }
        Ok(out)
    }

    pub fn rank(&self) -> usize {
        self.clone().gauss(false, &mut ())
    }

    /// Gaussian elimination using row additions only; returns the rank.
    ///
    /// A zero pivot is repaired by adding a lower row that has a one in the
    /// pivot column. With `full_reduce` the matrix ends in reduced row
    /// echelon form. Every row addition is reported to `recorder`.
    pub fn gauss(&mut self, full_reduce: bool, recorder: &mut impl RowOps) -> usize {
        let rows = self.rows();
        let mut pivots = vec![];
        let mut pivot_row = 0;

        for col in 0..self.cols {
            if pivot_row >= rows {
                break;
            }
            let Some(r) = (pivot_row..rows).find(|&r| self.data[r][col]) else {
                continue;
            };
            if r != pivot_row {
                self.row_add(r, pivot_row);
                recorder.row_add(r, pivot_row);
            }
            for r in pivot_row + 1..rows {
                if self.data[r][col] {
                    self.row_add(pivot_row, r);
                    recorder.row_add(pivot_row, r);
                }
            }
            pivots.push(col);
            pivot_row += 1;
        }

        if full_reduce {
            for (prow, &col) in pivots.iter().enumerate().rev() {
                for r in 0..prow {
                    if self.data[r][col] {
                        self.row_add(prow, r);
                        recorder.row_add(prow, r);
                    }
                }
            }
        }

        pivots.len()
    }

    /// The inverse, if the matrix is square and invertible.
    pub fn inverse(&self) -> CompileResult<Mat2> {
        if self.rows() != self.cols {
            return Err(CompileError::DimensionMismatch(format!(
                "{}x{} matrix has no inverse",
                self.rows(),
                self.cols
            )));
        }
        let mut work = self.clone();
        let mut ops: Vec<(usize, usize)> = vec![];
        if work.gauss(true, &mut ops) < self.rows() {
            return Err(CompileError::Singular);
        }
        let mut inv = Self::identity(self.rows());
        for (src, dst) in ops {
            inv.row_add(src, dst);
        }
        Ok(inv)
    }

    pub fn is_identity(&self) -> bool {
        self.rows() == self.cols
            && self
                .data
                .iter()
                .enumerate()
                .all(|(r, row)| row.iter().enumerate().all(|(c, &bit)| bit == (r == c)))
    }

    /// If this is a permutation matrix, the `perm` with `self[perm[i]][i] = 1`.
    pub fn as_permutation(&self) -> Option<Vec<u32>> {
        if self.rows() != self.cols {
            return None;
        }
        let mut perm = vec![0u32; self.cols];
        for (c, slot) in perm.iter_mut().enumerate() {
            let mut ones = (0..self.rows()).filter(|&r| self.data[r][c]);
            let r = ones.next()?;
            if ones.next().is_some() {
                return None;
            }
            *slot = u32::try_from(r).ok()?;
        }
        let mut seen = vec![false; perm.len()];
        for &p in &perm {
            if std::mem::replace(&mut seen[p as usize], true) {
                return None;
            }
        }
        Some(perm)
    }
}

impl fmt::Display for Mat2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            let line: String = row.iter().map(|&b| if b { '1' } else { '0' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
