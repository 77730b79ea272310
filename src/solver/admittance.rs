//! Admittance matrix assembly.

use nalgebra::DMatrix;
use num_complex::Complex64;

/// Growable complex admittance matrix G.
///
/// Entry (i, i) accumulates the admittance incident on node i + 1; entry
/// (i, j) for i != j holds the negated mutual admittance between nodes
/// i + 1 and j + 1. Symmetric by construction until a solve substitutes
/// source rows.
#[derive(Debug, Clone)]
pub struct AdmittanceMatrix {
    g: DMatrix<Complex64>,
}

impl AdmittanceMatrix {
    /// Create an empty (0x0) matrix.
    pub fn new() -> Self {
        Self {
            g: DMatrix::zeros(0, 0),
        }
    }

    /// Current matrix dimension (the highest node index referenced so far).
    pub fn size(&self) -> usize {
        self.g.nrows()
    }

    /// Grow the matrix to `n` x `n`, keeping the old block in the top-left
    /// and zero-filling the new rows and columns. Never shrinks.
    pub fn grow_to(&mut self, n: usize) {
        if n <= self.size() {
            return;
        }
        let old = std::mem::replace(&mut self.g, DMatrix::zeros(0, 0));
        self.g = old.resize(n, n, Complex64::new(0.0, 0.0));
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.g[(row, col)]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: Complex64) {
        self.g[(row, col)] += value;
    }

    /// Stamp an admittance between two nodes.
    ///
    /// Nodes are given as matrix indices, with `None` for ground. For an
    /// admittance y between nodes n1 and n2:
    ///   G[n1,n1] += y
    ///   G[n2,n2] += y
    ///   G[n1,n2] -= y
    ///   G[n2,n1] -= y
    /// A ground terminal contributes only the other node's diagonal entry.
    ///
    /// The caller grows the matrix to cover both indices first.
    pub fn stamp_admittance(&mut self, n1: Option<usize>, n2: Option<usize>, y: Complex64) {
        if let Some(i) = n1 {
            self.add(i, i, y);
        }
        if let Some(j) = n2 {
            self.add(j, j, y);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -y);
            self.add(j, i, -y);
        }
    }

    /// Replace row `row` with an identity constraint: zero the whole row,
    /// then set the diagonal to 1. Used by source elimination; any
    /// previously stamped admittances on that row are overwritten.
    pub fn substitute_identity_row(&mut self, row: usize) {
        self.g.row_mut(row).fill(Complex64::new(0.0, 0.0));
        self.g[(row, row)] = Complex64::new(1.0, 0.0);
    }

    /// Borrow the underlying dense matrix.
    pub fn as_dmatrix(&self) -> &DMatrix<Complex64> {
        &self.g
    }
}

impl Default for AdmittanceMatrix {
    fn default() -> Self {
        Self::new()
    }
}
