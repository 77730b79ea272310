//! Source elimination and linear solve.

use log::debug;
use nalgebra::DVector;
use num_complex::Complex64;

use crate::circuit::VoltageSource;
use crate::error::{CircuitError, Result};

use super::AdmittanceMatrix;

/// Solve G·v = b for the node voltages.
///
/// Sources are applied in insertion order by row substitution: the source
/// node's row of G is replaced with an identity constraint and the source
/// value is written into b. A later source attached to the same node fully
/// overwrites an earlier one. The matrix is grown first so that a source
/// attached to a node beyond the stamped region still gets a row.
///
/// This mutates `matrix` in place; the substituted rows are not restored
/// after the solve.
///
/// # Errors
///
/// Returns [`CircuitError::SingularMatrix`] when the eliminated system has
/// no unique solution, e.g. a node with no path to ground.
pub fn solve(
    matrix: &mut AdmittanceMatrix,
    sources: &[VoltageSource],
) -> Result<DVector<Complex64>> {
    let max_source_node = sources.iter().map(|s| s.node.0).max().unwrap_or(0);
    matrix.grow_to(max_source_node);

    let n = matrix.size();
    let mut b = DVector::from_element(n, Complex64::new(0.0, 0.0));

    for source in sources {
        // Validated non-ground at insertion, so the row index exists.
        let row = source.node.0 - 1;
        b[row] = Complex64::new(source.value, 0.0);
        matrix.substitute_identity_row(row);
    }

    debug!(
        "solving {n}x{n} nodal system with {} source row(s)",
        sources.len()
    );

    matrix
        .as_dmatrix()
        .clone()
        .lu()
        .solve(&b)
        .ok_or(CircuitError::SingularMatrix)
}
