//! Nodal analysis solver.
//!
//! This module provides the numerical engine for circuit solving.
//!
//! ## Nodal analysis with source elimination
//!
//! The engine assembles a system of equations G·v = b where:
//! - G is the complex admittance matrix (node equations)
//! - v is the vector of node voltages
//! - b is the source vector
//!
//! Passive components stamp admittances into G as they are added. Grounded
//! voltage sources are not stamped; at solve time each source row of G is
//! replaced by an identity constraint (row substitution) and the source
//! value is written into b, forcing that node's voltage directly.
//!
//! Node k occupies row/column k - 1; ground (node 0) has no row. The matrix
//! grows as higher-numbered nodes are referenced and never shrinks.

mod admittance;
mod solve;

pub use admittance::AdmittanceMatrix;
pub use solve::solve;
