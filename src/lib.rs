//! # Phasor Core
//!
//! Nodal analysis of linear circuits for DC and single-frequency AC
//! excitation.
//!
//! This library provides:
//! - An incrementally built complex admittance matrix that grows as
//!   components reference new nodes
//! - Stamp patterns for resistors, inductors, and capacitors
//! - Grounded voltage sources enforced by row substitution at solve time
//! - A dense complex LU solve with singularity detection
//! - Phasor (magnitude/angle) presentation of the solved voltages
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - The stateful circuit model and node types
//! - [`solver`] - Admittance matrix assembly and numerical solving
//! - [`report`] - Magnitude/phase formatting of solved voltages
//! - [`error`] - Unified error type
//!
//! ## Usage
//!
//! ```
//! use phasor_core::{CircuitModel, NodeId};
//!
//! # fn main() -> phasor_core::Result<()> {
//! let mut circuit = CircuitModel::dc();
//! circuit.add_source(NodeId(1), NodeId::GROUND, 5.0)?;
//! circuit.add_resistor(NodeId(1), NodeId(2), 10.0)?;
//! circuit.add_resistor(NodeId(2), NodeId::GROUND, 10.0)?;
//! circuit.solve()?;
//!
//! let v2 = circuit.voltage(NodeId(2)).unwrap();
//! assert!((v2.re - 2.5).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! ## Analysis method
//!
//! Node 0 is ground and never appears in the matrix. Each passive component
//! stamps its admittance 1/Z into the matrix as it is added (Z = R,
//! Z = jwL, or Z = -j/(wC) at the circuit's fixed angular frequency w).
//! Solving replaces each source node's row with an identity constraint and
//! solves G.v = b by LU decomposition. The row substitution is destructive:
//! a solved matrix no longer holds the original stamps for source rows.

pub mod circuit;
pub mod error;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{CircuitModel, NodeId, VoltageSource};
pub use error::{CircuitError, Result};

/// Angular frequency designating DC analysis.
pub const DC: f64 = 0.0;
