//! Circuit representation.
//!
//! This module provides the stateful circuit model. The [`CircuitModel`]
//! struct owns the admittance matrix, the voltage source list, and the
//! solved voltage vector, and exposes the operations for building and
//! solving a circuit.

mod model;
mod types;

pub use model::CircuitModel;
pub use types::{NodeId, VoltageSource};
