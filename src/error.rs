//! Error types for the Phasor nodal analysis engine.
//!
//! This module provides a unified error type [`CircuitError`] that covers
//! all error conditions that can occur while building a circuit and solving
//! for its node voltages.

use thiserror::Error;

use crate::circuit::NodeId;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all Phasor operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Topology Errors ============
    /// Degenerate node pairing: equal terminals, or a voltage source
    /// with no ground reference.
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Component Errors ============
    /// Zero or negative resistance, inductance, or capacitance.
    #[error("Zero or negative component value {value} between nodes {n1} and {n2}")]
    InvalidComponentValue { n1: NodeId, n2: NodeId, value: f64 },

    /// Reactive component added to a circuit with zero angular frequency.
    #[error("Cannot add {component} to a DC circuit")]
    UnsupportedInDcCircuit { component: &'static str },

    // ============ Solve Errors ============
    /// Admittance matrix has no unique solution.
    #[error("Singular admittance matrix - circuit may have a floating node or conflicting constraints")]
    SingularMatrix,
}

impl CircuitError {
    /// Create a topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Create a component value error.
    pub fn invalid_value(n1: NodeId, n2: NodeId, value: f64) -> Self {
        Self::InvalidComponentValue { n1, n2, value }
    }

    /// Create a DC-unsupported error for the named component kind.
    pub fn dc_unsupported(component: &'static str) -> Self {
        Self::UnsupportedInDcCircuit { component }
    }
}
