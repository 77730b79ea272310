//! Core types for circuit representation.

use std::fmt;

/// A unique identifier for a node in the circuit.
/// Node 0 is always ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The ground node (always index 0).
    pub const GROUND: NodeId = NodeId(0);

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }

    /// Row/column index of this node in the admittance matrix.
    /// Ground has no row and maps to `None`; node k maps to k - 1.
    pub fn matrix_index(&self) -> Option<usize> {
        if self.is_ground() {
            None
        } else {
            Some(self.0 - 1)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// A grounded voltage source.
///
/// One terminal is always ground; only the non-ground node is stored. The
/// sign convention is "positive terminal listed first": a source added with
/// ground as its first terminal is stored against the other node with the
/// value negated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageSource {
    /// The non-ground node the source drives.
    pub node: NodeId,
    /// Source value after orientation normalization. Real magnitude; for AC
    /// circuits it is driven at the circuit's angular frequency.
    pub value: f64,
}

impl VoltageSource {
    /// Create a source from its two terminals, normalizing orientation.
    ///
    /// Exactly one of `n1`, `n2` must be ground; the caller validates this
    /// before construction.
    pub fn new(n1: NodeId, n2: NodeId, value: f64) -> Self {
        debug_assert!(n1.is_ground() != n2.is_ground());
        if n1.is_ground() {
            Self {
                node: n2,
                value: -value,
            }
        } else {
            Self { node: n1, value }
        }
    }
}
