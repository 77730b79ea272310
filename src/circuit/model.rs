//! The circuit model and its build/solve operations.

use nalgebra::DVector;
use num_complex::Complex64;

use crate::error::{CircuitError, Result};
use crate::solver::{self, AdmittanceMatrix};

use super::types::{NodeId, VoltageSource};

/// A linear circuit under construction and its solved state.
///
/// The angular frequency is fixed at construction: ω = 0 designates DC,
/// any nonzero value designates single-frequency AC. All sources and
/// reactive components share this one frequency.
///
/// Components may be added in any order; the admittance matrix grows
/// automatically as higher-numbered nodes are referenced. Once every
/// component has been added, call [`solve`](CircuitModel::solve) and read
/// the result with [`node_voltages`](CircuitModel::node_voltages).
///
/// Solving substitutes source rows into the matrix destructively; adding
/// further components after a solve stamps into the already-substituted
/// matrix rather than a fresh one.
#[derive(Debug)]
pub struct CircuitModel {
    /// Angular frequency in rad/s; 0 for DC.
    omega: f64,
    /// Admittance matrix, grown as components are added.
    matrix: AdmittanceMatrix,
    /// Voltage sources in insertion order.
    sources: Vec<VoltageSource>,
    /// Solved node voltages; `None` until a successful solve.
    voltages: Option<DVector<Complex64>>,
}

impl CircuitModel {
    /// Create a circuit driven at the given angular frequency (rad/s).
    pub fn new(omega: f64) -> Self {
        Self {
            omega,
            matrix: AdmittanceMatrix::new(),
            sources: Vec::new(),
            voltages: None,
        }
    }

    /// Create a DC circuit (ω = 0).
    pub fn dc() -> Self {
        Self::new(0.0)
    }

    /// Angular frequency in rad/s.
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Whether this is a DC circuit.
    pub fn is_dc(&self) -> bool {
        self.omega == 0.0
    }

    /// Number of nodes referenced so far (the matrix dimension).
    pub fn num_nodes(&self) -> usize {
        self.matrix.size()
    }

    /// Number of voltage sources added so far.
    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    /// The admittance matrix in its current state.
    pub fn matrix(&self) -> &AdmittanceMatrix {
        &self.matrix
    }

    /// Add a grounded voltage source between `n1` and `n2`.
    ///
    /// One terminal must be ground; floating sources are not representable
    /// in this formulation. The source does not touch the matrix here, it
    /// takes effect at solve time via row substitution.
    ///
    /// # Errors
    ///
    /// [`CircuitError::InvalidTopology`] if neither terminal is ground or
    /// the terminals are equal.
    pub fn add_source(&mut self, n1: NodeId, n2: NodeId, value: f64) -> Result<()> {
        if !n1.is_ground() && !n2.is_ground() {
            return Err(CircuitError::invalid_topology(
                "voltage source must have one terminal connected to ground",
            ));
        }
        if n1 == n2 {
            return Err(CircuitError::invalid_topology(
                "voltage source terminals must connect two different nodes",
            ));
        }

        self.sources.push(VoltageSource::new(n1, n2, value));
        Ok(())
    }

    /// Add a resistor between `n1` and `n2` and stamp its conductance.
    ///
    /// # Errors
    ///
    /// [`CircuitError::InvalidComponentValue`] for a zero or negative
    /// resistance, [`CircuitError::InvalidTopology`] if the terminals are
    /// equal.
    pub fn add_resistor(&mut self, n1: NodeId, n2: NodeId, value: f64) -> Result<()> {
        self.check_branch(n1, n2, value)?;
        self.stamp_impedance(n1, n2, Complex64::new(value, 0.0));
        Ok(())
    }

    /// Add an inductor between `n1` and `n2` and stamp its admittance.
    ///
    /// The impedance is Z = jωL at the circuit's fixed frequency.
    ///
    /// # Errors
    ///
    /// [`CircuitError::UnsupportedInDcCircuit`] on a DC circuit, otherwise
    /// as [`add_resistor`](CircuitModel::add_resistor).
    pub fn add_inductor(&mut self, n1: NodeId, n2: NodeId, value: f64) -> Result<()> {
        if self.is_dc() {
            return Err(CircuitError::dc_unsupported("an inductor"));
        }
        self.check_branch(n1, n2, value)?;
        self.stamp_impedance(n1, n2, Complex64::new(0.0, self.omega * value));
        Ok(())
    }

    /// Add a capacitor between `n1` and `n2` and stamp its admittance.
    ///
    /// The impedance is Z = -j/(ωC) at the circuit's fixed frequency.
    ///
    /// # Errors
    ///
    /// [`CircuitError::UnsupportedInDcCircuit`] on a DC circuit, otherwise
    /// as [`add_resistor`](CircuitModel::add_resistor).
    pub fn add_capacitor(&mut self, n1: NodeId, n2: NodeId, value: f64) -> Result<()> {
        if self.is_dc() {
            return Err(CircuitError::dc_unsupported("a capacitor"));
        }
        self.check_branch(n1, n2, value)?;
        self.stamp_impedance(n1, n2, Complex64::new(0.0, -1.0 / (self.omega * value)));
        Ok(())
    }

    /// Solve G·v = b for the node voltages.
    ///
    /// Applies source elimination by row substitution (in insertion order,
    /// later sources win on a shared node) and then a dense complex LU
    /// solve. The matrix is mutated in place by the substitution.
    ///
    /// # Errors
    ///
    /// [`CircuitError::SingularMatrix`] when the system has no unique
    /// solution, e.g. a floating node with no path to ground.
    pub fn solve(&mut self) -> Result<()> {
        let v = solver::solve(&mut self.matrix, &self.sources)?;
        self.voltages = Some(v);
        Ok(())
    }

    /// The solved voltage vector, index i = voltage at node i + 1.
    ///
    /// `None` before the first successful solve. Repeated calls return the
    /// same cached vector; nothing is recomputed.
    pub fn node_voltages(&self) -> Option<&DVector<Complex64>> {
        self.voltages.as_ref()
    }

    /// Voltage at a single node after a successful solve.
    ///
    /// Ground is always 0 V. `None` before the first solve or for a node
    /// the solve never saw.
    pub fn voltage(&self, node: NodeId) -> Option<Complex64> {
        let v = self.voltages.as_ref()?;
        match node.matrix_index() {
            None => Some(Complex64::new(0.0, 0.0)),
            Some(i) => v.get(i).copied(),
        }
    }

    /// Shared validation for two-terminal passive components.
    fn check_branch(&self, n1: NodeId, n2: NodeId, value: f64) -> Result<()> {
        if value <= 0.0 {
            return Err(CircuitError::invalid_value(n1, n2, value));
        }
        if n1 == n2 {
            return Err(CircuitError::invalid_topology(
                "component terminals must connect two different nodes",
            ));
        }
        Ok(())
    }

    /// Grow the matrix to cover both terminals, then stamp the admittance
    /// 1/Z with the four-case pattern. Validation happens before this is
    /// called; no partial mutation on error paths.
    fn stamp_impedance(&mut self, n1: NodeId, n2: NodeId, z: Complex64) {
        self.matrix.grow_to(n1.0.max(n2.0));
        self.matrix
            .stamp_admittance(n1.matrix_index(), n2.matrix_index(), z.inv());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_new_circuit_is_empty() {
        let circuit = CircuitModel::dc();
        assert!(circuit.is_dc());
        assert_eq!(circuit.num_nodes(), 0);
        assert_eq!(circuit.num_sources(), 0);
        assert!(circuit.node_voltages().is_none());
    }

    #[test]
    fn test_source_requires_ground_reference() {
        let mut circuit = CircuitModel::dc();
        let result = circuit.add_source(NodeId(1), NodeId(2), 5.0);
        assert!(matches!(result, Err(CircuitError::InvalidTopology { .. })));
        assert_eq!(circuit.num_sources(), 0);
    }

    #[test]
    fn test_source_rejects_equal_terminals() {
        let mut circuit = CircuitModel::dc();
        let result = circuit.add_source(NodeId::GROUND, NodeId::GROUND, 5.0);
        assert!(matches!(result, Err(CircuitError::InvalidTopology { .. })));
    }

    #[test]
    fn test_source_does_not_grow_matrix() {
        let mut circuit = CircuitModel::dc();
        circuit.add_source(NodeId(4), NodeId::GROUND, 5.0).unwrap();
        assert_eq!(circuit.num_nodes(), 0);
        assert_eq!(circuit.num_sources(), 1);
    }

    #[test]
    fn test_resistor_rejects_nonpositive_value() {
        let mut circuit = CircuitModel::dc();
        for value in [0.0, -10.0] {
            let result = circuit.add_resistor(NodeId(1), NodeId(2), value);
            assert!(matches!(
                result,
                Err(CircuitError::InvalidComponentValue { .. })
            ));
        }
        // Fail-fast: nothing was stamped, matrix never grew.
        assert_eq!(circuit.num_nodes(), 0);
    }

    #[test]
    fn test_resistor_rejects_equal_terminals() {
        let mut circuit = CircuitModel::dc();
        let result = circuit.add_resistor(NodeId(2), NodeId(2), 100.0);
        assert!(matches!(result, Err(CircuitError::InvalidTopology { .. })));
    }

    #[test]
    fn test_resistor_stamps_conductance() {
        let mut circuit = CircuitModel::dc();
        circuit.add_resistor(NodeId(1), NodeId(2), 10.0).unwrap();

        let m = circuit.matrix();
        assert_eq!(circuit.num_nodes(), 2);
        assert_relative_eq!(m.get(0, 0).re, 0.1);
        assert_relative_eq!(m.get(1, 1).re, 0.1);
        assert_relative_eq!(m.get(0, 1).re, -0.1);
        assert_relative_eq!(m.get(1, 0).re, -0.1);
    }

    #[test]
    fn test_grounded_resistor_stamps_diagonal_only() {
        let mut circuit = CircuitModel::dc();
        circuit
            .add_resistor(NodeId::GROUND, NodeId(2), 10.0)
            .unwrap();

        let m = circuit.matrix();
        assert_relative_eq!(m.get(1, 1).re, 0.1);
        assert_relative_eq!(m.get(0, 0).re, 0.0);
        assert_relative_eq!(m.get(0, 1).re, 0.0);
    }

    #[test]
    fn test_reactive_components_rejected_in_dc() {
        let mut circuit = CircuitModel::dc();
        assert!(matches!(
            circuit.add_inductor(NodeId(1), NodeId(2), 1e-3),
            Err(CircuitError::UnsupportedInDcCircuit { .. })
        ));
        assert!(matches!(
            circuit.add_capacitor(NodeId(1), NodeId::GROUND, 1e-6),
            Err(CircuitError::UnsupportedInDcCircuit { .. })
        ));
    }

    #[test]
    fn test_inductor_stamps_reciprocal_impedance() {
        // Z = jwL = j1000 at w = 1000, L = 1 H; 1/Z = -j0.001.
        let mut circuit = CircuitModel::new(1000.0);
        circuit
            .add_inductor(NodeId(1), NodeId::GROUND, 1.0)
            .unwrap();

        let m = circuit.matrix();
        assert_relative_eq!(m.get(0, 0).re, 0.0);
        assert_relative_eq!(m.get(0, 0).im, -0.001, max_relative = 1e-12);
    }

    #[test]
    fn test_capacitor_stamps_reciprocal_impedance() {
        // Z = -j/(wC) = -j1000 at w = 1000, C = 1 uF; 1/Z = j0.001.
        let mut circuit = CircuitModel::new(1000.0);
        circuit
            .add_capacitor(NodeId(1), NodeId::GROUND, 1e-6)
            .unwrap();

        let m = circuit.matrix();
        assert_relative_eq!(m.get(0, 0).re, 0.0);
        assert_relative_eq!(m.get(0, 0).im, 0.001, max_relative = 1e-12);
    }

    #[test]
    fn test_matrix_symmetric_after_mixed_additions() {
        let mut circuit = CircuitModel::new(1000.0);
        circuit.add_resistor(NodeId(1), NodeId(2), 10.0).unwrap();
        circuit.add_capacitor(NodeId(2), NodeId(3), 1e-6).unwrap();
        circuit.add_inductor(NodeId(3), NodeId::GROUND, 0.5).unwrap();
        circuit.add_resistor(NodeId(1), NodeId(3), 47.0).unwrap();

        let m = circuit.matrix();
        for i in 0..circuit.num_nodes() {
            for j in 0..circuit.num_nodes() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_growth_preserves_earlier_stamps() {
        let mut circuit = CircuitModel::dc();
        circuit.add_resistor(NodeId(1), NodeId(2), 10.0).unwrap();
        circuit.add_resistor(NodeId(1), NodeId(3), 5.0).unwrap();

        let m = circuit.matrix();
        assert_eq!(circuit.num_nodes(), 3);
        // The node 1-2 stamp is untouched by the growth to 3x3.
        assert_relative_eq!(m.get(0, 1).re, -0.1);
        assert_relative_eq!(m.get(1, 1).re, 0.1);
        assert_relative_eq!(m.get(0, 0).re, 0.3);
    }

    #[test]
    fn test_dc_voltage_divider() {
        let mut circuit = CircuitModel::dc();
        circuit.add_source(NodeId(1), NodeId::GROUND, 5.0).unwrap();
        circuit.add_resistor(NodeId(1), NodeId(2), 10.0).unwrap();
        circuit
            .add_resistor(NodeId(2), NodeId::GROUND, 10.0)
            .unwrap();
        circuit.solve().unwrap();

        let v1 = circuit.voltage(NodeId(1)).unwrap();
        let v2 = circuit.voltage(NodeId(2)).unwrap();
        assert_relative_eq!(v1.re, 5.0, max_relative = 1e-9);
        assert_relative_eq!(v2.re, 2.5, max_relative = 1e-9);
        assert_relative_eq!(v1.im, 0.0);
        assert_relative_eq!(v2.im, 0.0);
    }

    #[test]
    fn test_floating_branch_is_singular() {
        let mut circuit = CircuitModel::dc();
        circuit.add_source(NodeId(1), NodeId::GROUND, 5.0).unwrap();
        // Open branch: nodes 2 and 3 have no path to ground or the source.
        circuit.add_resistor(NodeId(2), NodeId(3), 10.0).unwrap();

        assert!(matches!(
            circuit.solve(),
            Err(CircuitError::SingularMatrix)
        ));
        assert!(circuit.node_voltages().is_none());
    }

    #[test]
    fn test_source_row_overwrites_component_stamp() {
        let mut circuit = CircuitModel::new(1000.0);
        circuit.add_source(NodeId(1), NodeId::GROUND, 10.0).unwrap();
        circuit
            .add_capacitor(NodeId(1), NodeId::GROUND, 1e-6)
            .unwrap();
        circuit.solve().unwrap();

        let v1 = circuit.voltage(NodeId(1)).unwrap();
        assert_relative_eq!(v1.re, 10.0, max_relative = 1e-9);
        assert_relative_eq!(v1.im, 0.0);
    }

    #[test]
    fn test_ac_rc_divider() {
        // 1 kOhm in series with 1 uF to ground at w = 1000 rad/s:
        // Zc = -j1000, so V2 = 10 * Zc / (R + Zc) = 5 - 5j.
        let mut circuit = CircuitModel::new(1000.0);
        circuit.add_source(NodeId(1), NodeId::GROUND, 10.0).unwrap();
        circuit.add_resistor(NodeId(1), NodeId(2), 1000.0).unwrap();
        circuit
            .add_capacitor(NodeId(2), NodeId::GROUND, 1e-6)
            .unwrap();
        circuit.solve().unwrap();

        let v2 = circuit.voltage(NodeId(2)).unwrap();
        assert_relative_eq!(v2.re, 5.0, max_relative = 1e-9);
        assert_relative_eq!(v2.im, -5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_ac_rl_divider() {
        // Zl = j1000 at w = 1000, L = 1 H: V2 = 10 * Zl / (R + Zl) = 5 + 5j.
        let mut circuit = CircuitModel::new(1000.0);
        circuit.add_source(NodeId(1), NodeId::GROUND, 10.0).unwrap();
        circuit.add_resistor(NodeId(1), NodeId(2), 1000.0).unwrap();
        circuit
            .add_inductor(NodeId(2), NodeId::GROUND, 1.0)
            .unwrap();
        circuit.solve().unwrap();

        let v2 = circuit.voltage(NodeId(2)).unwrap();
        assert_relative_eq!(v2.re, 5.0, max_relative = 1e-9);
        assert_relative_eq!(v2.im, 5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_reversed_source_negates_forced_voltage() {
        let mut circuit = CircuitModel::dc();
        circuit.add_source(NodeId::GROUND, NodeId(1), 5.0).unwrap();
        circuit
            .add_resistor(NodeId(1), NodeId::GROUND, 10.0)
            .unwrap();
        circuit.solve().unwrap();

        let v1 = circuit.voltage(NodeId(1)).unwrap();
        assert_relative_eq!(v1.re, -5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_node_voltages_idempotent_after_solve() {
        let mut circuit = CircuitModel::dc();
        circuit.add_source(NodeId(1), NodeId::GROUND, 5.0).unwrap();
        circuit.add_resistor(NodeId(1), NodeId(2), 10.0).unwrap();
        circuit
            .add_resistor(NodeId(2), NodeId::GROUND, 10.0)
            .unwrap();
        circuit.solve().unwrap();

        let first = circuit.node_voltages().unwrap().clone();
        let second = circuit.node_voltages().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ground_voltage_is_zero_after_solve() {
        let mut circuit = CircuitModel::dc();
        circuit.add_source(NodeId(1), NodeId::GROUND, 5.0).unwrap();
        circuit
            .add_resistor(NodeId(1), NodeId::GROUND, 10.0)
            .unwrap();
        circuit.solve().unwrap();

        assert_eq!(
            circuit.voltage(NodeId::GROUND),
            Some(Complex64::new(0.0, 0.0))
        );
    }
}
