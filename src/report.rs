//! Phasor presentation of solved node voltages.
//!
//! Pure formatting over the solved voltage vector: each complex entry is
//! converted to magnitude and phase angle in degrees (`mag<angle` notation).
//! Nothing here touches the circuit model.

use std::f64::consts::PI;

use nalgebra::DVector;
use num_complex::Complex64;

/// Convert a complex voltage to (magnitude, phase angle in degrees).
///
/// Zero maps to (0, 0). Purely imaginary values map to +-90 degrees and
/// purely real values to 0 or 180; magnitudes are always nonnegative. The
/// general case resolves the phase by sign quadrant, yielding angles in
/// (-180, 180].
pub fn to_polar(v: Complex64) -> (f64, f64) {
    if v.re == 0.0 {
        if v.im == 0.0 {
            return (0.0, 0.0);
        }
        return (v.im.abs(), if v.im < 0.0 { -90.0 } else { 90.0 });
    }
    if v.im == 0.0 {
        return (v.re.abs(), if v.re < 0.0 { 180.0 } else { 0.0 });
    }

    let mag = v.norm();
    let theta = if v.re > 0.0 {
        // Right half-plane: quadrants I and IV.
        (v.im / v.re).atan()
    } else if v.im > 0.0 {
        // Quadrant II.
        PI - (v.im / -v.re).atan()
    } else {
        // Quadrant III.
        (v.im / v.re).atan() - PI
    };

    (mag, theta * 180.0 / PI)
}

/// Render a single node voltage as `V<node> = <mag><<angle>`.
///
/// `node` is the 1-based node number. An exactly-zero voltage renders as
/// `V<node> = 0<0`.
pub fn format_voltage(node: usize, v: Complex64) -> String {
    let (mag, angle) = to_polar(v);
    if mag == 0.0 {
        format!("V{node} = 0<0")
    } else {
        format!("V{node} = {mag:.6}<{angle:.6}")
    }
}

/// Render a solved voltage vector, one line per node, 1-based labels.
pub fn format_voltages(voltages: &DVector<Complex64>) -> Vec<String> {
    voltages
        .iter()
        .enumerate()
        .map(|(i, v)| format_voltage(i + 1, *v))
        .collect()
}
