//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gates that appear in `.qc` gate lists and OpenQASM 2.0 CNOT listings.
///
/// None of them carry parameters: phases are restricted to multiples of a
/// quarter (S) or eighth (T) of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Toffoli gate (CCX).
    CCX,
    /// Doubly-controlled Z gate.
    CCZ,
    /// Multi-controlled X with `controls` control qubits; the target is last.
    Mcx {
        /// Number of control qubits.
        controls: u32,
    },
}

impl StandardGate {
    /// Get the OpenQASM-style name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
            StandardGate::CCZ => "ccz",
            StandardGate::Mcx { .. } => "mcx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,

            StandardGate::CCX | StandardGate::CCZ => 3,

            StandardGate::Mcx { controls } => controls + 1,
        }
    }

    /// The statistics family this gate is counted under.
    pub fn family(&self) -> GateFamily {
        match self {
            StandardGate::X => GateFamily::X,
            StandardGate::Y => GateFamily::Y,
            StandardGate::Z => GateFamily::Z,
            StandardGate::H => GateFamily::H,
            StandardGate::S | StandardGate::Sdg => GateFamily::S,
            StandardGate::T | StandardGate::Tdg => GateFamily::T,
            StandardGate::CX => GateFamily::Cnot,
            StandardGate::CZ => GateFamily::Cz,
            StandardGate::Swap => GateFamily::Swap,
            StandardGate::CCX | StandardGate::Mcx { .. } => GateFamily::Tof,
            StandardGate::CCZ => GateFamily::Ccz,
        }
    }

    /// The inverse gate.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            other => *other,
        }
    }

    /// Whether applying the gate twice is the identity.
    #[inline]
    pub fn is_self_inverse(&self) -> bool {
        self.inverse() == *self
    }

    /// Whether the gate is a T or T-dagger.
    #[inline]
    pub fn is_t(&self) -> bool {
        matches!(self, StandardGate::T | StandardGate::Tdg)
    }

    /// Whether the gate is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            StandardGate::Z
                | StandardGate::S
                | StandardGate::Sdg
                | StandardGate::T
                | StandardGate::Tdg
                | StandardGate::CZ
                | StandardGate::CCZ
        )
    }

    /// Whether the gate acts as an invertible linear map on basis states
    /// over GF(2) (no phase, no constant offset).
    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, StandardGate::CX | StandardGate::Swap)
    }

    /// The Z-axis phase of a single-qubit diagonal gate, in eighths of a turn.
    pub fn phase_eighths(&self) -> Option<u8> {
        match self {
            StandardGate::T => Some(1),
            StandardGate::S => Some(2),
            StandardGate::Z => Some(4),
            StandardGate::Sdg => Some(6),
            StandardGate::Tdg => Some(7),
            _ => None,
        }
    }

    /// The shortest gate sequence realizing a Z-axis phase of `eighths / 8`
    /// of a turn. At most one T-like gate is used.
    pub fn from_phase_eighths(eighths: u8) -> Vec<StandardGate> {
        match eighths % 8 {
            0 => vec![],
            1 => vec![StandardGate::T],
            2 => vec![StandardGate::S],
            3 => vec![StandardGate::S, StandardGate::T],
            4 => vec![StandardGate::Z],
            5 => vec![StandardGate::Z, StandardGate::T],
            6 => vec![StandardGate::Sdg],
            _ => vec![StandardGate::Tdg],
        }
    }

    /// Build an X gate with `controls` controls (0 → X, 1 → CX, 2 → CCX).
    pub fn controlled_x(controls: u32) -> StandardGate {
        match controls {
            0 => StandardGate::X,
            1 => StandardGate::CX,
            2 => StandardGate::CCX,
            n => StandardGate::Mcx { controls: n },
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gate families used for statistics.
///
/// `S` counts S and S-dagger, `T` counts T and T-dagger, and `tof` counts
/// Toffoli and every wider multi-controlled X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateFamily {
    #[serde(rename = "H")]
    H,
    #[serde(rename = "X")]
    X,
    #[serde(rename = "Y")]
    Y,
    #[serde(rename = "Z")]
    Z,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "T")]
    T,
    #[serde(rename = "cnot")]
    Cnot,
    #[serde(rename = "cz")]
    Cz,
    #[serde(rename = "swap")]
    Swap,
    #[serde(rename = "tof")]
    Tof,
    #[serde(rename = "ccz")]
    Ccz,
}

impl GateFamily {
    /// All families, in display order.
    pub const ALL: [GateFamily; 11] = [
        GateFamily::H,
        GateFamily::X,
        GateFamily::Y,
        GateFamily::Z,
        GateFamily::S,
        GateFamily::T,
        GateFamily::Cnot,
        GateFamily::Cz,
        GateFamily::Swap,
        GateFamily::Tof,
        GateFamily::Ccz,
    ];

    /// Display name, as used in `.qc` statistics headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            GateFamily::H => "H",
            GateFamily::X => "X",
            GateFamily::Y => "Y",
            GateFamily::Z => "Z",
            GateFamily::S => "S",
            GateFamily::T => "T",
            GateFamily::Cnot => "cnot",
            GateFamily::Cz => "cz",
            GateFamily::Swap => "swap",
            GateFamily::Tof => "tof",
            GateFamily::Ccz => "ccz",
        }
    }

    /// Look up a family by name, case-insensitively. `cx` is accepted for
    /// `cnot`, `toffoli`/`ccx` for `tof`.
    pub fn from_name(name: &str) -> Option<GateFamily> {
        match name.to_ascii_lowercase().as_str() {
            "h" => Some(GateFamily::H),
            "x" => Some(GateFamily::X),
            "y" => Some(GateFamily::Y),
            "z" => Some(GateFamily::Z),
            "s" => Some(GateFamily::S),
            "t" => Some(GateFamily::T),
            "cnot" | "cx" => Some(GateFamily::Cnot),
            "cz" => Some(GateFamily::Cz),
            "swap" => Some(GateFamily::Swap),
            "tof" | "toffoli" | "ccx" => Some(GateFamily::Tof),
            "ccz" => Some(GateFamily::Ccz),
            _ => None,
        }
    }
}

impl fmt::Display for GateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::Mcx { controls: 4 }.num_qubits(), 5);
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(StandardGate::T.inverse(), StandardGate::Tdg);
        assert_eq!(StandardGate::Sdg.inverse(), StandardGate::S);
        assert!(StandardGate::CX.is_self_inverse());
        assert!(!StandardGate::T.is_self_inverse());
    }

    #[test]
    fn test_families_fold_daggers() {
        assert_eq!(StandardGate::Tdg.family(), GateFamily::T);
        assert_eq!(StandardGate::Sdg.family(), GateFamily::S);
        assert_eq!(StandardGate::Mcx { controls: 3 }.family(), GateFamily::Tof);
    }

    #[test]
    fn test_phase_sequences_are_minimal() {
        for k in 0..8u8 {
            let seq = StandardGate::from_phase_eighths(k);
            let total: u32 = seq
                .iter()
                .map(|g| u32::from(g.phase_eighths().unwrap()))
                .sum();
            assert_eq!(total % 8, u32::from(k));
            assert_eq!(seq.iter().filter(|g| g.is_t()).count(), usize::from(k % 2 == 1));
        }
    }

    #[test]
    fn test_family_names() {
        assert_eq!(GateFamily::from_name("CNOT"), Some(GateFamily::Cnot));
        assert_eq!(GateFamily::from_name("cx"), Some(GateFamily::Cnot));
        assert_eq!(GateFamily::from_name("rz"), None);
        for family in GateFamily::ALL {
            assert_eq!(GateFamily::from_name(family.as_str()), Some(family));
        }
    }

    #[test]
    fn test_controlled_x() {
        assert_eq!(StandardGate::controlled_x(0), StandardGate::X);
        assert_eq!(StandardGate::controlled_x(1), StandardGate::CX);
        assert_eq!(StandardGate::controlled_x(2), StandardGate::CCX);
        assert_eq!(
            StandardGate::controlled_x(5),
            StandardGate::Mcx { controls: 5 }
        );
    }
}
