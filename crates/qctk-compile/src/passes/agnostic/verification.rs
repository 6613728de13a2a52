//! Checking wiring claims against a CNOT circuit.
//!
//! A routed CNOT listing records where each logical qubit starts
//! (`initial[l]`) and where it ends (`final[l]`). The claim holds when the
//! circuit's parity matrix is a permutation that carries the content of
//! wire `initial[l]` onto wire `final[l]` for every logical qubit `l`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use qctk_ir::CircuitDag;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

use super::analysis::linear_map;

/// Outcome of [`WiringCheck`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringReport {
    /// Whether the parity matrix is a permutation at all.
    pub is_permutation: bool,
    /// The wire each input wire's content ends on, when it is a permutation.
    pub permutation: Option<Vec<u32>>,
    /// Logical qubits whose claimed final position is wrong.
    pub mismatched: Vec<usize>,
}

impl WiringReport {
    /// Whether the wiring claim holds.
    pub fn passed(&self) -> bool {
        self.is_permutation && self.mismatched.is_empty()
    }
}

impl fmt::Display for WiringReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_permutation {
            return f.write_str("circuit does not permute qubits");
        }
        if self.mismatched.is_empty() {
            return f.write_str("wiring verified");
        }
        let list: Vec<String> = self.mismatched.iter().map(ToString::to_string).collect();
        write!(f, "wrong final wiring for logical qubits {}", list.join(", "))
    }
}

/// Verifies `initial_wiring` and `final_wiring` against the circuit.
///
/// Uses `properties.linear_map` when an earlier pass computed it. The
/// [`WiringReport`] is stored as a custom property.
pub struct WiringCheck;

impl Pass for WiringCheck {
    fn name(&self) -> &'static str {
        "WiringCheck"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let initial = properties
            .initial_wiring
            .as_ref()
            .ok_or(CompileError::MissingWiring("initial"))?;
        let final_ = properties
            .final_wiring
            .as_ref()
            .ok_or(CompileError::MissingWiring("final"))?;
        for wiring in [initial, final_] {
            if wiring.len() != dag.num_qubits() {
                return Err(CompileError::WiringSize {
                    wiring: wiring.len(),
                    qubits: dag.num_qubits(),
                });
            }
        }

        let m = match &properties.linear_map {
            Some(m) => m.clone(),
            None => linear_map(dag)?,
        };

        let permutation = m.as_permutation();
        let mismatched: Vec<usize> = (0..initial.len())
            .filter(|&l| {
                let (Some(from), Some(to)) = (initial.physical(l), final_.physical(l)) else {
                    return true;
                };
                !m.get(to, from)
            })
            .collect();

        let report = WiringReport {
            is_permutation: permutation.is_some(),
            permutation,
            mismatched,
        };
        if report.passed() {
            debug!("wiring verified");
        } else {
            warn!("{report}");
        }
        properties.insert(report);
        Ok(())
    }

    fn should_run(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.initial_wiring.is_some() && properties.final_wiring.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qctk_ir::{Circuit, QubitId, Wiring};

    fn swap01() -> CircuitDag {
        let mut circuit = Circuit::with_size("swap", 3);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.into_dag()
    }

    fn check(dag: &mut CircuitDag, initial: Vec<u32>, final_: Vec<u32>) -> WiringReport {
        let mut props = PropertySet::new()
            .with_wirings(Wiring::new(initial).unwrap(), Wiring::new(final_).unwrap());
        WiringCheck.run(dag, &mut props).unwrap();
        props.remove::<WiringReport>().unwrap()
    }

    #[test]
    fn test_correct_claim() {
        let report = check(&mut swap01(), vec![0, 1, 2], vec![1, 0, 2]);
        assert!(report.passed());
        assert_eq!(report.permutation, Some(vec![1, 0, 2]));
        assert_eq!(report.to_string(), "wiring verified");
    }

    #[test]
    fn test_relabelled_start() {
        // Logical 0 starts on wire 2 and stays; logical 1 moves 0 -> 1.
        let report = check(&mut swap01(), vec![2, 0, 1], vec![2, 1, 0]);
        assert!(report.passed());
    }

    #[test]
    fn test_wrong_claim() {
        let report = check(&mut swap01(), vec![0, 1, 2], vec![0, 1, 2]);
        assert!(!report.passed());
        assert_eq!(report.mismatched, vec![0, 1]);
    }

    #[test]
    fn test_non_permutation() {
        let mut circuit = Circuit::with_size("cx", 2);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let report = check(&mut circuit.into_dag(), vec![0, 1], vec![0, 1]);
        assert!(!report.is_permutation);
        assert!(!report.passed());
    }

    #[test]
    fn test_missing_and_wrong_size() {
        let mut dag = swap01();
        assert!(!WiringCheck.should_run(&dag, &PropertySet::new()));
        let err = WiringCheck.run(&mut dag, &mut PropertySet::new()).unwrap_err();
        assert!(matches!(err, CompileError::MissingWiring("initial")));

        let mut props = PropertySet::new().with_wirings(Wiring::identity(2), Wiring::identity(2));
        let err = WiringCheck.run(&mut dag, &mut props).unwrap_err();
        assert!(matches!(err, CompileError::WiringSize { wiring: 2, qubits: 3 }));
    }
}
