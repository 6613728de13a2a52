//! A parsed `.qc` file.

use qctk_ir::{Circuit, QubitId, StatMismatch, StatsClaim};

use crate::header::HeaderStats;

/// A circuit together with the `.qc` metadata around it.
#[derive(Debug, Clone)]
pub struct QcCircuit {
    /// The gates, one qubit per `.v` wire.
    pub circuit: Circuit,
    /// Wires listed in `.i`.
    pub inputs: Vec<QubitId>,
    /// Wires listed in `.o`.
    pub outputs: Vec<QubitId>,
    /// Values listed in `.c`.
    pub constants: Vec<String>,
    /// Labels listed in `.ol`.
    pub output_labels: Vec<String>,
    /// Statistics claimed in the comment header.
    pub header: HeaderStats,
}

impl QcCircuit {
    /// Wrap a circuit with every wire as input and output, and no header.
    pub fn new(circuit: Circuit) -> Self {
        let all: Vec<_> = circuit.qubits().iter().map(|q| q.id).collect();
        Self {
            circuit,
            inputs: all.clone(),
            outputs: all,
            constants: vec![],
            output_labels: vec![],
            header: HeaderStats::default(),
        }
    }

    /// The claim of the named section, or of the default section
    /// (`Result`, else the last one) when `section` is `None`.
    pub fn claim(&self, section: Option<&str>) -> Option<StatsClaim> {
        match section {
            Some(label) => self.header.section(label).map(|s| s.claim()),
            None => self.header.claim(),
        }
    }

    /// Check a header section against the circuit body.
    ///
    /// Returns `None` when the header has no such section, or when the
    /// section states no statistics.
    pub fn verify(&self, section: Option<&str>) -> Option<Vec<StatMismatch>> {
        let claim = self.claim(section).filter(|c| !c.is_empty())?;
        Some(self.circuit.stats().check(&claim))
    }
}
