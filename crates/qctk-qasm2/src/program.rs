//! A parsed QASM 2.0 file.

use qctk_ir::{Circuit, Wiring};

/// A circuit together with its wiring annotations.
#[derive(Debug, Clone)]
pub struct Qasm2Circuit {
    /// The gates, one qubit per `qreg` entry in declaration order.
    pub circuit: Circuit,
    /// Wiring from the `Initial wiring` comment.
    pub initial_wiring: Option<Wiring>,
    /// Wiring from the `Resulting wiring` comment.
    pub final_wiring: Option<Wiring>,
    /// Classical registers as `(name, size)`; they carry no operations.
    pub cregs: Vec<(String, u32)>,
}

impl Qasm2Circuit {
    /// Wrap a circuit without annotations.
    pub fn new(circuit: Circuit) -> Self {
        Self {
            circuit,
            initial_wiring: None,
            final_wiring: None,
            cregs: vec![],
        }
    }

    /// Both wirings, if the file states both.
    pub fn wirings(&self) -> Option<(&Wiring, &Wiring)> {
        Some((self.initial_wiring.as_ref()?, self.final_wiring.as_ref()?))
    }
}
