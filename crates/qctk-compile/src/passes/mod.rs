//! Built-in compilation passes.
//!
//! Passes are organized into two categories:
//! - [`agnostic`]: passes that look only at the circuit
//! - [`target`]: passes that need a coupling map

pub mod agnostic;
pub mod target;

use qctk_ir::{CircuitDag, QubitId};
use rustc_hash::FxHashMap;

pub use agnostic::{
    CancelInverses, CzSynthesis, LinearMapAnalysis, MergePhases, StatsAnalysis,
    SwapDecomposition, WiringCheck, WiringReport, linear_map,
};
pub use target::{ConnectivityCheck, WiringMethod, WiringSynthesis, synthesize_wiring};

/// Position of each qubit in the DAG's qubit order: its wire index.
pub(crate) fn wire_positions(dag: &CircuitDag) -> FxHashMap<QubitId, usize> {
    dag.qubits().enumerate().map(|(i, q)| (q, i)).collect()
}
