//! qctk Circuit Intermediate Representation
//!
//! This crate provides the core data structures shared by the `.qc` and
//! OpenQASM 2.0 front ends and the compile passes.
//!
//! # Overview
//!
//! Circuits are stored as a DAG whose edges are qubit wires. Depth and
//! T-depth are longest-path computations over that DAG, which is also
//! what the passes in `qctk-compile` rewrite.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] and [`Qubit`] (wire names or `reg[idx]` labels)
//! - **Gates**: [`StandardGate`], grouped into [`GateFamily`] for counting
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//! - **Statistics**: [`CircuitStats`], [`StatsClaim`], [`StatsDelta`]
//! - **Wiring**: [`Wiring`], a logical-to-physical permutation
//!
//! # Example: T-depth of a Toffoli fragment
//!
//! ```rust
//! use qctk_ir::{Circuit, GateFamily, QubitId};
//!
//! let mut circuit = Circuit::with_size("fragment", 3);
//! let (a, b, t) = (QubitId(0), QubitId(1), QubitId(2));
//! circuit.h(t).unwrap();
//! circuit.cx(b, t).unwrap();
//! circuit.tdg(t).unwrap();
//! circuit.cx(a, t).unwrap();
//! circuit.t(t).unwrap();
//!
//! let stats = circuit.stats();
//! assert_eq!(stats.count(GateFamily::T), 2);
//! assert_eq!(stats.t_depth, 2);
//! assert_eq!(stats.depth, 5);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Family |
//! |------|--------|--------|
//! | `H` | 1 | `H` |
//! | `X`, `Y`, `Z` | 1 | `X`, `Y`, `Z` |
//! | `S`, `Sdg` | 1 | `S` |
//! | `T`, `Tdg` | 1 | `T` |
//! | `CX` | 2 | `cnot` |
//! | `CZ` | 2 | `cz` |
//! | `Swap` | 2 | `swap` |
//! | `CCX`, `Mcx` | 3+ | `tof` |
//! | `CCZ` | 3 | `ccz` |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod stats;
pub mod wiring;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::{GateFamily, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Qubit, QubitId};
pub use stats::{CircuitStats, DeltaRow, StatMismatch, StatsClaim, StatsDelta};
pub use wiring::Wiring;
