//! Analysis, optimization and wiring synthesis for qctk circuits.
//!
//! Passes run over a [`CircuitDag`](qctk_ir::CircuitDag) and talk to each
//! other through a [`PropertySet`]. A [`PassManagerBuilder`] assembles the
//! standard pipeline for an optimization level; analysis passes always run
//! last so that recorded statistics describe the output.
//!
//! ```text
//! Circuit ──► PassManager ◄── PropertySet (coupling map, wirings)
//!                 │
//!                 ├── CancelInverses / MergePhases     (level ≥ 1)
//!                 ├── CzSynthesis                      (level ≥ 2)
//!                 ├── FixedPoint[…]                    (level 3)
//!                 ├── ConnectivityCheck                (coupling map set)
//!                 ├── LinearMapAnalysis + WiringCheck  (wirings set)
//!                 └── StatsAnalysis
//! ```
//!
//! # Example
//!
//! ```rust
//! use qctk_compile::PassManagerBuilder;
//! use qctk_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("demo", 2);
//! circuit.t(QubitId(0)).unwrap();
//! circuit.t(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let (pm, mut props) = PassManagerBuilder::new().with_optimization_level(1).build();
//! let mut dag = circuit.into_dag();
//! pm.run(&mut dag, &mut props).unwrap();
//!
//! let stats = props.stats.unwrap();
//! assert_eq!(stats.t_count, 0);
//! assert_eq!(stats.total_gates, 2);
//! ```
//!
//! # Wiring synthesis
//!
//! ```rust
//! use qctk_compile::{CouplingMap, WiringMethod, synthesize_wiring};
//! use qctk_ir::Wiring;
//!
//! let initial = Wiring::identity(3);
//! let final_ = Wiring::new(vec![2, 1, 0]).unwrap();
//! let map = CouplingMap::parse("linear:3").unwrap();
//!
//! let circuit = synthesize_wiring(&initial, &final_, WiringMethod::Swaps, Some(&map)).unwrap();
//! assert_eq!(circuit.num_ops(), 9);
//! ```
//!
//! # Custom passes
//!
//! ```rust
//! use qctk_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use qctk_ir::CircuitDag;
//!
//! struct CountOps;
//!
//! impl Pass for CountOps {
//!     fn name(&self) -> &str { "count_ops" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, dag: &mut CircuitDag, props: &mut PropertySet) -> CompileResult<()> {
//!         props.insert(dag.num_ops());
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod linalg;
pub mod manager;
pub mod pass;
pub mod property;

// Built-in passes
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::{FixedPoint, PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use passes::{WiringMethod, WiringReport, synthesize_wiring};
pub use property::{CouplingMap, PropertySet};
