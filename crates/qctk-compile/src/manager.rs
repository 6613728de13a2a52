//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use qctk_ir::{CircuitDag, Wiring};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::passes::{
    CancelInverses, ConnectivityCheck, CzSynthesis, LinearMapAnalysis, MergePhases,
    StatsAnalysis, WiringCheck,
};
use crate::property::{CouplingMap, PropertySet};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given DAG.
    #[instrument(skip(self, dag, properties))]
    pub fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            dag.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(dag, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(dag, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), dag.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            dag.depth(),
            dag.num_ops()
        );

        Ok(())
    }

    /// Names of the passes, in run order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a group of passes repeatedly until the circuit stops changing.
pub struct FixedPoint {
    passes: Vec<Box<dyn Pass>>,
    max_rounds: usize,
}

impl FixedPoint {
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Self {
        Self {
            passes,
            max_rounds: 32,
        }
    }

    /// Give up after `rounds` rounds even if the circuit still changes.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }
}

impl Pass for FixedPoint {
    fn name(&self) -> &'static str {
        "FixedPoint"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        for round in 1..=self.max_rounds {
            let before = dag.instructions();
            for pass in &self.passes {
                if pass.should_run(dag, properties) {
                    pass.run(dag, properties)?;
                }
            }
            if dag.instructions() == before {
                debug!("fixed point reached after {round} rounds");
                return Ok(());
            }
        }
        debug!("stopped after {} rounds without a fixed point", self.max_rounds);
        Ok(())
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-3).
    optimization_level: u8,
    /// Label for the recorded statistics.
    circuit_name: String,
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            circuit_name: "circuit".into(),
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: analysis only
    /// - Level 1: cancel inverse pairs, merge phase runs (default)
    /// - Level 2: also re-synthesize CZ blocks
    /// - Level 3: repeat the level 2 cleanups to a fixed point
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Label the statistics recorded by the final analysis.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.circuit_name = name.into();
        self
    }

    /// Check gates against a coupling map after optimizing.
    #[must_use]
    pub fn with_coupling_map(mut self, coupling_map: CouplingMap) -> Self {
        self.properties.coupling_map = Some(coupling_map);
        self
    }

    /// Verify a wiring claim after optimizing. The circuit must be linear.
    #[must_use]
    pub fn with_wirings(mut self, initial: Wiring, final_: Wiring) -> Self {
        self.properties.initial_wiring = Some(initial);
        self.properties.final_wiring = Some(final_);
        self
    }

    /// Start from an existing property set.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        match self.optimization_level {
            0 => {}
            1 => {
                pm.add_pass(CancelInverses);
                pm.add_pass(MergePhases);
            }
            2 => {
                pm.add_pass(CancelInverses);
                pm.add_pass(MergePhases);
                pm.add_pass(CzSynthesis);
            }
            _ => pm.add_pass(FixedPoint::new(vec![
                Box::new(CancelInverses),
                Box::new(MergePhases),
                Box::new(CzSynthesis),
            ])),
        }

        // Analyses run last so they describe the output circuit.
        if self.properties.coupling_map.is_some() {
            pm.add_pass(ConnectivityCheck);
        }
        if self.properties.initial_wiring.is_some() && self.properties.final_wiring.is_some() {
            pm.add_pass(LinearMapAnalysis);
            pm.add_pass(WiringCheck);
        }
        pm.add_pass(StatsAnalysis::new(self.circuit_name));

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
