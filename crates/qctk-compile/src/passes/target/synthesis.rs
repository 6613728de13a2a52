//! CNOT networks that move qubits from one wiring to another.

use std::fmt;
use std::str::FromStr;

use qctk_ir::{Circuit, CircuitDag, Instruction, QubitId, Wiring};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CompileError, CompileResult};
use crate::linalg::{Mat2, permutation_as_swaps, to_cnots};
use crate::pass::{Pass, PassKind};
use crate::property::{CouplingMap, PropertySet};

/// How a wiring network is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WiringMethod {
    /// Swaps along coupling-map paths, three CNOTs each.
    #[default]
    Swaps,
    /// Gaussian elimination of the permutation matrix. All-to-all only.
    Gauss,
}

impl WiringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WiringMethod::Swaps => "swaps",
            WiringMethod::Gauss => "gauss",
        }
    }
}

impl fmt::Display for WiringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WiringMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "swaps" | "swap" => Ok(WiringMethod::Swaps),
            "gauss" | "gaussian" => Ok(WiringMethod::Gauss),
            other => Err(format!("unknown wiring method '{other}' (expected swaps or gauss)")),
        }
    }
}

/// Build a CNOT-only circuit taking each logical qubit `l` from physical
/// wire `initial[l]` to `final_[l]`.
///
/// Without a coupling map every pair of wires is assumed coupled.
pub fn synthesize_wiring(
    initial: &Wiring,
    final_: &Wiring,
    method: WiringMethod,
    coupling_map: Option<&CouplingMap>,
) -> CompileResult<Circuit> {
    if initial.len() != final_.len() {
        return Err(CompileError::WiringSize {
            wiring: final_.len(),
            qubits: initial.len(),
        });
    }
    let n = initial.len();
    if let Some(map) = coupling_map {
        if n > map.num_qubits() as usize {
            return Err(CompileError::TooManyQubits {
                needed: n,
                available: map.num_qubits(),
            });
        }
    }

    // Content on wire p must travel to perm[p].
    let perm = initial.inverse().then(final_)?;
    let width = u32::try_from(n).map_err(|_| CompileError::TooManyQubits {
        needed: n,
        available: u32::MAX,
    })?;
    let mut circuit = Circuit::with_size("wiring", width);
    let wire = |i: usize| QubitId(i as u32);

    match method {
        WiringMethod::Swaps => {
            if let Some(map) = coupling_map.filter(|m| !m.is_connected_graph()) {
                warn!("coupling map {map} is disconnected");
            }
            for (a, b) in permutation_as_swaps(perm.as_slice())? {
                for (x, y) in routed_swap(a, b, coupling_map)? {
                    circuit.cx(wire(x), wire(y))?;
                    circuit.cx(wire(y), wire(x))?;
                    circuit.cx(wire(x), wire(y))?;
                }
            }
        }
        WiringMethod::Gauss => {
            if let Some(map) = coupling_map.filter(|m| !m.is_complete()) {
                return Err(CompileError::UnsupportedMethod {
                    method: "gauss",
                    reason: format!("coupling map {map} is not all-to-all"),
                });
            }
            let m = Mat2::from_permutation(perm.as_slice());
            for (control, target) in to_cnots(&m)? {
                circuit.cx(wire(control), wire(target))?;
            }
        }
    }

    debug!(
        method = method.as_str(),
        cnots = circuit.num_ops(),
        "wiring network built"
    );
    Ok(circuit)
}

/// Adjacent swaps exchanging the contents of `a` and `b`.
///
/// Along a path `a = p0, …, pk = b` the content of `a` is carried forward
/// and the content of `b` carried back, `2k - 1` swaps in all.
fn routed_swap(
    a: usize,
    b: usize,
    coupling_map: Option<&CouplingMap>,
) -> CompileResult<Vec<(usize, usize)>> {
    let Some(map) = coupling_map else {
        return Ok(vec![(a, b)]);
    };
    let (from, to) = (a as u32, b as u32);
    let path = map
        .shortest_path(from, to)
        .ok_or(CompileError::NoPath { from, to })?;
    let path: Vec<usize> = path.into_iter().map(|p| p as usize).collect();
    let hops = path.len() - 1;

    let mut swaps: Vec<(usize, usize)> = (0..hops).map(|i| (path[i], path[i + 1])).collect();
    swaps.extend((0..hops.saturating_sub(1)).rev().map(|i| (path[i], path[i + 1])));
    Ok(swaps)
}

/// Appends the network moving qubits from `initial_wiring` to
/// `final_wiring`, using the coupling map when one is set.
pub struct WiringSynthesis {
    pub method: WiringMethod,
}

impl Pass for WiringSynthesis {
    fn name(&self) -> &'static str {
        "WiringSynthesis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
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
        if initial.len() != dag.num_qubits() {
            return Err(CompileError::WiringSize {
                wiring: initial.len(),
                qubits: dag.num_qubits(),
            });
        }

        let network = synthesize_wiring(
            initial,
            final_,
            self.method,
            properties.coupling_map.as_ref(),
        )?;
        let qubits: Vec<QubitId> = dag.qubits().collect();
        for inst in network.instructions() {
            let mapped = inst.qubits.iter().map(|q| qubits[q.index()]);
            dag.apply(Instruction {
                kind: inst.kind,
                qubits: mapped.collect(),
            })?;
        }
        Ok(())
    }

    fn should_run(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.initial_wiring.is_some() && properties.final_wiring.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::agnostic::{WiringCheck, WiringReport};

    fn wiring(v: &[u32]) -> Wiring {
        Wiring::new(v.to_vec()).unwrap()
    }

    /// Check a synthesized network with `WiringCheck`.
    fn verified(circuit: Circuit, initial: &Wiring, final_: &Wiring) -> bool {
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new().with_wirings(initial.clone(), final_.clone());
        WiringCheck.run(&mut dag, &mut props).unwrap();
        props.get::<WiringReport>().is_some_and(WiringReport::passed)
    }

    #[test]
    fn test_swaps_all_to_all() {
        let (initial, final_) = (wiring(&[0, 1, 2]), wiring(&[1, 2, 0]));
        let circuit = synthesize_wiring(&initial, &final_, WiringMethod::Swaps, None).unwrap();
        assert_eq!(circuit.num_ops(), 6);
        assert!(verified(circuit, &initial, &final_));
    }

    #[test]
    fn test_swaps_on_linear_chain() {
        let (initial, final_) = (wiring(&[0, 1, 2, 3]), wiring(&[3, 1, 2, 0]));
        let map = CouplingMap::linear(4);
        let circuit =
            synthesize_wiring(&initial, &final_, WiringMethod::Swaps, Some(&map)).unwrap();
        // One swap across three hops: five adjacent swaps.
        assert_eq!(circuit.num_ops(), 15);
        for inst in circuit.instructions() {
            assert!(map.is_connected(inst.qubits[0].0, inst.qubits[1].0));
        }
        assert!(verified(circuit, &initial, &final_));
    }

    #[test]
    fn test_gauss() {
        let (initial, final_) = (wiring(&[2, 0, 1]), wiring(&[0, 1, 2]));
        let circuit = synthesize_wiring(&initial, &final_, WiringMethod::Gauss, None).unwrap();
        assert!(verified(circuit, &initial, &final_));

        let err = synthesize_wiring(
            &initial,
            &final_,
            WiringMethod::Gauss,
            Some(&CouplingMap::linear(3)),
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedMethod { method: "gauss", .. }));
    }

    #[test]
    fn test_identity_needs_nothing() {
        let w = wiring(&[1, 0]);
        for method in [WiringMethod::Swaps, WiringMethod::Gauss] {
            assert_eq!(synthesize_wiring(&w, &w, method, None).unwrap().num_ops(), 0);
        }
    }

    #[test]
    fn test_unreachable_and_mismatched() {
        let map = CouplingMap::from_edges(2, Vec::new()).unwrap();
        let err = synthesize_wiring(&wiring(&[0, 1]), &wiring(&[1, 0]), WiringMethod::Swaps, Some(&map))
            .unwrap_err();
        assert!(matches!(err, CompileError::NoPath { from: 0, to: 1 }));

        let err = synthesize_wiring(&wiring(&[0]), &wiring(&[1, 0]), WiringMethod::Swaps, None)
            .unwrap_err();
        assert!(matches!(err, CompileError::WiringSize { .. }));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("Gauss".parse::<WiringMethod>(), Ok(WiringMethod::Gauss));
        assert_eq!("swaps".parse::<WiringMethod>(), Ok(WiringMethod::Swaps));
        assert!("magic".parse::<WiringMethod>().is_err());
    }

    #[test]
    fn test_pass_appends_network() {
        let mut dag = Circuit::with_size("w", 2).into_dag();
        let mut props = PropertySet::new().with_wirings(wiring(&[0, 1]), wiring(&[1, 0]));
        let pass = WiringSynthesis { method: WiringMethod::Swaps };
        assert!(pass.should_run(&dag, &props));
        pass.run(&mut dag, &mut props).unwrap();
        assert_eq!(dag.num_ops(), 3);
    }
}
