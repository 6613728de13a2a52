//! `PropertySet` and related types for pass communication.
//!
//! Passes share data through a [`PropertySet`]: the target coupling map,
//! the wirings a circuit claims, and the results of analysis passes. Any
//! other value can be stored under its type.
//!
//! # Examples
//!
//! ```
//! use qctk_compile::{CouplingMap, PropertySet};
//! use qctk_ir::Wiring;
//!
//! let props = PropertySet::new()
//!     .with_coupling_map(CouplingMap::linear(3))
//!     .with_wirings(Wiring::identity(3), Wiring::new(vec![2, 1, 0]).unwrap());
//!
//! assert!(props.coupling_map.as_ref().unwrap().is_connected(0, 1));
//! assert!(props.final_wiring.is_some());
//! ```
//!
//! ```
//! use qctk_compile::PropertySet;
//!
//! #[derive(Debug, PartialEq)]
//! struct Cancelled(usize);
//!
//! let mut props = PropertySet::new();
//! props.insert(Cancelled(4));
//! assert_eq!(props.get::<Cancelled>(), Some(&Cancelled(4)));
//! ```

use std::any::{Any, TypeId};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use qctk_ir::{CircuitStats, Wiring};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};
use crate::linalg::Mat2;

/// Target device coupling map.
///
/// Defines which pairs of physical qubits a two-qubit gate may join.
/// Edges are undirected.
///
/// On construction, all-pairs distances and predecessors are computed by
/// BFS from each node, so `distance()` is a lookup and `shortest_path()`
/// is O(distance). After deserialization call
/// [`rebuild_caches()`](Self::rebuild_caches).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingMap {
    /// Connected qubit pairs.
    edges: Vec<(u32, u32)>,
    /// Number of physical qubits.
    num_qubits: u32,
    /// The textual form this map was built from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spec: Option<String>,
    #[serde(skip)]
    adjacency: FxHashMap<u32, Vec<u32>>,
    /// `dist_matrix[from][to]`, or `u32::MAX` if unreachable.
    #[serde(skip)]
    dist_matrix: Vec<Vec<u32>>,
    /// `pred_matrix[from][to]`: the hop before `to` on a shortest path.
    #[serde(skip)]
    pred_matrix: Vec<Vec<u32>>,
}

impl CouplingMap {
    /// Create a coupling map with no edges.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            edges: vec![],
            num_qubits,
            spec: None,
            adjacency: FxHashMap::default(),
            dist_matrix: vec![],
            pred_matrix: vec![],
        }
    }

    /// Add an edge between two qubits.
    ///
    /// Duplicate edges (including reversed pairs) and self-loops are ignored.
    fn add_edge(&mut self, q1: u32, q2: u32) {
        if q1 == q2
            || self
                .edges
                .iter()
                .any(|&(a, b)| (a == q1 && b == q2) || (a == q2 && b == q1))
        {
            return;
        }
        self.edges.push((q1, q2));
        self.adjacency.entry(q1).or_default().push(q2);
        self.adjacency.entry(q2).or_default().push(q1);
    }

    fn precompute_distances(&mut self) {
        let n = self.num_qubits as usize;
        self.dist_matrix = vec![vec![u32::MAX; n]; n];
        self.pred_matrix = vec![vec![u32::MAX; n]; n];

        for src in 0..n {
            self.dist_matrix[src][src] = 0;
            let mut queue = VecDeque::new();
            queue.push_back(src as u32);

            while let Some(current) = queue.pop_front() {
                let cur = current as usize;
                for &neighbor in self.adjacency.get(&current).into_iter().flatten() {
                    let nb = neighbor as usize;
                    if self.dist_matrix[src][nb] == u32::MAX {
                        self.dist_matrix[src][nb] = self.dist_matrix[src][cur] + 1;
                        self.pred_matrix[src][nb] = current;
                        queue.push_back(neighbor);
                    }
                }
            }
        }
    }

    /// Rebuild adjacency and distance tables from the edge list.
    pub fn rebuild_caches(&mut self) {
        self.adjacency.clear();
        for &(q1, q2) in &self.edges {
            self.adjacency.entry(q1).or_default().push(q2);
            self.adjacency.entry(q2).or_default().push(q1);
        }
        self.precompute_distances();
    }

    /// Build from an explicit edge list. Edges must lie within `num_qubits`.
    pub fn from_edges(
        num_qubits: u32,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> CompileResult<Self> {
        let mut map = Self::new(num_qubits);
        for (a, b) in edges {
            if a >= num_qubits || b >= num_qubits {
                return Err(CompileError::InvalidCoupling {
                    spec: format!("{a}-{b}"),
                    reason: format!("edge outside {num_qubits} qubits"),
                });
            }
            map.add_edge(a, b);
        }
        map.precompute_distances();
        Ok(map)
    }

    /// Linear chain `0-1-2-…`.
    pub fn linear(n: u32) -> Self {
        let mut map = Self::new(n);
        for i in 0..n.saturating_sub(1) {
            map.add_edge(i, i + 1);
        }
        map.precompute_distances();
        map
    }

    /// Linear chain closed into a cycle.
    pub fn ring(n: u32) -> Self {
        let mut map = Self::linear(n);
        if n > 2 {
            map.add_edge(n - 1, 0);
            map.precompute_distances();
        }
        map
    }

    /// Qubit 0 joined to every other qubit.
    pub fn star(n: u32) -> Self {
        let mut map = Self::new(n);
        for i in 1..n {
            map.add_edge(0, i);
        }
        map.precompute_distances();
        map
    }

    /// `rows x cols` grid, numbered row by row.
    pub fn grid(rows: u32, cols: u32) -> Self {
        let mut map = Self::new(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let q = r * cols + c;
                if c + 1 < cols {
                    map.add_edge(q, q + 1);
                }
                if r + 1 < rows {
                    map.add_edge(q, q + cols);
                }
            }
        }
        map.precompute_distances();
        map
    }

    /// All-to-all connectivity.
    pub fn full(n: u32) -> Self {
        let mut map = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                map.add_edge(i, j);
            }
        }
        map.precompute_distances();
        map
    }

    /// Parse `linear:5`, `ring:8`, `grid:3x4`, `full:6`, `star:5` or
    /// `edges:0-1,1-2`.
    pub fn parse(spec: &str) -> CompileResult<Self> {
        let invalid = |reason: &str| CompileError::InvalidCoupling {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };
        let count = |s: &str| {
            s.trim()
                .parse::<u32>()
                .map_err(|_| invalid(&format!("'{s}' is not a qubit count")))
        };

        let (kind, arg) = spec
            .split_once(':')
            .ok_or_else(|| invalid("expected '<kind>:<size>'"))?;
        let mut map = match kind.trim().to_ascii_lowercase().as_str() {
            "linear" | "line" => Self::linear(count(arg)?),
            "ring" => Self::ring(count(arg)?),
            "star" => Self::star(count(arg)?),
            "full" | "all" => Self::full(count(arg)?),
            "grid" => {
                let (rows, cols) = arg
                    .split_once(['x', 'X'])
                    .ok_or_else(|| invalid("grid size must be '<rows>x<cols>'"))?;
                Self::grid(count(rows)?, count(cols)?)
            }
            "edges" => {
                let mut edges = vec![];
                for pair in arg.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                    let (a, b) = pair
                        .split_once('-')
                        .ok_or_else(|| invalid(&format!("'{pair}' is not an edge 'a-b'")))?;
                    edges.push((count(a)?, count(b)?));
                }
                let n = edges.iter().map(|&(a, b)| a.max(b) + 1).max().unwrap_or(0);
                Self::from_edges(n, edges)?
            }
            other => return Err(invalid(&format!("unknown topology '{other}'"))),
        };
        map.spec = Some(spec.trim().to_string());
        Ok(map)
    }

    /// Check if two qubits are directly connected.
    #[inline]
    pub fn is_connected(&self, q1: u32, q2: u32) -> bool {
        self.adjacency
            .get(&q1)
            .is_some_and(|neighbors| neighbors.contains(&q2))
    }

    /// Whether every qubit can reach every other.
    pub fn is_connected_graph(&self) -> bool {
        let mut graph = UnGraph::<(), ()>::with_capacity(self.num_qubits as usize, self.edges.len());
        for _ in 0..self.num_qubits {
            graph.add_node(());
        }
        graph.extend_with_edges(self.edges.iter().copied());
        connected_components(&graph) <= 1
    }

    /// Whether every pair of qubits is directly coupled.
    pub fn is_complete(&self) -> bool {
        let n = u64::from(self.num_qubits);
        self.edges.len() as u64 == n * n.saturating_sub(1) / 2
    }

    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Get neighbors of a qubit.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(&qubit)
            .map(|v| v.iter().copied())
            .into_iter()
            .flatten()
    }

    /// Shortest-path distance, or `None` if unreachable.
    pub fn distance(&self, from: u32, to: u32) -> Option<u32> {
        if from == to {
            return Some(0);
        }
        let d = *self.dist_matrix.get(from as usize)?.get(to as usize)?;
        (d != u32::MAX).then_some(d)
    }

    /// A shortest path `from, …, to`, or `None` if unreachable.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        if from == to {
            return Some(vec![from]);
        }
        self.distance(from, to)?;

        let preds = &self.pred_matrix[from as usize];
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            let pred = preds[current as usize];
            if pred == u32::MAX {
                return None;
            }
            path.push(pred);
            current = pred;
        }
        path.reverse();
        Some(path)
    }
}

impl FromStr for CouplingMap {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CouplingMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.spec {
            Some(spec) => f.write_str(spec),
            None => write!(f, "{} qubits, {} edges", self.num_qubits, self.edges.len()),
        }
    }
}

/// Properties shared between compilation passes.
///
/// | Field | Set by | Read by |
/// |-------|--------|---------|
/// | `coupling_map` | caller | `ConnectivityCheck`, `WiringSynthesis` |
/// | `initial_wiring`, `final_wiring` | caller | `WiringCheck` |
/// | `stats` | `StatsAnalysis` | caller |
/// | `linear_map` | `LinearMapAnalysis` | `WiringCheck` |
///
/// Other values are stored by type with [`insert`](Self::insert) and
/// [`get`](Self::get); one value per type.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Target coupling map.
    pub coupling_map: Option<CouplingMap>,

    /// Where each logical qubit starts.
    pub initial_wiring: Option<Wiring>,

    /// Where each logical qubit is claimed to end.
    pub final_wiring: Option<Wiring>,

    /// Statistics of the circuit as last analysed.
    pub stats: Option<CircuitStats>,

    /// Parity matrix of a CNOT/SWAP circuit, rows indexed by output wire.
    pub linear_map: Option<Mat2>,

    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_coupling_map(mut self, coupling_map: CouplingMap) -> Self {
        self.coupling_map = Some(coupling_map);
        self
    }

    #[must_use]
    pub fn with_wirings(mut self, initial: Wiring, final_: Wiring) -> Self {
        self.initial_wiring = Some(initial);
        self.final_wiring = Some(final_);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}
