//! Circuit statistics and checks against claimed statistics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::dag::CircuitDag;
use crate::gate::GateFamily;

/// Statistics computed from a circuit body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    /// Circuit name.
    pub name: String,
    /// Number of qubits (declared wires, used or not).
    pub num_qubits: usize,
    /// Gate counts by family. Families with zero gates are omitted.
    pub gate_counts: BTreeMap<GateFamily, usize>,
    /// Gate counts by exact gate name (`t` and `tdg` apart).
    pub counts_by_name: BTreeMap<String, usize>,
    /// Total number of gates, barriers excluded.
    pub total_gates: usize,
    /// Gates acting on two or more qubits.
    pub two_qubit_gates: usize,
    /// Number of T and T-dagger gates.
    pub t_count: usize,
    /// Circuit depth.
    pub depth: usize,
    /// T-depth.
    pub t_depth: usize,
}

impl CircuitStats {
    /// Compute the statistics of a circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self::from_dag(circuit.name(), circuit.dag())
    }

    /// Compute the statistics of a bare DAG.
    pub fn from_dag(name: impl Into<String>, dag: &CircuitDag) -> Self {
        let mut gate_counts = BTreeMap::new();
        let mut counts_by_name = BTreeMap::new();
        let mut total_gates = 0;
        let mut two_qubit_gates = 0;
        let mut t_count = 0;

        for (_, inst) in dag.topological_ops() {
            let Some(gate) = inst.as_gate() else {
                continue;
            };
            total_gates += 1;
            *gate_counts.entry(gate.family()).or_insert(0) += 1;
            *counts_by_name.entry(gate.name().to_string()).or_insert(0) += 1;
            if inst.qubits.len() >= 2 {
                two_qubit_gates += 1;
            }
            if gate.is_t() {
                t_count += 1;
            }
        }

        Self {
            name: name.into(),
            num_qubits: dag.num_qubits(),
            gate_counts,
            counts_by_name,
            total_gates,
            two_qubit_gates,
            t_count,
            depth: dag.depth(),
            t_depth: dag.t_depth(),
        }
    }

    /// Number of gates in a family.
    pub fn count(&self, family: GateFamily) -> usize {
        self.gate_counts.get(&family).copied().unwrap_or(0)
    }

    /// Compare against a claim. Fields the claim leaves out are not checked.
    pub fn check(&self, claim: &StatsClaim) -> Vec<StatMismatch> {
        let mut mismatches = vec![];
        let mut compare = |field: &str, claimed: Option<usize>, actual: usize| {
            if let Some(claimed) = claimed {
                if claimed != actual {
                    mismatches.push(StatMismatch {
                        field: field.to_string(),
                        claimed,
                        actual,
                    });
                }
            }
        };

        compare("qubits", claim.qubits, self.num_qubits);
        compare("gates", claim.total, self.total_gates);
        for (&family, &claimed) in &claim.gates {
            compare(family.as_str(), Some(claimed), self.count(family));
        }
        compare("depth", claim.depth, self.depth);
        compare("t-depth", claim.t_depth, self.t_depth);

        mismatches
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit: {}", self.name)?;
        writeln!(f, "  Qubits:          {}", self.num_qubits)?;
        writeln!(f, "  Gates:           {}", self.total_gates)?;
        writeln!(f, "  Two-qubit gates: {}", self.two_qubit_gates)?;
        writeln!(f, "  T-count:         {}", self.t_count)?;
        writeln!(f, "  Depth:           {}", self.depth)?;
        write!(f, "  T-depth:         {}", self.t_depth)?;
        for (family, count) in &self.gate_counts {
            write!(f, "\n    {:<6} {count}", family.as_str())?;
        }
        Ok(())
    }
}

/// Statistics a file claims about itself. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsClaim {
    /// Claimed qubit count.
    pub qubits: Option<usize>,
    /// Claimed per-family gate counts.
    pub gates: BTreeMap<GateFamily, usize>,
    /// Claimed total gate count.
    pub total: Option<usize>,
    /// Claimed depth.
    pub depth: Option<usize>,
    /// Claimed T-depth.
    pub t_depth: Option<usize>,
}

impl StatsClaim {
    /// Whether the claim states nothing.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_none()
            && self.gates.is_empty()
            && self.total.is_none()
            && self.depth.is_none()
            && self.t_depth.is_none()
    }

    /// The claim that exactly describes `stats`.
    pub fn from_stats(stats: &CircuitStats) -> Self {
        Self {
            qubits: Some(stats.num_qubits),
            gates: stats.gate_counts.clone(),
            total: Some(stats.total_gates),
            depth: Some(stats.depth),
            t_depth: Some(stats.t_depth),
        }
    }
}

/// A claimed statistic that disagrees with the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatMismatch {
    /// Field name (`qubits`, `depth`, a family name, ...).
    pub field: String,
    /// The claimed value.
    pub claimed: usize,
    /// The value computed from the circuit.
    pub actual: usize,
}

impl fmt::Display for StatMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: claimed {}, actual {}",
            self.field, self.claimed, self.actual
        )
    }
}

/// One row of a before/after comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaRow {
    /// Field name.
    pub field: String,
    /// Value before.
    pub before: usize,
    /// Value after.
    pub after: usize,
}

impl DeltaRow {
    /// Signed change from before to after.
    pub fn change(&self) -> i64 {
        self.after as i64 - self.before as i64
    }
}

/// Field-by-field difference between two sets of statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDelta {
    /// Rows in display order: summary fields, then families.
    pub rows: Vec<DeltaRow>,
}

impl StatsDelta {
    /// Compare `before` with `after`.
    pub fn between(before: &CircuitStats, after: &CircuitStats) -> Self {
        let mut rows = vec![
            row("qubits", before.num_qubits, after.num_qubits),
            row("gates", before.total_gates, after.total_gates),
            row("two-qubit", before.two_qubit_gates, after.two_qubit_gates),
            row("t-count", before.t_count, after.t_count),
            row("depth", before.depth, after.depth),
            row("t-depth", before.t_depth, after.t_depth),
        ];
        for family in GateFamily::ALL {
            let (b, a) = (before.count(family), after.count(family));
            if b != 0 || a != 0 {
                rows.push(row(family.as_str(), b, a));
            }
        }
        Self { rows }
    }

    /// Look up a row by field name.
    pub fn get(&self, field: &str) -> Option<&DeltaRow> {
        self.rows.iter().find(|r| r.field == field)
    }

    /// Whether nothing changed.
    pub fn is_unchanged(&self) -> bool {
        self.rows.iter().all(|r| r.before == r.after)
    }
}

fn row(field: &str, before: usize, after: usize) -> DeltaRow {
    DeltaRow {
        field: field.to_string(),
        before,
        after,
    }
}

impl fmt::Display for StatsDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:>8} {:>8} {:>8}", "", "before", "after", "delta")?;
        for (i, r) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<10} {:>8} {:>8} {:>+8}",
                r.field,
                r.before,
                r.after,
                r.change()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;

    fn sample() -> Circuit {
        let mut c = Circuit::with_size("sample", 3);
        let (a, b, t) = (QubitId(0), QubitId(1), QubitId(2));
        c.h(t).unwrap();
        c.cx(b, t).unwrap();
        c.tdg(t).unwrap();
        c.cx(a, t).unwrap();
        c.t(t).unwrap();
        c.s(a).unwrap();
        c.h(t).unwrap();
        c
    }

    #[test]
    fn test_counts() {
        let stats = sample().stats();
        assert_eq!(stats.num_qubits, 3);
        assert_eq!(stats.total_gates, 7);
        assert_eq!(stats.count(GateFamily::H), 2);
        assert_eq!(stats.count(GateFamily::T), 2);
        assert_eq!(stats.count(GateFamily::Cnot), 2);
        assert_eq!(stats.count(GateFamily::S), 1);
        assert_eq!(stats.count(GateFamily::Tof), 0);
        assert_eq!(stats.counts_by_name["tdg"], 1);
        assert_eq!(stats.two_qubit_gates, 2);
        assert_eq!(stats.t_count, 2);
        assert_eq!(stats.depth, 6);
        assert_eq!(stats.t_depth, 2);
    }

    #[test]
    fn test_check_reports_only_claimed_fields() {
        let stats = sample().stats();
        let mut claim = StatsClaim {
            qubits: Some(3),
            depth: Some(6),
            ..Default::default()
        };
        claim.gates.insert(GateFamily::T, 2);
        assert!(stats.check(&claim).is_empty());

        claim.t_depth = Some(1);
        claim.gates.insert(GateFamily::Cnot, 3);
        let mismatches = stats.check(&claim);
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].field, "cnot");
        assert_eq!(mismatches[1].to_string(), "t-depth: claimed 1, actual 2");
    }

    #[test]
    fn test_exact_claim_matches() {
        let stats = sample().stats();
        assert!(stats.check(&StatsClaim::from_stats(&stats)).is_empty());
        assert!(StatsClaim::default().is_empty());
    }

    #[test]
    fn test_delta() {
        let before = sample().stats();
        let mut smaller = sample();
        smaller.x(QubitId(0)).unwrap();
        let after = smaller.stats();

        let delta = StatsDelta::between(&before, &after);
        assert_eq!(delta.get("gates").unwrap().change(), 1);
        assert_eq!(delta.get("X").unwrap().before, 0);
        assert!(delta.get("Y").is_none());
        assert!(!delta.is_unchanged());
        assert!(StatsDelta::between(&before, &before).is_unchanged());
    }

    #[test]
    fn test_stats_json_uses_family_names() {
        let json = serde_json::to_string(&sample().stats()).unwrap();
        assert!(json.contains("\"cnot\":2"));
        assert!(json.contains("\"t_depth\":2"));
    }
}
