//! CZ network synthesis.
//!
//! A product of CZ gates is a symmetric adjacency matrix over GF(2): entry
//! `(i, j)` is set when an odd number of `CZ(i, j)` occur. Conjugating a
//! block of CZs on wire `j` by `CNOT(i, j)` adds the same CZs on wire `i`,
//! so rows sharing many neighbours can be cleared two at a time.

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

use super::mat2::Mat2;

/// A gate produced by CZ synthesis, on wire indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthGate {
    /// `CNOT(control, target)`.
    Cnot(usize, usize),
    /// `CZ(a, b)`.
    Cz(usize, usize),
}

/// Neighbours `k ∉ {i, j}` adjacent to both `i` and `j`.
fn common_neighbours(cz: &Mat2, i: usize, j: usize) -> Vec<usize> {
    (0..cz.cols())
        .filter(|&k| k != i && k != j && cz.get(i, k) && cz.get(j, k))
        .collect()
}

fn degree(cz: &Mat2, i: usize) -> usize {
    (0..cz.cols()).filter(|&k| cz.get(i, k)).count()
}

/// The pair of rows with the largest common neighbourhood, and its size.
///
/// Ties go to the lexicographically first pair. Within the pair the row
/// with more CZs comes first (it becomes the CNOT control); equal rows
/// keep index order.
pub fn max_overlap(cz: &Mat2) -> Option<((usize, usize), usize)> {
    let n = cz.rows();
    let mut best: Option<((usize, usize), usize)> = None;
    for i in 0..n {
        for j in i + 1..n {
            let overlap = common_neighbours(cz, i, j).len();
            if best.is_none_or(|(_, b)| overlap > b) {
                let pair = if degree(cz, i) < degree(cz, j) {
                    (j, i)
                } else {
                    (i, j)
                };
                best = Some((pair, overlap));
            }
        }
    }
    best
}

/// Synthesize the CZ network `cz` as CZ and CNOT gates.
///
/// Without `optimize` this is one CZ per set entry above the diagonal.
/// With it, while two rows share more than two neighbours, the shared part
/// is emitted as `CNOT(i, j)`, `CZ(j, k)` for each common `k`, `CNOT(i, j)`.
pub fn synthesize_cz(cz: &Mat2, optimize: bool) -> CompileResult<Vec<SynthGate>> {
    let n = cz.rows();
    if cz.cols() != n {
        return Err(CompileError::DimensionMismatch(format!(
            "CZ matrix is {n}x{}",
            cz.cols()
        )));
    }
    if *cz != cz.transpose() {
        return Err(CompileError::DimensionMismatch(
            "CZ matrix is not symmetric".into(),
        ));
    }

    let mut work = cz.clone();
    let mut gates = vec![];

    if optimize {
        while let Some(((i, j), overlap)) = max_overlap(&work) {
            if overlap <= 2 {
                break;
            }
            let shared = common_neighbours(&work, i, j);
            gates.push(SynthGate::Cnot(i, j));
            for &k in &shared {
                gates.push(SynthGate::Cz(j, k));
                for (a, b) in [(i, k), (k, i), (j, k), (k, j)] {
                    work.set(a, b, false);
                }
            }
            gates.push(SynthGate::Cnot(i, j));
        }
    }

    for a in 0..n {
        for b in a + 1..n {
            if work.get(a, b) {
                gates.push(SynthGate::Cz(a, b));
            }
        }
    }

    Ok(gates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_edges(n: usize, edges: &[(usize, usize)]) -> Mat2 {
        let mut m = Mat2::zeros(n, n);
        for &(a, b) in edges {
            m.set(a, b, !m.get(a, b));
            m.set(b, a, !m.get(b, a));
        }
        m
    }

    /// Diagonal phase function of a gate list, as the set of CZ edges it
    /// implements. CNOTs must come in conjugating pairs.
    fn implemented(n: usize, gates: &[SynthGate]) -> Mat2 {
        // Track each wire as a parity over inputs and accumulate CZ terms
        // x_a * x_b over the expanded parities.
        let mut parity = Mat2::identity(n);
        let mut phase = Mat2::zeros(n, n);
        for gate in gates {
            match *gate {
                SynthGate::Cnot(c, t) => parity.row_add(c, t),
                SynthGate::Cz(a, b) => {
                    for u in (0..n).filter(|&u| parity.get(a, u)) {
                        for v in (0..n).filter(|&v| parity.get(b, v)) {
                            if u != v {
                                let (lo, hi) = (u.min(v), u.max(v));
                                phase.set(lo, hi, !phase.get(lo, hi));
                            }
                        }
                    }
                }
            }
        }
        assert!(parity.is_identity(), "CNOTs must cancel");
        // Symmetrize the upper triangle.
        for a in 0..n {
            for b in a + 1..n {
                let bit = phase.get(a, b);
                phase.set(b, a, bit);
            }
        }
        phase
    }

    #[test]
    fn test_plain_synthesis() {
        let cz = from_edges(3, &[(0, 1), (1, 2)]);
        let gates = synthesize_cz(&cz, false).unwrap();
        assert_eq!(gates, vec![SynthGate::Cz(0, 1), SynthGate::Cz(1, 2)]);
    }

    #[test]
    fn test_max_overlap() {
        let cz = from_edges(5, &[(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4)]);
        assert_eq!(max_overlap(&cz), Some(((0, 1), 3)));
        assert_eq!(max_overlap(&Mat2::zeros(1, 1)), None);
    }

    #[test]
    fn test_max_overlap_puts_busier_row_first() {
        let cz = from_edges(
            6,
            &[(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (1, 5)],
        );
        assert_eq!(max_overlap(&cz), Some(((1, 0), 3)));

        let gates = synthesize_cz(&cz, true).unwrap();
        assert_eq!(gates[0], SynthGate::Cnot(1, 0));
        assert_eq!(implemented(6, &gates), cz);
    }

    #[test]
    fn test_optimized_synthesis_saves_gates() {
        // Two hubs sharing four neighbours: 8 CZs plainly, 6 gates with the
        // CNOT trick.
        let edges: Vec<_> = (2..6).flat_map(|k| [(0, k), (1, k)]).collect();
        let cz = from_edges(6, &edges);

        let plain = synthesize_cz(&cz, false).unwrap();
        let optimized = synthesize_cz(&cz, true).unwrap();
        assert_eq!(plain.len(), 8);
        assert_eq!(optimized.len(), 6);
        assert_eq!(implemented(6, &optimized), cz);
    }

    #[test]
    fn test_small_overlap_left_alone() {
        let cz = from_edges(4, &[(0, 2), (0, 3), (1, 2), (1, 3)]);
        let optimized = synthesize_cz(&cz, true).unwrap();
        assert_eq!(optimized.len(), 4);
        assert_eq!(implemented(4, &optimized), cz);
    }

    #[test]
    fn test_asymmetric_rejected() {
        let mut cz = Mat2::zeros(2, 2);
        cz.set(0, 1, true);
        assert!(synthesize_cz(&cz, false).is_err());
    }
}
