//! CNOT and SWAP networks for linear reversible maps.

use crate::error::{CompileError, CompileResult};

use super::mat2::Mat2;

/// A CNOT network implementing an invertible parity map.
///
/// Gates are `(control, target)` in circuit order. Running them on
/// wires `0..n` from the identity yields `m`.
pub fn to_cnots(m: &Mat2) -> CompileResult<Vec<(usize, usize)>> {
    if m.rows() != m.cols() {
        return Err(CompileError::DimensionMismatch(format!(
            "{}x{} matrix is not square",
            m.rows(),
            m.cols()
        )));
    }
    let mut work = m.clone();
    let mut ops: Vec<(usize, usize)> = vec![];
    if work.gauss(true, &mut ops) < m.rows() {
        return Err(CompileError::Singular);
    }
    // The reduction takes m to the identity; undoing it in reverse order
    // builds m from the identity. Each row addition is its own inverse.
    ops.reverse();
    Ok(ops)
}

/// Swaps moving the content of wire `i` to wire `perm[i]`.
///
/// Uses at most `n - 1` swaps. `perm` must be a permutation of `0..n`.
pub fn permutation_as_swaps(perm: &[u32]) -> CompileResult<Vec<(usize, usize)>> {
    let n = perm.len();
    let mut source_of = vec![usize::MAX; n];
    for (i, &p) in perm.iter().enumerate() {
        let p = p as usize;
        if p >= n || source_of[p] != usize::MAX {
            return Err(CompileError::DimensionMismatch(format!(
                "{perm:?} is not a permutation"
            )));
        }
        source_of[p] = i;
    }

    // content_at[w]: original wire whose content sits on w.
    let mut content_at: Vec<usize> = (0..n).collect();
    let mut position_of: Vec<usize> = (0..n).collect();
    let mut swaps = vec![];

    for wire in 0..n {
        let wanted = source_of[wire];
        if content_at[wire] == wanted {
            continue;
        }
        let from = position_of[wanted];
        swaps.push((wire, from));
        let displaced = content_at[wire];
        content_at.swap(wire, from);
        position_of[wanted] = wire;
        position_of[displaced] = from;
    }

    Ok(swaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Parity matrix of a CNOT list on `n` wires.
    fn simulate(n: usize, cnots: &[(usize, usize)]) -> Mat2 {
        let mut m = Mat2::identity(n);
        for &(c, t) in cnots {
            m.row_add(c, t);
        }
        m
    }

    #[test]
    fn test_to_cnots_single() {
        let mut m = Mat2::identity(2);
        m.row_add(0, 1);
        assert_eq!(to_cnots(&m).unwrap(), vec![(0, 1)]);
    }

    #[test]
    fn test_to_cnots_swap_matrix() {
        let m = Mat2::from_permutation(&[1, 0]);
        let cnots = to_cnots(&m).unwrap();
        assert_eq!(cnots.len(), 3);
        assert_eq!(simulate(2, &cnots), m);
    }

    #[test]
    fn test_to_cnots_singular() {
        let m = Mat2::from_rows(vec![vec![1, 1], vec![1, 1]]).unwrap();
        assert!(matches!(to_cnots(&m), Err(CompileError::Singular)));
    }

    #[test]
    fn test_swaps_for_cycle() {
        let perm = [1, 2, 0];
        let swaps = permutation_as_swaps(&perm).unwrap();
        assert_eq!(swaps.len(), 2);

        let mut wires: Vec<usize> = (0..3).collect();
        for (a, b) in swaps {
            wires.swap(a, b);
        }
        for (i, &p) in perm.iter().enumerate() {
            assert_eq!(wires[p as usize], i);
        }
    }

    #[test]
    fn test_swaps_rejects_non_permutation() {
        assert!(permutation_as_swaps(&[0, 0]).is_err());
        assert!(permutation_as_swaps(&[0, 2]).is_err());
        assert!(permutation_as_swaps(&[]).unwrap().is_empty());
    }

    fn arb_invertible(n: usize) -> impl Strategy<Value = Mat2> {
        prop::collection::vec((0..n, 0..n), 0..3 * n).prop_map(move |ops| {
            let mut m = Mat2::identity(n);
            for (a, b) in ops {
                if a != b {
                    m.row_add(a, b);
                }
            }
            m
        })
    }

    proptest! {
        #[test]
        fn prop_to_cnots_reproduces_matrix(m in (1usize..7).prop_flat_map(arb_invertible)) {
            let cnots = to_cnots(&m).unwrap();
            prop_assert_eq!(simulate(m.rows(), &cnots), m);
        }

        #[test]
        fn prop_swaps_realize_permutation(
            perm in (1usize..10).prop_flat_map(|n| Just((0..n as u32).collect::<Vec<u32>>()).prop_shuffle())
        ) {
            let swaps = permutation_as_swaps(&perm).unwrap();
            prop_assert!(swaps.len() < perm.len().max(1));
            let mut wires: Vec<usize> = (0..perm.len()).collect();
            for (a, b) in swaps {
                wires.swap(a, b);
            }
            for (i, &p) in perm.iter().enumerate() {
                prop_assert_eq!(wires[p as usize], i);
            }
        }
    }
}
