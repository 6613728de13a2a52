//! Logical-to-physical qubit wirings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A permutation mapping logical qubit `l` to physical qubit `wiring[l]`.
///
/// Always a permutation of `0..n`; construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Wiring(Vec<u32>);

impl Wiring {
    /// The identity wiring on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self((0..n as u32).collect())
    }

    /// Validate and wrap a permutation vector.
    pub fn new(map: Vec<u32>) -> IrResult<Self> {
        let n = map.len();
        let mut seen = vec![false; n];
        for &p in &map {
            let Some(slot) = seen.get_mut(p as usize) else {
                return Err(IrError::InvalidWiring {
                    reason: format!("entry {p} is out of range for {n} qubits"),
                    wiring: map,
                });
            };
            if *slot {
                return Err(IrError::InvalidWiring {
                    reason: format!("entry {p} appears more than once"),
                    wiring: map,
                });
            }
            *slot = true;
        }
        Ok(Self(map))
    }

    /// Physical position of a logical qubit.
    #[inline]
    pub fn physical(&self, logical: usize) -> Option<usize> {
        self.0.get(logical).map(|&p| p as usize)
    }

    /// Logical qubit sitting at a physical position.
    pub fn logical(&self, physical: usize) -> Option<usize> {
        self.0.iter().position(|&p| p as usize == physical)
    }

    /// The inverse permutation (physical → logical).
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0u32; self.0.len()];
        for (l, &p) in self.0.iter().enumerate() {
            inv[p as usize] = l as u32;
        }
        Self(inv)
    }

    /// Apply `self`, then `next`: logical `l` ends at `next[self[l]]`.
    pub fn then(&self, next: &Wiring) -> IrResult<Self> {
        if self.len() != next.len() {
            return Err(IrError::WiringSizeMismatch {
                left: self.len(),
                right: next.len(),
            });
        }
        Ok(Self(self.0.iter().map(|&p| next.0[p as usize]).collect()))
    }

    /// Number of qubits.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the wiring covers no qubits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every logical qubit sits at its own index.
    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(l, &p)| l == p as usize)
    }

    /// The raw vector.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl TryFrom<Vec<u32>> for Wiring {
    type Error = IrError;

    fn try_from(map: Vec<u32>) -> IrResult<Self> {
        Self::new(map)
    }
}

impl From<Wiring> for Vec<u32> {
    fn from(w: Wiring) -> Self {
        w.0
    }
}

impl fmt::Display for Wiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}
