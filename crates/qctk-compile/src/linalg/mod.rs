//! Linear algebra over GF(2) and the circuit syntheses built on it.

mod cz;
mod mat2;
mod synth;

pub use cz::{SynthGate, max_overlap, synthesize_cz};
pub use mat2::{Mat2, RowOps};
pub use synth::{permutation_as_swaps, to_cnots};
