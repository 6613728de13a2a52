//! Peephole optimization passes.
//!
//! These are generic cleanups: they never increase the gate count and
//! preserve the circuit's unitary exactly.

mod cancel;
mod cz;
mod phase;

#[cfg(test)]
mod tests;

pub use cancel::CancelInverses;
pub use cz::CzSynthesis;
pub use phase::MergePhases;
