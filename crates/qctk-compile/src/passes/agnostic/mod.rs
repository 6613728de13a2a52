//! Target-agnostic compilation passes.
//!
//! These passes look only at the circuit and the wirings it claims. They
//! never consult the coupling map.

pub mod analysis;
pub mod decompose;
pub mod optimization;
pub mod verification;

pub use analysis::{LinearMapAnalysis, StatsAnalysis, linear_map};
pub use decompose::SwapDecomposition;
pub use optimization::{CancelInverses, CzSynthesis, MergePhases};
pub use verification::{WiringCheck, WiringReport};
