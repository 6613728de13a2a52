//! Passes that depend on the target's coupling map.

pub mod connectivity;
pub mod synthesis;

pub use connectivity::ConnectivityCheck;
pub use synthesis::{WiringMethod, WiringSynthesis, synthesize_wiring};
