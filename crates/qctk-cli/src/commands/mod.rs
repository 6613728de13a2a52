//! CLI command implementations.

pub mod common;
pub mod compare;
pub mod convert;
pub mod optimize;
pub mod stats;
pub mod verify;
pub mod version;
pub mod wire;
