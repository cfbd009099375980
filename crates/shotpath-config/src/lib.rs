//! Configuration types for shotpath.
//!
//! This crate is the collaborator side of template sourcing: it reads
//! `.shotpath/config.yaml` files and environment overrides and hands the
//! engine explicit template + style values. The engine itself never reads
//! configuration.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
