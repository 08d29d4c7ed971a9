//! Capability module
//!
//! Describes what a subject responds to, either declared statically with
//! `declare_capabilities!` or assembled at runtime as a `CapabilitySet`
//! (mocks, plugins, manifest-backed subjects).

pub mod set;
mod macros;

pub use set::{is_valid_operation_name, CapabilitySet, Capable};
