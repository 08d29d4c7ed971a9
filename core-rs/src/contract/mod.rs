//! Contract module
//!
//! Contracts name the operations a subject must respond to. This module
//! provides the contract type, the check itself, a registry of reusable
//! contracts and the shared-test macros built on them.

pub mod spec;
pub mod check;
pub mod registry;
mod shared;

pub use spec::ContractSpec;
pub use check::{verify, CapabilityContractCheck};
pub use registry::{db_manager_client, ContractRegistry, DB_MANAGER_CLIENT, DB_MANAGER_CLIENT_OPERATIONS};
