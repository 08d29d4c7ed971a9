//! # Capability Contract - operation presence checks
//!
//! Verifies that a subject exposes the operations a contract names, without
//! calling any of them. A check is a read of the subject's capability set;
//! it has no side effects, so it is idempotent and safe to run concurrently
//! across subjects.
//!
//! ## Two ways to describe a subject
//!
//! - **Static**: `declare_capabilities!(Type { op_a, op_b })` implements
//!   [`Capable`] and fails to compile if `Type::op_a` or `Type::op_b` does
//!   not exist.
//! - **Dynamic**: a [`CapabilitySet`] built at runtime, for mocks, plugins
//!   and YAML subject manifests.
//!
//! ## Layout
//!
//! ```text
//!  ContractSpec ──► CapabilityContractCheck ──► ContractReport
//!       ▲                    ▲                        │
//!  ContractRegistry      Capable subject              ▼
//!       ▲                                         SuiteReport
//!  SuiteConfig (YAML) ──► SuiteRunner ────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use cap_contract::{db_manager_client, CapabilityContractCheck, CapabilitySet};
//!
//! let check = CapabilityContractCheck::new(db_manager_client());
//! let partial = CapabilitySet::from_operations(
//!     "PartialManager",
//!     ["find_or_create_client", "get_client"],
//! ).unwrap();
//!
//! let err = check.verify(&partial).unwrap_err();
//! assert_eq!(err.violation().unwrap().missing_names(), vec!["report_client"]);
//! ```

pub mod errors;
pub mod capability;
pub mod contract;
pub mod report;
pub mod suite;
pub mod logging;

pub use errors::{ContractError, ContractViolation, MissingCapability};
pub use capability::{is_valid_operation_name, CapabilitySet, Capable};
pub use contract::{verify, db_manager_client, CapabilityContractCheck, ContractRegistry, ContractSpec, DB_MANAGER_CLIENT, DB_MANAGER_CLIENT_OPERATIONS};
pub use report::{ContractReport, OutputFormat, SuiteReport, SuiteSummary};
pub use suite::{discover_suites, SuiteConfig, SuiteRunner};

/// Version of the suite manifest format
pub const MANIFEST_API_VERSION: &str = suite::config::API_VERSION;
