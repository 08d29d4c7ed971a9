//! Contract suites
//!
//! A suite is a YAML manifest of contracts and subject capability manifests,
//! plus the runner that checks each subject against the contracts it claims.

pub mod config;
pub mod runner;

pub use config::{ContractDefinition, SubjectManifest, SuiteConfig, SuiteSpec};
pub use runner::{discover_suites, SuiteRunner};
