//! Named, reusable contracts
//!
//! A registry is the home of the shared contracts a test suite checks its
//! subjects against. The built-in `DBManager::Client` contract lists the
//! client operations of a database manager; it asserts their presence only.

use crate::contract::check::CapabilityContractCheck;
use crate::contract::spec::ContractSpec;
use crate::errors::{ContractError, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Name of the built-in database-manager client contract
pub const DB_MANAGER_CLIENT: &str = "DBManager::Client";

/// Operations required by [`DB_MANAGER_CLIENT`]
pub const DB_MANAGER_CLIENT_OPERATIONS: [&str; 3] =
    ["find_or_create_client", "get_client", "report_client"];

/// The built-in `DBManager::Client` contract
pub fn db_manager_client() -> ContractSpec {
    ContractSpec::builtin(DB_MANAGER_CLIENT, &DB_MANAGER_CLIENT_OPERATIONS)
}

/// Contracts keyed by name
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: BTreeMap<String, ContractSpec>,
}

impl ContractRegistry {
    /// Empty registry
    pub fn new() -> Self {
        ContractRegistry {
            contracts: BTreeMap::new(),
        }
    }

    /// Registry holding the built-in contracts
    pub fn with_builtins() -> Self {
        let mut registry = ContractRegistry::new();
        registry
            .contracts
            .insert(DB_MANAGER_CLIENT.to_string(), db_manager_client());
        registry
    }

    /// Register a contract under its own name
    ///
    /// # Errors
    /// `ContractAlreadyRegistered` if the name is taken.
    pub fn register(&mut self, spec: ContractSpec) -> Result<()> {
        if self.contracts.contains_key(spec.name()) {
            return Err(ContractError::ContractAlreadyRegistered(
                spec.name().to_string(),
            ));
        }
        debug!(contract = spec.name(), operations = spec.len(), "registered contract");
        self.contracts.insert(spec.name().to_string(), spec);
        Ok(())
    }

    /// Register, replacing any contract already under the same name
    ///
    /// Returns the replaced contract.
    pub fn replace(&mut self, spec: ContractSpec) -> Option<ContractSpec> {
        self.contracts.insert(spec.name().to_string(), spec)
    }

    pub fn get(&self, name: &str) -> Result<&ContractSpec> {
        self.contracts
            .get(name)
            .ok_or_else(|| ContractError::ContractNotFound(name.to_string()))
    }

    /// A ready-to-run check for the named contract
    pub fn check(&self, name: &str) -> Result<CapabilityContractCheck> {
        Ok(CapabilityContractCheck::new(self.get(name)?.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.contracts.keys().map(String::as_str).collect()
    }

    /// Registered contracts, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &ContractSpec> {
        self.contracts.values()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
