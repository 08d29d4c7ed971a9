/**
 * config.rs
 * Parser for contract suite manifests (YAML format)
 *
 * Format:
 * ```yaml
 * apiVersion: capcontract/v1
 * kind: ContractSuite
 * metadata:
 *   name: db-manager
 * spec:
 *   includeBuiltins: true
 *   contracts:
 *     - name: DBManager::Client
 *       operations: [find_or_create_client, get_client, report_client]
 *   subjects:
 *     - name: MockDbManager
 *       operations: [find_or_create_client, get_client, report_client]
 *       implements: [DBManager::Client]
 * ```
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::capability::CapabilitySet;
use crate::contract::{ContractRegistry, ContractSpec};
use crate::errors::ContractError;

pub const API_VERSION: &str = "capcontract/v1";
pub const KIND: &str = "ContractSuite";

/// Suite manifest structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuiteConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: SuiteSpec,
}

/// Suite metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A contract declared by the suite
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractDefinition {
    pub name: String,
    #[serde(default)]
    pub operations: Vec<String>,
}

/// A subject described by its capability manifest
///
/// Used for mocks and plugins whose operations are only known at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectManifest {
    pub name: String,
    #[serde(default)]
    pub operations: Vec<String>,
    /// Contract names this subject claims to satisfy
    pub implements: Vec<String>,
}

/// Suite specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSpec {
    /// Register built-in contracts before the suite's own
    #[serde(default = "default_include_builtins")]
    pub include_builtins: bool,
    #[serde(default)]
    pub contracts: Vec<ContractDefinition>,
    #[serde(default)]
    pub subjects: Vec<SubjectManifest>,
}

fn default_include_builtins() -> bool {
    true
}

impl SubjectManifest {
    /// Capability set described by this manifest
    pub fn capability_set(&self) -> Result<CapabilitySet, ContractError> {
        CapabilitySet::from_operations(self.name.clone(), &self.operations)
    }
}

impl SuiteConfig {
    /// Load a suite manifest from specified path
    ///
    /// # Arguments
    /// * `path` - Path to the YAML manifest
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContractError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ContractError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ContractError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read suite {}: {}", path.display(), e),
            ))
        })?;

        let config = Self::from_yaml(&content)?;
        Ok(config)
    }

    /// Parse and validate a manifest from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ContractError> {
        let config: SuiteConfig = serde_yaml::from_str(content).map_err(|e| {
            ContractError::ParseError(format!("Invalid suite YAML: {}", e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate manifest structure
    ///
    /// Ensures:
    /// - apiVersion is "capcontract/v1"
    /// - kind is "ContractSuite"
    /// - metadata.name is non-empty
    /// - every contract and subject is well-formed
    /// - every `implements` entry names a known contract
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.api_version != API_VERSION {
            return Err(ContractError::ValidationError(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(ContractError::ValidationError(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if self.metadata.name.trim().is_empty() {
            return Err(ContractError::ValidationError(
                "metadata.name cannot be empty".to_string(),
            ));
        }

        // Builds every contract, so bad names and collisions surface here
        let registry = self.registry()?;

        for subject in &self.spec.subjects {
            if subject.name.trim().is_empty() {
                return Err(ContractError::ValidationError(
                    "subject name cannot be empty".to_string(),
                ));
            }

            subject.capability_set()?;

            if subject.implements.is_empty() {
                return Err(ContractError::ValidationError(format!(
                    "subject '{}' implements no contracts",
                    subject.name
                )));
            }

            for contract in &subject.implements {
                if !registry.contains(contract) {
                    return Err(ContractError::ValidationError(format!(
                        "subject '{}' implements unknown contract '{}'",
                        subject.name, contract
                    )));
                }
            }
        }

        Ok(())
    }

    /// Registry with the built-ins (if enabled) and the suite's contracts
    ///
    /// A suite contract may not reuse a name already registered.
    pub fn registry(&self) -> Result<ContractRegistry, ContractError> {
        let mut registry = if self.spec.include_builtins {
            ContractRegistry::with_builtins()
        } else {
            ContractRegistry::new()
        };

        for definition in &self.spec.contracts {
            let spec = ContractSpec::new(definition.name.clone(), &definition.operations)?;
            registry.register(spec)?;
        }

        Ok(registry)
    }

    /// Save manifest to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ContractError> {
        let yaml = serde_yaml::to_string(self).map_err(|e| {
            ContractError::SerializationError(format!("Failed to serialize suite: {}", e))
        })?;

        fs::write(path.as_ref(), yaml)?;

        Ok(())
    }

    /// Create an empty suite with built-in contracts enabled
    pub fn new(name: String) -> Self {
        SuiteConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: Metadata {
                name,
                description: None,
            },
            spec: SuiteSpec {
                include_builtins: true,
                contracts: Vec::new(),
                subjects: Vec::new(),
            },
        }
    }

    /// Builder: add a contract definition
    pub fn with_contract(mut self, name: &str, operations: &[&str]) -> Self {
        self.spec.contracts.push(ContractDefinition {
            name: name.to_string(),
            operations: operations.iter().map(|op| op.to_string()).collect(),
        });
        self
    }

    /// Builder: add a subject manifest
    pub fn with_subject(mut self, name: &str, operations: &[&str], implements: &[&str]) -> Self {
        self.spec.subjects.push(SubjectManifest {
            name: name.to_string(),
            operations: operations.iter().map(|op| op.to_string()).collect(),
            implements: implements.iter().map(|c| c.to_string()).collect(),
        });
        self
    }
}
