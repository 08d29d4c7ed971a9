//! Error types for capability contract checks

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single required operation the subject does not respond to
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[error("missing capability: {name}")]
pub struct MissingCapability {
    pub name: String,
}

impl MissingCapability {
    pub fn new(name: impl Into<String>) -> Self {
        MissingCapability { name: name.into() }
    }
}

/// Every missing capability of one subject against one contract
///
/// `missing` follows the order in which the contract lists its operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractViolation {
    pub contract: String,
    pub subject: String,
    pub missing: Vec<MissingCapability>,
}

impl ContractViolation {
    /// Names of the missing operations, in contract order
    pub fn missing_names(&self) -> Vec<&str> {
        self.missing.iter().map(|m| m.name.as_str()).collect()
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} does not satisfy {}: missing [{}]",
            self.subject,
            self.contract,
            self.missing_names().join(", ")
        )
    }
}

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Contract violation: {0}")]
    Violation(ContractViolation),

    #[error("Contract has no required operations: {0}")]
    EmptyContract(String),

    #[error("Invalid operation name: {0:?}")]
    InvalidOperationName(String),

    #[error("Duplicate operation in contract: {0}")]
    DuplicateOperation(String),

    #[error("Contract not found: {0}")]
    ContractNotFound(String),

    #[error("Contract already registered: {0}")]
    ContractAlreadyRegistered(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ContractViolation> for ContractError {
    fn from(violation: ContractViolation) -> Self {
        ContractError::Violation(violation)
    }
}

impl From<walkdir::Error> for ContractError {
    fn from(err: walkdir::Error) -> Self {
        ContractError::Io(std::io::Error::other(err.to_string()))
    }
}

impl ContractError {
    /// The violation carried by this error, if it is one
    pub fn violation(&self) -> Option<&ContractViolation> {
        match self {
            ContractError::Violation(v) => Some(v),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContractError>;
