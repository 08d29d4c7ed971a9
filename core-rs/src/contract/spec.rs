//! Contract specifications: the named set of operations a subject must expose

use crate::capability::set::validate_operation_name;
use crate::errors::{ContractError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Required operation names under a contract name
///
/// Names are unique. Their order is kept only so that missing operations are
/// reported in a stable order; two specs with the same names in a different
/// order require the same thing (see [`ContractSpec::same_operations`]).
///
/// `==` is structural: it compares the name and the operations in order, so
/// a manifest round trip can be checked exactly. Use `same_operations` to
/// compare what two contracts require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractSpec {
    name: String,
    operations: Vec<String>,
}

impl ContractSpec {
    /// Create a contract, rejecting invalid or repeated operation names
    ///
    /// # Example
    /// ```
    /// use cap_contract::ContractSpec;
    ///
    /// let spec = ContractSpec::new(
    ///     "DBManager::Client",
    ///     ["find_or_create_client", "get_client", "report_client"],
    /// ).unwrap();
    /// assert_eq!(spec.len(), 3);
    /// ```
    pub fn new<I, S>(name: impl Into<String>, operations: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = validate_contract_name(name.into())?;
        let mut seen = HashSet::new();
        let mut ops = Vec::new();

        for op in operations {
            let op = validate_operation_name(op.as_ref())?;
            if !seen.insert(op.clone()) {
                return Err(ContractError::DuplicateOperation(op));
            }
            ops.push(op);
        }

        Ok(ContractSpec { name, operations: ops })
    }

    /// Create a contract, keeping the first occurrence of repeated names
    pub fn from_names_lossy<I, S>(name: impl Into<String>, operations: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = validate_contract_name(name.into())?;
        let mut ops: Vec<String> = Vec::new();

        for op in operations {
            let op = validate_operation_name(op.as_ref())?;
            if !ops.contains(&op) {
                ops.push(op);
            }
        }

        Ok(ContractSpec { name, operations: ops })
    }

    /// Contract from compile-time constants; names must already be valid
    /// and unique
    pub(crate) fn builtin(name: &str, operations: &[&str]) -> Self {
        debug_assert!(operations.iter().all(|op| crate::capability::is_valid_operation_name(op)));
        ContractSpec {
            name: name.to_string(),
            operations: operations.iter().map(|op| op.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required operation names in declaration order
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// An empty contract passes for every subject, which is almost always an
    /// authoring mistake
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn requires(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op == operation)
    }

    /// Fail with `EmptyContract` if no operations are required
    pub fn require_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ContractError::EmptyContract(self.name.clone()));
        }
        Ok(())
    }

    /// Same required operations, ignoring order and contract name
    pub fn same_operations(&self, other: &ContractSpec) -> bool {
        let ours: HashSet<&str> = self.operations.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = other.operations.iter().map(String::as_str).collect();
        ours == theirs
    }
}

impl From<&ContractSpec> for ContractSpec {
    fn from(spec: &ContractSpec) -> Self {
        spec.clone()
    }
}

fn validate_contract_name(name: String) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ContractError::ValidationError(
            "contract name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
