//! Capability sets: the operations a subject responds to
//!
//! A `CapabilitySet` is read-only metadata. Looking a name up never
//! touches the subject it describes.

use crate::errors::{ContractError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Identifier, optionally ending in a predicate (`?`) or bang (`!`) marker
static OPERATION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*[?!]?$").expect("operation name pattern compiles")
});

/// Check that `name` is usable as an operation name
pub fn is_valid_operation_name(name: &str) -> bool {
    OPERATION_NAME.is_match(name)
}

/// Validate an operation name, returning it owned
pub(crate) fn validate_operation_name(name: &str) -> Result<String> {
    if is_valid_operation_name(name) {
        Ok(name.to_string())
    } else {
        Err(ContractError::InvalidOperationName(name.to_string()))
    }
}

/// Operations a subject supports, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Display name of the subject (type name, mock name, plugin id)
    pub subject: String,

    /// Supported operation names, unique
    pub operations: Vec<String>,
}

impl CapabilitySet {
    /// Empty capability set for `subject`
    pub fn new(subject: impl Into<String>) -> Self {
        CapabilitySet {
            subject: subject.into(),
            operations: Vec::new(),
        }
    }

    /// Build from a list of names, dropping repeats
    ///
    /// # Errors
    /// `InvalidOperationName` if any name is not an identifier.
    pub fn from_operations<I, S>(subject: impl Into<String>, operations: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = CapabilitySet::new(subject);
        for op in operations {
            set.insert(op.as_ref())?;
        }
        Ok(set)
    }

    /// Builder form of [`CapabilitySet::insert`]
    pub fn with_operation(mut self, name: &str) -> Result<Self> {
        self.insert(name)?;
        Ok(self)
    }

    /// Add an operation; returns false if it was already present
    pub fn insert(&mut self, name: &str) -> Result<bool> {
        let name = validate_operation_name(name)?;
        if self.operations.contains(&name) {
            return Ok(false);
        }
        self.operations.push(name);
        Ok(true)
    }

    /// Record an operation declared as a Rust method identifier
    ///
    /// Raw identifiers (`r#match`) are stored without their `r#` prefix.
    /// Used by `declare_capabilities!`.
    #[doc(hidden)]
    pub fn declare_method(&mut self, ident: &str) {
        let name = ident.strip_prefix("r#").unwrap_or(ident);
        debug_assert!(is_valid_operation_name(name), "{} is not an identifier", name);
        if !self.responds_to(name) {
            self.operations.push(name.to_string());
        }
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.operations.iter().any(|op| op == name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operation names as a hash set, for repeated lookups
    pub fn as_lookup(&self) -> HashSet<&str> {
        self.operations.iter().map(String::as_str).collect()
    }
}

/// Anything that can describe the operations it responds to
///
/// Implementations must not invoke any of the operations they list.
/// Types with statically known methods normally get this impl from
/// [`declare_capabilities!`](crate::declare_capabilities).
pub trait Capable {
    /// Snapshot of the subject's capability set
    fn capabilities(&self) -> CapabilitySet;

    /// Whether the subject responds to `name`
    fn responds_to(&self, name: &str) -> bool {
        self.capabilities().responds_to(name)
    }

    /// Display name used in reports
    fn subject_name(&self) -> String {
        self.capabilities().subject
    }
}

impl Capable for CapabilitySet {
    fn capabilities(&self) -> CapabilitySet {
        self.clone()
    }

    fn responds_to(&self, name: &str) -> bool {
        CapabilitySet::responds_to(self, name)
    }

    fn subject_name(&self) -> String {
        self.subject.clone()
    }
}

impl<T: Capable + ?Sized> Capable for &T {
    fn capabilities(&self) -> CapabilitySet {
        (**self).capabilities()
    }

    fn responds_to(&self, name: &str) -> bool {
        (**self).responds_to(name)
    }

    fn subject_name(&self) -> String {
        (**self).subject_name()
    }
}

impl<T: Capable + ?Sized> Capable for Box<T> {
    fn capabilities(&self) -> CapabilitySet {
        (**self).capabilities()
    }

    fn responds_to(&self, name: &str) -> bool {
        (**self).responds_to(name)
    }

    fn subject_name(&self) -> String {
        (**self).subject_name()
    }
}

impl<T: Capable + ?Sized> Capable for Arc<T> {
    fn capabilities(&self) -> CapabilitySet {
        (**self).capabilities()
    }

    fn responds_to(&self, name: &str) -> bool {
        (**self).responds_to(name)
    }

    fn subject_name(&self) -> String {
        (**self).subject_name()
    }
}
