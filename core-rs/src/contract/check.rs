//! Capability contract check
//!
//! Verifies that a subject responds to every operation a contract requires.
//! The check reads the subject's capability set and nothing else: required
//! operations are looked up, never called. It holds no state, so repeating
//! a check always gives the same answer and independent checks can run on
//! any number of threads.

use crate::capability::Capable;
use crate::contract::spec::ContractSpec;
use crate::errors::Result;
use crate::report::ContractReport;
use tracing::{debug, warn};

/// Checks subjects against one contract
#[derive(Debug, Clone)]
pub struct CapabilityContractCheck {
    spec: ContractSpec,
}

impl CapabilityContractCheck {
    pub fn new(spec: ContractSpec) -> Self {
        CapabilityContractCheck { spec }
    }

    pub fn spec(&self) -> &ContractSpec {
        &self.spec
    }

    /// Evaluate `subject` without failing
    ///
    /// Every required operation is looked up; the first miss does not stop
    /// the check. Missing names keep the contract's order.
    pub fn evaluate<S: Capable + ?Sized>(&self, subject: &S) -> ContractReport {
        let capabilities = subject.capabilities();
        let available = capabilities.as_lookup();

        let missing: Vec<String> = self
            .spec
            .operations()
            .iter()
            .filter(|op| !available.contains(op.as_str()))
            .cloned()
            .collect();

        let trivial = self.spec.is_empty();
        if trivial {
            warn!(
                contract = self.spec.name(),
                subject = %capabilities.subject,
                "contract requires no operations; check passes vacuously"
            );
        }

        debug!(
            contract = self.spec.name(),
            subject = %capabilities.subject,
            required = self.spec.len(),
            missing = missing.len(),
            "evaluated capability contract"
        );

        ContractReport {
            contract: self.spec.name().to_string(),
            subject: capabilities.subject,
            required: self.spec.operations().to_vec(),
            passed: missing.is_empty(),
            missing,
            trivial,
        }
    }

    /// Verify `subject`, failing with a `ContractViolation` that lists every
    /// missing operation
    ///
    /// # Errors
    /// `ContractError::Violation` when one or more operations are missing.
    pub fn verify<S: Capable + ?Sized>(&self, subject: &S) -> Result<ContractReport> {
        self.evaluate(subject).into_result()
    }

    /// Build the subject with `factory`, then verify it
    pub fn verify_with<S, F>(&self, factory: F) -> Result<ContractReport>
    where
        S: Capable,
        F: FnOnce() -> S,
    {
        let subject = factory();
        self.verify(&subject)
    }
}

/// One-shot check of `subject` against an ad-hoc list of operation names
///
/// Repeated names are collapsed. The contract is named after the subject.
///
/// # Example
/// ```
/// use cap_contract::{verify, CapabilitySet};
///
/// let mock = CapabilitySet::from_operations("Mock", ["get_client"]).unwrap();
/// let err = verify(&mock, &["get_client", "report_client"]).unwrap_err();
/// assert_eq!(err.violation().unwrap().missing_names(), vec!["report_client"]);
/// ```
pub fn verify<S, N>(subject: &S, required: &[N]) -> Result<ContractReport>
where
    S: Capable + ?Sized,
    N: AsRef<str>,
{
    let name = format!("{} contract", subject.subject_name());
    let spec = ContractSpec::from_names_lossy(name, required.iter().map(|n| AsRef::<str>::as_ref(n)))?;
    CapabilityContractCheck::new(spec).verify(subject)
}
