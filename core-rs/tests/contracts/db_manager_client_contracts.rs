// DBManager::Client Contract Tests
//
// These tests pin the shared DBManager::Client contract and run it against
// the kinds of subject a test suite builds: statically declared managers,
// runtime capability sets and factories.
//
// **Problem**: a manager loses or renames a client operation and nothing
//              notices until a caller breaks
// **Solution**: the same contract checked against every manager shape

use cap_contract::logging::init_test_logging;
use cap_contract::{
    assert_contract, db_manager_client, declare_capabilities, shared_contract_tests,
    CapabilityContractCheck, CapabilitySet, Capable, ContractError, ContractSpec,
};

/// Manager with every client operation
#[derive(Default)]
struct FullManager {
    clients: Vec<String>,
}

#[allow(dead_code)]
impl FullManager {
    fn find_or_create_client(&mut self, host: &str) -> usize {
        match self.clients.iter().position(|c| c == host) {
            Some(idx) => idx,
            None => {
                self.clients.push(host.to_string());
                self.clients.len() - 1
            }
        }
    }

    fn get_client(&self, host: &str) -> Option<&String> {
        self.clients.iter().find(|c| *c == host)
    }

    fn report_client(&mut self, host: &str) -> usize {
        self.find_or_create_client(host)
    }
}

declare_capabilities!(FullManager {
    find_or_create_client,
    get_client,
    report_client
});

/// Manager that can look clients up but never reports them
struct LookupOnlyManager;

#[allow(dead_code)]
impl LookupOnlyManager {
    fn find_or_create_client(&self, _host: &str) {}
    fn get_client(&self, _host: &str) {}
}

declare_capabilities!(LookupOnlyManager {
    find_or_create_client,
    get_client
});

/// Manager with no client operations at all
struct DetachedManager;

declare_capabilities!(DetachedManager {});

fn plugin_manager() -> CapabilitySet {
    CapabilitySet::from_operations(
        "PluginManager",
        ["report_client", "get_client", "find_or_create_client", "workspace"],
    )
    .unwrap()
}

shared_contract_tests!(db_manager_client_shared, db_manager_client(), {
    full_manager_satisfies => FullManager::default(),
    plugin_manager_satisfies => plugin_manager(),
});

fn missing(subject: &dyn Capable) -> Vec<String> {
    match CapabilityContractCheck::new(db_manager_client()).verify(subject) {
        Err(ContractError::Violation(v)) => v.missing.into_iter().map(|m| m.name).collect(),
        Ok(_) => Vec::new(),
        Err(other) => panic!("unexpected error: {}", other),
    }
}

/// WHY: The DBManager::Client contract is exactly these three operations
/// REASON: Shared suites across managers depend on the same list
/// BREAKS: Every manager suite if an operation is added or dropped silently
#[test]
fn db_manager_client_contract_is_three_operations() {
    init_test_logging();

    let spec = db_manager_client();
    assert_eq!(spec.name(), "DBManager::Client");
    assert_eq!(
        spec.operations(),
        &["find_or_create_client", "get_client", "report_client"]
    );
}

/// WHY: A manager missing report_client fails with only report_client listed
/// SCENARIO: {find_or_create_client, get_client}
#[test]
fn missing_report_client_is_the_only_violation() {
    init_test_logging();

    assert_eq!(missing(&LookupOnlyManager), vec!["report_client"]);
}

/// WHY: A manager with no operations lists all three as missing
/// SCENARIO: {}
/// REASON: Violations are collected, never short-circuited on the first miss
#[test]
fn detached_manager_misses_everything() {
    init_test_logging();

    assert_eq!(
        missing(&DetachedManager),
        vec!["find_or_create_client", "get_client", "report_client"]
    );
}

/// WHY: Verifying twice gives the same answer
/// REASON: The check reads capability metadata and mutates nothing
#[test]
fn verification_is_idempotent() {
    init_test_logging();

    let check = CapabilityContractCheck::new(db_manager_client());
    assert_eq!(check.evaluate(&LookupOnlyManager), check.evaluate(&LookupOnlyManager));
    assert_eq!(check.evaluate(&plugin_manager()), check.evaluate(&plugin_manager()));
}

/// WHY: Order of required names changes only the order of reported misses
#[test]
fn permuting_required_names_keeps_outcome() {
    init_test_logging();

    let permutations = [
        ["find_or_create_client", "get_client", "report_client"],
        ["report_client", "find_or_create_client", "get_client"],
        ["get_client", "report_client", "find_or_create_client"],
    ];

    for names in permutations {
        let check = CapabilityContractCheck::new(ContractSpec::new("Permuted", names).unwrap());

        assert!(check.verify(&FullManager::default()).is_ok());

        let report = check.evaluate(&DetachedManager);
        assert!(!report.passed);
        assert_eq!(report.missing, names.to_vec(), "missing names follow input order");
    }
}

/// WHY: Checking a manager never calls its operations
/// REASON: A contract check is not a behavioral test
/// BREAKS: Side effects (client rows created) during a presence check
#[test]
fn verification_never_invokes_operations() {
    init_test_logging();

    let manager = FullManager::default();
    assert_contract!(manager, db_manager_client());
    assert!(manager.clients.is_empty(), "no client may be created by a check");
}

/// WHY: Factories are checked on the value they produce
#[test]
fn factory_subjects_are_checked() {
    init_test_logging();

    let check = CapabilityContractCheck::new(db_manager_client());
    assert!(check.verify_with(FullManager::default).is_ok());

    let err = check.verify_with(|| LookupOnlyManager).unwrap_err();
    assert_eq!(err.violation().unwrap().missing_names(), vec!["report_client"]);
}
