//! Shared contract tests
//!
//! One contract, many subjects: `shared_contract_tests!` stamps out a
//! `#[test]` per subject so each failure is reported against the subject
//! that caused it.

/// Verify `subject` against `contract`, panicking with the violation
///
/// `contract` is a `ContractSpec` or a `&ContractSpec`. Evaluates to the
/// passing `ContractReport`.
#[macro_export]
macro_rules! assert_contract {
    ($subject:expr, $contract:expr $(,)?) => {{
        let check = $crate::contract::CapabilityContractCheck::new(
            ::std::convert::Into::<$crate::contract::ContractSpec>::into($contract),
        );
        match check.verify(&$subject) {
            ::std::result::Result::Ok(report) => report,
            ::std::result::Result::Err(err) => ::std::panic!("{}", err),
        }
    }};
}

/// Generate one test per subject, all checked against the same contract
///
/// ```ignore
/// shared_contract_tests!(db_manager_client, db_manager_client(), {
///     postgres_manager => PostgresManager::default(),
///     in_memory_manager => InMemoryManager::new(),
/// });
/// ```
///
/// The generated tests live in a module named by the first argument, which
/// imports everything from the enclosing module. Each test installs the
/// test-writer subscriber so check events show up in failing test output.
#[macro_export]
macro_rules! shared_contract_tests {
    ($group:ident, $contract:expr, { $($name:ident => $subject:expr),+ $(,)? }) => {
        mod $group {
            #[allow(unused_imports)]
            use super::*;

            $(
                #[test]
                fn $name() {
                    $crate::logging::init_test_logging();
                    $crate::assert_contract!($subject, $contract);
                }
            )+
        }
    };
}
