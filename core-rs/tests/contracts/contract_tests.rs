//! Contract Tests - Capability Invariant Protection
//!
//! This file aggregates all contract test modules.
//! Contract tests verify invariants that MUST NEVER BREAK.

mod contracts {
    // DBManager::Client contract against every manager shape
    mod db_manager_client {
        include!("db_manager_client_contracts.rs");
    }

    // Read-only, stateless check behavior
    mod check_purity {
        include!("check_purity_contracts.rs");
    }
}
