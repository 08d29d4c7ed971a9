//! Suite runner
//!
//! Checks every subject of a suite against each contract it claims to
//! implement. Pairs are evaluated independently; a failing pair never stops
//! the run.

use crate::capability::CapabilitySet;
use crate::contract::ContractRegistry;
use crate::errors::Result;
use crate::report::SuiteReport;
use crate::suite::config::{SuiteConfig, KIND};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A subject and the contracts it should satisfy
#[derive(Debug, Clone)]
struct SuiteSubject {
    capabilities: CapabilitySet,
    implements: Vec<String>,
}

/// Runs one suite
#[derive(Debug, Clone)]
pub struct SuiteRunner {
    name: String,
    registry: ContractRegistry,
    subjects: Vec<SuiteSubject>,
}

impl SuiteRunner {
    /// Build a runner from a validated manifest
    pub fn from_config(config: &SuiteConfig) -> Result<Self> {
        config.validate()?;
        let registry = config.registry()?;

        let subjects = config
            .spec
            .subjects
            .iter()
            .map(|manifest| {
                Ok(SuiteSubject {
                    capabilities: manifest.capability_set()?,
                    implements: manifest.implements.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SuiteRunner {
            name: config.metadata.name.clone(),
            registry,
            subjects,
        })
    }

    /// Load a manifest from disk and build a runner for it
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = SuiteConfig::load(path)?;
        Self::from_config(&config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    /// Check every subject against every contract it implements
    pub fn run(&self) -> Result<SuiteReport> {
        self.run_filtered(None)
    }

    /// Like [`SuiteRunner::run`], limited to one contract when `contract` is set
    pub fn run_filtered(&self, contract: Option<&str>) -> Result<SuiteReport> {
        if let Some(name) = contract {
            // Unknown filter is an error, not an empty run
            self.registry.get(name)?;
        }

        let mut report = SuiteReport::new(self.name.clone());

        for subject in &self.subjects {
            for contract_name in &subject.implements {
                if contract.is_some_and(|only| only != contract_name.as_str()) {
                    continue;
                }
                let check = self.registry.check(contract_name)?;
                let result = check.evaluate(&subject.capabilities);
                if !result.passed {
                    warn!(
                        suite = %self.name,
                        subject = %result.subject,
                        contract = %result.contract,
                        missing = ?result.missing,
                        "subject violates contract"
                    );
                }
                report.push(result);
            }
        }

        let summary = report.summary();
        info!(
            suite = %self.name,
            checked = summary.checked,
            passed = summary.passed,
            failed = summary.failed,
            "suite finished"
        );

        Ok(report)
    }
}

/// Find suite manifests under `root`
///
/// `root` may be a single file, returned as-is. Directories are walked
/// recursively for `.yaml`/`.yml` files whose top-level `kind` is
/// `ContractSuite`; other YAML files are skipped. Results are sorted.
pub fn discover_suites<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut suites = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_yaml = matches!(
            entry.path().extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        if !is_yaml {
            continue;
        }
        if declares_suite(entry.path())? {
            debug!(path = %entry.path().display(), "discovered suite manifest");
            suites.push(entry.into_path());
        } else {
            warn!(path = %entry.path().display(), "skipping YAML file that is not a {} manifest", KIND);
        }
    }

    suites.sort();
    Ok(suites)
}

/// Whether the YAML document at `path` has `kind: ContractSuite`
///
/// Unparseable YAML is not a suite.
fn declares_suite(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)?;
    let document: serde_yaml::Value = match serde_yaml::from_str(&content) {
        Ok(document) => document,
        Err(_) => return Ok(false),
    };
    Ok(document.get("kind").and_then(|k| k.as_str()) == Some(KIND))
}
