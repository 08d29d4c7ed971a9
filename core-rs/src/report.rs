//! Contract check reports
//!
//! A `ContractReport` is the outcome of one subject against one contract.
//! A `SuiteReport` collects every outcome of a suite run and renders it as
//! a table, JSON or YAML.

use crate::errors::{ContractError, ContractViolation, MissingCapability, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of one contract check
///
/// Reports carry no timestamp so that repeated checks of the same subject
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractReport {
    pub contract: String,
    pub subject: String,
    pub required: Vec<String>,
    /// Missing operations, in `required` order
    pub missing: Vec<String>,
    pub passed: bool,
    /// The contract required nothing, so the pass is vacuous
    #[serde(default)]
    pub trivial: bool,
}

impl ContractReport {
    /// The violation described by this report, if it failed
    pub fn violation(&self) -> Option<ContractViolation> {
        if self.passed {
            return None;
        }
        Some(ContractViolation {
            contract: self.contract.clone(),
            subject: self.subject.clone(),
            missing: self.missing.iter().map(MissingCapability::new).collect(),
        })
    }

    /// `Ok(self)` when passed, `Err(Violation)` otherwise
    pub fn into_result(self) -> Result<ContractReport> {
        match self.violation() {
            Some(violation) => Err(ContractError::Violation(violation)),
            None => Ok(self),
        }
    }
}

/// Output format for rendered reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(ContractError::ParseError(format!(
                "unknown output format '{}' (expected table, json or yaml)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Pass/fail counts of a suite run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub checked: usize,
    pub passed: usize,
    pub failed: usize,
    pub trivial: usize,
}

/// Every contract outcome of one suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteReport {
    pub suite: String,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ContractReport>,
}

impl SuiteReport {
    pub fn new(suite: impl Into<String>) -> Self {
        SuiteReport {
            suite: suite.into(),
            generated_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, report: ContractReport) {
        self.results.push(report);
    }

    pub fn summary(&self) -> SuiteSummary {
        let passed = self.results.iter().filter(|r| r.passed).count();
        SuiteSummary {
            checked: self.results.len(),
            passed,
            failed: self.results.len() - passed,
            trivial: self.results.iter().filter(|r| r.trivial).count(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Violations of every failed check, in run order
    pub fn violations(&self) -> Vec<ContractViolation> {
        self.results.iter().filter_map(ContractReport::violation).collect()
    }

    /// Render in the requested format
    ///
    /// `color` only affects the table format.
    pub fn render(&self, format: OutputFormat, color: bool) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table(color)),
            OutputFormat::Json => serde_json::to_string_pretty(self).map_err(|e| {
                ContractError::SerializationError(format!("Failed to serialize report: {}", e))
            }),
            OutputFormat::Yaml => serde_yaml::to_string(self).map_err(|e| {
                ContractError::SerializationError(format!("Failed to serialize report: {}", e))
            }),
        }
    }

    fn render_table(&self, color: bool) -> String {
        let subject_width = self
            .results
            .iter()
            .map(|r| r.subject.len())
            .chain(std::iter::once("SUBJECT".len()))
            .max()
            .unwrap_or(0);
        let contract_width = self
            .results
            .iter()
            .map(|r| r.contract.len())
            .chain(std::iter::once("CONTRACT".len()))
            .max()
            .unwrap_or(0);

        let mut out = format!("Suite: {}\n\n", self.suite);
        out.push_str(&format!(
            "{:<sw$}  {:<cw$}  {:<6}  MISSING\n",
            "SUBJECT",
            "CONTRACT",
            "STATUS",
            sw = subject_width,
            cw = contract_width
        ));

        for result in &self.results {
            let status = match (result.passed, result.trivial) {
                (true, false) => "PASS",
                (true, true) => "EMPTY",
                (false, _) => "FAIL",
            };
            // Pad before coloring so escape codes don't skew the columns
            let status = format!("{:<6}", status);
            let status = if !color {
                status
            } else if !result.passed {
                status.red().bold().to_string()
            } else if result.trivial {
                status.yellow().to_string()
            } else {
                status.green().to_string()
            };
            let missing = if result.missing.is_empty() {
                "-".to_string()
            } else {
                result.missing.join(", ")
            };

            out.push_str(&format!(
                "{:<sw$}  {:<cw$}  {}  {}\n",
                result.subject,
                result.contract,
                status,
                missing,
                sw = subject_width,
                cw = contract_width
            ));
        }

        let summary = self.summary();
        out.push_str(&format!(
            "\n{} checked, {} passed, {} failed",
            summary.checked, summary.passed, summary.failed
        ));
        if summary.trivial > 0 {
            out.push_str(&format!(" ({} against empty contracts)", summary.trivial));
        }
        out.push('\n');
        out
    }
}

/// Render several suite reports as one document
///
/// Tables are separated by a blank line; JSON and YAML render as a list.
pub fn render_all(reports: &[SuiteReport], format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let tables = reports
                .iter()
                .map(|r| r.render(OutputFormat::Table, color))
                .collect::<Result<Vec<_>>>()?;
            Ok(tables.join("\n"))
        }
        OutputFormat::Json => serde_json::to_string_pretty(reports).map_err(|e| {
            ContractError::SerializationError(format!("Failed to serialize reports: {}", e))
        }),
        OutputFormat::Yaml => serde_yaml::to_string(reports).map_err(|e| {
            ContractError::SerializationError(format!("Failed to serialize reports: {}", e))
        }),
    }
}
