//! capcheck - Capability contract checker CLI
//!
//! Runs suite manifests and reports which subjects are missing operations.

use anyhow::{bail, Context};
use cap_contract::logging::init_cli_logging;
use cap_contract::report::render_all;
use cap_contract::{
    discover_suites, ContractRegistry, OutputFormat, SuiteConfig, SuiteReport, SuiteRunner,
    DB_MANAGER_CLIENT, DB_MANAGER_CLIENT_OPERATIONS,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "capcheck")]
#[command(version)]
#[command(about = "Capability contract checker", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify suite manifests (files or directories of .yaml/.yml)
    Verify {
        /// Suite files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output format (table, json, yaml)
        #[arg(long, default_value = "table")]
        format: String,
        /// Only check this contract
        #[arg(long)]
        contract: Option<String>,
        /// Disable colored table output
        #[arg(long)]
        no_color: bool,
    },
    /// List contracts (built-ins, plus the suite's own when given)
    Contracts {
        /// Suite manifest
        suite: Option<PathBuf>,
    },
    /// Show the operations a contract requires
    Show {
        /// Contract name (e.g., DBManager::Client)
        name: String,
        /// Suite manifest defining the contract
        #[arg(long)]
        suite: Option<PathBuf>,
    },
    /// Write a starter suite manifest
    Init {
        /// Where to write the manifest
        path: PathBuf,
        /// Suite name
        #[arg(long, default_value = "db-manager")]
        name: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn load_registry(suite: Option<&Path>) -> anyhow::Result<ContractRegistry> {
    match suite {
        Some(path) => {
            let config = SuiteConfig::load(path)
                .with_context(|| format!("loading suite {}", path.display()))?;
            Ok(config.registry()?)
        }
        None => Ok(ContractRegistry::with_builtins()),
    }
}

fn handle_verify(
    paths: &[PathBuf],
    format: &str,
    contract: Option<&str>,
    color: bool,
) -> anyhow::Result<ExitCode> {
    let format: OutputFormat = format.parse()?;

    let mut suite_files = Vec::new();
    for path in paths {
        let found = discover_suites(path)
            .with_context(|| format!("searching {} for suites", path.display()))?;
        suite_files.extend(found);
    }

    if suite_files.is_empty() {
        bail!("no suite manifests found");
    }

    let mut reports: Vec<SuiteReport> = Vec::new();
    for file in &suite_files {
        info!(path = %file.display(), "running suite");
        let runner = SuiteRunner::from_path(file)
            .with_context(|| format!("loading suite {}", file.display()))?;
        if let Some(name) = contract {
            if !runner.registry().contains(name) {
                info!(suite = runner.name(), contract = name, "suite does not define contract, skipping");
                continue;
            }
        }
        reports.push(runner.run_filtered(contract)?);
    }

    if let (Some(name), true) = (contract, reports.is_empty()) {
        bail!("no suite defines contract '{}'", name);
    }

    println!("{}", render_all(&reports, format, color)?);

    if reports.iter().all(SuiteReport::is_success) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn handle_contracts(suite: Option<&Path>) -> anyhow::Result<()> {
    let registry = load_registry(suite)?;

    if registry.is_empty() {
        println!("No contracts registered");
        return Ok(());
    }

    println!("{:<32} OPERATIONS", "CONTRACT");
    for spec in registry.iter() {
        println!("{:<32} {}", spec.name(), spec.len());
    }
    Ok(())
}

fn handle_show(name: &str, suite: Option<&Path>) -> anyhow::Result<()> {
    let registry = load_registry(suite)?;
    let spec = registry.get(name)?;

    println!("{}", spec.name());
    if spec.is_empty() {
        println!("  (requires no operations)");
    }
    for op in spec.operations() {
        println!("  - {}", op);
    }
    Ok(())
}

fn handle_init(path: &Path, name: &str, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let config = SuiteConfig::new(name.to_string()).with_subject(
        "ExampleClient",
        &DB_MANAGER_CLIENT_OPERATIONS,
        &[DB_MANAGER_CLIENT],
    );
    config.validate()?;
    config
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;

    println!("✓ Suite manifest written to {}", path.display());
    println!("\nRun it with: capcheck verify {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_cli_logging(cli.verbose);

    match cli.command {
        Commands::Verify {
            paths,
            format,
            contract,
            no_color,
        } => handle_verify(&paths, &format, contract.as_deref(), !no_color),
        Commands::Contracts { suite } => {
            handle_contracts(suite.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { name, suite } => {
            handle_show(&name, suite.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { path, name, force } => {
            handle_init(&path, &name, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
