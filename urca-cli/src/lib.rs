//! Command definitions and execution for the `urca` binary.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use urca_core::{Case, EngineConfig, ScenarioSpec};
use urca_engine::{DeliberationPipeline, ScenarioHarness};

#[derive(Parser)]
#[command(name = "urca", version, about = "Deterministic evidence-weighting and verdict adjudication")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adjudicate a single case and print the verdict result as JSON.
    Adjudicate {
        /// Path to the case document (JSON).
        #[arg(long)]
        case: PathBuf,
        /// Optional engine configuration (TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run a case across demographic permutations and print the
    /// consistency report as JSON.
    Scenarios {
        /// Path to the case document (JSON).
        #[arg(long)]
        case: PathBuf,
        /// Optional scenario document (JSON array). Defaults to the built-in
        /// four-way reference permutation set.
        #[arg(long)]
        scenarios: Option<PathBuf>,
        /// Optional engine configuration (TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Execute a command, returning the JSON document to print.
pub fn execute(command: Commands) -> anyhow::Result<String> {
    match command {
        Commands::Adjudicate { case, config } => adjudicate(&case, config.as_deref()),
        Commands::Scenarios {
            case,
            scenarios,
            config,
        } => run_scenarios(&case, scenarios.as_deref(), config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_toml_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn load_case(path: &Path) -> anyhow::Result<Case> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading case {}", path.display()))?;
    Case::from_json_str(&raw).with_context(|| format!("parsing case {}", path.display()))
}

fn adjudicate(case_path: &Path, config_path: Option<&Path>) -> anyhow::Result<String> {
    let config = load_config(config_path)?;
    let case = load_case(case_path)?;
    let pipeline = DeliberationPipeline::new(&config)?;
    let result = pipeline.adjudicate(&case)?;
    info!(verdict = %result.verdict, "case adjudicated");
    Ok(serde_json::to_string_pretty(&result)?)
}

fn run_scenarios(
    case_path: &Path,
    scenarios_path: Option<&Path>,
    config_path: Option<&Path>,
) -> anyhow::Result<String> {
    let config = load_config(config_path)?;
    let case = load_case(case_path)?;
    let harness = ScenarioHarness::new(&config)?;
    let report = match scenarios_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading scenarios {}", path.display()))?;
            let specs = ScenarioSpec::list_from_json_str(&raw)
                .with_context(|| format!("parsing scenarios {}", path.display()))?;
            harness.run(&case, &specs)?
        }
        None => harness.run_reference_set(&case)?,
    };
    info!(
        consistent = report.consistent,
        bias_score = report.bias_score,
        "scenario batch adjudicated"
    );
    Ok(serde_json::to_string_pretty(&report)?)
}
