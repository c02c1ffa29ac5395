//! MCDA Engine CLI
//!
//! Ranks the alternatives of a problem file with one method and prints the
//! full calculation result as JSON.
//!
//! ```text
//! mcda-engine topsis laptops.yaml
//! mcda-engine vikor laptops.json --config mcda.yaml --out result.json
//! ```
//!
//! Exit code 0 on success, 1 when the calculation is rejected or fails,
//! 2 when the configuration or problem file cannot be read.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::error;

use mcda_engine::adapters::problem_file::{self, ProblemFileError};
use mcda_engine::application::{CalculateCommand, CalculateHandler};
use mcda_engine::config::{ConfigError, EngineConfig, LoggingConfig};
use mcda_engine::domain::calculation::{CalculationResult, Method};
use mcda_engine::domain::foundation::DomainError;

/// Multi-criteria decision analysis engine
#[derive(Parser)]
#[command(name = "mcda-engine", version)]
#[command(about = "Rank alternatives with SAW, WP, TOPSIS, AHP, ELECTRE, PROMETHEE, MOORA or VIKOR")]
struct Cli {
    /// Method code (saw, wp, topsis, ahp, electre, promethee, moora, vikor)
    method: Method,

    /// Problem snapshot (.json, .yaml or .yml)
    problem: PathBuf,

    /// Configuration file; MCDA_ENGINE__* variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the result to this JSON file
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print only the ranking and conclusion
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ProblemFile(#[from] ProblemFileError),

    #[error(transparent)]
    Calculation(#[from] DomainError),

    #[error("Failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::ProblemFile(_) => 2,
            CliError::Calculation(_) | CliError::Render(_) => 1,
        }
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig, ConfigError> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load_with_file(path)?,
        None => EngineConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn render_summary(result: &CalculationResult) -> String {
    let mut out = String::new();
    for (position, entry) in result.ranking.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<24} {:.4}\n",
            position + 1,
            entry.alternative,
            entry.score
        ));
    }
    out.push('\n');
    out.push_str(&result.conclusion);
    out
}

async fn run(cli: Cli, config: EngineConfig) -> Result<(), CliError> {
    let registry = config.registry().map_err(ConfigError::from)?;
    let handler = CalculateHandler::new(Arc::new(registry));

    let problem = problem_file::load_problem(&cli.problem).await?;
    let result = handler
        .handle(CalculateCommand {
            method: cli.method,
            problem,
        })
        .await?;

    if let Some(out) = &cli.out {
        problem_file::save_result(out, &result).await?;
    }

    if cli.summary {
        println!("{}", render_summary(&result));
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mcda-engine: {}", e);
            std::process::exit(2);
        }
    };
    init_tracing(&config.logging);

    let exit_code = match run(cli, config).await {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "mcda-engine failed");
            eprintln!("mcda-engine: {}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}
