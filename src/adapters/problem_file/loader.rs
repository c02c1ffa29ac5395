//! JSON and YAML problem files

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::domain::calculation::{CalculationResult, DecisionProblem};

/// Errors raised while reading or writing problem files
#[derive(Debug, Error)]
pub enum ProblemFileError {
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Unsupported problem file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid JSON problem: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML problem: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ProblemFileError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        ProblemFileError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Serialization format of a problem file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFormat {
    Json,
    Yaml,
}

impl ProblemFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ProblemFileError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(ProblemFormat::Json),
            "yaml" | "yml" => Ok(ProblemFormat::Yaml),
            _ => Err(ProblemFileError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parses a problem snapshot without validating its structure.
pub fn parse_problem(content: &str, format: ProblemFormat) -> Result<DecisionProblem, ProblemFileError> {
    let problem = match format {
        ProblemFormat::Json => serde_json::from_str(content)?,
        ProblemFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(problem)
}

/// Reads a problem snapshot from `path`.
pub async fn load_problem(path: impl AsRef<Path>) -> Result<DecisionProblem, ProblemFileError> {
    let path = path.as_ref();
    let format = ProblemFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ProblemFileError::io(path, e))?;

    let problem = parse_problem(&content, format)?;
    debug!(
        path = %path.display(),
        alternatives = problem.alternative_count(),
        criteria = problem.criterion_count(),
        "Loaded decision problem"
    );
    Ok(problem)
}

/// Writes a result as pretty JSON, replacing any existing file.
pub async fn save_result(
    path: impl AsRef<Path>,
    result: &CalculationResult,
) -> Result<(), ProblemFileError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(result)?;

    // Write to a sibling temp file, then rename over the target
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .await
        .map_err(|e| ProblemFileError::io(&temp_path, e))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| ProblemFileError::io(path, e))?;

    debug!(path = %path.display(), method = %result.method, "Saved calculation result");
    Ok(())
}
