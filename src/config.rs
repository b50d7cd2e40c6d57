/// Configuration resolution module
///
/// This module handles:
/// - Building a ReportConfig from CLI arguments
/// - Resolving the project root (flag, environment, working directory)
use crate::cli::CliArgs;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable consulted when `--project-root` is not given
pub const PROJECT_ROOT_ENV: &str = "SUITE_REPORT_PROJECT_ROOT";

/// Fully resolved settings for one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Suite result file
    pub input: PathBuf,
    /// Directory all pages and assets are written under
    pub report_dir: PathBuf,
    /// Absolute root spec paths are made relative to
    pub project_root: PathBuf,
    /// Worker threads (0 = one per CPU)
    pub jobs: usize,
}

/// Build a complete ReportConfig from CLI arguments
///
/// Everything is resolved upfront so the runner receives an immutable,
/// validated configuration.
pub fn build_report_config(args: &CliArgs) -> Result<ReportConfig, String> {
    let project_root = resolve_project_root(args.project_root.as_deref(), env::var(PROJECT_ROOT_ENV).ok())?;
    debug!("Project root: {}", project_root.display());

    Ok(ReportConfig {
        input: args.input.clone(),
        report_dir: args.output_dir.clone(),
        project_root,
        jobs: args.jobs,
    })
}

/// Pick the project root: explicit flag, then the environment, then the
/// working directory. Relative roots are made absolute.
fn resolve_project_root(flag: Option<&Path>, env_value: Option<String>) -> Result<PathBuf, String> {
    let root = match (flag, env_value) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(value)) if !value.trim().is_empty() => {
            debug!("Using project root from {}", PROJECT_ROOT_ENV);
            PathBuf::from(value)
        }
        _ => env::current_dir().map_err(|e| format!("Failed to read current directory: {}", e))?,
    };

    std::path::absolute(&root).map_err(|e| format!("Invalid project root {}: {}", root.display(), e))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
