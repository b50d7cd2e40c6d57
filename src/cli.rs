use clap::Parser;
use std::path::PathBuf;

/// Default report directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "reports/html-report";

#[derive(Parser, Debug, Clone)]
#[command(name = "suite-report")]
#[command(about = "Generate a static HTML report from a test suite result")]
#[command(version)]
pub struct CliArgs {
    /// Suite result to render (JSON)
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: PathBuf,

    /// Directory the report is written to (created if missing)
    #[arg(long, short = 'o', value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Root that spec file paths are made relative to
    /// Default: $SUITE_REPORT_PROJECT_ROOT, then the current directory
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Number of worker threads rendering pages (0 = one per CPU)
    #[arg(long, short = 'j', default_value = "0")]
    pub jobs: usize,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate arguments before any output is written
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.is_file() {
            return Err(format!("Suite result not found: {}", self.input.display()));
        }

        if self.output_dir.is_file() {
            return Err(format!("Output path is a file, not a directory: {}", self.output_dir.display()));
        }

        if let Some(ref root) = self.project_root
            && !root.is_dir()
        {
            return Err(format!("Project root is not a directory: {}", root.display()));
        }

        Ok(())
    }
}
