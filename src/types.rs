/// Input data structures for suite execution results
///
/// This module defines the result tree handed to the report generator: a suite,
/// its specifications, their scenarios and steps, and the nested step groups
/// (concepts) that steps can expand into. Everything here is read-only once
/// loaded; the report pipeline never mutates it.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Root of a single execution: every specification that ran plus suite-level hooks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteResult {
    pub project_name: String,
    pub environment: String,
    pub tags: String,
    /// Generation timestamp supplied by the runner; empty means "use now"
    pub timestamp: String,
    /// Total execution time in milliseconds
    pub execution_time: u64,
    pub failed: bool,
    pub pre_hook_failure: Option<HookFailure>,
    pub post_hook_failure: Option<HookFailure>,
    pub env_vars: Vec<String>,
    pub spec_results: Vec<SpecResult>,
}

/// Result of one specification file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecResult {
    pub heading: String,
    pub file_name: PathBuf,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ExecStatus,
    #[serde(default)]
    pub execution_time: u64,
    #[serde(default)]
    pub pre_hook_failure: Option<HookFailure>,
    #[serde(default)]
    pub post_hook_failure: Option<HookFailure>,
    #[serde(default)]
    pub items: Vec<SpecItem>,
    /// Non-empty when the specification could not be built
    #[serde(default)]
    pub errors: Vec<BuildError>,
}

impl SpecResult {
    /// Scenarios of this spec in input order, table-driven variants included
    pub fn scenarios(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.items.iter().filter_map(|item| match item {
            SpecItem::Scenario(scenario) => Some(scenario),
            SpecItem::TableDrivenScenario { scenario, .. } => Some(scenario),
            SpecItem::Comment { .. } | SpecItem::Table(_) => None,
        })
    }
}

/// Top-level entry of a specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecItem {
    Comment { text: String },
    Table(TableData),
    Scenario(ScenarioResult),
    /// One execution of a scenario for a single row of the spec's data table
    TableDrivenScenario { scenario: ScenarioResult, table_row_index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub heading: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ExecStatus,
    #[serde(default)]
    pub execution_time: u64,
    #[serde(default)]
    pub contexts: Vec<ResultItem>,
    #[serde(default)]
    pub items: Vec<ResultItem>,
    #[serde(default)]
    pub teardowns: Vec<ResultItem>,
    #[serde(default)]
    pub pre_hook_failure: Option<HookFailure>,
    #[serde(default)]
    pub post_hook_failure: Option<HookFailure>,
}

/// Item inside a scenario or a concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultItem {
    Step(StepResult),
    Comment { text: String },
    /// A reusable step group: the defining step plus the items it expands into
    Concept { step: StepResult, items: Vec<ResultItem> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub fragments: Vec<Fragment>,
    pub result: ExecutionResult,
    #[serde(default)]
    pub pre_hook_failure: Option<HookFailure>,
    #[serde(default)]
    pub post_hook_failure: Option<HookFailure>,
}

/// One piece of a step's text as written in the specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Text { text: String },
    Parameter(Parameter),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub kind: ParameterKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub table: Option<TableData>,
}

/// Where a step parameter's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Quoted literal in the step text
    Static,
    /// Resolved from a data table column
    Dynamic,
    /// `<file:...>` style placeholder resolved to text
    SpecialString,
    /// `<table:...>` style placeholder resolved to a table
    SpecialTable,
    /// Table written inline under the step
    Table,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecStatus {
    Passed,
    Failed,
    Skipped,
    NotExecuted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecStatus,
    #[serde(default)]
    pub execution_time: u64,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub stack_trace: String,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub skipped_reason: String,
    #[serde(default)]
    pub messages: Vec<String>,
}

/// A failed setup/teardown phase (suite, spec, scenario or step level)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookFailure {
    pub error_message: String,
    pub stack_trace: String,
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildErrorKind {
    Parse,
    Validation,
}

/// Problem found while building a specification before execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub line_number: usize,
    pub message: String,
}

impl BuildError {
    pub fn is_parse_error(&self) -> bool {
        self.kind == BuildErrorKind::Parse
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            BuildErrorKind::Parse => "[Parse Error]",
            BuildErrorKind::Validation => "[Validation Error]",
        };
        if self.file_name.is_empty() {
            write!(f, "{} {}", prefix, self.message)
        } else {
            write!(f, "{} {}:{} {}", prefix, self.file_name, self.line_number, self.message)
        }
    }
}

/// Read and deserialize a suite result from a JSON file
pub fn load_suite_result(path: &Path) -> Result<SuiteResult, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read suite result {}: {}", path.display(), e))?;
    serde_json::from_str(&contents).map_err(|e| format!("Failed to parse suite result {}: {}", path.display(), e))
}

#[cfg(test)]
#[path = "data_structures_test.rs"]
mod data_structures_test;
