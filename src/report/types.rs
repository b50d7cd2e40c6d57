//! Render model type definitions.
//!
//! These are the template-ready values built by the bridge from the raw
//! suite result. Templates only ever see these types, never the input tree.

use crate::types::{BuildError, ExecStatus};

/// Display status of a scenario, step or table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    Skip,
    NotExecuted,
}

impl Status {
    /// CSS class used by the report stylesheet.
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Pass => "passed",
            Status::Fail => "failed",
            Status::Skip => "skipped",
            Status::NotExecuted => "not-executed",
        }
    }
}

impl From<ExecStatus> for Status {
    fn from(status: ExecStatus) -> Self {
        match status {
            ExecStatus::Passed => Status::Pass,
            ExecStatus::Failed => Status::Fail,
            ExecStatus::Skipped => Status::Skip,
            ExecStatus::NotExecuted => Status::NotExecuted,
        }
    }
}

/// Pass/fail/skip counts over a set of specs or scenarios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub failed: usize,
    pub passed: usize,
    pub skipped: usize,
}

/// Top-of-page overview block.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub project_name: String,
    pub env: String,
    pub env_vars: Vec<String>,
    pub tags: String,
    pub success_rate: f64,
    pub exec_time: String,
    pub timestamp: String,
    /// Always suite-wide, also on spec pages
    pub summary: Summary,
    /// Relative prefix from the page back to the report root ("" or "../../")
    pub base_path: String,
}

/// Sidebar entry for one specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecMeta {
    pub name: String,
    pub exec_time: String,
    pub failed: bool,
    pub skipped: bool,
    pub tags: Vec<String>,
    pub report_file: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    pub is_before_hook_failure: bool,
    pub specs: Vec<SpecMeta>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HookFailure {
    /// Phase label, e.g. "Before Suite"
    pub hook_name: String,
    pub error_message: String,
    pub stack_trace: String,
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecHeader {
    pub name: String,
    pub exec_time: String,
    pub file_name: String,
    pub tags: Vec<String>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Body of a specification page.
#[derive(Debug, Clone, PartialEq)]
pub struct Spec {
    pub comments_before_table: Vec<String>,
    pub table: Option<Table>,
    pub comments_after_table: Vec<String>,
    pub scenarios: Vec<Scenario>,
    pub before_hook_failure: Option<HookFailure>,
    pub after_hook_failure: Option<HookFailure>,
    pub errors: Vec<BuildError>,
}

impl Spec {
    /// A parse error means the scenarios cannot be trusted; only errors render.
    pub fn has_parse_errors(&self) -> bool {
        self.errors.iter().any(BuildError::is_parse_error)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub heading: String,
    pub exec_time: String,
    pub tags: Vec<String>,
    pub status: Status,
    pub contexts: Vec<Item>,
    pub items: Vec<Item>,
    pub teardowns: Vec<Item>,
    pub before_hook_failure: Option<HookFailure>,
    pub after_hook_failure: Option<HookFailure>,
    /// Data table row this execution belongs to; `None` if not table-driven
    pub table_row: Option<usize>,
}

impl Scenario {
    /// Only the first row of a table-driven scenario is shown initially.
    pub fn is_hidden(&self) -> bool {
        matches!(self.table_row, Some(row) if row > 0)
    }
}

/// Renderable unit inside a scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Step(Step),
    Comment(Comment),
    NestedGroup(NestedGroup),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub fragments: Vec<Fragment>,
    pub result: StepResult,
    pub pre_hook_failure: Option<HookFailure>,
    pub post_hook_failure: Option<HookFailure>,
}

/// A concept: its defining step, then the items it expands into.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedGroup {
    pub step: Step,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub status: Status,
    pub stack_trace: String,
    pub screenshot: Option<String>,
    pub error_message: String,
    pub exec_time: String,
    pub skipped_reason: String,
    pub messages: Vec<String>,
}

impl StepResult {
    /// Failure details render only when there is something to show.
    pub fn has_failure_details(&self) -> bool {
        self.status == Status::Fail && !self.error_message.is_empty() && !self.stack_trace.is_empty()
    }

    pub fn has_skip_reason(&self) -> bool {
        self.status == Status::Skip && !self.skipped_reason.is_empty()
    }
}

/// Classified piece of step text. Each variant has its own markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Parameter(String),
    TableCellParameter(String),
    Placeholder { name: String, value: String },
    TablePlaceholder { name: String, table: Table },
    InlineTable(Table),
}

/// Everything needed to render the aggregate index page.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexPage {
    pub overview: Overview,
    pub post_hook_failure: Option<HookFailure>,
    pub sidebar: Sidebar,
    pub all_passed: bool,
}

/// Everything needed to render one specification page.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPage {
    pub overview: Overview,
    pub pre_hook_failure: Option<HookFailure>,
    pub post_hook_failure: Option<HookFailure>,
    pub sidebar: Sidebar,
    pub header: SpecHeader,
    pub spec: Spec,
}

/// Index page produced when the suite's setup hook failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FailurePage {
    pub overview: Overview,
    pub pre_hook_failure: HookFailure,
    pub post_hook_failure: Option<HookFailure>,
}
