/// Bridge module - converts the suite result tree into the render model
///
/// Every page is built from read-only input: the overview, the sidebar, the
/// spec header and the recursive scenario/step structure. Hook failures are
/// resolved here into labelled failure blocks, table-driven scenarios get
/// their row index, and step fragments are classified for the templates.
use crate::report::stats::{format_time, success_rate, summarize_scenarios, summarize_specs};
use crate::report::types::*;
use crate::types::{self, ExecStatus, ParameterKind, ResultItem, ScenarioResult, SpecItem, SpecResult, SuiteResult};
use log::{debug, warn};
use std::path::{Component, Path, PathBuf};

/// Settings shared by every page of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    /// Spec source paths are made relative to this before mapping to output pages
    pub project_root: PathBuf,
    /// Generation timestamp shown on every page
    pub timestamp: String,
}

/// Map a spec source file to its report page, relative to the report root.
///
/// `<root>/specs/web/login.spec` becomes `specs/web/login.html`. Separators are
/// always `/` since the result is used in links and in the search index.
pub fn to_html_file_name(spec_file: &Path, project_root: &Path) -> String {
    let relative = match spec_file.strip_prefix(project_root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) if spec_file.is_relative() => spec_file.to_path_buf(),
        // Outside the project: keep only the file name
        Err(_) => spec_file.file_name().map(PathBuf::from).unwrap_or_default(),
    };

    relative
        .with_extension("html")
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative prefix from a report page back to the report root.
pub fn base_path(report_file: &str) -> String {
    let depth = report_file.matches('/').count();
    "../".repeat(depth)
}

/// Source path of a spec as shown in its page header.
fn display_file_name(spec_file: &Path, project_root: &Path) -> String {
    spec_file.strip_prefix(project_root).unwrap_or(spec_file).display().to_string()
}

/// Build the overview block. Summary, environment and timestamp are suite-wide;
/// execution time and base path follow the spec when one is given.
pub fn to_overview(suite: &SuiteResult, spec: Option<&SpecResult>, layout: &ReportLayout) -> Overview {
    let summary = summarize_specs(&suite.spec_results);
    let (exec_time, base) = match spec {
        Some(spec) => {
            (format_time(spec.execution_time), base_path(&to_html_file_name(&spec.file_name, &layout.project_root)))
        }
        None => (format_time(suite.execution_time), String::new()),
    };

    Overview {
        project_name: suite.project_name.clone(),
        env: suite.environment.clone(),
        env_vars: suite.env_vars.clone(),
        tags: suite.tags.clone(),
        success_rate: success_rate(&summary),
        exec_time,
        timestamp: layout.timestamp.clone(),
        summary,
        base_path: base,
    }
}

/// Build the sidebar listing every spec, with links relative to the current page.
pub fn to_sidebar(suite: &SuiteResult, current: Option<&SpecResult>, layout: &ReportLayout) -> Sidebar {
    let prefix = current
        .map(|spec| base_path(&to_html_file_name(&spec.file_name, &layout.project_root)))
        .unwrap_or_default();

    let specs = suite
        .spec_results
        .iter()
        .map(|spec| SpecMeta {
            name: spec.heading.clone(),
            exec_time: format_time(spec.execution_time),
            failed: spec.status == ExecStatus::Failed,
            skipped: matches!(spec.status, ExecStatus::Skipped | ExecStatus::NotExecuted),
            tags: spec.tags.clone(),
            report_file: format!("{}{}", prefix, to_html_file_name(&spec.file_name, &layout.project_root)),
        })
        .collect();

    Sidebar { is_before_hook_failure: suite.pre_hook_failure.is_some(), specs }
}

pub fn to_spec_header(spec: &SpecResult, layout: &ReportLayout) -> SpecHeader {
    SpecHeader {
        name: spec.heading.clone(),
        exec_time: format_time(spec.execution_time),
        file_name: display_file_name(&spec.file_name, &layout.project_root),
        tags: spec.tags.clone(),
        summary: summarize_scenarios(spec),
    }
}

/// Convert a spec's items into its page body.
///
/// Comments are split around the data table. Each table-driven scenario keeps
/// its row index and stamps its status onto the matching table row.
pub fn to_spec(spec: &SpecResult) -> Spec {
    let mut comments_before_table = Vec::new();
    let mut comments_after_table = Vec::new();
    let mut table = None;
    let mut scenarios = Vec::new();
    let mut row_statuses = Vec::new();

    for item in &spec.items {
        match item {
            SpecItem::Comment { text } => {
                if table.is_some() {
                    comments_after_table.push(text.clone());
                } else {
                    comments_before_table.push(text.clone());
                }
            }
            SpecItem::Table(data) => table = Some(to_table(data)),
            SpecItem::Scenario(scenario) => scenarios.push(to_scenario(scenario, None)),
            SpecItem::TableDrivenScenario { scenario, table_row_index } => {
                let converted = to_scenario(scenario, Some(*table_row_index));
                row_statuses.push((*table_row_index, converted.status));
                scenarios.push(converted);
            }
        }
    }

    if let Some(ref mut table) = table {
        for (index, status) in row_statuses {
            match table.rows.get_mut(index) {
                Some(row) => row.status = status,
                None => warn!(
                    "{}: table-driven scenario refers to row {} but the table has {} rows",
                    spec.file_name.display(),
                    index,
                    table.rows.len()
                ),
            }
        }
    }

    if !spec.errors.is_empty() {
        debug!("{}: {} build error(s)", spec.file_name.display(), spec.errors.len());
    }

    Spec {
        comments_before_table,
        table,
        comments_after_table,
        scenarios,
        before_hook_failure: spec.pre_hook_failure.as_ref().map(|h| to_hook_failure(h, "Before Spec")),
        after_hook_failure: spec.post_hook_failure.as_ref().map(|h| to_hook_failure(h, "After Spec")),
        errors: spec.errors.clone(),
    }
}

pub fn to_scenario(scenario: &ScenarioResult, table_row: Option<usize>) -> Scenario {
    Scenario {
        heading: scenario.heading.clone(),
        exec_time: format_time(scenario.execution_time),
        tags: scenario.tags.clone(),
        status: scenario.status.into(),
        contexts: scenario.contexts.iter().map(to_item).collect(),
        items: scenario.items.iter().map(to_item).collect(),
        teardowns: scenario.teardowns.iter().map(to_item).collect(),
        before_hook_failure: scenario.pre_hook_failure.as_ref().map(|h| to_hook_failure(h, "Before Scenario")),
        after_hook_failure: scenario.post_hook_failure.as_ref().map(|h| to_hook_failure(h, "After Scenario")),
        table_row,
    }
}

pub fn to_item(item: &ResultItem) -> Item {
    match item {
        ResultItem::Step(step) => Item::Step(to_step(step)),
        ResultItem::Comment { text } => Item::Comment(Comment { text: text.clone() }),
        ResultItem::Concept { step, items } => {
            Item::NestedGroup(NestedGroup { step: to_step(step), items: items.iter().map(to_item).collect() })
        }
    }
}

pub fn to_step(step: &types::StepResult) -> Step {
    Step {
        fragments: step.fragments.iter().map(to_fragment).collect(),
        result: to_step_result(&step.result),
        pre_hook_failure: step.pre_hook_failure.as_ref().map(|h| to_hook_failure(h, "Before Step")),
        post_hook_failure: step.post_hook_failure.as_ref().map(|h| to_hook_failure(h, "After Step")),
    }
}

fn to_step_result(result: &types::ExecutionResult) -> StepResult {
    StepResult {
        status: result.status.into(),
        stack_trace: result.stack_trace.clone(),
        screenshot: result.screenshot.clone(),
        error_message: result.error_message.clone(),
        exec_time: format_time(result.execution_time),
        skipped_reason: result.skipped_reason.clone(),
        messages: result.messages.clone(),
    }
}

/// Classify a step fragment into the closed set the templates know about.
pub fn to_fragment(fragment: &types::Fragment) -> Fragment {
    let param = match fragment {
        types::Fragment::Text { text } => return Fragment::Text(text.clone()),
        types::Fragment::Parameter(param) => param,
    };

    let table = || param.table.as_ref().map(to_table).unwrap_or_else(|| Table { headers: vec![], rows: vec![] });

    match param.kind {
        ParameterKind::Static => Fragment::Parameter(param.value.clone()),
        ParameterKind::Dynamic => Fragment::TableCellParameter(param.value.clone()),
        ParameterKind::SpecialString => Fragment::Placeholder { name: param.name.clone(), value: param.value.clone() },
        ParameterKind::SpecialTable => Fragment::TablePlaceholder { name: param.name.clone(), table: table() },
        ParameterKind::Table => Fragment::InlineTable(table()),
    }
}

pub fn to_table(data: &types::TableData) -> Table {
    Table {
        headers: data.headers.clone(),
        rows: data.rows.iter().map(|cells| Row { cells: cells.clone(), status: Status::Pass }).collect(),
    }
}

pub fn to_hook_failure(hook: &types::HookFailure, hook_name: &str) -> HookFailure {
    HookFailure {
        hook_name: hook_name.to_string(),
        error_message: hook.error_message.clone(),
        stack_trace: hook.stack_trace.clone(),
        screenshot: hook.screenshot.clone(),
    }
}

pub fn to_index_page(suite: &SuiteResult, layout: &ReportLayout) -> IndexPage {
    IndexPage {
        overview: to_overview(suite, None, layout),
        post_hook_failure: suite.post_hook_failure.as_ref().map(|h| to_hook_failure(h, "After Suite")),
        sidebar: to_sidebar(suite, None, layout),
        all_passed: !suite.failed,
    }
}

pub fn to_spec_page(suite: &SuiteResult, spec: &SpecResult, layout: &ReportLayout) -> SpecPage {
    SpecPage {
        overview: to_overview(suite, Some(spec), layout),
        pre_hook_failure: suite.pre_hook_failure.as_ref().map(|h| to_hook_failure(h, "Before Suite")),
        post_hook_failure: suite.post_hook_failure.as_ref().map(|h| to_hook_failure(h, "After Suite")),
        sidebar: to_sidebar(suite, Some(spec), layout),
        header: to_spec_header(spec, layout),
        spec: to_spec(spec),
    }
}

/// The single page produced when the suite's setup hook failed; `None` otherwise.
pub fn to_failure_page(suite: &SuiteResult, layout: &ReportLayout) -> Option<FailurePage> {
    let pre_hook_failure = suite.pre_hook_failure.as_ref()?;
    Some(FailurePage {
        overview: to_overview(suite, None, layout),
        pre_hook_failure: to_hook_failure(pre_hook_failure, "Before Suite"),
        post_hook_failure: suite.post_hook_failure.as_ref().map(|h| to_hook_failure(h, "After Suite")),
    })
}

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;
