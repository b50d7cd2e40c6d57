//! Built-in HTML markup for every page section.
//!
//! Each section writes a fragment of the page; opening and closing tags are
//! balanced across sections by the pipeline, not within a single section.
//! All text coming from the suite result is escaped before it is written.

use super::templates::{Section, SectionData};
use super::types::*;
use crate::error::TemplateError;
use std::io::Write;

type Result = std::result::Result<(), TemplateError>;

/// Fill `section` with `data`.
pub fn render(section: Section, data: &SectionData<'_>, out: &mut dyn Write) -> Result {
    match section {
        Section::PageStart => page_start(overview(data)?, out),
        Section::Overview => report_overview(overview(data)?, out),
        Section::HookFailure => match data {
            SectionData::HookFailure(hook) => hook_failure(hook, out),
            other => Err(other.unexpected("hook failure")),
        },
        Section::SpecsStart => raw(out, r#"<div class="specifications">"#),
        Section::Sidebar => match data {
            SectionData::Sidebar(sidebar) => sidebar_div(sidebar, out),
            other => Err(other.unexpected("sidebar")),
        },
        Section::Congratulations => raw(
            out,
            r#"
  <div class="congratulations details">
    <p>Congratulations! You've gone all <span class="green">green</span> and saved the environment!</p>
  </div>"#,
        ),
        Section::SpecHeaderStart => match data {
            SectionData::SpecHeader(header) => spec_header_start(header, out),
            other => Err(other.unexpected("spec header")),
        },
        Section::Tags => match data {
            SectionData::Tags(tags) => tags_div(tags, out),
            other => Err(other.unexpected("tags")),
        },
        Section::HeaderEnd => raw(out, "</header>"),
        Section::SpecItemsContainer => raw(out, r#"<div id="specItemsContainer">"#),
        Section::SpecItemsContents => raw(out, r#"<div class="content">"#),
        Section::SpecCommentsAndTable => comments_and_table(spec(data)?, out),
        Section::SpecErrors => spec_errors(spec(data)?, out),
        Section::ScenarioContainerStart => scenario_container_start(scenario(data)?, out),
        Section::ScenarioHeaderStart => scenario_header_start(scenario(data)?, out),
        Section::ContextOrTeardownStart => raw(out, "<div class='context-step'>"),
        Section::StepStart => step_start("step", step(data)?, out),
        Section::NestedGroupStart => step_start("step concept", step(data)?, out),
        Section::NestedGroupMarker => raw(out, r#"<i class="fa fa-plus-square" aria-hidden="true"></i>"#),
        Section::StepBody => step_body(step(data)?, out),
        Section::StepFailure => step_failure(result(data)?, out),
        Section::Messages => messages(result(data)?, out),
        Section::StepEnd => raw(out, "</li></ul></div></div>"),
        Section::SkippedReason => skipped_reason(result(data)?, out),
        Section::Comment => match data {
            SectionData::Comment(comment) => Ok(write!(out, "<span>{}</span>", escape_html(&comment.text))?),
            other => Err(other.unexpected("comment")),
        },
        Section::NestedGroupStepsStart => raw(out, "<div class='concept-steps'>"),
        Section::EndDiv => raw(out, "</div>"),
        Section::MainEnd => raw(out, "</main>"),
        Section::Footer => raw(
            out,
            r#"<footer class="footer">
  <div class="container">
    <p>Generated by suite-report</p>
  </div>
</footer>"#,
        ),
        Section::PageEnd => page_end(overview(data)?, out),
    }
}

fn overview<'a>(data: &SectionData<'a>) -> std::result::Result<&'a Overview, TemplateError> {
    match *data {
        SectionData::Overview(o) => Ok(o),
        ref other => Err(other.unexpected("overview")),
    }
}

fn spec<'a>(data: &SectionData<'a>) -> std::result::Result<&'a Spec, TemplateError> {
    match *data {
        SectionData::Spec(s) => Ok(s),
        ref other => Err(other.unexpected("spec")),
    }
}

fn scenario<'a>(data: &SectionData<'a>) -> std::result::Result<&'a Scenario, TemplateError> {
    match *data {
        SectionData::Scenario(s) => Ok(s),
        ref other => Err(other.unexpected("scenario")),
    }
}

fn step<'a>(data: &SectionData<'a>) -> std::result::Result<&'a Step, TemplateError> {
    match *data {
        SectionData::Step(s) => Ok(s),
        ref other => Err(other.unexpected("step")),
    }
}

fn result<'a>(data: &SectionData<'a>) -> std::result::Result<&'a StepResult, TemplateError> {
    match *data {
        SectionData::Result(r) => Ok(r),
        ref other => Err(other.unexpected("step result")),
    }
}

fn raw(out: &mut dyn Write, markup: &str) -> Result {
    out.write_all(markup.as_bytes())?;
    Ok(())
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn encode_new_lines(s: &str) -> String {
    escape_html(s).replace('\n', "<br/>")
}

fn page_start(o: &Overview, out: &mut dyn Write) -> Result {
    let base = escape_html(&o.base_path);
    write!(
        out,
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Test Results</title>
  <link rel="stylesheet" type="text/css" href="{base}css/normalize.css" />
  <link rel="stylesheet" type="text/css" href="{base}css/style.css" />
  <script src="{base}js/search_index.js" type="text/javascript"></script>
  <script src="{base}js/main.js" type="text/javascript"></script>
</head>
<body>
<header class="top">
  <div class="header">
    <div class="container">
      <div class="logo">
        <a href="{base}index.html"><img src="{base}images/logo.png" alt="Report logo"></a>
      </div>
      <h2 class="project">Project: {project}</h2>
    </div>
  </div>
</header>
<main class="main-container">
<div class="container">
"#,
        base = base,
        project = escape_html(&o.project_name),
    )?;
    Ok(())
}

fn report_overview(o: &Overview, out: &mut dyn Write) -> Result {
    write!(
        out,
        r#"<div class="report-overview">
  <div class="report_chart">
    <div class="chart"><svg></svg></div>
    <div class="total-specs"><span class="value">{total}</span><span class="txt">Total specs</span></div>
  </div>
  <div class="report_test-results">
    <ul>
      <li class="fail spec-filter" data-status="failed"><span class="value">{failed}</span><span class="txt">Failed</span></li>
      <li class="pass spec-filter" data-status="passed"><span class="value">{passed}</span><span class="txt">Passed</span></li>
      <li class="skip spec-filter" data-status="skipped"><span class="value">{skipped}</span><span class="txt">Skipped</span></li>
    </ul>
  </div>
  <div class="report_details">
    <ul>
      <li>
        <label>Environment </label>
        <span>
          <span>{env}</span>
          <div class="env-vars hidden">
            <table>
              <thead><tr><th>KEY=Value</th></tr></thead>
              <tbody>
"#,
        total = o.summary.total,
        failed = o.summary.failed,
        passed = o.summary.passed,
        skipped = o.summary.skipped,
        env = escape_html(&o.env),
    )?;
    for var in &o.env_vars {
        writeln!(out, "                <tr><td>{}</td></tr>", escape_html(var))?;
    }
    write!(
        out,
        r#"              </tbody>
            </table>
          </div>
        </span>
      </li>
"#
    )?;
    if !o.tags.is_empty() {
        writeln!(out, "      <li>\n        <label>Tags </label>\n        <span>{}</span>\n      </li>", escape_html(&o.tags))?;
    }
    write!(
        out,
        r#"      <li>
        <label>Success Rate </label>
        <span>{rate:.2}%</span>
      </li>
      <li>
        <label>Total Time </label>
        <span>{time}</span>
      </li>
      <li>
        <label>Generated On </label>
        <span>{timestamp}</span>
      </li>
    </ul>
  </div>
</div>"#,
        rate = o.success_rate,
        time = escape_html(&o.exec_time),
        timestamp = escape_html(&o.timestamp),
    )?;
    Ok(())
}

fn hook_failure(hook: &HookFailure, out: &mut dyn Write) -> Result {
    write!(
        out,
        r##"<div class="error-container failed">
  <div collapsable class="error-heading">{name} Failed:<span class="error-message"> {message}</span></div>
  <div class="toggleShow" data-toggle="collapse" data-target="#hookFailureDetails">
    <span>[Show details]</span>
  </div>
  <div class="exception-container" id="hookFailureDetails">
    <div class="exception">
      <pre class="stacktrace">{trace}</pre>
    </div>
"##,
        name = escape_html(&hook.hook_name),
        message = escape_html(&hook.error_message),
        trace = escape_html(&hook.stack_trace),
    )?;
    if let Some(ref screenshot) = hook.screenshot {
        screenshot_div(screenshot, out)?;
    }
    raw(out, "  </div>\n</div>")
}

fn screenshot_div(screenshot: &str, out: &mut dyn Write) -> Result {
    let data = escape_html(screenshot);
    write!(
        out,
        r#"    <div class="screenshot-container">
      <a href="data:image/png;base64,{data}" rel="lightbox">
        <img src="data:image/png;base64,{data}" class="screenshot-thumbnail" />
      </a>
    </div>
"#,
        data = data,
    )?;
    Ok(())
}

fn sidebar_div(sidebar: &Sidebar, out: &mut dyn Write) -> Result {
    if sidebar.is_before_hook_failure {
        return Ok(());
    }
    write!(
        out,
        r#"<aside class="sidebar">
  <h3 class="title">Specifications</h3>
  <div class="searchbar">
    <input id="searchSpecifications" placeholder="Type specification or tag name" type="text" />
    <i class="fa fa-search"></i>
  </div>
  <div id="listOfSpecifications">
    <ul id="scenarios" class="spec-list">
"#
    )?;
    for meta in &sidebar.specs {
        let class = if meta.failed {
            "failed"
        } else if meta.skipped {
            "skipped"
        } else {
            "passed"
        };
        write!(
            out,
            r#"      <a href="{file}">
        <li class='{class} spec-name'>
          <span id="scenarioName" class="scenarioname">{name}</span>
          <span id="time" class="time">{time}</span>
        </li>
      </a>
"#,
            file = escape_html(&meta.report_file),
            class = class,
            name = escape_html(&meta.name),
            time = escape_html(&meta.exec_time),
        )?;
    }
    raw(out, "    </ul>\n  </div>\n</aside>")
}

fn spec_header_start(header: &SpecHeader, out: &mut dyn Write) -> Result {
    write!(
        out,
        r#"<header class="curr-spec">
  <h3 class="spec-head" title="{file}">{name}</h3>
  <div class="spec-filename">
    <label for="specFileName">File Path</label>
    <input id="specFileName" value="{file}" readonly/>
  </div>
  <span class="time">{time}</span>
  <div class="spec-summary">{passed} passed, {failed} failed, {skipped} skipped of {total} scenarios</div>
"#,
        file = escape_html(&header.file_name),
        name = escape_html(&header.name),
        time = escape_html(&header.exec_time),
        passed = header.summary.passed,
        failed = header.summary.failed,
        skipped = header.summary.skipped,
        total = header.summary.total,
    )?;
    Ok(())
}

fn tags_div(tags: &[String], out: &mut dyn Write) -> Result {
    if tags.is_empty() {
        return Ok(());
    }
    raw(out, "<div class=\"tags scenario_tags contentSection\">\n  <strong>Tags:</strong>\n  ")?;
    for tag in tags {
        write!(out, "<span> {}</span>", escape_html(tag))?;
    }
    raw(out, "\n</div>")
}

fn comments_and_table(spec: &Spec, out: &mut dyn Write) -> Result {
    for comment in &spec.comments_before_table {
        write!(out, "<span>{}</span>", escape_html(comment))?;
    }
    if let Some(ref table) = spec.table {
        write!(out, "\n<table class=\"data-table\">\n  <tr>\n    ")?;
        for header in &table.headers {
            write!(out, "<th>{}</th>", escape_html(header))?;
        }
        writeln!(out, "\n  </tr>\n  <tbody data-rowCount={}>", table.rows.len())?;
        for (index, row) in table.rows.iter().enumerate() {
            let selected = if index == 0 { " selected" } else { "" };
            write!(
                out,
                "    <tr class='row-selector {}{}' data-rowIndex={}>\n      ",
                row.status.css_class(),
                selected,
                index
            )?;
            for cell in &row.cells {
                write!(out, "<td>{}</td>", escape_html(cell))?;
            }
            writeln!(out, "\n    </tr>")?;
        }
        writeln!(out, "  </tbody>\n</table>")?;
    }
    for comment in &spec.comments_after_table {
        write!(out, "<span>{}</span>", escape_html(comment))?;
    }
    Ok(())
}

fn spec_errors(spec: &Spec, out: &mut dyn Write) -> Result {
    raw(out, "<div class=\"error-container failed\">\n  <div class=\"error-heading\">Errors:</div>\n  <ul>\n")?;
    for error in &spec.errors {
        writeln!(out, "    <li class=\"error-message\">{}</li>", escape_html(&error.to_string()))?;
    }
    raw(out, "  </ul>\n</div>")
}

fn scenario_container_start(scn: &Scenario, out: &mut dyn Write) -> Result {
    let status = match scn.status {
        Status::Pass => "passed",
        Status::Fail => "failed",
        Status::Skip | Status::NotExecuted => "skipped",
    };
    let hidden = if scn.is_hidden() { " hidden" } else { "" };
    write!(out, "<div class='scenario-container {}{}'", status, hidden)?;
    if let Some(row) = scn.table_row {
        write!(out, " data-tablerow={}", row)?;
    }
    raw(out, ">\n")
}

fn scenario_header_start(scn: &Scenario, out: &mut dyn Write) -> Result {
    write!(
        out,
        r#"<div class="scenario-head">
  <h3 class="head borderBottom">{heading}</h3>
  <span class="time">{time}</span>"#,
        heading = escape_html(&scn.heading),
        time = escape_html(&scn.exec_time),
    )?;
    Ok(())
}

fn step_start(class: &str, step: &Step, out: &mut dyn Write) -> Result {
    writeln!(out, "<div class='{}'>", class)?;
    if step.result.status != Status::Skip {
        writeln!(
            out,
            "  <h5 class='execution-time'><span class='time'>Execution Time : {}</span></h5>",
            escape_html(&step.result.exec_time)
        )?;
    }
    write!(
        out,
        "  <div class='step-info {}'>\n    <ul>\n      <li class='step'>\n        <div class='step-txt'>",
        step.result.status.css_class()
    )?;
    Ok(())
}

fn step_body(step: &Step, out: &mut dyn Write) -> Result {
    for fragment in &step.fragments {
        match fragment {
            Fragment::Text(text) => write!(out, "\n<span>{}</span>", escape_html(text))?,
            Fragment::Parameter(value) | Fragment::TableCellParameter(value) => {
                write!(out, "\n<span class='parameter'>\"{}\"</span>", escape_html(value))?
            }
            Fragment::Placeholder { name, value } => write!(
                out,
                "\n<span class=\"hoverable\">&lt;{}&gt;</span>\n<div class=\"hovercard\">{}</div>",
                escape_html(name),
                escape_html(value)
            )?,
            Fragment::TablePlaceholder { name, table } => {
                write!(out, "\n<span class=\"hoverable\">&lt;{}&gt;</span>\n<div class=\"hovercard\">", escape_html(name))?;
                inline_table(table, out)?;
                raw(out, "</div>")?;
            }
            Fragment::InlineTable(table) => {
                raw(out, "\n<div class='inline-table'>\n  <div>\n")?;
                inline_table(table, out)?;
                raw(out, "  </div>\n</div>")?;
            }
        }
    }
    raw(out, "\n</div>")
}

fn inline_table(table: &Table, out: &mut dyn Write) -> Result {
    raw(out, "<table>\n  <tr>\n    ")?;
    for header in &table.headers {
        write!(out, "<th>{}</th>", escape_html(header))?;
    }
    raw(out, "\n  </tr>\n  <tbody>\n")?;
    for row in &table.rows {
        raw(out, "    <tr>")?;
        for cell in &row.cells {
            write!(out, "<td>{}</td>", escape_html(cell))?;
        }
        raw(out, "</tr>\n")?;
    }
    raw(out, "  </tbody>\n</table>\n")
}

fn step_failure(res: &StepResult, out: &mut dyn Write) -> Result {
    write!(
        out,
        r#"<div class="error-container failed">
  <div class="exception-container">
    <div class="exception">
      <h4 class="error-message"><pre>{message}</pre></h4>
      <pre class="stacktrace">{trace}</pre>
    </div>
"#,
        message = escape_html(&res.error_message),
        trace = escape_html(&res.stack_trace),
    )?;
    if let Some(ref screenshot) = res.screenshot {
        screenshot_div(screenshot, out)?;
    }
    raw(out, "  </div>\n</div>")
}

fn messages(res: &StepResult, out: &mut dyn Write) -> Result {
    if res.messages.is_empty() {
        return Ok(());
    }
    raw(out, "<div class=\"message-container\">\n  ")?;
    for message in &res.messages {
        write!(out, "<p class=\"step-message\">{}</p>", encode_new_lines(message))?;
    }
    raw(out, "\n</div>")
}

fn skipped_reason(res: &StepResult, out: &mut dyn Write) -> Result {
    write!(
        out,
        "<div class=\"message-container\">\n  <h4 class=\"skipReason\">Skipped Reason: {}</h4>\n</div>",
        escape_html(&res.skipped_reason)
    )?;
    Ok(())
}

fn page_end(o: &Overview, out: &mut dyn Write) -> Result {
    write!(
        out,
        r#"
<script type="text/javascript">
  createChart({passed},{failed},{skipped});
</script>
</body>
</html>
"#,
        passed = o.summary.passed,
        failed = o.summary.failed,
        skipped = o.summary.skipped,
    )?;
    Ok(())
}
