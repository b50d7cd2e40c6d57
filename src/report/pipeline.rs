//! Page rendering - drives the section sequence for one output page.
//!
//! Every page starts with the page header and overview and ends with the
//! footer. What sits between depends on the page kind:
//! - failure page: suite setup hook failure(s) only
//! - index page: sidebar, plus a congratulation block if the suite passed
//! - spec page: sidebar, spec header, then the spec body
//!
//! The first section that fails aborts the page.

use super::templates::{RenderContext, Section, SectionData};
use super::types::*;
use crate::error::RenderError;
use std::io::Write;

type Result = std::result::Result<(), RenderError>;

/// Index page for a suite whose setup hook failed: nothing ran, so there is
/// nothing to list.
pub fn render_failure_page(ctx: &RenderContext, page: &FailurePage, w: &mut dyn Write) -> Result {
    render_overview(ctx, &page.overview, w)?;
    ctx.exec(Section::HookFailure, SectionData::HookFailure(&page.pre_hook_failure), w)?;
    if let Some(ref hook) = page.post_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }
    render_page_footer(ctx, &page.overview, w)
}

pub fn render_index_page(ctx: &RenderContext, page: &IndexPage, w: &mut dyn Write) -> Result {
    render_overview(ctx, &page.overview, w)?;
    if let Some(ref hook) = page.post_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }
    ctx.exec(Section::SpecsStart, SectionData::None, w)?;
    ctx.exec(Section::Sidebar, SectionData::Sidebar(&page.sidebar), w)?;
    if page.all_passed {
        ctx.exec(Section::Congratulations, SectionData::None, w)?;
    }
    ctx.exec(Section::EndDiv, SectionData::None, w)?;
    render_page_footer(ctx, &page.overview, w)
}

pub fn render_spec_page(ctx: &RenderContext, page: &SpecPage, w: &mut dyn Write) -> Result {
    render_overview(ctx, &page.overview, w)?;
    // Suite hook failures are shown on every page without hiding the rest
    if let Some(ref hook) = page.pre_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }
    if let Some(ref hook) = page.post_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }
    if page.pre_hook_failure.is_none() {
        ctx.exec(Section::SpecsStart, SectionData::None, w)?;
        ctx.exec(Section::Sidebar, SectionData::Sidebar(&page.sidebar), w)?;
        render_spec(ctx, &page.header, &page.spec, w)?;
        ctx.exec(Section::EndDiv, SectionData::None, w)?;
    }
    render_page_footer(ctx, &page.overview, w)
}

fn render_overview(ctx: &RenderContext, overview: &Overview, w: &mut dyn Write) -> Result {
    ctx.exec(Section::PageStart, SectionData::Overview(overview), w)?;
    ctx.exec(Section::Overview, SectionData::Overview(overview), w)
}

fn render_page_footer(ctx: &RenderContext, overview: &Overview, w: &mut dyn Write) -> Result {
    ctx.exec(Section::EndDiv, SectionData::None, w)?;
    ctx.exec(Section::MainEnd, SectionData::None, w)?;
    ctx.exec(Section::Footer, SectionData::None, w)?;
    ctx.exec(Section::PageEnd, SectionData::Overview(overview), w)
}

/// Spec header and body. A parse error replaces the whole body with the error
/// list; a spec setup hook failure replaces only the scenarios.
fn render_spec(ctx: &RenderContext, header: &SpecHeader, spec: &Spec, w: &mut dyn Write) -> Result {
    ctx.exec(Section::SpecHeaderStart, SectionData::SpecHeader(header), w)?;
    ctx.exec(Section::Tags, SectionData::Tags(&header.tags), w)?;
    ctx.exec(Section::HeaderEnd, SectionData::None, w)?;
    ctx.exec(Section::SpecItemsContainer, SectionData::None, w)?;

    if spec.has_parse_errors() {
        ctx.exec(Section::SpecErrors, SectionData::Spec(spec), w)?;
        return ctx.exec(Section::EndDiv, SectionData::None, w);
    }
    if !spec.errors.is_empty() {
        ctx.exec(Section::SpecErrors, SectionData::Spec(spec), w)?;
    }

    if let Some(ref hook) = spec.before_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }

    ctx.exec(Section::SpecItemsContents, SectionData::None, w)?;
    ctx.exec(Section::SpecCommentsAndTable, SectionData::Spec(spec), w)?;

    if spec.before_hook_failure.is_none() {
        for scenario in &spec.scenarios {
            render_scenario(ctx, scenario, w)?;
        }
    }

    ctx.exec(Section::EndDiv, SectionData::None, w)?;
    ctx.exec(Section::EndDiv, SectionData::None, w)?;

    if let Some(ref hook) = spec.after_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }

    ctx.exec(Section::EndDiv, SectionData::None, w)
}

fn render_scenario(ctx: &RenderContext, scenario: &Scenario, w: &mut dyn Write) -> Result {
    ctx.exec(Section::ScenarioContainerStart, SectionData::Scenario(scenario), w)?;
    ctx.exec(Section::ScenarioHeaderStart, SectionData::Scenario(scenario), w)?;
    ctx.exec(Section::Tags, SectionData::Tags(&scenario.tags), w)?;
    ctx.exec(Section::EndDiv, SectionData::None, w)?;

    if let Some(ref hook) = scenario.before_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }

    for item in &scenario.contexts {
        render_context_or_teardown(ctx, item, w)?;
    }
    for item in &scenario.items {
        render_item(ctx, item, w)?;
    }
    for item in &scenario.teardowns {
        render_context_or_teardown(ctx, item, w)?;
    }

    if let Some(ref hook) = scenario.after_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }
    ctx.exec(Section::EndDiv, SectionData::None, w)
}

fn render_context_or_teardown(ctx: &RenderContext, item: &Item, w: &mut dyn Write) -> Result {
    ctx.exec(Section::ContextOrTeardownStart, SectionData::None, w)?;
    render_item(ctx, item, w)?;
    ctx.exec(Section::EndDiv, SectionData::None, w)
}

fn render_item(ctx: &RenderContext, item: &Item, w: &mut dyn Write) -> Result {
    match item {
        Item::Step(step) => render_step(ctx, step, w),
        Item::Comment(comment) => ctx.exec(Section::Comment, SectionData::Comment(comment), w),
        Item::NestedGroup(group) => {
            ctx.exec(Section::NestedGroupStart, SectionData::Step(&group.step), w)?;
            ctx.exec(Section::NestedGroupMarker, SectionData::None, w)?;
            ctx.exec(Section::StepBody, SectionData::Step(&group.step), w)?;
            ctx.exec(Section::StepEnd, SectionData::Step(&group.step), w)?;
            ctx.exec(Section::NestedGroupStepsStart, SectionData::None, w)?;
            for child in &group.items {
                render_item(ctx, child, w)?;
            }
            ctx.exec(Section::EndDiv, SectionData::None, w)
        }
    }
}

fn render_step(ctx: &RenderContext, step: &Step, w: &mut dyn Write) -> Result {
    ctx.exec(Section::StepStart, SectionData::Step(step), w)?;
    ctx.exec(Section::StepBody, SectionData::Step(step), w)?;

    if let Some(ref hook) = step.pre_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }
    if step.result.has_failure_details() {
        ctx.exec(Section::StepFailure, SectionData::Result(&step.result), w)?;
    }
    if let Some(ref hook) = step.post_hook_failure {
        ctx.exec(Section::HookFailure, SectionData::HookFailure(hook), w)?;
    }

    ctx.exec(Section::Messages, SectionData::Result(&step.result), w)?;
    ctx.exec(Section::StepEnd, SectionData::Step(step), w)?;
    if step.result.has_skip_reason() {
        ctx.exec(Section::SkippedReason, SectionData::Result(&step.result), w)?;
    }
    Ok(())
}
