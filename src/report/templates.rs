//! Section templates and the rendering context that owns them.
//!
//! A page is written as a fixed sequence of named sections. Each section is
//! filled by a template from a registry that is checked once, when the
//! `RenderContext` is built, so a page can never ask for a section nobody
//! registered.

use super::markup;
use super::types::*;
use crate::error::{RenderError, TemplateError};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// Named page sections, in roughly the order they appear on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    PageStart,
    Overview,
    HookFailure,
    SpecsStart,
    Sidebar,
    Congratulations,
    SpecHeaderStart,
    Tags,
    HeaderEnd,
    SpecItemsContainer,
    SpecItemsContents,
    SpecCommentsAndTable,
    SpecErrors,
    ScenarioContainerStart,
    ScenarioHeaderStart,
    ContextOrTeardownStart,
    StepStart,
    NestedGroupStart,
    NestedGroupMarker,
    StepBody,
    StepFailure,
    Messages,
    StepEnd,
    SkippedReason,
    Comment,
    NestedGroupStepsStart,
    EndDiv,
    MainEnd,
    Footer,
    PageEnd,
}

impl Section {
    pub const ALL: [Section; 30] = [
        Section::PageStart,
        Section::Overview,
        Section::HookFailure,
        Section::SpecsStart,
        Section::Sidebar,
        Section::Congratulations,
        Section::SpecHeaderStart,
        Section::Tags,
        Section::HeaderEnd,
        Section::SpecItemsContainer,
        Section::SpecItemsContents,
        Section::SpecCommentsAndTable,
        Section::SpecErrors,
        Section::ScenarioContainerStart,
        Section::ScenarioHeaderStart,
        Section::ContextOrTeardownStart,
        Section::StepStart,
        Section::NestedGroupStart,
        Section::NestedGroupMarker,
        Section::StepBody,
        Section::StepFailure,
        Section::Messages,
        Section::StepEnd,
        Section::SkippedReason,
        Section::Comment,
        Section::NestedGroupStepsStart,
        Section::EndDiv,
        Section::MainEnd,
        Section::Footer,
        Section::PageEnd,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::PageStart => "page-start",
            Section::Overview => "overview",
            Section::HookFailure => "hook-failure",
            Section::SpecsStart => "specs-start",
            Section::Sidebar => "sidebar",
            Section::Congratulations => "congratulations",
            Section::SpecHeaderStart => "spec-header-start",
            Section::Tags => "tags",
            Section::HeaderEnd => "header-end",
            Section::SpecItemsContainer => "spec-items-container",
            Section::SpecItemsContents => "spec-items-contents",
            Section::SpecCommentsAndTable => "spec-comments-and-table",
            Section::SpecErrors => "spec-errors",
            Section::ScenarioContainerStart => "scenario-container-start",
            Section::ScenarioHeaderStart => "scenario-header-start",
            Section::ContextOrTeardownStart => "context-or-teardown-start",
            Section::StepStart => "step-start",
            Section::NestedGroupStart => "nested-group-start",
            Section::NestedGroupMarker => "nested-group-marker",
            Section::StepBody => "step-body",
            Section::StepFailure => "step-failure",
            Section::Messages => "messages",
            Section::StepEnd => "step-end",
            Section::SkippedReason => "skipped-reason",
            Section::Comment => "comment",
            Section::NestedGroupStepsStart => "nested-group-steps-start",
            Section::EndDiv => "end-div",
            Section::MainEnd => "main-end",
            Section::Footer => "footer",
            Section::PageEnd => "page-end",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value a section is filled with.
#[derive(Debug, Clone, Copy)]
pub enum SectionData<'a> {
    None,
    Overview(&'a Overview),
    HookFailure(&'a HookFailure),
    Sidebar(&'a Sidebar),
    SpecHeader(&'a SpecHeader),
    Tags(&'a [String]),
    Spec(&'a Spec),
    Scenario(&'a Scenario),
    Step(&'a Step),
    Result(&'a StepResult),
    Comment(&'a Comment),
}

impl SectionData<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            SectionData::None => "no",
            SectionData::Overview(_) => "overview",
            SectionData::HookFailure(_) => "hook failure",
            SectionData::Sidebar(_) => "sidebar",
            SectionData::SpecHeader(_) => "spec header",
            SectionData::Tags(_) => "tags",
            SectionData::Spec(_) => "spec",
            SectionData::Scenario(_) => "scenario",
            SectionData::Step(_) => "step",
            SectionData::Result(_) => "step result",
            SectionData::Comment(_) => "comment",
        }
    }

    pub(crate) fn unexpected(&self, expected: &'static str) -> TemplateError {
        TemplateError::UnexpectedData { expected, found: self.kind() }
    }
}

/// Fills one section, writing straight into the page.
pub trait SectionTemplate: Send + Sync {
    fn render(&self, data: &SectionData<'_>, out: &mut dyn Write) -> Result<(), TemplateError>;
}

impl<F> SectionTemplate for F
where
    F: Fn(&SectionData<'_>, &mut dyn Write) -> Result<(), TemplateError> + Send + Sync,
{
    fn render(&self, data: &SectionData<'_>, out: &mut dyn Write) -> Result<(), TemplateError> {
        self(data, out)
    }
}

/// Built-in markup for one section.
struct HtmlSection(Section);

impl SectionTemplate for HtmlSection {
    fn render(&self, data: &SectionData<'_>, out: &mut dyn Write) -> Result<(), TemplateError> {
        markup::render(self.0, data, out)
    }
}

/// Section templates collected before building a `RenderContext`.
#[derive(Default)]
pub struct TemplateRegistry {
    templates: HashMap<Section, Box<dyn SectionTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in HTML markup for every section.
    pub fn html() -> Self {
        Section::ALL.into_iter().fold(Self::new(), |registry, section| registry.register(section, HtmlSection(section)))
    }

    /// Register or replace the template for a section.
    pub fn register(mut self, section: Section, template: impl SectionTemplate + 'static) -> Self {
        self.templates.insert(section, Box::new(template));
        self
    }

    /// Drop the template for a section.
    #[cfg(test)]
    pub fn without(mut self, section: Section) -> Self {
        self.templates.remove(&section);
        self
    }
}

/// Validated set of section templates, shared read-only by all page workers.
pub struct RenderContext {
    templates: HashMap<Section, Box<dyn SectionTemplate>>,
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext").field("sections", &self.templates.len()).finish()
    }
}

impl RenderContext {
    /// Build a context, failing if any section has no template.
    pub fn new(registry: TemplateRegistry) -> Result<Self, RenderError> {
        if let Some(section) = Section::ALL.into_iter().find(|s| !registry.templates.contains_key(s)) {
            return Err(RenderError::MissingTemplate { section });
        }
        Ok(Self { templates: registry.templates })
    }

    /// Context using the built-in HTML markup.
    pub fn html() -> Result<Self, RenderError> {
        Self::new(TemplateRegistry::html())
    }

    /// Fill one section of a page.
    pub fn exec(&self, section: Section, data: SectionData<'_>, out: &mut dyn Write) -> Result<(), RenderError> {
        let template = self.templates.get(&section).ok_or(RenderError::MissingTemplate { section })?;
        template.render(&data, out).map_err(|source| RenderError::Template { section, source })
    }
}
