//! Report generation module - render model, templates and page pipeline.
//!
//! # Module Organization
//!
//! - `types` - Render model (Overview, Sidebar, Spec, Scenario, Item, Fragment)
//! - `stats` - Summaries, success rate and duration formatting
//! - `templates` - Section names, template registry and `RenderContext`
//! - `markup` - Built-in HTML for every section
//! - `pipeline` - Section sequences for the index, spec and failure pages
//! - `search_index` - Tag and title index for the search asset
//!
//! Converting the input tree into the render model lives in the bridge module.

mod markup;
mod pipeline;
pub(crate) mod search_index;
pub(crate) mod stats;
mod templates;
pub(crate) mod types;

// Re-export render model types
pub use types::{Fragment, Item, Status};

// Re-export the rendering context
pub use templates::{RenderContext, Section, SectionData, SectionTemplate, TemplateRegistry};

// Re-export page rendering
pub use pipeline::{render_failure_page, render_index_page, render_spec_page};

pub use search_index::build_search_index;
