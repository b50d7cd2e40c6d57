//! Error types for report generation.
//!
//! Hook failures are not errors: they are part of the result data and are
//! rendered like any other content. The errors here cover templates that
//! cannot be resolved or filled, and output files that cannot be written.

use crate::report::Section;
use std::io;
use std::path::PathBuf;

/// Failure inside a single section template
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),

    #[error("expected {expected} data, got {found}")]
    UnexpectedData { expected: &'static str, found: &'static str },
}

/// Failure to drive the section sequence of a page
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no template registered for section '{section}'")]
    MissingTemplate { section: Section },

    #[error("section '{section}' failed to render: {source}")]
    Template {
        section: Section,
        #[source]
        source: TemplateError,
    },
}

/// Failure of a report generation run
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render {}: {source}", page.display())]
    Render {
        page: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("failed to serialize search index: {0}")]
    SearchIndex(#[from] serde_json::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{} and {} both map to report page {location}", first.display(), second.display())]
    DuplicatePage { location: String, first: PathBuf, second: PathBuf },

    #[error("{} maps to {location}, which is reserved for the suite index", spec.display())]
    ReservedPage { location: String, spec: PathBuf },

    #[error("{failed} of {total} pages failed; first failure: {first}")]
    PagesFailed { failed: usize, total: usize, first: Box<ReportError> },
}
