use crate::bridge::{self, ReportLayout};
use crate::config::ReportConfig;
use crate::error::{RenderError, ReportError};
use crate::report::{self, RenderContext};
use crate::types::{SpecResult, SuiteResult};
use log::{debug, error, info, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Aggregate page, relative to the report directory
pub const INDEX_PAGE: &str = "index.html";
/// Search index asset, relative to the report directory
pub const SEARCH_INDEX_FILE: &str = "js/search_index.js";

/// What one generation run wrote
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    /// Every page written, index first
    pub pages: Vec<PathBuf>,
    pub search_index: PathBuf,
}

/// One output page of a generation run
#[derive(Debug, Clone, Copy)]
enum PageJob<'a> {
    Index,
    Spec(&'a SpecResult),
}

/// Generate the full report for a suite
///
/// Normally renders the index page and one page per spec on a worker pool,
/// waits for all of them, then writes the search index. When the suite's
/// setup hook failed only the failure page is written (plus the search index).
///
/// Spec pages that would share a file, or overwrite the index page, are
/// rejected before anything is written. Past that check, a failing page does
/// not stop the others: every page is attempted and all failures are logged
/// before `PagesFailed` is returned.
pub fn generate_reports(
    suite: &SuiteResult,
    ctx: &RenderContext,
    config: &ReportConfig,
) -> Result<GenerationSummary, ReportError> {
    let layout = ReportLayout { project_root: config.project_root.clone(), timestamp: generation_timestamp(suite) };

    let failure_page = bridge::to_failure_page(suite, &layout);
    if failure_page.is_none() {
        check_page_locations(suite, &layout.project_root)?;
    }

    create_dir(&config.report_dir)?;

    let results = match failure_page {
        Some(page) => {
            warn!("Before Suite hook failed, skipping {} spec page(s)", suite.spec_results.len());
            vec![write_page(&config.report_dir, INDEX_PAGE, |w| report::render_failure_page(ctx, &page, w))]
        }
        None => render_pages(suite, ctx, config, &layout)?,
    };

    // Written even when some pages failed; it only depends on the input tree
    let search_index = write_search_index(suite, config)?;

    let total = results.len();
    let mut pages = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(path) => pages.push(path),
            Err(e) => failures.push(e),
        }
    }

    if let Some(first) = failures.into_iter().next() {
        let failed = total - pages.len();
        return Err(ReportError::PagesFailed { failed, total, first: Box::new(first) });
    }

    info!("Generated {} page(s) in {}", pages.len(), config.report_dir.display());
    Ok(GenerationSummary { pages, search_index })
}

/// Every spec page must have its own location, distinct from the index page.
///
/// Checked before any worker starts so two workers never write the same file.
fn check_page_locations(suite: &SuiteResult, project_root: &Path) -> Result<(), ReportError> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for spec in &suite.spec_results {
        let location = bridge::to_html_file_name(&spec.file_name, project_root);
        if location == INDEX_PAGE {
            return Err(ReportError::ReservedPage { location, spec: spec.file_name.clone() });
        }
        if let Some(first) = seen.insert(location.clone(), &spec.file_name) {
            return Err(ReportError::DuplicatePage {
                location,
                first: first.to_path_buf(),
                second: spec.file_name.clone(),
            });
        }
    }
    Ok(())
}

/// Render the index page and every spec page on a worker pool.
///
/// Results come back in job order: index first, then specs in input order.
fn render_pages(
    suite: &SuiteResult,
    ctx: &RenderContext,
    config: &ReportConfig,
    layout: &ReportLayout,
) -> Result<Vec<Result<PathBuf, ReportError>>, ReportError> {
    let mut jobs = vec![PageJob::Index];
    jobs.extend(suite.spec_results.iter().map(PageJob::Spec));

    let pool = ThreadPoolBuilder::new().num_threads(config.jobs).build()?;
    debug!("Rendering {} page(s) on {} thread(s)", jobs.len(), pool.current_num_threads());

    let results: Vec<_> =
        pool.install(|| jobs.par_iter().map(|job| render_job(*job, suite, ctx, config, layout)).collect());

    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        error!("{}", err);
    }

    Ok(results)
}

fn render_job(
    job: PageJob<'_>,
    suite: &SuiteResult,
    ctx: &RenderContext,
    config: &ReportConfig,
    layout: &ReportLayout,
) -> Result<PathBuf, ReportError> {
    match job {
        PageJob::Index => {
            let page = bridge::to_index_page(suite, layout);
            write_page(&config.report_dir, INDEX_PAGE, |w| report::render_index_page(ctx, &page, w))
        }
        PageJob::Spec(spec) => {
            let file = bridge::to_html_file_name(&spec.file_name, &layout.project_root);
            let page = bridge::to_spec_page(suite, spec, layout);
            write_page(&config.report_dir, &file, |w| report::render_spec_page(ctx, &page, w))
        }
    }
}

/// Create `file` under the report directory and render into it.
///
/// The file is owned by this call and closed on every path out of it.
fn write_page<F>(report_dir: &Path, file: &str, render: F) -> Result<PathBuf, ReportError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), RenderError>,
{
    let path = report_dir.join(file);
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }

    let out = File::create(&path).map_err(|source| ReportError::CreateFile { path: path.clone(), source })?;
    let mut writer = BufWriter::new(out);

    render(&mut writer).map_err(|source| ReportError::Render { page: path.clone(), source })?;
    writer.flush().map_err(|source| ReportError::Write { path: path.clone(), source })?;

    debug!("Wrote {}", path.display());
    Ok(path)
}

fn write_search_index(suite: &SuiteResult, config: &ReportConfig) -> Result<PathBuf, ReportError> {
    let index = report::build_search_index(suite, &config.project_root);
    let script = index.to_script()?;

    let path = config.report_dir.join(SEARCH_INDEX_FILE);
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(&path, script).map_err(|source| ReportError::Write { path: path.clone(), source })?;

    debug!("Wrote search index with {} tag(s) and {} spec title(s)", index.tags.len(), index.specs.len());
    Ok(path)
}

fn create_dir(path: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(path).map_err(|source| ReportError::CreateDir { path: path.to_path_buf(), source })
}

/// Timestamp shown on every page: the suite's own, or local time now.
fn generation_timestamp(suite: &SuiteResult) -> String {
    if !suite.timestamp.is_empty() {
        return suite.timestamp.clone();
    }
    chrono::Local::now().format("%b %-d, %Y at %-I:%M%P").to_string()
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
