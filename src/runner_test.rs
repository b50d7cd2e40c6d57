/// Tests for runner module
#[cfg(test)]
mod tests {
    use crate::config::ReportConfig;
    use crate::error::{ReportError, TemplateError};
    use crate::report::{RenderContext, Section, SectionData, TemplateRegistry};
    use crate::runner::*;
    use crate::types::*;
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    const ROOT: &str = "/work/shop";

    fn config(report_dir: &Path) -> ReportConfig {
        ReportConfig {
            input: PathBuf::from("result.json"),
            report_dir: report_dir.to_path_buf(),
            project_root: PathBuf::from(ROOT),
            jobs: 2,
        }
    }

    fn step(status: ExecStatus, error_message: &str, stack_trace: &str) -> ResultItem {
        ResultItem::Step(StepResult {
            fragments: vec![Fragment::Text { text: "Add to cart".to_string() }],
            result: ExecutionResult {
                status,
                execution_time: 12,
                error_message: error_message.to_string(),
                stack_trace: stack_trace.to_string(),
                screenshot: None,
                skipped_reason: String::new(),
                messages: vec![],
            },
            pre_hook_failure: None,
            post_hook_failure: None,
        })
    }

    fn spec(heading: &str, file: &str, status: ExecStatus, tags: &[&str], step: ResultItem) -> SpecResult {
        SpecResult {
            heading: heading.to_string(),
            file_name: PathBuf::from(file),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status,
            execution_time: 1200,
            pre_hook_failure: None,
            post_hook_failure: None,
            items: vec![SpecItem::Scenario(ScenarioResult {
                heading: format!("{} scenario", heading),
                tags: vec![],
                status,
                execution_time: 1100,
                contexts: vec![],
                items: vec![step],
                teardowns: vec![],
                pre_hook_failure: None,
                post_hook_failure: None,
            })],
            errors: vec![],
        }
    }

    /// One passing untagged spec and one spec with a single failed step.
    fn two_spec_suite() -> SuiteResult {
        let mut suite = SuiteResult::default();
        suite.project_name = "shop".to_string();
        suite.environment = "default".to_string();
        suite.timestamp = "Jan 1, 2026 at 9:00am".to_string();
        suite.failed = true;
        suite.spec_results = vec![
            spec("Browse", "/work/shop/specs/browse.spec", ExecStatus::Passed, &[], step(ExecStatus::Passed, "", "")),
            spec(
                "Checkout",
                "/work/shop/specs/pay/checkout.spec",
                ExecStatus::Failed,
                &["payments"],
                step(ExecStatus::Failed, "card declined", "at pay (checkout.js:10)"),
            ),
        ];
        suite
    }

    fn html_files(dir: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            for entry in fs::read_dir(&current).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension().is_some_and(|e| e == "html") {
                    found.push(path.strip_prefix(dir).unwrap().to_path_buf());
                }
            }
        }
        found.sort();
        found
    }

    #[test]
    fn test_two_specs_produce_three_documents() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RenderContext::html().unwrap();

        let summary = generate_reports(&two_spec_suite(), &ctx, &config(dir.path())).unwrap();

        assert_eq!(summary.pages.len(), 3);
        assert_eq!(summary.pages[0], dir.path().join(INDEX_PAGE));
        assert_eq!(
            html_files(dir.path()),
            vec![PathBuf::from("index.html"), PathBuf::from("specs/browse.html"), PathBuf::from("specs/pay/checkout.html")]
        );

        let failed = fs::read_to_string(dir.path().join("specs/pay/checkout.html")).unwrap();
        assert_eq!(failed.matches("error-container failed").count(), 1);
        assert!(failed.contains("card declined"));
        assert!(failed.contains(r#"href="../../css/style.css""#));

        let passed = fs::read_to_string(dir.path().join("specs/browse.html")).unwrap();
        assert_eq!(passed.matches("error-container failed").count(), 0);
    }

    #[test]
    fn test_search_index_lists_titles_and_tags() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RenderContext::html().unwrap();

        let summary = generate_reports(&two_spec_suite(), &ctx, &config(dir.path())).unwrap();

        assert_eq!(summary.search_index, dir.path().join(SEARCH_INDEX_FILE));
        let script = fs::read_to_string(&summary.search_index).unwrap();
        assert_eq!(
            script,
            r#"var index = {"specs":{"Browse":["specs/browse.html"],"Checkout":["specs/pay/checkout.html"]},"tags":{"payments":["specs/pay/checkout.html"]}};"#
        );
    }

    #[test]
    fn test_pre_suite_hook_failure_writes_only_index() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RenderContext::html().unwrap();
        let mut suite = two_spec_suite();
        suite.pre_hook_failure = Some(HookFailure {
            error_message: "database unreachable".to_string(),
            stack_trace: "at connect()".to_string(),
            screenshot: None,
        });

        let summary = generate_reports(&suite, &ctx, &config(dir.path())).unwrap();

        assert_eq!(summary.pages, vec![dir.path().join(INDEX_PAGE)]);
        assert_eq!(html_files(dir.path()), vec![PathBuf::from("index.html")]);
        assert!(dir.path().join(SEARCH_INDEX_FILE).is_file());

        let index = fs::read_to_string(dir.path().join(INDEX_PAGE)).unwrap();
        assert!(index.contains("Before Suite"));
        assert!(index.contains("database unreachable"));
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let ctx = RenderContext::html().unwrap();
        let suite = two_spec_suite();

        generate_reports(&suite, &ctx, &config(first.path())).unwrap();
        generate_reports(&suite, &ctx, &config(second.path())).unwrap();

        let files = html_files(first.path());
        assert_eq!(files, html_files(second.path()));
        for file in files.iter().map(PathBuf::as_path).chain([Path::new(SEARCH_INDEX_FILE)]) {
            let a = fs::read(first.path().join(file)).unwrap();
            let b = fs::read(second.path().join(file)).unwrap();
            assert!(a == b, "{} differs between runs", file.display());
        }
    }

    fn fail_on_checkout(data: &SectionData<'_>, out: &mut dyn Write) -> Result<(), TemplateError> {
        match data {
            SectionData::SpecHeader(header) if header.name == "Checkout" => {
                Err(TemplateError::Io(std::io::Error::other("template blew up")))
            }
            _ => {
                out.write_all(b"<header>")?;
                Ok(())
            }
        }
    }

    #[test]
    fn test_failed_page_does_not_cancel_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RenderContext::new(TemplateRegistry::html().register(Section::SpecHeaderStart, fail_on_checkout))
            .unwrap();

        let err = generate_reports(&two_spec_suite(), &ctx, &config(dir.path())).unwrap_err();

        match err {
            ReportError::PagesFailed { failed, total, first } => {
                assert_eq!(failed, 1);
                assert_eq!(total, 3);
                assert!(matches!(*first, ReportError::Render { ref page, .. } if page.ends_with("checkout.html")));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(dir.path().join(INDEX_PAGE).is_file());
        assert!(dir.path().join("specs/browse.html").is_file());
        assert!(dir.path().join(SEARCH_INDEX_FILE).is_file());
    }

    #[test]
    fn test_unwritable_report_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "not a directory").unwrap();
        let ctx = RenderContext::html().unwrap();

        let err = generate_reports(&two_spec_suite(), &ctx, &config(&blocker)).unwrap_err();

        assert!(matches!(err, ReportError::CreateDir { ref path, .. } if path == &blocker));
    }

    #[test]
    fn test_missing_timestamp_uses_local_time() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RenderContext::html().unwrap();
        let mut suite = two_spec_suite();
        suite.timestamp.clear();

        generate_reports(&suite, &ctx, &config(dir.path())).unwrap();

        let index = fs::read_to_string(dir.path().join(INDEX_PAGE)).unwrap();
        assert!(index.contains(" at "));
        assert!(!index.contains("Jan 1, 2026 at 9:00am"));
    }

    #[test]
    fn test_spec_named_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report");
        let ctx = RenderContext::html().unwrap();
        let mut suite = two_spec_suite();
        suite.spec_results[0].file_name = PathBuf::from("/work/shop/index.spec");

        let err = generate_reports(&suite, &ctx, &config(&out)).unwrap_err();

        match err {
            ReportError::ReservedPage { location, spec } => {
                assert_eq!(location, INDEX_PAGE);
                assert_eq!(spec, PathBuf::from("/work/shop/index.spec"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(!out.exists(), "nothing should be written");
    }

    #[test]
    fn test_specs_sharing_a_page_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report");
        let ctx = RenderContext::html().unwrap();
        let mut suite = two_spec_suite();
        suite.spec_results[0].file_name = PathBuf::from("/web/login.spec");
        suite.spec_results[1].file_name = PathBuf::from("/api/login.spec");

        let err = generate_reports(&suite, &ctx, &config(&out)).unwrap_err();

        match err {
            ReportError::DuplicatePage { location, first, second } => {
                assert_eq!(location, "login.html");
                assert_eq!(first, PathBuf::from("/web/login.spec"));
                assert_eq!(second, PathBuf::from("/api/login.spec"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(!out.exists(), "nothing should be written");
    }

    #[test]
    fn test_page_locations_unchecked_when_setup_hook_failed() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RenderContext::html().unwrap();
        let mut suite = two_spec_suite();
        suite.spec_results[0].file_name = PathBuf::from("/work/shop/index.spec");
        suite.pre_hook_failure = Some(HookFailure {
            error_message: "database unreachable".to_string(),
            stack_trace: String::new(),
            screenshot: None,
        });

        let summary = generate_reports(&suite, &ctx, &config(dir.path())).unwrap();

        assert_eq!(summary.pages, vec![dir.path().join(INDEX_PAGE)]);
        let index = fs::read_to_string(dir.path().join(INDEX_PAGE)).unwrap();
        assert!(index.contains("Before Suite"));
    }
}
