/// Tests for config module
#[cfg(test)]
mod tests {
    use crate::cli::CliArgs;
    use crate::config::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_flag_wins_over_environment() {
        let root = resolve_project_root(Some(Path::new("/work/shop")), Some("/elsewhere".to_string())).unwrap();
        assert_eq!(root, PathBuf::from("/work/shop"));
    }

    #[test]
    fn test_environment_used_without_flag() {
        let root = resolve_project_root(None, Some("/work/shop".to_string())).unwrap();
        assert_eq!(root, PathBuf::from("/work/shop"));
    }

    #[test]
    fn test_blank_environment_falls_back_to_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_project_root(None, Some("  ".to_string())).unwrap(), cwd);
        assert_eq!(resolve_project_root(None, None).unwrap(), cwd);
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let root = resolve_project_root(Some(Path::new("specs")), None).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("specs"));
    }

    #[test]
    fn test_config_carries_arguments() {
        let args = CliArgs {
            input: PathBuf::from("result.json"),
            output_dir: PathBuf::from("out/report"),
            project_root: Some(PathBuf::from("/work/shop")),
            jobs: 3,
        };

        let config = build_report_config(&args).expect("Should build config");

        assert_eq!(config.input, PathBuf::from("result.json"));
        assert_eq!(config.report_dir, PathBuf::from("out/report"));
        assert_eq!(config.project_root, PathBuf::from("/work/shop"));
        assert_eq!(config.jobs, 3);
    }
}
