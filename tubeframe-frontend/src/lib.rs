pub mod catalog;
pub mod cli;
pub mod errors;
pub mod report;

use std::path::Path;

use errors::FrontendError;
use report::ErrorReporter;
use tracing::info;
use tubeframe_config::CatalogConfig;

/// 按配置生成 VersaFrame 目录并打印结果；有任何型材失败时返回 `CatalogIncomplete`。
pub fn run_catalog(
    config: &CatalogConfig,
    reporter: &dyn ErrorReporter,
) -> Result<(), FrontendError> {
    info!(directory = %config.output_dir.display(), "开始生成型材目录");
    let run = catalog::generate_catalog(&config.output_dir, config.verify_round_trip, reporter)?;
    cli::print_catalog_run(&run);
    if run.is_complete() {
        Ok(())
    } else {
        Err(FrontendError::CatalogIncomplete {
            failed: run.failed(),
            total: run.report.total(),
        })
    }
}

/// 查看单个型材文件。
pub fn show_profile(path: &Path, reporter: &dyn ErrorReporter) -> Result<(), FrontendError> {
    info!(path = %path.display(), "查看型材文件");
    cli::show_profile_file(path, reporter)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::report::{ConsoleReporter, TracingReporter};

    #[test]
    fn run_catalog_succeeds_into_fresh_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = CatalogConfig {
            output_dir: dir.path().join("profiles"),
            verify_round_trip: true,
        };
        run_catalog(&config, &TracingReporter).expect("catalog run");
        assert_eq!(
            std::fs::read_dir(&config.output_dir)
                .expect("read output")
                .count(),
            4
        );

        let saved = config.output_dir.join("1 x 1 x 0.040 VersaFrame.json");
        show_profile(&saved, &TracingReporter).expect("show profile");
    }

    #[test]
    fn show_profile_propagates_missing_file() {
        let err = show_profile(&PathBuf::from("/nonexistent/profile.json"), &TracingReporter)
            .unwrap_err();
        assert!(matches!(err, FrontendError::Io(_)));
    }

    #[test]
    fn console_reporter_drives_catalog_run() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = CatalogConfig {
            output_dir: dir.path().join("profiles"),
            verify_round_trip: true,
        };
        run_catalog(&config, &ConsoleReporter).expect("catalog run");

        let err = show_profile(&dir.path().join("missing.json"), &ConsoleReporter).unwrap_err();
        assert!(matches!(err, FrontendError::Io(_)));
    }
}
