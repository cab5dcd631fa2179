use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use tubeframe_core::catalog::versaframe;
use tubeframe_core::profile::FrameProfile;
use tubeframe_engine::outline::outline_for;
use tubeframe_engine::sketch::Sketch;
use tubeframe_io::{CatalogReport, JsonProfileStore};

use crate::errors::FrontendError;
use crate::report::ErrorReporter;

/// 单个型材的截面摘要。
#[derive(Debug, Clone)]
pub struct OutlineSummary {
    pub id: String,
    pub line_count: usize,
    /// 选中区域（管壁）的水平跨度。
    pub ring_width: f64,
    pub ring_height: f64,
    pub hole_count: usize,
}

/// 一次目录生成的结果。
#[derive(Debug)]
pub struct CatalogRun {
    pub directory: PathBuf,
    pub report: CatalogReport,
    pub verified: usize,
    /// 回读后与原始数据不一致或无法回读的型材标识。
    pub verification_failures: Vec<String>,
    pub outlines: Vec<OutlineSummary>,
}

impl CatalogRun {
    pub fn failed(&self) -> usize {
        self.report.failures.len() + self.verification_failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }
}

/// 生成 VersaFrame 目录并写入 `directory`。单个型材失败会通过 `reporter` 上报，其余条目继续处理。
pub fn generate_catalog(
    directory: &Path,
    verify: bool,
    reporter: &dyn ErrorReporter,
) -> Result<CatalogRun, FrontendError> {
    generate_profiles(&versaframe(), directory, verify, reporter)
}

pub fn generate_profiles(
    profiles: &[FrameProfile],
    directory: &Path,
    verify: bool,
    reporter: &dyn ErrorReporter,
) -> Result<CatalogRun, FrontendError> {
    fs::create_dir_all(directory).map_err(|source| FrontendError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let store = JsonProfileStore::new();
    let report = store.save_all(profiles, directory);
    for failure in &report.failures {
        warn!(id = %failure.id, error = %failure.error, "保存型材失败");
        reporter.report(&format!("保存型材 {:?} 失败: {}", failure.id, failure.error));
    }
    info!(
        directory = %directory.display(),
        saved = report.saved.len(),
        failed = report.failures.len(),
        "型材目录写出完成"
    );

    let saved: Vec<&FrameProfile> = profiles
        .iter()
        .filter(|profile| report.failures.iter().all(|failure| failure.id != profile.id()))
        .collect();

    let mut verified = 0;
    let mut verification_failures = Vec::new();
    if verify {
        for (profile, path) in saved.iter().zip(&report.saved) {
            match store.load_profile(path) {
                Ok(loaded) if loaded == **profile => verified += 1,
                Ok(_) => {
                    reporter.report(&format!("型材 {:?} 回读结果与原始数据不一致", profile.id()));
                    verification_failures.push(profile.id().to_string());
                }
                Err(err) => {
                    reporter.report(&format!("回读型材 {:?} 失败: {err}", profile.id()));
                    verification_failures.push(profile.id().to_string());
                }
            }
        }
        debug!(verified, "回读校验完成");
    }

    let outlines = saved
        .iter()
        .filter_map(|profile| match summarize_outline(profile) {
            Ok(summary) => Some(summary),
            Err(err) => {
                reporter.report(&format!("生成型材 {:?} 截面失败: {err}", profile.id()));
                None
            }
        })
        .collect();

    Ok(CatalogRun {
        directory: directory.to_path_buf(),
        report,
        verified,
        verification_failures,
        outlines,
    })
}

/// 在内存草图上构造截面并提取摘要。
pub fn summarize_outline(profile: &FrameProfile) -> Result<OutlineSummary, FrontendError> {
    let mut sketch = Sketch::new();
    let selected = outline_for(profile, &mut sketch)?;
    let hole_count = sketch
        .region(selected.region)
        .map_or(0, |region| region.holes.len());
    Ok(OutlineSummary {
        id: profile.id().to_string(),
        line_count: sketch.line_count(),
        ring_width: selected.bounds.width(),
        ring_height: selected.bounds.height(),
        hole_count,
    })
}
