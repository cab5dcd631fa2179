use std::path::Path;

use tracing::info;
use tubeframe_core::profile::{FrameProfile, HoleProfile};
use tubeframe_io::codec::Decoded;
use tubeframe_io::{JsonProfileStore, ProfileLoader};

use crate::catalog::{CatalogRun, OutlineSummary, summarize_outline};
use crate::errors::FrontendError;
use crate::report::ErrorReporter;

/// 打印目录生成结果。
pub fn print_catalog_run(run: &CatalogRun) {
    println!("VersaFrame 型材目录：{}", run.directory.display());
    for path in &run.report.saved {
        println!("  - 已写出 {}", path.display());
    }
    for failure in &run.report.failures {
        println!("  - 写出失败 {:?}: {}", failure.id, failure.error);
    }
    if run.verified > 0 {
        println!("回读校验通过 {} 项", run.verified);
    }
    if !run.verification_failures.is_empty() {
        println!("回读校验失败：{}", run.verification_failures.join(", "));
    }

    println!("截面概览：");
    for outline in &run.outlines {
        print_outline(outline);
    }
}

fn print_outline(outline: &OutlineSummary) {
    println!(
        "  - {}: 线段={}, 管壁区域 {:.3} x {:.3}, 内孔={}",
        outline.id, outline.line_count, outline.ring_width, outline.ring_height, outline.hole_count
    );
}

fn print_holes(label: &str, holes: &[HoleProfile]) {
    if holes.is_empty() {
        println!("  {label}: 无");
        return;
    }
    println!("  {label}:");
    for hole in holes {
        println!(
            "    - 起始偏移={:.3}, 边距={:.3}, 间距={:.3}, 孔径={:.3}",
            hole.offset, hole.edge_distance, hole.spacing, hole.diameter
        );
    }
}

fn print_profile(profile: &FrameProfile) {
    let shape = profile.shape();
    println!("型材 {:?} ({})", shape.id(), profile.kind());
    println!(
        "  宽={:.3}, 高={:.3}, 壁厚={:.3}",
        shape.width(),
        shape.height(),
        shape.wall_thickness()
    );
    print_holes("竖直面孔位", shape.vertical_holes());
    print_holes("水平面孔位", shape.horizontal_holes());
}

/// 读取单个型材文件并打印其内容与截面。截面无法生成时通过 `reporter` 上报。
pub fn show_profile_file(path: &Path, reporter: &dyn ErrorReporter) -> Result<(), FrontendError> {
    let decoded = JsonProfileStore::new().load(path)?;
    info!(path = %path.display(), record = %decoded.describe(), "已读取型材文件");
    match decoded {
        Decoded::Frame(profile) => {
            print_profile(&profile);
            match summarize_outline(&profile) {
                Ok(outline) => {
                    println!("截面：");
                    print_outline(&outline);
                }
                Err(err) => reporter.report(&format!("生成截面失败: {err}")),
            }
        }
        Decoded::Hole(hole) => {
            println!("孔位记录：");
            print_holes("孔位", &[hole]);
        }
        Decoded::Passthrough(value) => {
            println!("未识别的记录，原样输出：{value}");
        }
    }
    Ok(())
}
