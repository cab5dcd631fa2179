use tracing::debug;
use tubeframe_core::geometry::{Bounds2D, Point2};
use tubeframe_core::profile::{FrameProfile, TubeDimensions};

use crate::errors::EngineError;

/// 宿主草图环境需要提供的最小能力集合。
pub trait DraftingPort {
    type Point: Copy;
    type Region;

    fn define_point(&mut self, position: Point2) -> Self::Point;

    /// 在当前草图上添加一条线段。
    fn add_line(&mut self, from: Self::Point, to: Self::Point);

    /// 枚举当前草图中所有封闭区域及其轴对齐包围盒。
    fn closed_regions(&self) -> Vec<RegionExtent<Self::Region>>;
}

/// 区域句柄及其包围盒。
#[derive(Debug, Clone, PartialEq)]
pub struct RegionExtent<R> {
    pub region: R,
    pub bounds: Bounds2D,
}

impl<R> RegionExtent<R> {
    #[inline]
    pub fn new(region: R, bounds: Bounds2D) -> Self {
        Self { region, bounds }
    }

    #[inline]
    pub fn horizontal_extent(&self) -> f64 {
        self.bounds.width()
    }
}

/// 外框与内框角点，顺序为右上、左上、左下、右下。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRings {
    pub outer: [Point2; 4],
    pub inner: [Point2; 4],
}

fn corner_signs(index: usize) -> (f64, f64) {
    let x_sign = if (index + 1) % 4 < 2 { 1.0 } else { -1.0 };
    let y_sign = if index < 2 { 1.0 } else { -1.0 };
    (x_sign, y_sign)
}

/// 以原点为截面中心计算两圈角点，不做尺寸校验。
pub fn corner_points(dims: TubeDimensions) -> CornerRings {
    let half_width = dims.width / 2.0;
    let half_height = dims.height / 2.0;
    let inner_half_width = half_width - dims.wall_thickness;
    let inner_half_height = half_height - dims.wall_thickness;
    CornerRings {
        outer: std::array::from_fn(|i| {
            let (sx, sy) = corner_signs(i);
            Point2::new(sx * half_width, sy * half_height)
        }),
        inner: std::array::from_fn(|i| {
            let (sx, sy) = corner_signs(i);
            Point2::new(sx * inner_half_width, sy * inner_half_height)
        }),
    }
}

/// 生成方管截面并返回管壁所在的环形区域。
///
/// 尺寸不满足 `0 < T < min(W, H) / 2`（或壁厚小到内外角点在 `f64` 中重合）时直接返回错误，
/// 不会向草图写入任何几何。
/// 两个矩形均按角点 `i + 1 -> i` 的方向绘制，保证绕向一致。
pub fn build_outline<P: DraftingPort>(
    dims: TubeDimensions,
    port: &mut P,
) -> Result<RegionExtent<P::Region>, EngineError> {
    if !dims.is_hollow_constructible() {
        return Err(EngineError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
            wall_thickness: dims.wall_thickness,
        });
    }

    let rings = corner_points(dims);
    draw_rectangle(port, rings.outer);
    draw_rectangle(port, rings.inner);

    let regions = port.closed_regions();
    debug!(
        width = dims.width,
        height = dims.height,
        wall_thickness = dims.wall_thickness,
        regions = regions.len(),
        "方管截面已绘制"
    );
    select_widest(regions)
}

/// 按型材变体分派；目前只有方管具备截面几何。
pub fn outline_for<P: DraftingPort>(
    profile: &FrameProfile,
    port: &mut P,
) -> Result<RegionExtent<P::Region>, EngineError> {
    let dims = profile
        .tube_dimensions()
        .ok_or(EngineError::NoGeometry(profile.kind()))?;
    build_outline(dims, port)
}

fn draw_rectangle<P: DraftingPort>(port: &mut P, corners: [Point2; 4]) {
    let handles = corners.map(|corner| port.define_point(corner));
    for i in 0..4 {
        port.add_line(handles[(i + 1) % 4], handles[i]);
    }
}

/// 选出水平跨度最大的区域。环形区域的跨度等于外宽 W，内孔为 W - 2T。
///
/// 跨度按精确值比较；只有完全相同的最大跨度才视为歧义，任意薄的管壁都能区分环形与内孔。
pub fn select_widest<R>(regions: Vec<RegionExtent<R>>) -> Result<RegionExtent<R>, EngineError> {
    let widest = regions
        .iter()
        .map(RegionExtent::horizontal_extent)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut candidates = regions
        .into_iter()
        .filter(|region| region.horizontal_extent() == widest);
    let selected = candidates.next().ok_or(EngineError::NoClosedRegion)?;
    let others = candidates.count();
    if others > 0 {
        return Err(EngineError::AmbiguousGeometry {
            extent: widest,
            count: others + 1,
        });
    }
    Ok(selected)
}
