pub mod geometry {
    use glam::DVec2;
    use serde::{Deserialize, Serialize};

    /// 二维点，内部以 `glam::DVec2` 表示，单位与型材尺寸一致（厘米）。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point2(pub DVec2);

    impl Point2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn from_vec(vec: DVec2) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }
    }

    impl From<DVec2> for Point2 {
        fn from(value: DVec2) -> Self {
            Self::from_vec(value)
        }
    }

    /// 轴对齐边界框，草图区域选择依赖其水平跨度。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Bounds2D {
        min: Point2,
        max: Point2,
    }

    impl Bounds2D {
        #[inline]
        pub fn new(min: Point2, max: Point2) -> Self {
            Self { min, max }
        }

        #[inline]
        pub fn empty() -> Self {
            Self {
                min: Point2::new(f64::INFINITY, f64::INFINITY),
                max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            }
        }

        /// 由一组点计算包围盒，点集为空时返回空包围盒。
        pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
            let mut bounds = Self::empty();
            for point in points {
                bounds.include_point(point);
            }
            bounds
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.min.x() > self.max.x() || self.min.y() > self.max.y()
        }

        #[inline]
        pub fn min(&self) -> Point2 {
            self.min
        }

        #[inline]
        pub fn max(&self) -> Point2 {
            self.max
        }

        /// 水平跨度（max.x - min.x），空包围盒为 0。
        #[inline]
        pub fn width(&self) -> f64 {
            if self.is_empty() {
                0.0
            } else {
                self.max.x() - self.min.x()
            }
        }

        #[inline]
        pub fn height(&self) -> f64 {
            if self.is_empty() {
                0.0
            } else {
                self.max.y() - self.min.y()
            }
        }

        pub fn include_point(&mut self, point: Point2) {
            if self.is_empty() {
                self.min = point;
                self.max = point;
                return;
            }
            let min_vec = self.min.as_vec2().min(point.as_vec2());
            let max_vec = self.max.as_vec2().max(point.as_vec2());
            self.min = Point2::from_vec(min_vec);
            self.max = Point2::from_vec(max_vec);
        }

        /// 判断 `other` 是否严格位于当前包围盒内部。
        pub fn strictly_contains(&self, other: &Bounds2D) -> bool {
            if self.is_empty() || other.is_empty() {
                return false;
            }
            other.min.x() > self.min.x()
                && other.min.y() > self.min.y()
                && other.max.x() < self.max.x()
                && other.max.y() < self.max.y()
        }
    }
}

pub mod profile {
    use std::fmt;

    /// 沿某一面重复排布的螺栓孔样式。所有长度均为非负值，单位与型材一致。
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct HoleProfile {
        /// 参考边到第一个孔的距离。
        pub offset: f64,
        /// 面板边缘到孔中心线的距离。
        pub edge_distance: f64,
        /// 相邻孔的中心距。
        pub spacing: f64,
        pub diameter: f64,
    }

    impl HoleProfile {
        #[inline]
        pub fn new(offset: f64, edge_distance: f64, spacing: f64, diameter: f64) -> Self {
            Self {
                offset,
                edge_distance,
                spacing,
                diameter,
            }
        }
    }

    /// 型材变体的判别标签。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ProfileKind {
        Generic,
        BoxTube,
    }

    impl ProfileKind {
        /// 持久化文件中使用的标签字符串。
        pub fn tag(self) -> &'static str {
            match self {
                ProfileKind::Generic => "GenericFrameProfile",
                ProfileKind::BoxTube => "BoxTubeFrameProfile",
            }
        }

        pub fn from_tag(tag: &str) -> Option<Self> {
            match tag {
                "GenericFrameProfile" => Some(ProfileKind::Generic),
                "BoxTubeFrameProfile" => Some(ProfileKind::BoxTube),
                _ => None,
            }
        }
    }

    impl fmt::Display for ProfileKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.tag())
        }
    }

    /// 所有型材变体共享的截面形状：外形尺寸、两组孔样式和标识。
    ///
    /// 尺寸在构造后不可修改；孔列表只能追加。`id` 只能通过消耗自身的 `with_id`
    /// 在构造阶段设置，持有 `&mut FrameShape` 的调用方无法改写已有标识。
    #[derive(Debug, Clone, PartialEq)]
    pub struct FrameShape {
        width: f64,
        height: f64,
        wall_thickness: f64,
        vertical_holes: Vec<HoleProfile>,
        horizontal_holes: Vec<HoleProfile>,
        id: String,
    }

    impl FrameShape {
        /// 构造新的形状，孔列表为全新的空容器，`id` 为空串。
        pub fn new(width: f64, height: f64, wall_thickness: f64) -> Self {
            Self {
                width,
                height,
                wall_thickness,
                vertical_holes: Vec::new(),
                horizontal_holes: Vec::new(),
                id: String::new(),
            }
        }

        #[inline]
        pub fn width(&self) -> f64 {
            self.width
        }

        #[inline]
        pub fn height(&self) -> f64 {
            self.height
        }

        #[inline]
        pub fn wall_thickness(&self) -> f64 {
            self.wall_thickness
        }

        #[inline]
        pub fn vertical_holes(&self) -> &[HoleProfile] {
            &self.vertical_holes
        }

        #[inline]
        pub fn horizontal_holes(&self) -> &[HoleProfile] {
            &self.horizontal_holes
        }

        #[inline]
        pub fn id(&self) -> &str {
            &self.id
        }

        pub fn with_id(mut self, id: impl Into<String>) -> Self {
            self.id = id.into();
            self
        }

        pub fn push_vertical_hole(&mut self, hole: HoleProfile) {
            self.vertical_holes.push(hole);
        }

        pub fn push_horizontal_hole(&mut self, hole: HoleProfile) {
            self.horizontal_holes.push(hole);
        }

        pub fn extend_vertical_holes(&mut self, holes: impl IntoIterator<Item = HoleProfile>) {
            self.vertical_holes.extend(holes);
        }

        pub fn extend_horizontal_holes(&mut self, holes: impl IntoIterator<Item = HoleProfile>) {
            self.horizontal_holes.extend(holes);
        }
    }

    /// 矩形方管截面尺寸，供轮廓生成使用。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct TubeDimensions {
        pub width: f64,
        pub height: f64,
        pub wall_thickness: f64,
    }

    impl TubeDimensions {
        #[inline]
        pub fn new(width: f64, height: f64, wall_thickness: f64) -> Self {
            Self {
                width,
                height,
                wall_thickness,
            }
        }

        /// 是否能构造出不自交的空心截面：`0 < T < min(W, H) / 2`。
        ///
        /// 壁厚小到 `W / 2 - T` 或 `H / 2 - T` 在 `f64` 中与半宽、半高相等时，
        /// 内外角点重合，同样视为不可构造。
        pub fn is_hollow_constructible(&self) -> bool {
            let all_finite = self.width.is_finite()
                && self.height.is_finite()
                && self.wall_thickness.is_finite();
            let half_width = self.width / 2.0;
            let half_height = self.height / 2.0;
            all_finite
                && self.width > 0.0
                && self.height > 0.0
                && self.wall_thickness > 0.0
                && self.wall_thickness < half_width.min(half_height)
                && half_width - self.wall_thickness < half_width
                && half_height - self.wall_thickness < half_height
        }
    }

    /// 型材变体。新增变体时在此添加分支，并在编解码中补充对应标签。
    #[derive(Debug, Clone, PartialEq)]
    pub enum FrameProfile {
        Generic(FrameShape),
        BoxTube(FrameShape),
    }

    impl FrameProfile {
        pub fn generic(width: f64, height: f64, wall_thickness: f64) -> Self {
            FrameProfile::Generic(FrameShape::new(width, height, wall_thickness))
        }

        pub fn box_tube(width: f64, height: f64, wall_thickness: f64) -> Self {
            FrameProfile::BoxTube(FrameShape::new(width, height, wall_thickness))
        }

        /// 以给定判别标签包装形状。
        pub fn from_shape(kind: ProfileKind, shape: FrameShape) -> Self {
            match kind {
                ProfileKind::Generic => FrameProfile::Generic(shape),
                ProfileKind::BoxTube => FrameProfile::BoxTube(shape),
            }
        }

        #[inline]
        pub fn kind(&self) -> ProfileKind {
            match self {
                FrameProfile::Generic(_) => ProfileKind::Generic,
                FrameProfile::BoxTube(_) => ProfileKind::BoxTube,
            }
        }

        #[inline]
        pub fn shape(&self) -> &FrameShape {
            match self {
                FrameProfile::Generic(shape) | FrameProfile::BoxTube(shape) => shape,
            }
        }

        #[inline]
        pub fn shape_mut(&mut self) -> &mut FrameShape {
            match self {
                FrameProfile::Generic(shape) | FrameProfile::BoxTube(shape) => shape,
            }
        }

        #[inline]
        pub fn id(&self) -> &str {
            self.shape().id()
        }

        /// 仅方管具备截面几何能力，其他变体返回 `None`。
        pub fn tube_dimensions(&self) -> Option<TubeDimensions> {
            match self {
                FrameProfile::BoxTube(shape) => Some(TubeDimensions::new(
                    shape.width(),
                    shape.height(),
                    shape.wall_thickness(),
                )),
                FrameProfile::Generic(_) => None,
            }
        }

        pub fn with_id(self, id: impl Into<String>) -> Self {
            match self {
                FrameProfile::Generic(shape) => FrameProfile::Generic(shape.with_id(id)),
                FrameProfile::BoxTube(shape) => FrameProfile::BoxTube(shape.with_id(id)),
            }
        }

        pub fn with_vertical_hole(mut self, hole: HoleProfile) -> Self {
            self.shape_mut().push_vertical_hole(hole);
            self
        }

        pub fn with_horizontal_hole(mut self, hole: HoleProfile) -> Self {
            self.shape_mut().push_horizontal_hole(hole);
            self
        }
    }
}

/// VersaFrame 默认型材目录。尺寸以英寸给出，换算为厘米存储。
pub mod catalog {
    use crate::profile::{FrameProfile, HoleProfile};

    pub const CM_PER_INCH: f64 = 2.54;

    #[inline]
    pub fn inches(value: f64) -> f64 {
        value * CM_PER_INCH
    }

    fn inch_tube(width: f64, height: f64, wall_thickness: f64) -> FrameProfile {
        FrameProfile::box_tube(inches(width), inches(height), inches(wall_thickness))
    }

    fn inch_holes(offset: f64, edge_distance: f64, spacing: f64, diameter: f64) -> HoleProfile {
        HoleProfile::new(
            inches(offset),
            inches(edge_distance),
            inches(spacing),
            inches(diameter),
        )
    }

    /// 标准 #10 螺栓孔：1 英寸间距，0.163 英寸孔径。
    fn standard_holes(offset: f64) -> HoleProfile {
        inch_holes(offset, 0.5, 1.0, 0.163)
    }

    /// 生成四种 VersaFrame 方管型材，每个条目拥有独立的孔列表。
    pub fn versaframe() -> Vec<FrameProfile> {
        vec![
            inch_tube(1.0, 2.0, 0.1)
                .with_vertical_hole(standard_holes(0.5))
                .with_id("1 x 2 x 0.100 VersaFrame"),
            inch_tube(1.0, 2.0, 0.05)
                .with_vertical_hole(standard_holes(0.5))
                .with_id("1 x 2 x 0.050 VersaFrame"),
            inch_tube(1.0, 1.0, 0.1)
                .with_horizontal_hole(standard_holes(0.5))
                .with_id("1 x 1 x 0.100 VersaFrame"),
            inch_tube(1.0, 1.0, 0.04)
                .with_horizontal_hole(standard_holes(0.5))
                .with_vertical_hole(standard_holes(0.0))
                .with_id("1 x 1 x 0.040 VersaFrame"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::catalog::{inches, versaframe};
    use super::geometry::{Bounds2D, Point2};
    use super::profile::{FrameProfile, FrameShape, HoleProfile, ProfileKind};

    #[test]
    fn bounds_track_extent() {
        let bounds = Bounds2D::from_points([
            Point2::new(-1.27, 2.54),
            Point2::new(1.27, -2.54),
            Point2::new(0.0, 0.0),
        ]);
        assert!((bounds.width() - 2.54).abs() < 1e-12);
        assert!((bounds.height() - 5.08).abs() < 1e-12);
        assert_eq!(bounds.min(), Point2::new(-1.27, -2.54));
        assert_eq!(bounds.max(), Point2::new(1.27, 2.54));
        assert_eq!(Bounds2D::empty().width(), 0.0);
    }

    #[test]
    fn strict_containment_excludes_touching_boxes() {
        let outer = Bounds2D::new(Point2::new(-2.0, -2.0), Point2::new(2.0, 2.0));
        let inner = Bounds2D::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
        let touching = Bounds2D::new(Point2::new(-2.0, -1.0), Point2::new(1.0, 1.0));
        assert!(outer.strictly_contains(&inner));
        assert!(!inner.strictly_contains(&outer));
        assert!(!outer.strictly_contains(&touching));
    }

    #[test]
    fn geometry_serializes_through_serde() {
        let point = Point2::new(1.5, -2.0);
        let json = serde_json::to_string(&point).expect("serialize point");
        let back: Point2 = serde_json::from_str(&json).expect("deserialize point");
        assert_eq!(back, point);
    }

    #[test]
    fn hole_lists_are_independent_per_instance() {
        let mut first = FrameShape::new(1.0, 2.0, 0.1);
        let second = FrameShape::new(1.0, 2.0, 0.1);
        first.push_vertical_hole(HoleProfile::new(1.0, 1.0, 1.0, 0.5));
        first.push_horizontal_hole(HoleProfile::default());

        assert_eq!(first.vertical_holes().len(), 1);
        assert_eq!(first.horizontal_holes().len(), 1);
        assert!(second.vertical_holes().is_empty());
        assert!(second.horizontal_holes().is_empty());
    }

    #[test]
    fn id_is_empty_until_set() {
        let profile = FrameProfile::box_tube(1.0, 1.0, 0.1);
        assert_eq!(profile.id(), "");
        let mut profile = profile.with_id("tube");
        assert_eq!(profile.id(), "tube");
        assert_eq!(profile.kind(), ProfileKind::BoxTube);

        // 可变借用只允许追加孔位，标识保持不变
        profile.shape_mut().push_vertical_hole(HoleProfile::default());
        assert_eq!(profile.id(), "tube");
    }

    #[test]
    fn only_box_tubes_expose_dimensions() {
        let tube = FrameProfile::box_tube(2.0, 4.0, 0.5);
        let dims = tube.tube_dimensions().expect("box tube has geometry");
        assert_eq!(dims.width, 2.0);
        assert_eq!(dims.height, 4.0);
        assert_eq!(dims.wall_thickness, 0.5);
        assert!(dims.is_hollow_constructible());

        assert!(FrameProfile::generic(2.0, 4.0, 0.5).tube_dimensions().is_none());
    }

    #[test]
    fn hollow_check_rejects_thick_or_degenerate_walls() {
        use super::profile::TubeDimensions;
        assert!(!TubeDimensions::new(2.0, 4.0, 1.0).is_hollow_constructible());
        assert!(!TubeDimensions::new(2.0, 4.0, 0.0).is_hollow_constructible());
        assert!(!TubeDimensions::new(2.0, 4.0, -0.1).is_hollow_constructible());
        assert!(!TubeDimensions::new(f64::NAN, 4.0, 0.1).is_hollow_constructible());
        assert!(TubeDimensions::new(2.0, 4.0, 0.99).is_hollow_constructible());
    }

    #[test]
    fn thin_walls_stay_constructible_until_corners_coincide() {
        use super::profile::TubeDimensions;
        assert!(TubeDimensions::new(2.54, 5.08, 1e-10).is_hollow_constructible());
        assert!(TubeDimensions::new(2.54, 5.08, 1e-15).is_hollow_constructible());
        // 1.27 - 1e-17 == 1.27，内外角点重合
        assert!(!TubeDimensions::new(2.54, 5.08, 1e-17).is_hollow_constructible());
    }

    #[test]
    fn kind_tags_round_trip() {
        for kind in [ProfileKind::Generic, ProfileKind::BoxTube] {
            assert_eq!(ProfileKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ProfileKind::from_tag("HoleProfile"), None);
    }

    #[test]
    fn versaframe_catalog_matches_fixture() {
        let profiles = versaframe();
        let ids: Vec<&str> = profiles.iter().map(|p| p.id()).collect();
        assert_eq!(
            ids,
            [
                "1 x 2 x 0.100 VersaFrame",
                "1 x 2 x 0.050 VersaFrame",
                "1 x 1 x 0.100 VersaFrame",
                "1 x 1 x 0.040 VersaFrame",
            ]
        );
        assert!(profiles.iter().all(|p| p.kind() == ProfileKind::BoxTube));

        let first = profiles[0].shape();
        assert!((first.width() - 2.54).abs() < 1e-12);
        assert!((first.height() - 5.08).abs() < 1e-12);
        assert!((first.wall_thickness() - 0.254).abs() < 1e-12);
        assert_eq!(first.vertical_holes().len(), 1);
        assert!(first.horizontal_holes().is_empty());

        let third = profiles[2].shape();
        assert_eq!(third.vertical_holes().len(), 0);
        assert_eq!(third.horizontal_holes().len(), 1);

        let fourth = profiles[3].shape();
        assert_eq!(fourth.vertical_holes().len(), 1);
        assert_eq!(fourth.horizontal_holes().len(), 1);
        assert_eq!(fourth.vertical_holes()[0].offset, 0.0);
        assert!((fourth.horizontal_holes()[0].diameter - inches(0.163)).abs() < 1e-12);
    }
}
