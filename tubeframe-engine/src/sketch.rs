//! 内存草图：记录点与线段，并按闭合回路枚举封闭区域。
//! 坐标完全相同的点合并为同一顶点。
//!
//! 仅处理互不相交的线段集合。每个所有顶点度数均为 2 的连通分量构成一条闭合回路，
//! 每条回路围成一个区域，直接嵌套在其中的回路作为该区域的孔。

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;
use tubeframe_core::geometry::{Bounds2D, Point2};

use crate::outline::{DraftingPort, RegionExtent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(usize);

#[derive(Debug, Clone)]
pub struct SketchRegion {
    pub id: RegionId,
    /// 外边界顶点，按回路遍历顺序排列。
    pub boundary: Vec<Point2>,
    pub holes: Vec<RegionId>,
    pub bounds: Bounds2D,
}

#[derive(Debug, Default)]
pub struct Sketch {
    points: Vec<Point2>,
    /// 每个点句柄对应的合并后顶点下标。
    canonical: Vec<usize>,
    lines: Vec<(usize, usize)>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn point(&self, id: PointId) -> Option<Point2> {
        self.points.get(id.0).copied()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn region(&self, id: RegionId) -> Option<SketchRegion> {
        self.regions().into_iter().find(|region| region.id == id)
    }

    /// 枚举所有封闭区域。区域 ID 按回路中最小顶点下标排序分配，同一草图多次调用结果稳定。
    pub fn regions(&self) -> Vec<SketchRegion> {
        let loops = self.closed_loops();
        let polygons: Vec<Vec<Point2>> = loops
            .iter()
            .map(|cycle| cycle.iter().map(|&index| self.points[index]).collect())
            .collect();
        let bounds: Vec<Bounds2D> = polygons
            .iter()
            .map(|polygon| Bounds2D::from_points(polygon.iter().copied()))
            .collect();

        let mut holes: Vec<Vec<RegionId>> = vec![Vec::new(); loops.len()];
        for inner in 0..polygons.len() {
            let parent = (0..polygons.len())
                .filter(|&outer| {
                    outer != inner
                        && bounds[outer].strictly_contains(&bounds[inner])
                        && point_in_polygon(polygons[inner][0], &polygons[outer])
                })
                .min_by(|&a, &b| {
                    polygon_area(&polygons[a]).total_cmp(&polygon_area(&polygons[b]))
                });
            if let Some(parent) = parent {
                holes[parent].push(RegionId(inner));
            }
        }

        polygons
            .into_iter()
            .zip(bounds)
            .zip(holes)
            .enumerate()
            .map(|(index, ((boundary, bounds), holes))| SketchRegion {
                id: RegionId(index),
                boundary,
                holes,
                bounds,
            })
            .collect()
    }

    fn canonical_index(&self, position: Point2) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .find(|(index, existing)| self.canonical[*index] == *index && **existing == position)
            .map(|(index, _)| index)
    }

    fn closed_loops(&self) -> Vec<Vec<usize>> {
        let edges: BTreeSet<(usize, usize)> = self
            .lines
            .iter()
            .filter(|(a, b)| a != b)
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect();

        let mut adjacency: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for &(a, b) in &edges {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }

        let mut visited: BTreeSet<usize> = BTreeSet::new();
        let mut loops = Vec::new();
        for &start in adjacency.keys() {
            if visited.contains(&start) {
                continue;
            }
            let component = collect_component(&adjacency, start);
            visited.extend(component.iter().copied());

            if component.iter().all(|vertex| adjacency[vertex].len() == 2) {
                loops.push(walk_cycle(&adjacency, start));
            } else {
                trace!(vertices = component.len(), "跳过未闭合的线段链");
            }
        }
        loops
    }
}

fn collect_component(adjacency: &BTreeMap<usize, Vec<usize>>, start: usize) -> BTreeSet<usize> {
    let mut component = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(vertex) = stack.pop() {
        if component.insert(vertex) {
            stack.extend(adjacency[&vertex].iter().copied());
        }
    }
    component
}

fn walk_cycle(adjacency: &BTreeMap<usize, Vec<usize>>, start: usize) -> Vec<usize> {
    let mut cycle = vec![start];
    let mut previous = start;
    let mut current = adjacency[&start][0];
    while current != start {
        cycle.push(current);
        let neighbors = &adjacency[&current];
        let next = if neighbors[0] == previous {
            neighbors[1]
        } else {
            neighbors[0]
        };
        previous = current;
        current = next;
    }
    cycle
}

fn polygon_area(polygon: &[Point2]) -> f64 {
    let mut twice_area = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        twice_area += a.x() * b.y() - b.x() * a.y();
    }
    (twice_area / 2.0).abs()
}

fn point_in_polygon(point: Point2, polygon: &[Point2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y() > point.y()) != (b.y() > point.y()) {
            let crossing = (b.x() - a.x()) * (point.y() - a.y()) / (b.y() - a.y()) + a.x();
            if point.x() < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

impl DraftingPort for Sketch {
    type Point = PointId;
    type Region = RegionId;

    fn define_point(&mut self, position: Point2) -> PointId {
        let index = self.points.len();
        let canonical = self.canonical_index(position).unwrap_or(index);
        self.points.push(position);
        self.canonical.push(canonical);
        PointId(index)
    }

    fn add_line(&mut self, from: PointId, to: PointId) {
        let from = self.canonical[from.0];
        let to = self.canonical[to.0];
        self.lines.push((from, to));
    }

    fn closed_regions(&self) -> Vec<RegionExtent<RegionId>> {
        self.regions()
            .into_iter()
            .map(|region| RegionExtent::new(region.id, region.bounds))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_polygon(sketch: &mut Sketch, corners: &[(f64, f64)]) {
        let handles: Vec<PointId> = corners
            .iter()
            .map(|&(x, y)| sketch.define_point(Point2::new(x, y)))
            .collect();
        for i in 0..handles.len() {
            sketch.add_line(handles[(i + 1) % handles.len()], handles[i]);
        }
    }

    #[test]
    fn nested_rectangles_form_ring_and_hollow() {
        let mut sketch = Sketch::new();
        draw_polygon(&mut sketch, &[(2.0, 1.0), (-2.0, 1.0), (-2.0, -1.0), (2.0, -1.0)]);
        draw_polygon(&mut sketch, &[(1.5, 0.5), (-1.5, 0.5), (-1.5, -0.5), (1.5, -0.5)]);

        let regions = sketch.regions();
        assert_eq!(regions.len(), 2);
        let ring = regions
            .iter()
            .find(|region| !region.holes.is_empty())
            .expect("ring region");
        assert!((ring.bounds.width() - 4.0).abs() < 1e-12);
        let hollow = sketch.region(ring.holes[0]).expect("hollow region");
        assert!(hollow.holes.is_empty());
        assert!((hollow.bounds.width() - 3.0).abs() < 1e-12);
        assert_eq!(sketch.closed_regions().len(), 2);
    }

    #[test]
    fn open_chains_are_not_regions() {
        let mut sketch = Sketch::new();
        let a = sketch.define_point(Point2::new(0.0, 0.0));
        let b = sketch.define_point(Point2::new(1.0, 0.0));
        let c = sketch.define_point(Point2::new(1.0, 1.0));
        sketch.add_line(a, b);
        sketch.add_line(b, c);
        assert_eq!(sketch.line_count(), 2);
        assert!(sketch.regions().is_empty());
    }

    #[test]
    fn coincident_points_are_merged() {
        let mut sketch = Sketch::new();
        let a = sketch.define_point(Point2::new(0.0, 0.0));
        let b = sketch.define_point(Point2::new(1.0, 0.0));
        let b_again = sketch.define_point(Point2::new(1.0, 0.0));
        let c = sketch.define_point(Point2::new(0.0, 1.0));
        let a_again = sketch.define_point(Point2::new(0.0, 0.0));
        sketch.add_line(a, b);
        sketch.add_line(b_again, c);
        sketch.add_line(c, a_again);

        let regions = sketch.regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].boundary.len(), 3);
        assert_eq!(sketch.point(b_again), Some(Point2::new(1.0, 0.0)));
    }

    #[test]
    fn side_by_side_loops_are_not_nested() {
        let mut sketch = Sketch::new();
        draw_polygon(&mut sketch, &[(1.0, 1.0), (0.0, 1.0), (0.0, 0.0), (1.0, 0.0)]);
        draw_polygon(&mut sketch, &[(3.0, 1.0), (2.0, 1.0), (2.0, 0.0), (3.0, 0.0)]);
        let regions = sketch.regions();
        assert_eq!(regions.len(), 2);
        assert!(regions.iter().all(|region| region.holes.is_empty()));
    }
}
