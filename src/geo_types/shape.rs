use geo::{BoundingRect, Contains};
use geo_types::{coord, Coord, Line, LineString, MultiPolygon, Polygon, Rect};

/// Axis aligned bounds of a shape. Y grows downward like an SVG canvas, so `top`
/// is the smallest y and `bottom` the largest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn from_rect(rect: &Rect<f64>) -> Bounds {
        let min = rect.min();
        let max = rect.max();
        Bounds {
            center_x: (min.x + max.x) / 2.0,
            center_y: (min.y + max.y) / 2.0,
            width: max.x - min.x,
            height: max.y - min.y,
            left: min.x,
            right: max.x,
            top: min.y,
            bottom: max.y,
        }
    }

    pub fn center(&self) -> Coord<f64> {
        coord! {x: self.center_x, y: self.center_y}
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// No interior to speak of: a point, or a line lying along an axis.
    pub fn is_empty(&self) -> bool {
        self.width <= super::EPSILON || self.height <= super::EPSILON
    }
}

/// # Shape
/// Anything closed that we can hatch. A shape knows its bounds, can report where
/// an arbitrary probe segment crosses its boundary, and can say whether a point
/// is inside it.
///
/// The built-in implementations return crossings ordered along the probe, but
/// callers (the hatcher included) must not rely on that for foreign shapes.
pub trait Shape {
    fn bounds(&self) -> Option<Bounds>;

    /// Every point where `probe` crosses the shape boundary.
    fn intersections(&self, probe: &Line<f64>) -> Vec<Coord<f64>>;

    /// True when the point is strictly inside the shape.
    fn contains_point(&self, point: &Coord<f64>) -> bool;
}

/// 2D cross product, ie: which side of `a` is `b` on.
fn cross(a: Coord<f64>, b: Coord<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Where along `probe` (0..=1) the point projects.
pub(crate) fn probe_parameter(probe: &Line<f64>, point: &Coord<f64>) -> f64 {
    let dir = probe.delta();
    let len2 = dir.x * dir.x + dir.y * dir.y;
    if len2 == 0.0 {
        return 0.0;
    }
    let rel = *point - probe.start;
    (rel.x * dir.x + rel.y * dir.y) / len2
}

/// Collect the crossings of one ring with the probe, tagged with their probe
/// parameter.
///
/// An edge crosses when its endpoints sit on different sides of the probe line,
/// where "on the line" counts as the negative side. That half-open rule reports
/// a vertex shared by two crossing edges once, ignores edges lying along the
/// probe, and reports a tangent vertex either twice or not at all, so a closed
/// ring always yields an even count.
fn ring_crossings(ring: &LineString<f64>, probe: &Line<f64>, out: &mut Vec<(f64, Coord<f64>)>) {
    let dir = probe.delta();
    if dir.x == 0.0 && dir.y == 0.0 {
        return;
    }
    for edge in ring.lines() {
        let sa = cross(dir, edge.start - probe.start);
        let sb = cross(dir, edge.end - probe.start);
        if (sa > 0.0) == (sb > 0.0) {
            continue;
        }
        let u = sa / (sa - sb);
        let hit = edge.start + edge.delta() * u;
        let t = probe_parameter(probe, &hit);
        if (0.0..=1.0).contains(&t) {
            out.push((t, hit));
        }
    }
}

fn sorted_crossings<'a>(
    rings: impl Iterator<Item = &'a LineString<f64>>,
    probe: &Line<f64>,
) -> Vec<Coord<f64>> {
    let mut hits = vec![];
    for ring in rings {
        ring_crossings(ring, probe, &mut hits);
    }
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits.into_iter().map(|(_, c)| c).collect()
}

impl Shape for Polygon<f64> {
    fn bounds(&self) -> Option<Bounds> {
        self.bounding_rect().map(|r| Bounds::from_rect(&r))
    }

    fn intersections(&self, probe: &Line<f64>) -> Vec<Coord<f64>> {
        sorted_crossings(
            std::iter::once(self.exterior()).chain(self.interiors().iter()),
            probe,
        )
    }

    fn contains_point(&self, point: &Coord<f64>) -> bool {
        Contains::contains(self, point)
    }
}

impl Shape for MultiPolygon<f64> {
    fn bounds(&self) -> Option<Bounds> {
        self.bounding_rect().map(|r| Bounds::from_rect(&r))
    }

    fn intersections(&self, probe: &Line<f64>) -> Vec<Coord<f64>> {
        sorted_crossings(
            self.0
                .iter()
                .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors().iter())),
            probe,
        )
    }

    fn contains_point(&self, point: &Coord<f64>) -> bool {
        Contains::contains(self, point)
    }
}

impl Shape for Rect<f64> {
    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::from_rect(self))
    }

    fn intersections(&self, probe: &Line<f64>) -> Vec<Coord<f64>> {
        self.to_polygon().intersections(probe)
    }

    fn contains_point(&self, point: &Coord<f64>) -> bool {
        let min = self.min();
        let max = self.max();
        point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
    }
}
