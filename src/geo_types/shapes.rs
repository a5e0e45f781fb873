//! Quick shape builders for sketches and tests.
use geo_types::{coord, Geometry, LineString, Point, Polygon};
use num_traits::FromPrimitive;
use std::f64::consts::PI;

/// Just a regular polygon, but for some reason using compass degrees. Fewer than
/// three sides gets you the center point.
pub fn regular_poly(sides: usize, x: f64, y: f64, radius: f64, rotation: f64) -> Geometry<f64> {
    // all the way around to the start again, and hit the first point twice to close it.
    if sides < 3 {
        return Geometry::Point(Point::new(x, y));
    }

    Geometry::Polygon(Polygon::new(
        LineString::new(
            (0..=sides)
                .map(|i| {
                    let angle = rotation - PI / 2.0
                        + (f64::from(i as i32) / f64::from(sides as i32)) * (2.0 * PI);
                    coord! {x: x+angle.cos() * radius, y: y+angle.sin() * radius}
                })
                .collect(),
        ),
        vec![],
    ))
}

/// Draw a regular polygon with enough sides that nobody can tell the difference.
pub fn circle(x0: f64, y0: f64, radius: f64) -> Geometry<f64> {
    let radius = radius.abs();
    let sides = 1000.min(32.max(usize::from_f64(radius).unwrap_or(1000) * 4));
    regular_poly(sides, x0, y0, radius, 0.0)
}

/// A star with `points` tips, alternating between the two radii. Handy for
/// concave hatch tests.
pub fn star_poly(points: usize, x: f64, y: f64, inner: f64, outer: f64) -> Geometry<f64> {
    if points < 2 {
        return Geometry::Point(Point::new(x, y));
    }
    let corners = points * 2;
    Geometry::Polygon(Polygon::new(
        LineString::new(
            (0..=corners)
                .map(|i| {
                    let radius = if i % 2 == 0 { outer } else { inner };
                    let angle = -PI / 2.0 + (i as f64 / corners as f64) * (2.0 * PI);
                    coord! {x: x + angle.cos() * radius, y: y + angle.sin() * radius}
                })
                .collect(),
        ),
        vec![],
    ))
}
