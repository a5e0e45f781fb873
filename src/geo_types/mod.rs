use geo_types::{Coord, CoordNum};
use num_traits::real::Real;

/// The [`shape::Shape`] trait: bounds, probe intersections and containment for
/// anything we want to hatch.
pub mod shape;

/// Parallel line hatching, swept across a shape with a probe line. The bread and
/// butter of plotter fills, because all a plotter can draw is lines.
pub mod hatch;

/// Clipping polylines against a rectangle, segment by segment, stitching the
/// visible runs back together.
pub mod clip;

/// Clipping whole shapes against a rectangle with polygon booleans.
pub mod region;

/// Boolean ops for geo_types areas
pub mod boolean;

/// A couple of handy shape builders (regular polys, circles).
pub mod shapes;

/// Two coordinates closer than this are treated as the same point.
pub const EPSILON: f64 = 1e-9;

/// Trait that implements a distance function between two [`geo_types::Coord`]s.
/// Also includes a length function which returns the length of a coordinate
/// as if it were a Vector.
pub trait PointDistance<T: CoordNum> {
    /// Return the scalar distance between two coordinates.
    fn distance(&self, other: &Coord<T>) -> T;

    /// Treat a coordinate as a Vector and return its scalar length.
    fn length(&self) -> T;
}

impl<T> PointDistance<T> for Coord<T>
where
    T: CoordNum,
    T: Real,
{
    fn distance(&self, other: &Coord<T>) -> T {
        let p = *self - *other;
        p.length()
    }

    fn length(&self) -> T {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}
