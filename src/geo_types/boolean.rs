use geo::BooleanOps;
use geo_types::{Geometry, MultiPolygon, Polygon};

/// Pull every area out of a geometry (recursing into collections) into one
/// MultiPolygon. Points and lines have no area and are dropped.
pub trait FlattenPolygons {
    fn flatten_polys(&self) -> MultiPolygon<f64>;
}

impl FlattenPolygons for Geometry<f64> {
    fn flatten_polys(&self) -> MultiPolygon<f64> {
        match self {
            Geometry::Polygon(poly) => MultiPolygon::new(vec![poly.clone()]),
            Geometry::MultiPolygon(polys) => polys.clone(),
            Geometry::Rect(rect) => MultiPolygon::new(vec![rect.to_polygon()]),
            Geometry::Triangle(tri) => MultiPolygon::new(vec![tri.to_polygon()]),
            Geometry::GeometryCollection(gc) => MultiPolygon::new(
                gc.iter()
                    .flat_map(|g| g.flatten_polys().0)
                    .collect::<Vec<Polygon<f64>>>(),
            ),
            _ => MultiPolygon::new(vec![]),
        }
    }
}

/// Boolean operations trait. Used to give boolean caps to geo_types
/// shapes. Basically just a wrapper on geo's boolean ops, which trace the
/// result boundary, so what comes back is always closed outlines with their
/// holes intact.
pub trait BooleanOp
where
    Self: Sized,
{
    /// Subtract other from self
    fn difference(&self, other: &Self) -> Self;

    /// The combination of both other and self
    fn union(&self, other: &Self) -> Self;

    /// Returns only the portion of self that overlaps other
    fn intersection(&self, other: &Self) -> Self;
}

impl BooleanOp for Geometry<f64> {
    fn difference(&self, other: &Self) -> Self {
        Geometry::MultiPolygon(self.flatten_polys().difference(&other.flatten_polys()))
    }

    fn union(&self, other: &Self) -> Self {
        Geometry::MultiPolygon(self.flatten_polys().union(&other.flatten_polys()))
    }

    fn intersection(&self, other: &Self) -> Self {
        Geometry::MultiPolygon(self.flatten_polys().intersection(&other.flatten_polys()))
    }
}
