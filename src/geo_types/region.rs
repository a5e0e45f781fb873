use crate::geo_types::boolean::FlattenPolygons;
use crate::geo_types::clip::ClipRegion;
use crate::pen::CssColor;
use geo::BooleanOps;
use geo_types::{Geometry, LineString, MultiLineString, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a shape looks like on paper: which pen outlines it, and what (if
/// anything) it's filled with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ShapeStyle {
    pub pen: Option<String>,
    pub fill: Option<CssColor>,
}

/// The geometry of a styled shape. Areas are clipped as regions, paths as lines.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Area(MultiPolygon<f64>),
    Path(MultiLineString<f64>),
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        match self {
            Outline::Area(mp) => mp.0.is_empty(),
            Outline::Path(mls) => mls.0.iter().all(|ls| ls.0.len() < 2),
        }
    }

    /// Areas from any geometry; anything without area becomes a path if it is
    /// made of lines, otherwise None.
    pub fn from_geometry(geometry: &Geometry<f64>) -> Option<Outline> {
        match geometry {
            Geometry::Line(line) => Some(Outline::Path(MultiLineString::new(vec![
                LineString::new(vec![line.start, line.end]),
            ]))),
            Geometry::LineString(ls) => Some(Outline::Path(MultiLineString::new(vec![ls.clone()]))),
            Geometry::MultiLineString(mls) => Some(Outline::Path(mls.clone())),
            Geometry::Point(_) | Geometry::MultiPoint(_) => None,
            other => {
                let areas = other.flatten_polys();
                if areas.0.is_empty() {
                    None
                } else {
                    Some(Outline::Area(areas))
                }
            }
        }
    }
}

impl From<Polygon<f64>> for Outline {
    fn from(poly: Polygon<f64>) -> Self {
        Outline::Area(MultiPolygon::new(vec![poly]))
    }
}

impl From<MultiPolygon<f64>> for Outline {
    fn from(mp: MultiPolygon<f64>) -> Self {
        Outline::Area(mp)
    }
}

impl From<Rect<f64>> for Outline {
    fn from(rect: Rect<f64>) -> Self {
        Outline::Area(MultiPolygon::new(vec![rect.to_polygon()]))
    }
}

impl From<LineString<f64>> for Outline {
    fn from(ls: LineString<f64>) -> Self {
        Outline::Path(MultiLineString::new(vec![ls]))
    }
}

impl From<MultiLineString<f64>> for Outline {
    fn from(mls: MultiLineString<f64>) -> Self {
        Outline::Path(mls)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledShape {
    pub outline: Outline,
    pub style: ShapeStyle,
}

impl StyledShape {
    pub fn new(outline: impl Into<Outline>, style: ShapeStyle) -> StyledShape {
        StyledShape {
            outline: outline.into(),
            style,
        }
    }

    /// The part of this shape inside `region`, wearing the same style. None if
    /// nothing is left.
    pub fn clipped_to(&self, region: &ClipRegion) -> Option<StyledShape> {
        clip_outline(&region.rect().to_polygon(), &self.outline).map(|outline| StyledShape {
            outline,
            style: self.style.clone(),
        })
    }
}

fn clip_outline(window: &Polygon<f64>, outline: &Outline) -> Option<Outline> {
    let clipped = match outline {
        Outline::Area(mp) => Outline::Area(window.intersection(mp)),
        Outline::Path(mls) => Outline::Path(window.clip(mls, false)),
    };
    if clipped.is_empty() {
        None
    } else {
        Some(clipped)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RegionClipOptions {
    /// Take the originals out of the caller's collection once clipped.
    pub remove: bool,
}

/// Clip whole shapes to the region using polygon booleans. Unlike
/// [`crate::geo_types::clip::clip_to_border`] this catches shapes that cross the
/// region without a single vertex inside it. Shapes that miss the region
/// entirely produce nothing.
pub fn clip_paths_to_border(
    region: &ClipRegion,
    shapes: &mut Vec<StyledShape>,
    options: &RegionClipOptions,
) -> Vec<StyledShape> {
    let window = region.rect().to_polygon();
    let clipped: Vec<StyledShape> = shapes
        .iter()
        .filter_map(|shape| {
            clip_outline(&window, &shape.outline).map(|outline| StyledShape {
                outline,
                style: shape.style.clone(),
            })
        })
        .collect();
    debug!(
        shapes = shapes.len(),
        kept = clipped.len(),
        remove = options.remove,
        "clipped shapes to region"
    );
    if options.remove {
        shapes.clear();
    }
    clipped
}
