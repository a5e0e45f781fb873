use crate::errors::{ConfigurationError, SketchError};
use crate::geo_types::shape::probe_parameter;
use crate::geo_types::{PointDistance, EPSILON};
use geo::line_intersection::{line_intersection, LineIntersection};
use geo_types::{coord, Coord, Line, LineString, MultiLineString, Rect};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An axis aligned clip rectangle. Always has area; the corners are normalized
/// so `min` really is the smaller corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    rect: Rect<f64>,
}

impl ClipRegion {
    pub fn new(from: Coord<f64>, to: Coord<f64>) -> Result<ClipRegion, ConfigurationError> {
        ClipRegion::from_rect(Rect::new(from, to))
    }

    pub fn from_rect(rect: Rect<f64>) -> Result<ClipRegion, ConfigurationError> {
        let (min, max) = (rect.min(), rect.max());
        let finite = [min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite());
        if !finite || min.x >= max.x || min.y >= max.y {
            return Err(ConfigurationError::EmptyClipRegion);
        }
        Ok(ClipRegion { rect })
    }

    pub fn rect(&self) -> Rect<f64> {
        self.rect
    }

    pub fn min(&self) -> Coord<f64> {
        self.rect.min()
    }

    pub fn max(&self) -> Coord<f64> {
        self.rect.max()
    }

    /// Inside or on the border.
    pub fn contains(&self, point: &Coord<f64>) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    pub fn edges(&self) -> [Line<f64>; 4] {
        let (min, max) = (self.min(), self.max());
        let top_right = coord! {x: max.x, y: min.y};
        let bottom_left = coord! {x: min.x, y: max.y};
        [
            Line::new(min, top_right),
            Line::new(top_right, max),
            Line::new(max, bottom_left),
            Line::new(bottom_left, min),
        ]
    }

    /// Points where `segment` meets the border, ordered from `segment.start`,
    /// with corner hits (and collinear overlap ends) merged.
    pub fn crossings(&self, segment: &Line<f64>) -> Vec<Coord<f64>> {
        let mut hits: Vec<(f64, Coord<f64>)> = vec![];
        let mut add = |c: Coord<f64>| hits.push((probe_parameter(segment, &c), c));
        for edge in self.edges() {
            match line_intersection(*segment, edge) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => add(intersection),
                Some(LineIntersection::Collinear { intersection }) => {
                    add(intersection.start);
                    add(intersection.end);
                }
                None => (),
            }
        }
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut out: Vec<Coord<f64>> = Vec::with_capacity(hits.len());
        for (_, c) in hits {
            if out.last().map_or(true, |last| last.distance(&c) >= EPSILON) {
                out.push(c);
            }
        }
        out
    }
}

/// How ambiguous segments are clipped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderRule {
    /// Segments are clipped to the interval they actually share with the
    /// region. A segment with both ends outside can still pass through it.
    #[default]
    Interval,
    /// How existing plots were clipped: segments with both ends outside are
    /// dropped, and when the border is met twice the first crossing is used if
    /// the end is outside, the second if the start is.
    Legacy,
}

/// Which end of a segment lies outside the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outside {
    Start,
    End,
}

/// Clip one segment. Returns the visible part as two points, or nothing.
pub fn clip_segment(
    region: &ClipRegion,
    from: Coord<f64>,
    to: Coord<f64>,
    rule: BorderRule,
) -> Result<Vec<Coord<f64>>, SketchError> {
    let segment = Line::new(from, to);
    match (region.contains(&from), region.contains(&to)) {
        (true, true) => Ok(vec![from, to]),
        (false, false) => {
            if rule == BorderRule::Legacy {
                return Ok(vec![]);
            }
            let hits = region.crossings(&segment);
            match (hits.first(), hits.last()) {
                (Some(entry), Some(exit)) if hits.len() >= 2 => Ok(vec![*entry, *exit]),
                _ => Ok(vec![]),
            }
        }
        (true, false) => {
            let exit = pick_crossing(&segment, region.crossings(&segment), Outside::End, rule)?;
            Ok(vec![from, exit])
        }
        (false, true) => {
            let entry = pick_crossing(&segment, region.crossings(&segment), Outside::Start, rule)?;
            Ok(vec![entry, to])
        }
    }
}

fn pick_crossing(
    segment: &Line<f64>,
    hits: Vec<Coord<f64>>,
    outside: Outside,
    rule: BorderRule,
) -> Result<Coord<f64>, SketchError> {
    if hits.is_empty() {
        debug!(?segment, "segment leaves the clip region without crossing it");
        return Err(SketchError::InvariantViolation { segment: *segment });
    }
    let last = hits.len() - 1;
    let index = match (rule, outside) {
        // Hits run from the inside point, so the exit is the last one.
        (BorderRule::Interval, Outside::End) => last,
        (BorderRule::Interval, Outside::Start) => 0,
        (BorderRule::Legacy, Outside::End) => 0,
        (BorderRule::Legacy, Outside::Start) => last.min(1),
    };
    Ok(hits[index])
}

fn flush(run: &mut Vec<Coord<f64>>, runs: &mut Vec<LineString<f64>>) {
    if run.len() >= 2 {
        runs.push(LineString::new(std::mem::take(run)));
    } else {
        run.clear();
    }
}

fn clip_polyline(
    region: &ClipRegion,
    line: &LineString<f64>,
    rule: BorderRule,
    runs: &mut Vec<LineString<f64>>,
) -> Result<(), SketchError> {
    let mut run: Vec<Coord<f64>> = vec![];
    for pair in line.0.windows(2) {
        let clipped = clip_segment(region, pair[0], pair[1], rule)?;
        if clipped.is_empty() {
            flush(&mut run, runs);
            continue;
        }
        if run.last() == Some(&clipped[0]) {
            run.push(clipped[1]);
        } else {
            // Came back into view somewhere else. Legacy plots keep going in
            // the same run and jump along the border.
            if rule == BorderRule::Interval {
                flush(&mut run, runs);
            }
            run.extend(clipped);
        }
    }
    flush(&mut run, runs);
    Ok(())
}

/// Clip every polyline to the region. Each output line string is one run: a
/// stretch of a source polyline that stays in view, in its original drawing
/// direction.
pub fn clip_to_border<'a>(
    region: &ClipRegion,
    polylines: impl IntoIterator<Item = &'a LineString<f64>>,
    rule: BorderRule,
) -> Result<MultiLineString<f64>, SketchError> {
    let mut runs = vec![];
    for line in polylines {
        clip_polyline(region, line, rule, &mut runs)?;
    }
    Ok(MultiLineString::new(runs))
}

/// Trait to clip lines to the page border.
pub trait ClipToBorder {
    fn clip_to_border(
        &self,
        region: &ClipRegion,
        rule: BorderRule,
    ) -> Result<MultiLineString<f64>, SketchError>;
}

impl ClipToBorder for LineString<f64> {
    fn clip_to_border(
        &self,
        region: &ClipRegion,
        rule: BorderRule,
    ) -> Result<MultiLineString<f64>, SketchError> {
        clip_to_border(region, std::iter::once(self), rule)
    }
}

impl ClipToBorder for MultiLineString<f64> {
    fn clip_to_border(
        &self,
        region: &ClipRegion,
        rule: BorderRule,
    ) -> Result<MultiLineString<f64>, SketchError> {
        clip_to_border(region, self.0.iter(), rule)
    }
}
