//! Where finished linework goes. A [`Layer`] is just the lines and the pen each
//! one was drawn with, in the order they were drawn.
use crate::errors::SketchError;
use crate::geo_types::hatch::Hatching;
use crate::pen::{PenDetail, PenRack};
use geo_types::{LineString, MultiLineString};
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub pen: PenDetail,
    pub line: LineString<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub lines: Vec<StyledLine>,
}

impl Layer {
    pub fn new() -> Layer {
        Layer::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Draw every stroke of a hatching with the hatching's pen (or whatever is
    /// in hand if it has none).
    pub fn draw_hatching(
        &mut self,
        rack: &mut PenRack,
        hatching: &Hatching,
    ) -> Result<(), SketchError> {
        for stroke in &hatching.strokes {
            rack.with_pen(hatching.pen.as_deref(), |rack| {
                self.lines.push(StyledLine {
                    pen: rack.active().clone(),
                    line: LineString::new(vec![stroke.start, stroke.end]),
                })
            })?;
        }
        trace!(
            strokes = hatching.strokes.len(),
            pen = ?hatching.pen,
            "drew hatching"
        );
        Ok(())
    }

    /// Draw clipped runs. Runs too short to be a line are left out.
    pub fn draw_runs(
        &mut self,
        rack: &mut PenRack,
        pen: Option<&str>,
        runs: &MultiLineString<f64>,
    ) -> Result<(), SketchError> {
        for run in runs.iter().filter(|run| run.0.len() >= 2) {
            rack.with_pen(pen, |rack| {
                self.lines.push(StyledLine {
                    pen: rack.active().clone(),
                    line: run.clone(),
                })
            })?;
        }
        Ok(())
    }

    /// All lines drawn with the named pen, for plotting one pen at a time.
    pub fn lines_for_pen<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a StyledLine> {
        self.lines.iter().filter(move |styled| styled.pen.name == name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::ConfigurationError;
    use crate::geo_types::hatch::{Hatch, HatchOptions};
    use crate::pen::parse_css_color;
    use geo_types::{coord, line_string, Rect};

    fn rack() -> PenRack {
        let mut rack = PenRack::default();
        rack.add(PenDetail::new("red", 0.3, parse_css_color("red").unwrap()));
        rack
    }

    fn square_hatching(pen: Option<&str>) -> Hatching {
        let square = Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: 100.0, y: 100.0});
        square
            .hatch(&HatchOptions {
                step_size: 25.0,
                pen: pen.map(str::to_string),
                ..HatchOptions::at_angle(0.0)
            })
            .unwrap()
    }

    #[test]
    fn test_draw_hatching_with_named_pen() {
        let mut rack = rack();
        let mut layer = Layer::new();
        layer
            .draw_hatching(&mut rack, &square_hatching(Some("red")))
            .unwrap();
        assert_eq!(layer.lines.len(), 4);
        assert!(layer.lines.iter().all(|l| l.pen.name == "red"));
        assert_eq!(layer.lines_for_pen("red").count(), 4);
        assert_eq!(rack.active().name, "Default Pen");
    }

    #[test]
    fn test_draw_hatching_without_pen() {
        let mut rack = rack();
        let mut layer = Layer::new();
        layer.draw_hatching(&mut rack, &square_hatching(None)).unwrap();
        assert!(layer.lines.iter().all(|l| l.pen.name == "Default Pen"));
    }

    #[test]
    fn test_unknown_pen_draws_nothing() {
        let mut rack = rack();
        let mut layer = Layer::new();
        let err = layer
            .draw_hatching(&mut rack, &square_hatching(Some("gold")))
            .unwrap_err();
        assert!(matches!(
            err,
            SketchError::Configuration(ConfigurationError::UnknownPen(_))
        ));
        assert!(layer.is_empty());
    }

    #[test]
    fn test_draw_runs_skips_stubs() {
        let mut rack = rack();
        let mut layer = Layer::new();
        let runs = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)],
            line_string![(x: 5.0, y: 5.0)],
        ]);
        layer.draw_runs(&mut rack, Some("red"), &runs).unwrap();
        assert_eq!(layer.lines.len(), 1);
        assert_eq!(layer.lines[0].line.0.len(), 3);
        assert_eq!(layer.lines[0].pen.stroke_width, 0.3);
    }
}
