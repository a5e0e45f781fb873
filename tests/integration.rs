use geo::{Area, BoundingRect, Contains};
use geo_types::{coord, line_string, Geometry, LineString, MultiLineString, Point, Rect};
use sketch_hatch::prelude::*;

fn square() -> Rect<f64> {
    Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: 100.0, y: 100.0})
}

fn star() -> geo_types::Polygon<f64> {
    match star_poly(5, 50.0, 50.0, 20.0, 45.0) {
        Geometry::Polygon(poly) => poly,
        _ => panic!("a five point star is a polygon"),
    }
}

fn midpoints(hatching: &Hatching) -> Vec<(i64, i64)> {
    let mut mids: Vec<(i64, i64)> = hatching
        .strokes
        .iter()
        .map(|l| {
            let mid = (l.start + l.end) / 2.0;
            ((mid.x * 1e6).round() as i64, (mid.y * 1e6).round() as i64)
        })
        .collect();
    mids.sort();
    mids
}

#[test]
fn square_hatches_into_four_even_strokes() {
    let options = HatchOptions {
        step_size: 25.0,
        ..HatchOptions::at_angle(0.0)
    };
    let hatching = square().hatch(&options).unwrap();
    assert_eq!(hatching.strokes.len(), 4);

    let mut ys: Vec<f64> = hatching.strokes.iter().map(|l| l.start.y).collect();
    ys.sort_by(|a, b| a.total_cmp(b));
    for pair in ys.windows(2) {
        assert!((pair[1] - pair[0] - 25.0).abs() < 1e-9);
    }
    for stroke in &hatching.strokes {
        assert!((stroke.start.y - stroke.end.y).abs() < 1e-9);
        assert!(((stroke.start.x - stroke.end.x).abs() - 100.0).abs() < 1e-9);
    }
    assert!(hatching.skipped.is_empty());
}

#[test]
fn polyline_through_region_is_one_run() {
    let region = ClipRegion::new(coord! {x: 10.0, y: 10.0}, coord! {x: 90.0, y: 90.0}).unwrap();
    let lines = vec![line_string![(x: 0.0, y: 50.0), (x: 50.0, y: 50.0), (x: 100.0, y: 50.0)]];
    for rule in [BorderRule::Interval, BorderRule::Legacy] {
        let runs = clip_to_border(&region, &lines, rule).unwrap();
        assert_eq!(runs.0.len(), 1);
        let expected = [(10.0, 50.0), (50.0, 50.0), (90.0, 50.0)];
        assert_eq!(runs.0[0].0.len(), expected.len());
        for (got, want) in runs.0[0].0.iter().zip(expected) {
            assert!(got.distance(&coord! {x: want.0, y: want.1}) < 1e-9, "{:?}", got);
        }
    }
}

#[test]
fn polyline_outside_region_has_no_runs() {
    let region = ClipRegion::new(coord! {x: 20.0, y: 20.0}, coord! {x: 80.0, y: 80.0}).unwrap();
    let lines = MultiLineString::new(vec![line_string![(x: 200.0, y: 200.0), (x: 300.0, y: 300.0)]]);
    let runs = lines.clip_to_border(&region, BorderRule::default()).unwrap();
    assert!(runs.0.is_empty());
}

#[test]
fn concave_star_strokes_stay_inside() {
    let star = star();
    let options = HatchOptions {
        step_size: 3.0,
        crossings: CrossingRule::Parity,
        strict: true,
        ..HatchOptions::at_angle(7.0)
    };
    let hatching = star.hatch(&options).unwrap();
    assert!(!hatching.is_empty());
    for stroke in &hatching.strokes {
        let mid = (stroke.start + stroke.end) / 2.0;
        assert!(star.contains(&Point::from(mid)), "stroke {:?} leaves the star", stroke);
    }
}

#[test]
fn legacy_and_parity_agree_on_closed_rings() {
    // Closed rings always produce an even crossing count, so the two rules only
    // differ in the order strokes come out.
    let star = star();
    let legacy = star
        .hatch(&HatchOptions {
            step_size: 3.0,
            ..HatchOptions::at_angle(7.0)
        })
        .unwrap();
    let parity = star
        .hatch(&HatchOptions {
            step_size: 3.0,
            crossings: CrossingRule::Parity,
            ..HatchOptions::at_angle(7.0)
        })
        .unwrap();
    assert_eq!(midpoints(&legacy), midpoints(&parity));
}

#[test]
fn region_clip_stays_inside_region() {
    let region = ClipRegion::new(coord! {x: 0.0, y: 0.0}, coord! {x: 60.0, y: 60.0}).unwrap();
    let star = star();
    let mut shapes = vec![StyledShape::new(star.clone(), ShapeStyle::default())];
    let clipped = clip_paths_to_border(&region, &mut shapes, &RegionClipOptions::default());
    assert_eq!(clipped.len(), 1);
    let sketch_hatch::geo_types::region::Outline::Area(area) = &clipped[0].outline else {
        panic!("areas stay areas")
    };
    let bounds = area.bounding_rect().unwrap();
    assert!(bounds.min().x >= -1e-9 && bounds.min().y >= -1e-9);
    assert!(bounds.max().x <= 60.0 + 1e-9 && bounds.max().y <= 60.0 + 1e-9);
    assert!(area.unsigned_area() < star.unsigned_area());
    assert!(area.unsigned_area() > 0.0);
}

#[test]
fn config_to_layer_pipeline() {
    let config = SketchConfig::from_ron_str(
        r##"(
            pens: [(name: "fine", stroke_width: 0.1, color: "black")],
            hatch: (step_size: 10.0, pen: Some("fine")),
        )"##,
    )
    .unwrap();
    let mut rack = config.pen_rack();
    let template: HatchTemplate = HatchTemplate::from(config.hatch.clone())
        .angle(Field::computed(|i: &usize| 45.0 * *i as f64));
    let shapes = vec![square(), Rect::new(coord! {x: 50.0, y: 50.0}, coord! {x: 150.0, y: 150.0})];
    let hatchings = template.hatch_all(&shapes).unwrap();

    let region = ClipRegion::from_rect(square()).unwrap();
    let mut layer = Layer::new();
    for hatching in &hatchings {
        let strokes: Vec<LineString<f64>> = hatching.to_multi_line_string().0;
        let runs = clip_to_border(&region, &strokes, config.border_rule).unwrap();
        layer
            .draw_runs(&mut rack, hatching.pen.as_deref(), &runs)
            .unwrap();
    }
    assert!(!layer.is_empty());
    assert_eq!(layer.lines_for_pen("fine").count(), layer.lines.len());
    for styled in &layer.lines {
        for c in &styled.line.0 {
            assert!(c.x >= -1e-9 && c.x <= 100.0 + 1e-9);
            assert!(c.y >= -1e-9 && c.y <= 100.0 + 1e-9);
        }
    }
}
