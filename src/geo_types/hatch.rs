use crate::errors::{ConfigurationError, SketchError};
use crate::geo_types::shape::{probe_parameter, Shape};
use crate::geo_types::{PointDistance, EPSILON};
use geo_types::{coord, Coord, Line, LineString, MultiLineString};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_STEP_SIZE: f64 = 5.0;

/// Hard ceiling on sweep steps. A step size of 0.0001 on a big shape is almost
/// certainly a typo, and we'd rather say so than spin.
pub const MAX_SWEEP_STEPS: u64 = 1_000_000;

/// Probe half-length as a multiple of the shape's diagonal.
const PROBE_REACH: f64 = 2.0;

/// How crossings from a single probe get paired into strokes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossingRule {
    /// The rules existing plots were made with. Two crossings make a stroke,
    /// three crossings are a clipped corner (first to last, middle ignored), and
    /// any larger even count is sorted by x and paired. Overlapping concave spans
    /// can be mis-paired.
    #[default]
    Legacy,
    /// Crossings are ordered along the probe and paired inside/outside. Any odd
    /// count is degenerate.
    Parity,
}

/// Resolved options for one hatch call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HatchOptions {
    /// Distance between neighbouring strokes.
    pub step_size: f64,
    /// Stroke direction in degrees. Required.
    pub angle: Option<f64>,
    /// Max jitter applied to each stroke endpoint, on each axis.
    pub wobble: f64,
    /// Pen the strokes should be drawn with.
    pub pen: Option<String>,
    /// Keep every probe trace in the result and log each sweep step.
    pub debug: bool,
    pub crossings: CrossingRule,
    /// Fail on unpairable crossings instead of skipping the step.
    pub strict: bool,
    /// Seed for the wobble. None draws from entropy.
    pub seed: Option<u64>,
}

impl Default for HatchOptions {
    fn default() -> Self {
        HatchOptions {
            step_size: DEFAULT_STEP_SIZE,
            angle: None,
            wobble: 0.0,
            pen: None,
            debug: false,
            crossings: CrossingRule::default(),
            strict: false,
            seed: None,
        }
    }
}

impl HatchOptions {
    /// Plain options at the given angle, everything else default.
    pub fn at_angle(angle: f64) -> HatchOptions {
        HatchOptions {
            angle: Some(angle),
            ..Default::default()
        }
    }

    /// Check the options, returning the hatch angle in degrees.
    pub fn validate(&self) -> Result<f64, ConfigurationError> {
        let angle = self.angle.ok_or(ConfigurationError::MissingAngle)?;
        if !angle.is_finite() {
            return Err(ConfigurationError::InvalidAngle(angle));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ConfigurationError::InvalidStepSize(self.step_size));
        }
        if !(self.wobble.is_finite() && self.wobble >= 0.0) {
            return Err(ConfigurationError::InvalidWobble(self.wobble));
        }
        Ok(angle)
    }
}

/// A sweep step whose crossings could not be paired, and so drew nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedStep {
    pub step: usize,
    pub crossings: usize,
}

/// The output of a hatch: strokes in plotting order, plus what the caller needs
/// to draw them and to judge the result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hatching {
    pub strokes: Vec<Line<f64>>,
    pub pen: Option<String>,
    pub skipped: Vec<SkippedStep>,
    /// Every probe used, only filled in debug mode.
    pub probes: Vec<Line<f64>>,
}

impl Hatching {
    fn for_pen(pen: Option<String>) -> Hatching {
        Hatching {
            pen,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn to_multi_line_string(&self) -> MultiLineString<f64> {
        MultiLineString::new(
            self.strokes
                .iter()
                .map(|l| LineString::new(vec![l.start, l.end]))
                .collect(),
        )
    }

    /// Tack another hatching on the end. Skipped step indices are kept as-is.
    pub fn append(&mut self, mut other: Hatching) {
        self.strokes.append(&mut other.strokes);
        self.skipped.append(&mut other.skipped);
        self.probes.append(&mut other.probes);
    }
}

/// # Hatch
/// Fill a shape with parallel strokes. The strokes run at `options.angle`
/// degrees and are `options.step_size` apart; consecutive sweep steps alternate
/// direction so the pen snakes back and forth instead of lifting and returning.
///
/// # Example
/// ```rust
/// use geo_types::{coord, Rect};
/// use sketch_hatch::geo_types::hatch::{Hatch, HatchOptions};
///
/// let square = Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: 100.0, y: 100.0});
/// let options = HatchOptions { step_size: 25.0, ..HatchOptions::at_angle(0.0) };
/// let hatching = square.hatch(&options).expect("square should hatch");
/// assert_eq!(hatching.strokes.len(), 4);
/// ```
pub trait Hatch {
    fn hatch(&self, options: &HatchOptions) -> Result<Hatching, SketchError>;
}

impl<S: Shape> Hatch for S {
    fn hatch(&self, options: &HatchOptions) -> Result<Hatching, SketchError> {
        sweep(self, options)
    }
}

/// Hatch twice, the second pass perpendicular to the first.
pub fn crosshatch<S: Shape + ?Sized>(
    shape: &S,
    options: &HatchOptions,
) -> Result<Hatching, SketchError> {
    let angle = options.validate()?;
    let mut out = sweep(shape, options)?;
    let across = HatchOptions {
        angle: Some(angle + 90.0),
        ..options.clone()
    };
    out.append(sweep(shape, &across)?);
    Ok(out)
}

fn sweep<S: Shape + ?Sized>(shape: &S, options: &HatchOptions) -> Result<Hatching, SketchError> {
    let angle = options.validate()?;
    let mut out = Hatching::for_pen(options.pen.clone());

    let Some(bounds) = shape.bounds() else {
        return Ok(out);
    };
    if bounds.is_empty() {
        return Ok(out);
    }

    let reach = bounds.width + bounds.height;
    let steps = (2.0 * reach / options.step_size).floor();
    if steps > MAX_SWEEP_STEPS as f64 {
        return Err(ConfigurationError::TooManySteps {
            steps: steps as u64,
            limit: MAX_SWEEP_STEPS,
        }
        .into());
    }
    let steps = steps as usize;

    let direction = unit_direction(angle);
    // Exactly a quarter turn counterclockwise from the strokes, so the side the
    // sweep comes from is always the positive side of the probe.
    let sweep_axis = coord! {x: -direction.y, y: direction.x};
    let half_length = bounds.diagonal() * PROBE_REACH;
    let center = bounds.center();

    let mut rng = match options.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    for step in 0..steps {
        // The probe starts at center + axis * reach and walks back by one step
        // before every query.
        let offset = reach - options.step_size * (step + 1) as f64;
        let probe_center = center + sweep_axis * offset;
        let probe = Line::new(
            probe_center - direction * half_length,
            probe_center + direction * half_length,
        );

        let crossings = shape.intersections(&probe);
        if options.debug {
            debug!(step, offset, crossings = crossings.len(), "hatch probe");
            out.probes.push(probe);
        }

        let spans = match options.crossings {
            CrossingRule::Legacy => legacy_spans(crossings),
            CrossingRule::Parity => parity_spans(&probe, crossings),
        };
        let mut spans = match spans {
            Ok(spans) => spans,
            Err(count) => {
                if options.strict {
                    return Err(SketchError::DegenerateGeometry {
                        step,
                        crossings: count,
                    });
                }
                warn!(step, crossings = count, "skipping unpairable hatch step");
                out.skipped.push(SkippedStep {
                    step,
                    crossings: count,
                });
                continue;
            }
        };

        let backwards = step % 2 == 1;
        if backwards && options.crossings == CrossingRule::Parity {
            spans.reverse();
        }
        for (start, end) in spans {
            if start.distance(&end) < EPSILON {
                // Probe grazing a vertex.
                continue;
            }
            let (start, end) = if backwards { (end, start) } else { (start, end) };
            out.strokes.push(Line::new(
                jitter(start, options.wobble, &mut rng),
                jitter(end, options.wobble, &mut rng),
            ));
        }
    }

    Ok(out)
}

/// Unit vector at `angle` degrees. Axis aligned angles come out exact, so a
/// probe lying on a horizontal or vertical edge is treated the same way at 0
/// and 180 degrees (or 90 and 270).
fn unit_direction(angle: f64) -> Coord<f64> {
    let radians = angle.to_radians();
    let snap = |v: f64| {
        if v.abs() < EPSILON {
            0.0
        } else if (v.abs() - 1.0).abs() < EPSILON {
            v.signum()
        } else {
            v
        }
    };
    coord! {x: snap(radians.cos()), y: snap(radians.sin())}
}

type Spans = Result<Vec<(Coord<f64>, Coord<f64>)>, usize>;

fn legacy_spans(mut crossings: Vec<Coord<f64>>) -> Spans {
    match crossings.len() {
        0 => Ok(vec![]),
        2 => Ok(vec![(crossings[0], crossings[1])]),
        3 => Ok(vec![(crossings[0], crossings[2])]),
        n if n % 2 == 0 => {
            crossings.sort_by(|a, b| a.x.total_cmp(&b.x));
            Ok(crossings.chunks_exact(2).map(|c| (c[0], c[1])).collect())
        }
        n => Err(n),
    }
}

fn parity_spans(probe: &Line<f64>, crossings: Vec<Coord<f64>>) -> Spans {
    if crossings.len() % 2 == 1 {
        return Err(crossings.len());
    }
    let mut ordered: Vec<(f64, Coord<f64>)> = crossings
        .into_iter()
        .map(|c| (probe_parameter(probe, &c), c))
        .collect();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(ordered.chunks_exact(2).map(|c| (c[0].1, c[1].1)).collect())
}

fn jitter(point: Coord<f64>, wobble: f64, rng: &mut SmallRng) -> Coord<f64> {
    if wobble == 0.0 {
        return point;
    }
    coord! {
        x: point.x + rng.gen_range(-wobble..=wobble),
        y: point.y + rng.gen_range(-wobble..=wobble),
    }
}
