//! Option templates. Every field of a hatch call can be a plain value or a
//! function of some context (the column being drawn, a noise sample, the index
//! of the shape), resolved into concrete [`HatchOptions`] right before use.
use crate::errors::{ConfigurationError, SketchError};
use crate::geo_types::hatch::{CrossingRule, Hatch, HatchOptions, Hatching};
use crate::geo_types::shape::Shape;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// A template field: either a literal, or computed from the context.
pub enum Field<T, C = usize> {
    Literal(T),
    Computed(Arc<dyn Fn(&C) -> T + Send + Sync>),
}

impl<T: Clone, C> Field<T, C> {
    pub fn computed(f: impl Fn(&C) -> T + Send + Sync + 'static) -> Field<T, C> {
        Field::Computed(Arc::new(f))
    }

    pub fn resolve(&self, ctx: &C) -> T {
        match self {
            Field::Literal(value) => value.clone(),
            Field::Computed(f) => f(ctx),
        }
    }
}

impl<T, C> From<T> for Field<T, C> {
    fn from(value: T) -> Self {
        Field::Literal(value)
    }
}

impl<T: Clone, C> Clone for Field<T, C> {
    fn clone(&self) -> Self {
        match self {
            Field::Literal(value) => Field::Literal(value.clone()),
            Field::Computed(f) => Field::Computed(f.clone()),
        }
    }
}

impl<T: Debug, C> Debug for Field<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Field::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Field::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// # HatchTemplate
/// The unresolved form of [`HatchOptions`]. Build one from literal options, then
/// swap in computed fields where the value should vary.
///
/// ```rust
/// use sketch_hatch::options::{Field, HatchTemplate};
///
/// let template: HatchTemplate = HatchTemplate::default()
///     .angle(45.0)
///     .step_size(Field::computed(|column: &usize| 2.0 + *column as f64));
/// let third = template.resolve(&2).expect("valid options");
/// assert_eq!(third.step_size, 4.0);
/// assert_eq!(third.angle, Some(45.0));
/// ```
#[derive(Clone, Debug)]
pub struct HatchTemplate<C = usize> {
    pub step_size: Field<f64, C>,
    pub angle: Option<Field<f64, C>>,
    pub wobble: Field<f64, C>,
    pub pen: Field<Option<String>, C>,
    pub debug: Field<bool, C>,
    pub seed: Field<Option<u64>, C>,
    pub crossings: CrossingRule,
    pub strict: bool,
}

impl<C> From<HatchOptions> for HatchTemplate<C> {
    fn from(options: HatchOptions) -> Self {
        HatchTemplate {
            step_size: options.step_size.into(),
            angle: options.angle.map(Field::from),
            wobble: options.wobble.into(),
            pen: options.pen.into(),
            debug: options.debug.into(),
            seed: options.seed.into(),
            crossings: options.crossings,
            strict: options.strict,
        }
    }
}

impl<C> Default for HatchTemplate<C> {
    fn default() -> Self {
        HatchOptions::default().into()
    }
}

impl<C> HatchTemplate<C> {
    pub fn step_size(mut self, step_size: impl Into<Field<f64, C>>) -> Self {
        self.step_size = step_size.into();
        self
    }

    pub fn angle(mut self, angle: impl Into<Field<f64, C>>) -> Self {
        self.angle = Some(angle.into());
        self
    }

    pub fn wobble(mut self, wobble: impl Into<Field<f64, C>>) -> Self {
        self.wobble = wobble.into();
        self
    }

    pub fn pen(mut self, pen: impl Into<Field<Option<String>, C>>) -> Self {
        self.pen = pen.into();
        self
    }

    pub fn debug(mut self, debug: impl Into<Field<bool, C>>) -> Self {
        self.debug = debug.into();
        self
    }

    pub fn seed(mut self, seed: impl Into<Field<Option<u64>, C>>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn crossings(mut self, crossings: CrossingRule) -> Self {
        self.crossings = crossings;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Work out every field for this context and check the result.
    pub fn resolve(&self, ctx: &C) -> Result<HatchOptions, ConfigurationError> {
        let options = HatchOptions {
            step_size: self.step_size.resolve(ctx),
            angle: self.angle.as_ref().map(|angle| angle.resolve(ctx)),
            wobble: self.wobble.resolve(ctx),
            pen: self.pen.resolve(ctx),
            debug: self.debug.resolve(ctx),
            crossings: self.crossings,
            strict: self.strict,
            seed: self.seed.resolve(ctx),
        };
        options.validate()?;
        Ok(options)
    }
}

impl HatchTemplate<usize> {
    /// Hatch each shape with options resolved against its index.
    pub fn hatch_all<S: Shape>(&self, shapes: &[S]) -> Result<Vec<Hatching>, SketchError> {
        shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| shape.hatch(&self.resolve(&index)?))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::{coord, Rect};

    fn squares(n: usize) -> Vec<Rect<f64>> {
        (0..n)
            .map(|i| {
                let x = i as f64 * 110.0;
                Rect::new(coord! {x: x, y: 0.0}, coord! {x: x + 100.0, y: 100.0})
            })
            .collect()
    }

    #[test]
    fn test_literals_pass_through() {
        let options = HatchOptions {
            step_size: 3.0,
            wobble: 0.25,
            pen: Some("red".to_string()),
            seed: Some(7),
            ..HatchOptions::at_angle(12.0)
        };
        let template: HatchTemplate<()> = options.clone().into();
        assert_eq!(template.resolve(&()).unwrap(), options);
    }

    #[test]
    fn test_computed_fields_see_context() {
        let template: HatchTemplate<f64> = HatchTemplate::default()
            .angle(Field::computed(|noise: &f64| noise * 180.0))
            .pen(Field::computed(|noise: &f64| {
                Some(if *noise > 0.5 { "dark" } else { "light" }.to_string())
            }));
        let low = template.resolve(&0.25).unwrap();
        let high = template.resolve(&0.75).unwrap();
        assert_eq!(low.angle, Some(45.0));
        assert_eq!(high.angle, Some(135.0));
        assert_eq!(low.pen.as_deref(), Some("light"));
        assert_eq!(high.pen.as_deref(), Some("dark"));
    }

    #[test]
    fn test_missing_angle_fails_resolution() {
        let template: HatchTemplate = HatchTemplate::default();
        assert_eq!(
            template.resolve(&0).unwrap_err(),
            ConfigurationError::MissingAngle
        );
    }

    #[test]
    fn test_computed_values_are_validated() {
        let template: HatchTemplate = HatchTemplate::default()
            .angle(0.0)
            .step_size(Field::computed(|i: &usize| 10.0 - *i as f64 * 5.0));
        assert!(template.resolve(&0).is_ok());
        assert_eq!(
            template.resolve(&2).unwrap_err(),
            ConfigurationError::InvalidStepSize(0.0)
        );
    }

    #[test]
    fn test_hatch_all_varies_per_shape() {
        let template: HatchTemplate = HatchTemplate::default()
            .angle(0.0)
            .step_size(Field::computed(|i: &usize| if *i == 0 { 40.0 } else { 25.0 }));
        let hatchings = template.hatch_all(&squares(2)).unwrap();
        assert_eq!(hatchings.len(), 2);
        assert_eq!(hatchings[0].strokes.len(), 3);
        assert_eq!(hatchings[1].strokes.len(), 4);
    }

    #[test]
    fn test_hatch_all_stops_on_bad_options() {
        let template: HatchTemplate = HatchTemplate::default()
            .angle(Field::computed(|i: &usize| if *i == 1 { f64::NAN } else { 0.0 }));
        let err = template.hatch_all(&squares(3)).unwrap_err();
        assert!(matches!(
            err,
            SketchError::Configuration(ConfigurationError::InvalidAngle(_))
        ));
    }

    #[test]
    fn test_field_debug() {
        let literal: Field<f64> = 2.0.into();
        let computed: Field<f64> = Field::computed(|i: &usize| *i as f64);
        assert_eq!(format!("{:?}", literal), "Literal(2.0)");
        assert_eq!(format!("{:?}", computed), "Computed(..)");
        assert_eq!(computed.clone().resolve(&3), 3.0);
    }
}
