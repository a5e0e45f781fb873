use geo_types::Line;
use thiserror::Error;

/// Bad or missing options. Raised before any sweeping or clipping happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("hatch angle is required")]
    MissingAngle,

    #[error("hatch angle must be finite, got {0}")]
    InvalidAngle(f64),

    #[error("step size must be finite and greater than zero, got {0}")]
    InvalidStepSize(f64),

    #[error("wobble must be finite and non-negative, got {0}")]
    InvalidWobble(f64),

    /// The sweep would take more steps than we are willing to walk.
    #[error("sweep needs {steps} steps, limit is {limit}")]
    TooManySteps { steps: u64, limit: u64 },

    #[error("clip region must be finite and have some area")]
    EmptyClipRegion,

    #[error("no pen named {0:?}")]
    UnknownPen(String),

    #[error("could not parse config: {0}")]
    Parse(String),
}

/// Everything the hatch and clip engines can fail with.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A segment with exactly one endpoint inside the clip region did not cross
    /// the region boundary. Floating point has gone badly wrong somewhere.
    #[error("segment {segment:?} has one endpoint inside the clip region but never crosses it")]
    InvariantViolation { segment: Line<f64> },

    /// Strict hatching hit a sweep step whose crossings can't be paired.
    #[error("hatch step {step} produced {crossings} crossings which can't be paired into spans")]
    DegenerateGeometry { step: usize, crossings: usize },

    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ron::error::SpannedError> for SketchError {
    fn from(error: ron::error::SpannedError) -> Self {
        SketchError::Configuration(ConfigurationError::Parse(error.to_string()))
    }
}
