//! Hatch fills and border clipping for pen-plotter sketches.
//!
//! Shapes are filled with parallel strokes by sweeping a probe line across
//! them, and the resulting polylines (or whole shapes) are clipped to a
//! rectangular drawing area before being handed to a pen. Geometry is plain
//! [`geo`]/`geo_types`, so it plays nicely with everything else in that
//! ecosystem.
//!
//! *Nothing here talks to a plotter. What you do with the lines is your own
//! business.*

/// Extensions/Traits for geo_types geometry: hatching, border clipping and
/// region booleans.
pub mod geo_types;

/// Errors for configuration and geometry failures.
pub mod errors;

/// Option templates with computed fields.
pub mod options;

/// Pens and the active-pen stack.
pub mod pen;

/// Line sinks with pen attribution.
pub mod layer;

/// RON sketch configuration.
pub mod config;

/// Make your life easy! Just import prelude::* and get on with drawing.
pub mod prelude {
    pub use crate::config::SketchConfig;
    pub use crate::errors::{ConfigurationError, SketchError};
    pub use crate::geo_types::boolean::BooleanOp;
    pub use crate::geo_types::clip::{clip_segment, clip_to_border, BorderRule, ClipRegion, ClipToBorder};
    pub use crate::geo_types::hatch::{crosshatch, CrossingRule, Hatch, HatchOptions, Hatching};
    pub use crate::geo_types::region::{clip_paths_to_border, RegionClipOptions, ShapeStyle, StyledShape};
    pub use crate::geo_types::shape::Shape;
    pub use crate::geo_types::shapes::{circle, regular_poly, star_poly};
    pub use crate::geo_types::PointDistance;
    pub use crate::layer::{Layer, StyledLine};
    pub use crate::options::{Field, HatchTemplate};
    pub use crate::pen::{PenDetail, PenRack};
}
