//! Sketch settings stored as RON.
//!
//! ```ron
//! (
//!     pens: [
//!         (name: "fine", stroke_width: 0.1, color: "black"),
//!         (name: "red", stroke_width: 0.5, color: "#ff0000"),
//!     ],
//!     hatch: (step_size: 2.5, angle: Some(45.0), pen: Some("fine")),
//!     border_rule: Interval,
//! )
//! ```
use crate::errors::{ConfigurationError, SketchError};
use crate::geo_types::clip::BorderRule;
use crate::geo_types::hatch::HatchOptions;
use crate::pen::{PenDetail, PenRack};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SketchConfig {
    pub pens: Vec<PenDetail>,
    /// Default hatch options. The angle may be left out and filled in per call.
    pub hatch: HatchOptions,
    pub border_rule: BorderRule,
}

impl SketchConfig {
    pub fn from_ron_str(data: &str) -> Result<SketchConfig, SketchError> {
        let config: SketchConfig = ron::from_str(data)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<SketchConfig, SketchError> {
        let mut reader = std::fs::File::open(path.as_ref())?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        debug!(path = %path.as_ref().display(), "loading sketch config");
        SketchConfig::from_ron_str(data.as_str())
    }

    /// A rack holding every configured pen.
    pub fn pen_rack(&self) -> PenRack {
        let mut rack = PenRack::default();
        for pen in &self.pens {
            rack.add(pen.clone());
        }
        rack
    }

    fn check(&self) -> Result<(), ConfigurationError> {
        if let Some(pen) = &self.hatch.pen {
            if !self.pens.iter().any(|p| &p.name == pen) {
                return Err(ConfigurationError::UnknownPen(pen.clone()));
            }
        }
        if self.hatch.angle.is_some() {
            self.hatch.validate()?;
        }
        Ok(())
    }
}
