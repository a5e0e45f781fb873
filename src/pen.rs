pub use csscolorparser::parse as parse_css_color;
pub use csscolorparser::Color as CssColor;
use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PenDetail {
    #[serde(default)]
    pub name: String,
    pub stroke_width: f64,
    pub color: CssColor,
}

impl Default for PenDetail {
    fn default() -> Self {
        Self {
            name: "Default Pen".to_string(),
            stroke_width: 0.5,
            color: CssColor::from_rgba8(0, 0, 0, 255),
        }
    }
}

impl PenDetail {
    pub fn new(name: &str, stroke_width: f64, color: CssColor) -> PenDetail {
        PenDetail {
            name: name.to_string(),
            stroke_width,
            color,
        }
    }
}

/// # PenRack
/// The pens a sketch can draw with, by name, plus whichever one is currently
/// in hand. There is always a pen in hand: with nothing activated, it's the
/// default pen.
#[derive(Debug, Clone, Default)]
pub struct PenRack {
    default_pen: PenDetail,
    pens: HashMap<String, PenDetail>,
    active: Vec<String>,
}

/// Puts the previous pen back when dropped, whichever way the scope exits.
struct PenGuard<'a> {
    rack: &'a mut PenRack,
}

impl Drop for PenGuard<'_> {
    fn drop(&mut self) {
        self.rack.active.pop();
    }
}

impl PenRack {
    pub fn new(default_pen: PenDetail) -> PenRack {
        PenRack {
            default_pen,
            pens: HashMap::new(),
            active: vec![],
        }
    }

    /// Rack a pen under its own name, replacing any pen already called that.
    pub fn add(&mut self, pen: PenDetail) -> &mut Self {
        self.pens.insert(pen.name.clone(), pen);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PenDetail> {
        self.pens.get(name)
    }

    /// The pen in hand right now.
    pub fn active(&self) -> &PenDetail {
        self.active
            .last()
            .and_then(|name| self.pens.get(name))
            .unwrap_or(&self.default_pen)
    }

    /// Pick up the named pen for the length of `draw`, then put it back and
    /// return to whatever was in hand before. Inside `draw`, [`PenRack::active`]
    /// is the named pen. `None` draws with the current pen.
    pub fn with_pen<R>(
        &mut self,
        name: Option<&str>,
        draw: impl FnOnce(&mut PenRack) -> R,
    ) -> Result<R, ConfigurationError> {
        let Some(name) = name else {
            return Ok(draw(self));
        };
        if !self.pens.contains_key(name) {
            return Err(ConfigurationError::UnknownPen(name.to_string()));
        }
        self.active.push(name.to_string());
        let guard = PenGuard { rack: self };
        Ok(draw(&mut *guard.rack))
    }
}
