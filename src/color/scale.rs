use serde::{Deserialize, Serialize};

use crate::color::rgb::Rgb;
use crate::error::{VizError, VizResult};

/// One fixed point of a color scale: at domain position `at`, the scale
/// produces exactly `color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleAnchor {
    pub at: f64,
    pub color: Rgb,
}

/// A continuous value-to-color mapping built from piecewise-linear
/// interpolation between anchors.
///
/// Anchors must be strictly increasing in `at` and there must be at least
/// two of them; `validate()` checks this and palette construction calls it
/// before sampling. With `clamp` set (the default), values beyond the first
/// or last anchor saturate to that anchor's color instead of extrapolating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    pub anchors: Vec<ScaleAnchor>,
    #[serde(default = "default_clamp")]
    pub clamp: bool,
}

fn default_clamp() -> bool {
    true
}

impl ColorScale {
    /// Builds a clamping scale from anchors, validating them.
    pub fn new(anchors: Vec<ScaleAnchor>) -> VizResult<ColorScale> {
        let scale = ColorScale { anchors, clamp: true };
        scale.validate()?;
        Ok(scale)
    }

    /// The default decision-boundary scale: orange at -1, near-white at 0,
    /// blue at +1.
    pub fn heatmap() -> ColorScale {
        ColorScale {
            anchors: vec![
                ScaleAnchor { at: -1.0, color: Rgb::new(0xf5, 0x93, 0x22) },
                ScaleAnchor { at: 0.0, color: Rgb::new(0xe8, 0xea, 0xeb) },
                ScaleAnchor { at: 1.0, color: Rgb::new(0x08, 0x77, 0xbd) },
            ],
            clamp: true,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.anchors.len() < 2 {
            return Err(VizError::InvalidPaletteConfig(format!(
                "a color scale needs at least 2 anchors, got {}",
                self.anchors.len()
            )));
        }
        for pair in self.anchors.windows(2) {
            if pair[0].at >= pair[1].at {
                return Err(VizError::InvalidPaletteConfig(format!(
                    "anchor positions must be strictly increasing, saw {} before {}",
                    pair[0].at, pair[1].at
                )));
            }
        }
        Ok(())
    }

    /// Resolves the color at domain position `t`.
    ///
    /// Assumes validated anchors; a degenerate scale (fewer than two
    /// anchors) falls back to its sole anchor or black rather than
    /// panicking.
    pub fn color_at(&self, t: f64) -> Rgb {
        let (first, last) = match (self.anchors.first(), self.anchors.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return Rgb::new(0, 0, 0),
        };
        if self.clamp {
            if t <= first.at {
                return first.color;
            }
            if t >= last.at {
                return last.color;
            }
        }
        // Bracketing segment; past the ends (clamp off) the end segment's
        // slope extends outward.
        let segment = self
            .anchors
            .windows(2)
            .find(|pair| t <= pair[1].at)
            .or_else(|| self.anchors.windows(2).last());
        match segment {
            Some(pair) => {
                let (a, b) = (pair[0], pair[1]);
                let span = b.at - a.at;
                let f = if span == 0.0 { 0.0 } else { (t - a.at) / span };
                a.color.lerp(b.color, f)
            }
            None => first.color,
        }
    }
}
