use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{VizError, VizResult};

/// An opaque RGB color. Alpha is applied separately at paint time.
///
/// Serializes as a `#rrggbb` hex string so scale configurations read the
/// same way the anchor colors are usually written down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Parses a `#rrggbb` (or bare `rrggbb`) hex literal.
    pub fn from_hex(s: &str) -> VizResult<Rgb> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(VizError::InvalidColor(s.to_string()));
        }
        let channel = |lo: usize| {
            u8::from_str_radix(&hex[lo..lo + 2], 16)
                .map_err(|_| VizError::InvalidColor(s.to_string()))
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear interpolation toward `other`.
    ///
    /// `f` is normally in [0, 1]; values outside extrapolate, with each
    /// channel clamped back into byte range.
    pub fn lerp(&self, other: Rgb, f: f64) -> Rgb {
        let mix = |a: u8, b: u8| {
            (a as f64 + (b as f64 - a as f64) * f).round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(de::Error::custom)
    }
}
