use crate::color::rgb::Rgb;
use crate::color::scale::ColorScale;
use crate::error::{VizError, VizResult};

/// A fixed sequence of discrete colors sampled from a `ColorScale` at evenly
/// spaced domain points.
///
/// Built once at setup and read-only afterwards; changing the resolution or
/// domain means building a new palette. Quantizing through a palette keeps
/// per-pixel work to a single multiply and round instead of a full
/// interpolation, and bounds the number of distinct colors a rendered image
/// can contain.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedPalette {
    colors: Vec<Rgb>,
    domain_lo: f64,
    domain_hi: f64,
}

impl QuantizedPalette {
    /// Samples `sample_count` evenly spaced points of `scale` across
    /// `[domain_lo, domain_hi]`, endpoints included.
    ///
    /// Fails with `InvalidPaletteConfig` when `sample_count < 2`, the domain
    /// is empty or inverted, or the scale itself is malformed. These are
    /// setup-time errors; a renderer must never start from a bad palette.
    pub fn build(
        scale: &ColorScale,
        sample_count: usize,
        domain_lo: f64,
        domain_hi: f64,
    ) -> VizResult<QuantizedPalette> {
        if sample_count < 2 {
            return Err(VizError::InvalidPaletteConfig(format!(
                "sample_count must be at least 2, got {}",
                sample_count
            )));
        }
        if !(domain_lo < domain_hi) {
            return Err(VizError::InvalidPaletteConfig(format!(
                "domain_lo ({}) must be below domain_hi ({})",
                domain_lo, domain_hi
            )));
        }
        scale.validate()?;

        let step = (domain_hi - domain_lo) / (sample_count - 1) as f64;
        let colors = (0..sample_count)
            .map(|k| scale.color_at(domain_lo + k as f64 * step))
            .collect();
        Ok(QuantizedPalette { colors, domain_lo, domain_hi })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_lo, self.domain_hi)
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Maps `value` to the nearest palette bucket.
    ///
    /// Pure and deterministic: the value is rescaled linearly onto the
    /// bucket range, rounded to the nearest index, and clamped into
    /// `[0, len)`. The clamp doubles as range saturation for activations
    /// that stray outside the configured domain.
    pub fn quantize(&self, value: f64) -> usize {
        let top = (self.colors.len() - 1) as f64;
        let t = (value - self.domain_lo) / (self.domain_hi - self.domain_lo) * top;
        t.round().clamp(0.0, top) as usize
    }

    /// Bucket lookup: quantize, then resolve the bucket's color.
    pub fn color_for(&self, value: f64) -> Rgb {
        self.colors[self.quantize(value)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::scale::ScaleAnchor;

    fn red_white_blue() -> ColorScale {
        ColorScale::new(vec![
            ScaleAnchor { at: -1.0, color: Rgb::new(255, 0, 0) },
            ScaleAnchor { at: 0.0, color: Rgb::new(255, 255, 255) },
            ScaleAnchor { at: 1.0, color: Rgb::new(0, 0, 255) },
        ])
        .unwrap()
    }

    #[test]
    fn three_samples_hit_the_anchors() {
        let palette = QuantizedPalette::build(&red_white_blue(), 3, -1.0, 1.0).unwrap();
        assert_eq!(palette.colors(), &[
            Rgb::new(255, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 255),
        ]);
    }

    #[test]
    fn build_is_deterministic() {
        let scale = ColorScale::heatmap();
        let a = QuantizedPalette::build(&scale, 61, -1.0, 1.0).unwrap();
        let b = QuantizedPalette::build(&scale, 61, -1.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn quantize_is_monotone_non_decreasing() {
        let palette = QuantizedPalette::build(&ColorScale::heatmap(), 31, -1.0, 1.0).unwrap();
        let mut previous = 0;
        let mut v = -1.0;
        while v <= 1.0 {
            let idx = palette.quantize(v);
            assert!(idx >= previous, "index dropped from {} to {} at v={}", previous, idx, v);
            previous = idx;
            v += 0.001;
        }
    }

    #[test]
    fn quantize_clamps_out_of_domain_values() {
        let palette = QuantizedPalette::build(&ColorScale::heatmap(), 21, -1.0, 1.0).unwrap();
        assert_eq!(palette.quantize(-1.0001), palette.quantize(-1.0));
        assert_eq!(palette.quantize(1.0001), palette.quantize(1.0));
        assert_eq!(palette.quantize(-1000.0), 0);
        assert_eq!(palette.quantize(1000.0), palette.len() - 1);
    }

    #[test]
    fn quantize_endpoints() {
        let palette = QuantizedPalette::build(&ColorScale::heatmap(), 61, -1.0, 1.0).unwrap();
        assert_eq!(palette.quantize(-1.0), 0);
        assert_eq!(palette.quantize(0.0), 30);
        assert_eq!(palette.quantize(1.0), 60);
    }

    #[test]
    fn rejects_bad_sample_count() {
        let err = QuantizedPalette::build(&ColorScale::heatmap(), 1, -1.0, 1.0);
        assert!(matches!(err, Err(VizError::InvalidPaletteConfig(_))));
    }

    #[test]
    fn rejects_inverted_domain() {
        let err = QuantizedPalette::build(&ColorScale::heatmap(), 21, 1.0, -1.0);
        assert!(matches!(err, Err(VizError::InvalidPaletteConfig(_))));
        let err = QuantizedPalette::build(&ColorScale::heatmap(), 21, 0.5, 0.5);
        assert!(matches!(err, Err(VizError::InvalidPaletteConfig(_))));
    }
}
