use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::{ColorScale, QuantizedPalette};
use crate::error::VizResult;

/// Rendering configuration, decided once at startup.
///
/// Persisted as pretty JSON the same way scale configurations are, so a
/// deployment can pin its palette resolution and retry policy in a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Number of discrete palette buckets (the color sampling resolution).
    pub sample_count: usize,
    /// Lower bound of the activation domain.
    pub domain_lo: f64,
    /// Upper bound of the activation domain.
    pub domain_hi: f64,
    /// Alpha byte written for every pixel, regardless of activation value.
    pub fixed_alpha: u8,
    /// Delay before a missing surface is looked up again.
    pub retry_delay_ms: u64,
    /// Per-neuron retry budget; `None` keeps retrying until the surface
    /// appears.
    pub max_retries: Option<u32>,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            sample_count: 61,
            domain_lo: -1.0,
            domain_hi: 1.0,
            fixed_alpha: 160,
            retry_delay_ms: 100,
            max_retries: None,
        }
    }
}

impl RenderConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Builds the palette this configuration describes.
    pub fn build_palette(&self, scale: &ColorScale) -> VizResult<QuantizedPalette> {
        QuantizedPalette::build(scale, self.sample_count, self.domain_lo, self.domain_hi)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> VizResult<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `RenderConfig` from a JSON file.
    pub fn load_json(path: &str) -> VizResult<RenderConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = RenderConfig::default();
        assert_eq!(config.sample_count, 61);
        assert_eq!(config.domain_lo, -1.0);
        assert_eq!(config.domain_hi, 1.0);
        assert_eq!(config.fixed_alpha, 160);
        assert_eq!(config.retry_delay_ms, 100);
        assert_eq!(config.max_retries, None);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"sample_count": 21}"#).unwrap();
        assert_eq!(config.sample_count, 21);
        assert_eq!(config.fixed_alpha, 160);
    }

    #[test]
    fn default_palette_builds() {
        let palette = RenderConfig::default()
            .build_palette(&ColorScale::heatmap())
            .unwrap();
        assert_eq!(palette.len(), 61);
        assert_eq!(palette.domain(), (-1.0, 1.0));
    }
}
