//! Error types shared across the rendering pipeline.

use thiserror::Error;

/// Everything that can go wrong between receiving activation data and
/// committing pixels to a surface.
///
/// Per-neuron failures (`IndexOutOfRange`, `UnsetCell`, `DimensionMismatch`)
/// abort only that neuron's draw; the render pass continues with the rest.
/// `SurfaceNotFound` is transient and normally handled by the retry path.
/// Palette and scale configuration errors are fatal at setup time.
#[derive(Debug, Error)]
pub enum VizError {
    /// Buffer access outside `[0, len)`.
    #[error("index {index} out of range for buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A buffer cell was read back before anything was written to it.
    #[error("buffer cell {index} was never set")]
    UnsetCell { index: usize },

    /// The activation count does not match the surface area.
    #[error("dimension mismatch: surface expects {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// No surface is registered under the neuron's id (yet).
    #[error("no surface found for id \"{0}\"")]
    SurfaceNotFound(String),

    /// Palette construction was asked for something unsatisfiable.
    #[error("invalid palette config: {0}")]
    InvalidPaletteConfig(String),

    /// A color literal that is not of the form `#rrggbb`.
    #[error("invalid color literal \"{0}\"")]
    InvalidColor(String),

    /// PNG encoding failed.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type VizResult<T> = Result<T, VizError>;
