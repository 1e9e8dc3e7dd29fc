pub mod buffer;
pub mod color;
pub mod error;
pub mod render;

// Convenience re-exports
pub use buffer::SampleBuffer;
pub use color::{ColorScale, QuantizedPalette, Rgb, ScaleAnchor};
pub use error::{VizError, VizResult};
pub use render::{
    CanvasRenderer, DrawOutcome, MemorySurface, Network, NetworkUpdate, Neuron, NeuronReport,
    NeuronUpdate, PixelBuffer, RenderConfig, Surface, SurfaceMap, SurfaceProvider,
};
