pub mod config;
pub mod network;
pub mod pixels;
pub mod renderer;
pub mod surface;

pub use config::RenderConfig;
pub use network::{Network, NetworkUpdate, Neuron, NeuronUpdate};
pub use pixels::PixelBuffer;
pub use renderer::{CanvasRenderer, DrawOutcome, NeuronReport};
pub use surface::{MemorySurface, Surface, SurfaceMap, SurfaceProvider};
