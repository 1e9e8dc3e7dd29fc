pub mod palette;
pub mod rgb;
pub mod scale;

pub use palette::QuantizedPalette;
pub use rgb::Rgb;
pub use scale::{ColorScale, ScaleAnchor};
