use std::io::Cursor;
use std::path::Path;

use crate::color::Rgb;
use crate::error::{VizError, VizResult};

/// Flat RGBA pixel data, row-major, four bytes per pixel.
///
/// Filled front to back during construction and then committed to a surface
/// in a single call; there is no partial-row streaming.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// An empty square buffer with capacity for `width²` pixels.
    pub fn for_square(width: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height: width,
            data: Vec::with_capacity(width * width * 4),
        }
    }

    /// Wraps already-laid-out RGBA bytes.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> PixelBuffer {
        PixelBuffer { width, height, data }
    }

    /// Appends one pixel. Pixels are written strictly in row-major order.
    pub fn push(&mut self, color: Rgb, alpha: u8) {
        self.data.extend_from_slice(&[color.r, color.g, color.b, alpha]);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Encodes the buffer as a PNG. Fails if the pixel data does not cover
    /// the full `width × height` raster.
    pub fn to_png_bytes(&self) -> VizResult<Vec<u8>> {
        let expected = self.width * self.height * 4;
        if self.data.len() != expected {
            return Err(VizError::DimensionMismatch { expected, actual: self.data.len() });
        }
        let img = image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .ok_or(VizError::DimensionMismatch { expected, actual: self.data.len() })?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> VizResult<()> {
        std::fs::write(path, self.to_png_bytes()?)?;
        Ok(())
    }
}
