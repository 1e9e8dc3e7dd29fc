use std::collections::HashMap;

use log::warn;

use crate::error::VizResult;
use crate::render::pixels::PixelBuffer;

/// A square raster target a neuron's activations are painted onto.
///
/// `commit` replaces the surface's entire previous contents in one call;
/// a surface is never left partially painted.
pub trait Surface {
    fn width(&self) -> usize;
    fn commit(&mut self, pixels: &PixelBuffer);
}

/// Resolves surfaces by id.
///
/// Surface creation is owned by an external, asynchronously built UI layer,
/// so a lookup may fail transiently; the renderer defers and retries rather
/// than treating a miss as an error.
pub trait SurfaceProvider {
    fn lookup(&mut self, id: &str) -> Option<&mut dyn Surface>;
}

/// An in-memory surface retaining the last committed pixel data.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    width: usize,
    data: Vec<u8>,
    commits: u64,
}

impl MemorySurface {
    /// A zeroed (fully transparent black) square surface.
    pub fn new(width: usize) -> MemorySurface {
        MemorySurface {
            width,
            data: vec![0; width * width * 4],
            commits: 0,
        }
    }

    pub fn pixel_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of commits this surface has received.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    pub fn to_png_bytes(&self) -> VizResult<Vec<u8>> {
        PixelBuffer::from_rgba(self.width, self.width, self.data.clone()).to_png_bytes()
    }
}

impl Surface for MemorySurface {
    fn width(&self) -> usize {
        self.width
    }

    fn commit(&mut self, pixels: &PixelBuffer) {
        // A commit replaces the full raster; anything else would leave
        // `width` and the byte length disagreeing.
        let expected = self.width * self.width * 4;
        if pixels.len() != expected {
            warn!(
                "rejecting commit of {} bytes to a surface expecting {}",
                pixels.len(),
                expected
            );
            return;
        }
        self.data = pixels.as_bytes().to_vec();
        self.commits += 1;
    }
}

/// Id-addressed collection of in-memory surfaces.
///
/// Surfaces may be inserted at any time, including after a render call has
/// already deferred a draw for that id; the next poll will find it.
#[derive(Debug, Default)]
pub struct SurfaceMap {
    surfaces: HashMap<String, MemorySurface>,
}

impl SurfaceMap {
    pub fn new() -> SurfaceMap {
        SurfaceMap::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, surface: MemorySurface) {
        self.surfaces.insert(id.into(), surface);
    }

    pub fn get(&self, id: &str) -> Option<&MemorySurface> {
        self.surfaces.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }
}

impl SurfaceProvider for SurfaceMap {
    fn lookup(&mut self, id: &str) -> Option<&mut dyn Surface> {
        self.surfaces.get_mut(id).map(|s| s as &mut dyn Surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn commit_replaces_contents_and_counts() {
        let mut surface = MemorySurface::new(1);
        assert_eq!(surface.pixel_bytes(), &[0, 0, 0, 0]);

        let mut pixels = PixelBuffer::for_square(1);
        pixels.push(Rgb::new(1, 2, 3), 160);
        surface.commit(&pixels);

        assert_eq!(surface.pixel_bytes(), &[1, 2, 3, 160]);
        assert_eq!(surface.commit_count(), 1);
    }

    #[test]
    fn undersized_commit_is_rejected() {
        let mut surface = MemorySurface::new(2);
        let before = surface.pixel_bytes().to_vec();

        let mut pixels = PixelBuffer::for_square(1);
        pixels.push(Rgb::new(9, 9, 9), 255);
        surface.commit(&pixels);

        assert_eq!(surface.pixel_bytes(), before.as_slice());
        assert_eq!(surface.commit_count(), 0);
    }

    #[test]
    fn map_lookup_misses_until_inserted() {
        let mut map = SurfaceMap::new();
        assert!(map.lookup("n1").is_none());
        map.insert("n1", MemorySurface::new(2));
        assert!(map.lookup("n1").is_some());
        assert_eq!(map.lookup("n1").unwrap().width(), 2);
    }
}
