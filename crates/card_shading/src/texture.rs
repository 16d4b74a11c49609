//! CPU-side textures and the sampler used by the reference shading path.
//!
//! UV convention: `u` runs left to right, `v` runs bottom to top, so
//! `(0, 0)` is the bottom-left corner of the image and row 0 of the pixel
//! buffer sits at `v = 1`.

use crate::error::TextureError;
use glam::{Vec2, Vec4};
use std::sync::Arc;

/// Anything that can be sampled at a normalized UV coordinate.
pub trait Sample {
    /// Returns RGBA in `[0, 1]`.
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// A solid color samples as itself everywhere.
impl Sample for Vec4 {
    #[inline]
    fn sample(&self, _uv: Vec2) -> Vec4 {
        *self
    }
}

/// An immutable RGBA8 image, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    /// Wraps a tightly packed RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyDimensions { width, height });
        }

        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A `width x height` image filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, TextureError> {
        let count = width as usize * height as usize;
        Self::from_rgba8(width, height, rgba.repeat(count))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, suitable for a GPU upload.
    #[inline]
    pub fn as_rgba8(&self) -> &[u8] {
        &self.pixels
    }

    /// Texel at column `x`, row `y` (row 0 is the top row).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Texel with clamp-to-edge addressing, normalized to `[0, 1]`.
    #[inline]
    fn texel_clamped(&self, x: i64, y: i64) -> Vec4 {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        let [r, g, b, a] = self.pixel(x, y);
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }
}

impl Sample for TextureImage {
    /// Bilinear filtering with clamp-to-edge addressing, so offset overlay
    /// coordinates outside `[0, 1]` smear the border instead of wrapping.
    fn sample(&self, uv: Vec2) -> Vec4 {
        // Continuous texel space, texel centers at integer + 0.5.
        let x = uv.x * self.width as f32 - 0.5;
        let y = (1.0 - uv.y) * self.height as f32 - 0.5;

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (ix, iy) = (x0 as i64, y0 as i64);

        let top = self
            .texel_clamped(ix, iy)
            .lerp(self.texel_clamped(ix + 1, iy), fx);
        let bottom = self
            .texel_clamped(ix, iy + 1)
            .lerp(self.texel_clamped(ix + 1, iy + 1), fx);

        top.lerp(bottom, fy)
    }
}

/// A bound texture that may still be loading.
#[derive(Debug, Clone, Default)]
pub enum TextureSlot {
    /// Not loaded yet; samples as transparent black.
    #[default]
    Pending,
    Ready(Arc<TextureImage>),
}

impl TextureSlot {
    pub fn ready(image: TextureImage) -> Self {
        TextureSlot::Ready(Arc::new(image))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TextureSlot::Ready(_))
    }

    pub fn image(&self) -> Option<&TextureImage> {
        match self {
            TextureSlot::Pending => None,
            TextureSlot::Ready(image) => Some(image),
        }
    }
}

impl Sample for TextureSlot {
    #[inline]
    fn sample(&self, uv: Vec2) -> Vec4 {
        match self {
            TextureSlot::Pending => Vec4::ZERO,
            TextureSlot::Ready(image) => image.sample(uv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn two_by_one() -> TextureImage {
        TextureImage::from_rgba8(2, 1, [RED, BLUE].concat()).unwrap()
    }

    #[test]
    fn test_rejects_bad_buffers() {
        assert_eq!(
            TextureImage::from_rgba8(0, 4, Vec::new()),
            Err(TextureError::EmptyDimensions { width: 0, height: 4 })
        );
        assert!(matches!(
            TextureImage::from_rgba8(2, 2, vec![0; 15]),
            Err(TextureError::BufferSize { expected: 16, actual: 15, .. })
        ));
    }

    #[test]
    fn test_texel_centers_are_exact() {
        let img = two_by_one();
        assert_eq!(img.sample(Vec2::new(0.25, 0.5)), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(img.sample(Vec2::new(0.75, 0.5)), Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_bilinear_midpoint() {
        let img = two_by_one();
        let mid = img.sample(Vec2::new(0.5, 0.5));
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.z - 0.5).abs() < 1e-6);
        assert_eq!(mid.w, 1.0);
    }

    #[test]
    fn test_clamp_to_edge_outside_unit_square() {
        let img = two_by_one();
        assert_eq!(img.sample(Vec2::new(-0.7, 0.5)), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(img.sample(Vec2::new(1.4, -2.0)), Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_v_axis_points_up() {
        // Row 0 (top) red, row 1 (bottom) blue.
        let img = TextureImage::from_rgba8(1, 2, [RED, BLUE].concat()).unwrap();
        assert_eq!(img.sample(Vec2::new(0.5, 0.75)), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(img.sample(Vec2::new(0.5, 0.25)), Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_pending_slot_is_transparent_black() {
        let slot = TextureSlot::Pending;
        assert!(!slot.is_ready());
        assert_eq!(slot.sample(Vec2::new(0.5, 0.5)), Vec4::ZERO);

        let ready = TextureSlot::ready(TextureImage::solid(1, 1, RED).unwrap());
        assert!(ready.is_ready());
        assert_eq!(ready.sample(Vec2::new(3.0, 3.0)), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }
}
