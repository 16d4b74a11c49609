//! CPU reference rasterizer for a flat, unrotated card face.
//!
//! Used for headless snapshots and as a ground truth for the GPU shader.

use crate::error::TextureError;
use crate::shading::{shade_fragment, CardTextures, FrameUniforms};
use crate::texture::{Sample, TextureImage};
use glam::{Vec2, Vec4};
use rayon::prelude::*;

/// UV at the center of pixel `(x, y)`, row 0 at the top.
#[inline]
pub fn pixel_center_uv(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        1.0 - (y as f32 + 0.5) / height as f32,
    )
}

#[inline]
fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

/// Shades every pixel of a `width x height` card face in parallel.
pub fn render_face<S: Sample + Sync>(
    textures: &CardTextures<'_, S>,
    uniforms: FrameUniforms,
    width: u32,
    height: u32,
) -> Result<TextureImage, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyDimensions { width, height });
    }

    let row_bytes = width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * height as usize];

    pixels
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, texel) in row.chunks_exact_mut(4).enumerate() {
                let uv = pixel_center_uv(x as u32, y as u32, width, height);
                texel.copy_from_slice(&to_rgba8(shade_fragment(textures, uniforms, uv)));
            }
        });

    TextureImage::from_rgba8(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rarity::Rarity;
    use crate::texture::TextureSlot;

    fn gradient(width: u32, height: u32) -> TextureImage {
        let mut px = Vec::new();
        for y in 0..height {
            for x in 0..width {
                px.extend_from_slice(&[(x * 40) as u8, (y * 60) as u8, 128, 255]);
            }
        }
        TextureImage::from_rgba8(width, height, px).unwrap()
    }

    #[test]
    fn test_normal_face_reproduces_base() {
        let base = TextureSlot::ready(gradient(5, 4));
        let overlay = TextureSlot::ready(TextureImage::solid(2, 2, [255, 255, 255, 255]).unwrap());
        let t = CardTextures {
            base: &base,
            holo: &overlay,
            ultra_rare: &overlay,
        };

        let face = render_face(&t, FrameUniforms::new(Vec2::new(0.4, 0.4), Rarity::Normal), 5, 4)
            .unwrap();
        assert_eq!(face, gradient(5, 4));
    }

    #[test]
    fn test_pending_face_is_opaque_black() {
        let pending = TextureSlot::Pending;
        let t = CardTextures {
            base: &pending,
            holo: &pending,
            ultra_rare: &pending,
        };
        let face = render_face(&t, FrameUniforms::default(), 3, 3).unwrap();
        assert!(face.as_rgba8().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_parallel_matches_per_fragment() {
        let base = TextureSlot::ready(gradient(6, 5));
        let holo = TextureSlot::ready(gradient(3, 7));
        let t = CardTextures {
            base: &base,
            holo: &holo,
            ultra_rare: &base,
        };
        let uniforms = FrameUniforms::new(Vec2::new(-0.6, 0.2), Rarity::Holo);

        let face = render_face(&t, uniforms, 9, 8).unwrap();
        for y in 0..8 {
            for x in 0..9 {
                let expected = to_rgba8(shade_fragment(&t, uniforms, pixel_center_uv(x, y, 9, 8)));
                assert_eq!(face.pixel(x, y), expected);
            }
        }
    }

    #[test]
    fn test_rejects_empty_face() {
        let pending = TextureSlot::Pending;
        let t = CardTextures {
            base: &pending,
            holo: &pending,
            ultra_rare: &pending,
        };
        assert!(render_face(&t, FrameUniforms::default(), 0, 10).is_err());
    }
}
