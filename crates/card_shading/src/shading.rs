//! Per-fragment card shading.
//!
//! Every function here is pure: the same inputs always produce the same
//! color, so fragments can be evaluated in any order or in parallel.
//! `shaders/card.wgsl` in the viewer crate mirrors this module line for line.

use crate::rarity::Rarity;
use crate::texture::Sample;
use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};

/// How far the overlay UV travels per unit of pointer offset.
pub const HOLO_UV_SCALE: f32 = 0.5;

/// Rec. 601 luma weights.
pub const LUMA_WEIGHTS: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Holo overlay weight at zero luminance.
pub const HOLO_BASE_WEIGHT: f32 = 0.3;
/// Extra holo overlay weight per unit of luminance.
pub const HOLO_LUMA_WEIGHT: f32 = 0.2;

/// Channel-wise tint applied to the photo for gold cards.
pub const GOLD_TINT: Vec3 = Vec3::new(1.0, 0.8, 0.0);
pub const GOLD_HOLO_WEIGHT: f32 = 0.5;

pub const ULTRA_RARE_WEIGHT: f32 = 0.6;

/// Snapshot of the time-varying shading inputs for one frame.
///
/// Taken once per frame and passed by value, so every fragment of a frame
/// sees identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUniforms {
    /// Pointer position, each component in `[-1, 1]`, `+y` up.
    pub pointer: Vec2,
    pub rarity: Rarity,
}

impl FrameUniforms {
    /// Builds a snapshot, clamping the pointer into `[-1, 1]`.
    pub fn new(pointer: Vec2, rarity: Rarity) -> Self {
        Self {
            pointer: pointer.clamp(Vec2::NEG_ONE, Vec2::ONE),
            rarity,
        }
    }
}

/// The three textures bound to the card.
#[derive(Debug, Clone, Copy)]
pub struct CardTextures<'a, S: Sample> {
    /// The user's photo.
    pub base: &'a S,
    pub holo: &'a S,
    pub ultra_rare: &'a S,
}

/// Overlay sampling coordinate: the sheen slides with the pointer.
#[inline]
pub fn holo_uv(uv: Vec2, pointer: Vec2) -> Vec2 {
    uv + Vec2::new(pointer.x * HOLO_UV_SCALE, -pointer.y * HOLO_UV_SCALE)
}

#[inline]
pub fn luminance(rgb: Vec3) -> f32 {
    rgb.dot(LUMA_WEIGHTS)
}

/// Holo overlay weight; brighter photo pixels pick up more sheen.
/// Lies in `[0.3, 0.5]` for colors in `[0, 1]`.
#[inline]
pub fn holo_blend_weight(rgb: Vec3) -> f32 {
    HOLO_BASE_WEIGHT + luminance(rgb) * HOLO_LUMA_WEIGHT
}

/// Combines the three samples for a tier.
pub fn blend(rarity: Rarity, base: Vec3, holo: Vec3, ultra_rare: Vec3) -> Vec3 {
    match rarity {
        Rarity::Normal => base,
        Rarity::Holo => base.lerp(holo, holo_blend_weight(base)),
        Rarity::Gold => (base * GOLD_TINT).lerp(holo, GOLD_HOLO_WEIGHT),
        Rarity::UltraRare => base.lerp(ultra_rare, ULTRA_RARE_WEIGHT),
    }
}

/// Shades one fragment of the card face. Alpha is always 1.
pub fn shade_fragment<S: Sample>(
    textures: &CardTextures<'_, S>,
    uniforms: FrameUniforms,
    uv: Vec2,
) -> Vec4 {
    let base = textures.base.sample(uv);

    let overlay_uv = holo_uv(uv, uniforms.pointer);
    let holo = textures.holo.sample(overlay_uv);
    let ultra_rare = textures.ultra_rare.sample(overlay_uv);

    blend(uniforms.rarity, base.xyz(), holo.xyz(), ultra_rare.xyz()).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{TextureImage, TextureSlot};

    fn solid(r: f32, g: f32, b: f32) -> Vec4 {
        Vec4::new(r, g, b, 1.0)
    }

    fn textures<'a>(base: &'a Vec4, holo: &'a Vec4, ultra: &'a Vec4) -> CardTextures<'a, Vec4> {
        CardTextures {
            base,
            holo,
            ultra_rare: ultra,
        }
    }

    /// Small deterministic spread of colors in [0, 1].
    fn palette() -> Vec<Vec3> {
        let steps = [0.0, 0.13, 0.5, 0.77, 1.0];
        let mut out = Vec::new();
        for r in steps {
            for g in steps {
                for b in steps {
                    out.push(Vec3::new(r, g, b));
                }
            }
        }
        out
    }

    #[test]
    fn test_normal_returns_base_exactly() {
        let base = solid(0.2, 0.4, 0.6);
        let holo = solid(1.0, 1.0, 1.0);
        let ultra = solid(0.0, 1.0, 0.0);
        let t = textures(&base, &holo, &ultra);

        for &(u, v) in &[(0.0, 0.0), (0.5, 0.5), (1.0, 0.3)] {
            let uniforms = FrameUniforms::new(Vec2::new(0.9, -0.4), Rarity::Normal);
            let out = shade_fragment(&t, uniforms, Vec2::new(u, v));
            assert_eq!(out, base);
        }
    }

    #[test]
    fn test_holo_weight_bounds_and_monotonic() {
        let mut colors = palette();
        colors.sort_by(|a, b| luminance(*a).total_cmp(&luminance(*b)));

        let mut last = f32::NEG_INFINITY;
        for c in colors {
            let w = holo_blend_weight(c);
            assert!((0.3..=0.5 + 1e-6).contains(&w), "weight {w} out of range for {c}");
            assert!(w >= last);
            last = w;
        }
    }

    #[test]
    fn test_white_holo_weight_is_half() {
        let w = holo_blend_weight(Vec3::ONE);
        assert!((w - 0.5).abs() < 1e-6);
        assert_eq!(holo_blend_weight(Vec3::ZERO), 0.3);
    }

    #[test]
    fn test_holo_blend_is_exact() {
        let holo = Vec3::new(0.9, 0.1, 0.4);
        let ultra = Vec3::new(0.3, 0.8, 1.0);
        for base in palette() {
            // Weight comes from the photo's luminance, not the overlay's.
            let weight = 0.3 + (0.299 * base.x + 0.587 * base.y + 0.114 * base.z) * 0.2;
            let expected = base.lerp(holo, weight);
            let out = blend(Rarity::Holo, base, holo, ultra);
            assert!(
                (out - expected).abs().max_element() < 1e-6,
                "holo blend of {base} gave {out}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_holo_fragment_on_mid_gray() {
        let base = solid(0.5, 0.5, 0.5);
        let holo = solid(1.0, 0.0, 0.0);
        let ultra = solid(0.0, 1.0, 0.0);
        let t = textures(&base, &holo, &ultra);

        let out = shade_fragment(
            &t,
            FrameUniforms::new(Vec2::new(0.4, -0.2), Rarity::Holo),
            Vec2::new(0.5, 0.5),
        );
        // L = 0.5, so the overlay weight is 0.4.
        let expected = Vec4::new(0.7, 0.3, 0.3, 1.0);
        assert!((out - expected).abs().max_element() < 1e-6, "got {out}");
    }

    #[test]
    fn test_gold_blend_is_exact() {
        for base in palette() {
            let holo = Vec3::new(0.9, 0.1, 0.4);
            let expected = (base * Vec3::new(1.0, 0.8, 0.0)).lerp(holo, 0.5);
            assert_eq!(blend(Rarity::Gold, base, holo, Vec3::ZERO), expected);
        }
    }

    #[test]
    fn test_ultra_rare_blend_is_exact() {
        for base in palette() {
            let ultra = Vec3::new(0.3, 0.8, 1.0);
            let expected = base.lerp(ultra, 0.6);
            assert_eq!(blend(Rarity::UltraRare, base, Vec3::ONE, ultra), expected);
        }
    }

    #[test]
    fn test_gold_on_pure_red() {
        let base = solid(1.0, 0.0, 0.0);
        let holo = solid(0.2, 0.6, 1.0);
        let ultra = Vec4::ZERO;
        let t = textures(&base, &holo, &ultra);

        let out = shade_fragment(
            &t,
            FrameUniforms::new(Vec2::ZERO, Rarity::Gold),
            Vec2::new(0.5, 0.5),
        );
        let expected = Vec3::new(1.0, 0.0, 0.0).lerp(holo.xyz(), 0.5);
        assert_eq!(out, expected.extend(1.0));
    }

    #[test]
    fn test_alpha_forced_opaque() {
        let base = Vec4::new(0.5, 0.5, 0.5, 0.0);
        let holo = Vec4::new(1.0, 1.0, 1.0, 0.25);
        let t = textures(&base, &holo, &holo);
        for rarity in Rarity::ALL {
            let out = shade_fragment(&t, FrameUniforms::new(Vec2::ZERO, rarity), Vec2::ZERO);
            assert_eq!(out.w, 1.0);
        }
    }

    #[test]
    fn test_holo_uv_follows_pointer() {
        let uv = holo_uv(Vec2::new(0.5, 0.5), Vec2::new(1.0, 1.0));
        assert_eq!(uv, Vec2::new(1.0, 0.0));
        assert_eq!(holo_uv(Vec2::new(0.2, 0.7), Vec2::ZERO), Vec2::new(0.2, 0.7));
    }

    #[test]
    fn test_overlay_sampled_at_offset_uv() {
        // Left half red, right half blue; the pointer slides the overlay
        // lookup from the left texel to the right one.
        let holo = TextureSlot::ready(
            TextureImage::from_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap(),
        );
        let base = TextureSlot::ready(TextureImage::solid(1, 1, [0, 0, 0, 255]).unwrap());
        let t = CardTextures {
            base: &base,
            holo: &holo,
            ultra_rare: &holo,
        };

        let at = |px: f32| {
            shade_fragment(
                &t,
                FrameUniforms::new(Vec2::new(px, 0.0), Rarity::UltraRare),
                Vec2::new(0.25, 0.5),
            )
        };
        assert_eq!(at(0.0), Vec4::new(0.6, 0.0, 0.0, 1.0));
        assert_eq!(at(1.0), Vec4::new(0.0, 0.0, 0.6, 1.0));
    }

    #[test]
    fn test_pending_textures_shade_opaque_black() {
        let pending = TextureSlot::Pending;
        let t = CardTextures {
            base: &pending,
            holo: &pending,
            ultra_rare: &pending,
        };
        for rarity in Rarity::ALL {
            let out = shade_fragment(&t, FrameUniforms::new(Vec2::ZERO, rarity), Vec2::splat(0.5));
            assert_eq!(out, Vec4::new(0.0, 0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_shading_is_idempotent() {
        let base = solid(0.31, 0.72, 0.05);
        let holo = solid(0.9, 0.2, 0.6);
        let ultra = solid(0.4, 0.4, 0.9);
        let t = textures(&base, &holo, &ultra);
        for rarity in Rarity::ALL {
            let uniforms = FrameUniforms::new(Vec2::new(-0.3, 0.8), rarity);
            let a = shade_fragment(&t, uniforms, Vec2::new(0.1, 0.9));
            let b = shade_fragment(&t, uniforms, Vec2::new(0.1, 0.9));
            assert_eq!(a.to_array().map(f32::to_bits), b.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn test_pointer_is_clamped() {
        let u = FrameUniforms::new(Vec2::new(3.0, -8.0), Rarity::Holo);
        assert_eq!(u.pointer, Vec2::new(1.0, -1.0));
    }
}
