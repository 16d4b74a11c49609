//! Headless rendering of the card face to a PNG.

use crate::assets::load_texture_image;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use card_shading::{raster::render_face, CardTextures, FrameUniforms, TextureSlot};
use glam::Vec2;
use std::path::Path;

/// Loads a texture synchronously; failures leave the slot pending.
fn load_slot(path: &Path) -> TextureSlot {
    match load_texture_image(path) {
        Ok(image) => TextureSlot::ready(image),
        Err(e) => {
            log::warn!("{:#}; rendering it as transparent black", e);
            TextureSlot::Pending
        }
    }
}

/// Renders the flat card face described by `config` and writes it to `out`.
pub fn run(config: &Config, out: &Path) -> Result<()> {
    let base = load_slot(&config.image);
    let holo = load_slot(&config.holo_texture);
    let ultra_rare = load_slot(&config.ultra_rare_texture);

    let textures = CardTextures {
        base: &base,
        holo: &holo,
        ultra_rare: &ultra_rare,
    };
    let uniforms = FrameUniforms::new(
        Vec2::new(config.pointer_x, config.pointer_y),
        config.initial_rarity(),
    );

    let face = render_face(
        &textures,
        uniforms,
        config.snapshot_width,
        config.snapshot_height,
    )?;

    let png = image::RgbaImage::from_raw(face.width(), face.height(), face.as_rgba8().to_vec())
        .ok_or_else(|| anyhow!("snapshot buffer does not match its dimensions"))?;
    png.save(out)
        .with_context(|| format!("writing snapshot {}", out.display()))?;

    log::info!(
        "Wrote {}x{} {} snapshot to {}",
        face.width(),
        face.height(),
        uniforms.rarity,
        out.display()
    );
    Ok(())
}
