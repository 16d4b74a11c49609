//! The rendering orchestrator. Owns the GPU context, the card textures and
//! the card pipeline.

pub mod context;
pub mod pipelines;
pub mod textures;

use self::{context::GfxContext, pipelines::card::CardPipeline, textures::CardTextureSet};
use crate::{assets::TextureKind, data::types::CardUniformStd140};
use card_shading::TextureImage;
use std::sync::Arc;
use winit::window::Window;

/// Viewport background, #111111.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 17.0 / 255.0,
    g: 17.0 / 255.0,
    b: 17.0 / 255.0,
    a: 1.0,
};

/// Owns all rendering-related state.
pub struct Renderer {
    pub gfx: GfxContext,
    pub card: CardPipeline,
    pub textures: CardTextureSet,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let gfx = GfxContext::new(window).await?;

        let card = CardPipeline::new(&gfx.device, gfx.config.format);
        let textures = CardTextureSet::new(&gfx.device, &gfx.queue, &card.texture_layout);

        let egui_renderer =
            egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Ok(Self {
            gfx,
            card,
            textures,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gfx.resize(new_size);
    }

    /// Uploads a decoded image into one of the card's texture slots.
    pub fn upload_texture(&mut self, kind: TextureKind, image: &TextureImage) {
        self.textures.replace(
            &self.gfx.device,
            &self.gfx.queue,
            &self.card.texture_layout,
            kind,
            image,
        );
    }

    /// Clears the frame and draws the card with this frame's uniforms.
    pub fn render(&mut self, swap_view: &wgpu::TextureView, uniforms: &CardUniformStd140) {
        self.card.write_uniforms(&self.gfx.queue, uniforms);

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Card Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.card.draw(&mut pass, &self.textures);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
