use crate::{
    assets::{AssetLoader, TextureKind},
    camera::{Camera, PointerTracker},
    card::Card,
    config::Config,
    data::types::CardUniformStd140,
    renderer::Renderer,
    ui::{self, TextureStatus},
};
use anyhow::Result;
use card_shading::{MotionIntegrator, PointerInput};
use std::{path::Path, sync::Arc, time::Instant};
use winit::{event::WindowEvent, window::Window};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub struct App {
    pub renderer: Renderer,
    pub camera: Camera,
    pub pointer: PointerTracker,
    pub card: Card,
    pub loader: AssetLoader,
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    /// File name of the image bound to each slot.
    texture_names: [String; 3],
    last_frame: Instant,
}

impl App {
    pub async fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let renderer = Renderer::new(window.clone()).await?;
        let camera = Camera::new(renderer.gfx.aspect());
        let card = Card::new(
            config.initial_rarity(),
            MotionIntegrator::new(config.damping.into()),
        );

        // Textures decode in the background; the card renders black until then.
        let mut loader = AssetLoader::spawn()?;
        loader.request(TextureKind::Base, &config.image)?;
        loader.request(TextureKind::Holo, &config.holo_texture)?;
        loader.request(TextureKind::UltraRare, &config.ultra_rare_texture)?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            None,
            None,
        );

        log::info!(
            "Card ready: rarity={}, damping={:?}",
            card.rarity,
            card.integrator.damping
        );

        Ok(Self {
            renderer,
            camera,
            pointer: PointerTracker::new(),
            card,
            loader,
            egui_ctx,
            egui_state,
            texture_names: Default::default(),
            last_frame: Instant::now(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size);
            self.camera.set_viewport(new_size);
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);

        // The tracker sees every cursor event so hover clears when the
        // pointer moves onto the panel.
        self.pointer.handle_event(event, self.renderer.gfx.size);

        if response.consumed {
            return true;
        }

        match event {
            WindowEvent::Resized(physical_size) => self.resize(*physical_size),
            WindowEvent::DroppedFile(path) => self.replace_photo(path),
            _ => {}
        }

        false
    }

    /// Swaps the card photo for the image at `path`.
    pub fn replace_photo(&mut self, path: &Path) {
        log::info!("Loading photo {}", path.display());
        if let Err(e) = self.loader.request(TextureKind::Base, path) {
            log::error!("Failed to queue photo {}: {:#}", path.display(), e);
        }
    }

    fn apply_loaded_textures(&mut self) {
        for loaded in self.loader.poll() {
            let slot = loaded.kind.index();
            match loaded.result {
                Ok(image) => {
                    log::info!(
                        "Loaded {} texture {} ({}x{})",
                        loaded.kind.label(),
                        loaded.path.display(),
                        image.width(),
                        image.height()
                    );
                    self.renderer.upload_texture(loaded.kind, &image);
                    self.texture_names[slot] = file_name(&loaded.path);
                }
                Err(e) => {
                    log::error!(
                        "Failed to load {} texture {}: {:#}",
                        loaded.kind.label(),
                        loaded.path.display(),
                        e
                    );
                    // Keep showing the previous image if there is one.
                    if !self.renderer.textures.is_loaded(loaded.kind) {
                        self.texture_names[slot] = file_name(&loaded.path);
                    }
                }
            }
        }
    }

    fn texture_statuses(&self) -> Vec<TextureStatus> {
        TextureKind::ALL
            .iter()
            .map(|&kind| {
                let loading_name = self.loader.loading_path(kind).map(file_name);
                TextureStatus {
                    kind,
                    loading: loading_name.is_some(),
                    name: loading_name.unwrap_or_else(|| self.texture_names[kind.index()].clone()),
                    loaded: self.renderer.textures.is_loaded(kind),
                }
            })
            .collect()
    }

    /// Advances the card by one frame and builds this frame's uniforms.
    pub fn update(&mut self) -> CardUniformStd140 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.apply_loaded_textures();

        let hovered = self.pointer.inside
            && !self.egui_ctx.is_pointer_over_area()
            && self.card.hit_test(&self.camera, self.pointer.position);

        let frame = self.card.advance(
            delta,
            PointerInput {
                position: self.pointer.position,
                hovered,
            },
        );

        CardUniformStd140::new(self.camera.view_proj() * self.card.model(), frame)
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let uniforms = self.update();

        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(&swap_view, &uniforms);

        let statuses = self.texture_statuses();
        let egui_input = self.egui_state.take_egui_input(window);
        self.egui_ctx.begin_frame(egui_input);

        let panel = ui::draw_card_maker(&self.egui_ctx, &mut self.card.rarity, &statuses);
        if panel.rarity_changed {
            log::info!("Rarity set to {}", self.card.rarity);
        }
        if panel.choose_photo {
            if let Some(path) = ui::pick_photo() {
                self.replace_photo(&path);
            }
        }

        let egui_output = self.egui_ctx.end_frame();
        self.egui_state
            .handle_platform_output(window, egui_output.platform_output);

        let shapes = self
            .egui_ctx
            .tessellate(egui_output.shapes, self.egui_ctx.pixels_per_point());

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.renderer.gfx.config.width,
                self.renderer.gfx.config.height,
            ],
            pixels_per_point: self.egui_ctx.pixels_per_point(),
        };

        let mut encoder = self
            .renderer
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("UI Encoder"),
            });

        for (id, delta) in &egui_output.textures_delta.set {
            self.renderer.egui_renderer.update_texture(
                &self.renderer.gfx.device,
                &self.renderer.gfx.queue,
                *id,
                delta,
            );
        }

        self.renderer.egui_renderer.update_buffers(
            &self.renderer.gfx.device,
            &self.renderer.gfx.queue,
            &mut encoder,
            &shapes,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("EGUI Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .egui_renderer
                .render(&mut render_pass, &shapes, &screen_descriptor);
        }

        for id in &egui_output.textures_delta.free {
            self.renderer.egui_renderer.free_texture(id);
        }

        self.renderer
            .gfx
            .queue
            .submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
