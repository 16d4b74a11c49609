//! GPU copies of the three card textures.
//!
//! Every slot starts as a 1x1 transparent-black texel, so a card whose
//! images are still loading renders black instead of failing validation.

use crate::assets::TextureKind;
use card_shading::TextureImage;

const CARD_TEXTURE_FMT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const PENDING_TEXEL: [u8; 4] = [0, 0, 0, 0];

struct GpuTexture {
    // Keep alive for the lifetime of the view.
    _tex: wgpu::Texture,
    view: wgpu::TextureView,
    loaded: bool,
}

impl GpuTexture {
    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CARD_TEXTURE_FMT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        tex
    }

    fn pending(device: &wgpu::Device, queue: &wgpu::Queue, kind: TextureKind) -> Self {
        let label = format!("{} Texture (pending)", kind.label());
        let tex = Self::upload(device, queue, &label, 1, 1, &PENDING_TEXEL);
        Self {
            view: tex.create_view(&wgpu::TextureViewDescriptor::default()),
            _tex: tex,
            loaded: false,
        }
    }

    fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        kind: TextureKind,
        image: &TextureImage,
    ) -> Self {
        let label = format!("{} Texture", kind.label());
        let tex = Self::upload(
            device,
            queue,
            &label,
            image.width(),
            image.height(),
            image.as_rgba8(),
        );
        Self {
            view: tex.create_view(&wgpu::TextureViewDescriptor::default()),
            _tex: tex,
            loaded: true,
        }
    }
}

/// Base, holo and ultra-rare textures plus the bind group that exposes
/// them to the card shader.
pub struct CardTextureSet {
    slots: [GpuTexture; 3],
    sampler: wgpu::Sampler,
    pub bind: wgpu::BindGroup,
}

impl CardTextureSet {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, layout: &wgpu::BindGroupLayout) -> Self {
        // Overlay UVs are shifted by the pointer and routinely leave [0, 1].
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Card Clamp Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let slots = TextureKind::ALL.map(|kind| GpuTexture::pending(device, queue, kind));
        let bind = Self::make_bind_group(device, layout, &slots, &sampler);

        Self {
            slots,
            sampler,
            bind,
        }
    }

    /// Replaces one slot with a decoded image and rebuilds the bind group.
    pub fn replace(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        kind: TextureKind,
        image: &TextureImage,
    ) {
        self.slots[kind.index()] = GpuTexture::from_image(device, queue, kind, image);
        self.bind = Self::make_bind_group(device, layout, &self.slots, &self.sampler);
    }

    pub fn is_loaded(&self, kind: TextureKind) -> bool {
        self.slots[kind.index()].loaded
    }

    fn make_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        slots: &[GpuTexture; 3],
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        let [base, holo, ultra_rare] = slots;
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Card Texture BindGroup"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&base.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&holo.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&ultra_rare.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}
