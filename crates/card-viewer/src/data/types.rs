//! Core data types for the card viewer, focused on GPU data representation.

use card_shading::FrameUniforms;
use glam::Mat4;

/// One vertex of the card plane.
/// Must match the vertex inputs of `vs_main` in `card.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CardVertex {
    /// Model-space position; the card lies in the z = 0 plane.
    pub position: [f32; 3],
    /// Card UV, `(0, 0)` bottom-left, `(1, 1)` top-right.
    pub uv: [f32; 2],
}

/// Per-frame uniform block, respecting std140 layout.
/// Must match the layout of `CardUniforms` in `card.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CardUniformStd140 {
    /// Projection * view * model for the card mesh.
    pub model_view_proj: [[f32; 4]; 4],
    /// Pointer position in `[-1, 1]`, `+y` up.
    pub pointer: [f32; 2],
    /// Rarity tier index (0..=3).
    pub rarity: u32,
    pub _pad0: u32,
}

impl CardUniformStd140 {
    pub fn new(model_view_proj: Mat4, frame: FrameUniforms) -> Self {
        Self {
            model_view_proj: model_view_proj.to_cols_array_2d(),
            pointer: frame.pointer.to_array(),
            rarity: frame.rarity.index(),
            _pad0: 0,
        }
    }
}
