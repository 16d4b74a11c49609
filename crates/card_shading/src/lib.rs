//! Shading and motion core for the holographic card preview.
//!
//! - [`shading`] turns a base photo plus two overlay textures into a final
//!   fragment color, selected by [`Rarity`] and driven by the pointer.
//! - [`motion`] damps the card's tilt toward a pointer-derived target once
//!   per frame and emits the per-frame [`FrameUniforms`] snapshot.
//! - [`raster`] evaluates the shading over a whole card face on the CPU.
//!
//! Nothing here touches a GPU or a window; the viewer crate owns those.

pub mod error;
pub mod motion;
pub mod raster;
pub mod rarity;
pub mod shading;
pub mod texture;

pub use error::TextureError;
pub use motion::{Damping, MotionIntegrator, Orientation, PointerInput};
pub use rarity::Rarity;
pub use shading::{shade_fragment, CardTextures, FrameUniforms};
pub use texture::{Sample, TextureImage, TextureSlot};
