//! Per-frame tilt damping for the card mesh.

use crate::rarity::Rarity;
use crate::shading::FrameUniforms;
use glam::Vec2;

/// Approach rate toward the target orientation, per second.
pub const DAMP_RATE: f32 = 5.0;

/// Maximum tilt in radians per unit of pointer offset.
pub const TILT_SCALE: f32 = 0.5;

/// Card rotation in radians. Starts flat at `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about the X axis.
    pub pitch: f32,
    /// Rotation about the Y axis.
    pub yaw: f32,
}

impl Orientation {
    pub const NEUTRAL: Orientation = Orientation {
        pitch: 0.0,
        yaw: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }
}

/// Pointer snapshot read by the integrator each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    /// Normalized pointer position, `[-1, 1]` on both axes, `+y` up.
    pub position: Vec2,
    /// Whether the pointer is currently over the card.
    pub hovered: bool,
}

/// How the per-frame approach factor is derived from the frame delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Damping {
    /// `min(delta * rate, 1)`. Matches the plain per-frame multiply for
    /// ordinary frame times and snaps to the target after long stalls.
    #[default]
    Linear,
    /// `1 - exp(-rate * delta)`. Frame-rate independent.
    Exponential,
}

/// Moves an [`Orientation`] toward the pointer-derived target each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionIntegrator {
    pub damping: Damping,
    pub rate: f32,
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self::new(Damping::default())
    }
}

impl MotionIntegrator {
    pub fn new(damping: Damping) -> Self {
        Self {
            damping,
            rate: DAMP_RATE,
        }
    }

    /// Orientation the card relaxes toward for this pointer state.
    pub fn target(pointer: Vec2, hovered: bool) -> Orientation {
        if hovered {
            Orientation {
                pitch: pointer.y * -TILT_SCALE,
                yaw: pointer.x * TILT_SCALE,
            }
        } else {
            Orientation::NEUTRAL
        }
    }

    /// Fraction of the remaining distance covered this frame, in `[0, 1]`.
    ///
    /// Returns `None` for negative or NaN deltas.
    pub fn damp_factor(&self, delta: f32) -> Option<f32> {
        if delta.is_nan() || delta < 0.0 {
            return None;
        }

        let factor = match self.damping {
            Damping::Linear => (delta * self.rate).min(1.0),
            Damping::Exponential => 1.0 - (-self.rate * delta).exp(),
        };
        Some(factor)
    }

    /// Advances `orientation` by one frame and returns the uniforms the
    /// shading pass should use for the same frame.
    pub fn step(
        &self,
        orientation: &mut Orientation,
        delta: f32,
        input: PointerInput,
        rarity: Rarity,
    ) -> FrameUniforms {
        let target = Self::target(input.position, input.hovered);

        match self.damp_factor(delta) {
            Some(f) => {
                orientation.pitch += (target.pitch - orientation.pitch) * f;
                orientation.yaw += (target.yaw - orientation.yaw) * f;
            }
            None => log::debug!("Ignoring invalid frame delta {delta}"),
        }

        FrameUniforms::new(input.position, rarity)
    }
}
