//! The single card entity: orientation, rarity and hover picking.

use crate::camera::Camera;
use crate::data::mesh::{CARD_HEIGHT, CARD_WIDTH};
use card_shading::{FrameUniforms, MotionIntegrator, Orientation, PointerInput, Rarity};
use glam::{EulerRot, Mat4, Vec2};

pub struct Card {
    /// Current tilt; mutated only by [`Card::advance`].
    pub orientation: Orientation,
    /// Selected treatment, owned by the UI.
    pub rarity: Rarity,
    pub integrator: MotionIntegrator,
    /// Face size in world units.
    pub size: Vec2,
}

impl Card {
    pub fn new(rarity: Rarity, integrator: MotionIntegrator) -> Self {
        Self {
            orientation: Orientation::NEUTRAL,
            rarity,
            integrator,
            size: Vec2::new(CARD_WIDTH, CARD_HEIGHT),
        }
    }

    /// Model matrix: Euler XYZ rotation `(pitch, yaw, 0)` about the origin.
    pub fn model(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.orientation.pitch,
            self.orientation.yaw,
            0.0,
        )
    }

    /// Whether the pointer ray hits the card face in its current pose.
    pub fn hit_test(&self, camera: &Camera, ndc: Vec2) -> bool {
        let (origin, dir) = camera.ray_through(ndc);

        // Intersect in the card's local frame, where the face is z = 0.
        let inv = self.model().inverse();
        let o = inv.transform_point3(origin);
        let d = inv.transform_vector3(dir);
        if d.z.abs() < 1e-6 {
            return false;
        }

        let t = -o.z / d.z;
        if t < 0.0 {
            return false;
        }

        let p = o + d * t;
        p.x.abs() <= self.size.x * 0.5 && p.y.abs() <= self.size.y * 0.5
    }

    /// Runs one frame of the motion integrator and returns the uniforms for
    /// the shading pass.
    pub fn advance(&mut self, delta: f32, pointer: PointerInput) -> FrameUniforms {
        self.integrator
            .step(&mut self.orientation, delta, pointer, self.rarity)
    }
}
