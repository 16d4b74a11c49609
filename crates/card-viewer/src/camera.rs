use glam::{Mat4, Vec2, Vec3};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;

/// Fixed perspective camera looking down -Z at the card.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world units.
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view (radians).
    pub fov_y_rad: f32,
    /// Width over height of the viewport.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// The preview camera: 75° vertical FOV, eight units in front of the card.
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            fov_y_rad: 75f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn set_viewport(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.aspect = size.width as f32 / size.height as f32;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// WebGPU/wgpu uses 0..1 depth; glam::Mat4::perspective_rh matches.
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// World-space ray `(origin, direction)` through a point in normalized
    /// device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        (near, (far - near).normalize())
    }
}

/// Maps a physical cursor position to `[-1, 1]` on both axes, `+y` up.
pub fn normalize_pointer(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Vec2 {
    let w = size.width.max(1) as f64;
    let h = size.height.max(1) as f64;
    let x = (position.x / w) * 2.0 - 1.0;
    let y = -((position.y / h) * 2.0 - 1.0);
    Vec2::new(x as f32, y as f32).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// Tracks the cursor over the window.
#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Last known pointer position in `[-1, 1]`; kept after the cursor leaves.
    pub position: Vec2,
    /// Whether the cursor is inside the window.
    pub inside: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles window events and updates the pointer snapshot.
    pub fn handle_event(&mut self, event: &WindowEvent, size: PhysicalSize<u32>) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.position = normalize_pointer(*position, size);
                self.inside = true;
            }
            WindowEvent::CursorEntered { .. } => self.inside = true,
            WindowEvent::CursorLeft { .. } => self.inside = false,
            _ => {}
        }
    }
}
