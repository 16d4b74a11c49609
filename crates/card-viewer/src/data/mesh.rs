use super::types::CardVertex;

/// Card face size in world units (portrait trading-card ratio).
pub const CARD_WIDTH: f32 = 4.5;
pub const CARD_HEIGHT: f32 = 6.3;

/// Two counter-clockwise triangles covering a `width x height` plane
/// centered at the origin, facing +z.
pub fn card_plane(width: f32, height: f32) -> [CardVertex; 6] {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let v = |x: f32, y: f32, u: f32, t: f32| CardVertex {
        position: [x, y, 0.0],
        uv: [u, t],
    };

    [
        v(-hw, -hh, 0.0, 0.0),
        v(hw, -hh, 1.0, 0.0),
        v(hw, hh, 1.0, 1.0),
        v(-hw, -hh, 0.0, 0.0),
        v(hw, hh, 1.0, 1.0),
        v(-hw, hh, 0.0, 1.0),
    ]
}
