use bevy::gizmos::gizmos::Gizmos;
use bevy::render::color::Color;
use glam::{Quat, Vec3};

/// Wing length as a fraction of the shaft
const WING_FRACTION: f32 = 0.2;
const WING_ANGLE_DEG: f32 = 30.0;

/// Arrows whose wings always face the camera
pub struct AimArrows<'a, 'g> {
    lines: &'a mut Gizmos<'g>,
    camera_position: Vec3,
}

impl<'a, 'g> AimArrows<'a, 'g> {
    pub fn new(lines: &'a mut Gizmos<'g>, camera_position: Vec3) -> Self {
        Self {
            lines,
            camera_position,
        }
    }

    /// Arrow of `length` from `start` along `direction`
    pub fn draw(
        &mut self,
        start: Vec3,
        direction: Vec3,
        length: f32,
        color: Color,
    ) {
        let Some(direction) = direction.try_normalize() else {
            return;
        };

        let end = start + direction * length;
        self.lines.line(start, end, color);

        let axis_start = closest_point(self.camera_position, start, end);
        let Some(rot_axis) = (self.camera_position - axis_start).try_normalize()
        else {
            return;
        };

        let angle = WING_ANGLE_DEG.to_radians();
        let wing = -direction * length * WING_FRACTION;

        for rotation in [
            Quat::from_axis_angle(rot_axis, angle),
            Quat::from_axis_angle(rot_axis, -angle),
        ] {
            self.lines.line(end, end + rotation * wing, color);
        }
    }
}

/// Closest point to `pos` on the segment from `a` to `b`
fn closest_point(pos: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let t = (pos - a).dot(ab) / ab.dot(ab);

    a + ab * t.clamp(0.0, 1.0)
}
