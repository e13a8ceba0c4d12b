#[cfg(feature = "f64")]
use glam::DMat3 as Mat3;
#[cfg(not(feature = "f64"))]
use glam::Mat3;

use crate::{Num, Quat, Vec3};

/// World-space pose of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialState {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Num,
}

impl Default for SpatialState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl SpatialState {
    pub fn new(position: Vec3, orientation: Quat, scale: Num) -> Self {
        Self {
            position,
            orientation,
            scale,
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Revolves the object around `center`, turning its orientation with it
    pub fn rotate_around(&mut self, center: Vec3, rotation: Quat) {
        self.position = center + rotation * (self.position - center);
        self.orientation = (rotation * self.orientation).normalize();
    }
}

/// Rotation whose +Z points along `forward` and whose +Y leans towards `up`.
///
/// Returns `None` for a zero-length `forward`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let f = forward.try_normalize()?;

    // Looking straight along `up` leaves the roll undefined, pick any
    let right = match up.cross(f).try_normalize() {
        Some(right) => right,
        None => f.any_orthonormal_vector(),
    };
    let up = f.cross(right);

    Some(Quat::from_mat3(&Mat3::from_cols(right, up, f)).normalize())
}
