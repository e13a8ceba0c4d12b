//! Compensator lights.
//!
//! Every body gets its own directional light so that its sun-facing side stays
//! lit no matter where the real light source of the scene is. The light is
//! parked between the body and the anchor, slightly towards the body, and
//! re-aimed every tick so it shines from the anchor's side.

use crate::constants::{
    LIGHT_COLOR_TEMPERATURE_K, LIGHT_INTENSITY, LIGHT_OFFSET_FACTOR,
};
use crate::error::{OrreryError, Result};
use crate::scene::LayerId;
use crate::spatial::{look_rotation, SpatialState};
use crate::{Num, Quat, Vec3};

/// Description of the light a host should create for a body
#[derive(Debug, Clone, PartialEq)]
pub struct CompensatorLight {
    pub intensity: Num,
    pub color_temperature_k: Num,
    pub hard_shadows: bool,
    /// Bitmask of layers the light is allowed to affect
    pub culling_mask: u32,
}

impl CompensatorLight {
    /// A light that only affects objects on `layer`
    pub fn for_layer(layer: LayerId) -> Self {
        Self {
            intensity: LIGHT_INTENSITY,
            color_temperature_k: LIGHT_COLOR_TEMPERATURE_K,
            hard_shadows: true,
            culling_mask: 1u32.checked_shl(layer).unwrap_or(0),
        }
    }
}

/// How the light position follows its body
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightPlacement {
    /// Placed once at attach time, afterwards fixed relative to the body
    #[default]
    Static,
    /// Re-placed from the body and anchor positions on every tick
    Tracking,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IlluminationAimer {
    light: SpatialState,
    placement: LightPlacement,
}

impl IlluminationAimer {
    /// Parks a light between `source` and `anchor`.
    ///
    /// Fails when the two coincide since there is nothing to aim along.
    pub fn attach(source: Vec3, anchor: Vec3) -> Result<Self> {
        let position = light_position(source, anchor)?;

        let mut aimer = Self {
            light: SpatialState::at(position),
            placement: LightPlacement::Static,
        };
        aimer.tick(anchor);

        Ok(aimer)
    }

    pub fn with_placement(mut self, placement: LightPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn placement(&self) -> LightPlacement {
        self.placement
    }

    pub fn light(&self) -> &SpatialState {
        &self.light
    }

    pub fn light_position(&self) -> Vec3 {
        self.light.position
    }

    pub fn orientation(&self) -> Quat {
        self.light.orientation
    }

    /// Points the light away from `anchor`, from wherever it currently is.
    ///
    /// Only the orientation changes here. If the light sits exactly on the
    /// anchor the previous orientation is kept.
    pub fn tick(&mut self, anchor: Vec3) -> Quat {
        let inverse_direction = self.light.position - anchor;

        match look_rotation(inverse_direction, Vec3::Y) {
            Some(orientation) => self.light.orientation = orientation,
            None => log::trace!("Compensator light sits on its anchor, keeping orientation"),
        }

        self.light.orientation
    }

    /// Moves the light along with its parent body revolving around `center`
    pub fn carry(&mut self, center: Vec3, rotation: Quat) {
        if self.placement == LightPlacement::Static {
            self.light.rotate_around(center, rotation);
        }
    }

    /// Re-places a tracking light for the current body position.
    ///
    /// Static lights are left where they are.
    pub fn retrack(&mut self, source: Vec3, anchor: Vec3) {
        if self.placement != LightPlacement::Tracking {
            return;
        }

        match light_position(source, anchor) {
            Ok(position) => self.light.position = position,
            Err(err) => log::trace!("Not retracking compensator light: {err}"),
        }
    }
}

/// midpoint + (source - anchor) * 0.35
fn light_position(source: Vec3, anchor: Vec3) -> Result<Vec3> {
    let direction = source - anchor;

    if direction.length_squared() <= Num::EPSILON {
        return Err(OrreryError::ZeroLengthDirection);
    }

    let midpoint = (source + anchor) / 2.0;

    Ok(midpoint + direction * LIGHT_OFFSET_FACTOR)
}
