use bevy::prelude::*;
use kinematic_orrery::SpatialState;
use smooth_bevy_cameras::LookTransform;

use super::{FocusMode, Orrery, Star, State};
use crate::host::{light_rotation, Compensator};

pub fn orbits(
    time: Res<Time>,
    mut orrery: ResMut<Orrery>,
    mut transforms: Query<&mut Transform>,
    lights: Query<(), With<Compensator>>,
) {
    if let Err(err) = orrery.0.tick(time.delta_seconds()) {
        error!("Failed to advance the orrery: {err}");
        return;
    }

    for (entity, pose) in orrery.0.poses() {
        let Ok(mut transform) = transforms.get_mut(entity) else {
            continue;
        };

        transform.translation = pose.position;
        transform.rotation = if lights.contains(entity) {
            light_rotation(pose.orientation)
        } else {
            pose.orientation
        };
    }
}

pub fn spin(
    time: Res<Time>,
    state: Res<State>,
    mut stars: Query<(&Star, &mut Transform)>,
) {
    if state.paused {
        return;
    }

    for (star, mut transform) in stars.iter_mut() {
        let mut spatial = SpatialState::new(
            transform.translation,
            transform.rotation,
            transform.scale.x,
        );

        star.0.tick(&mut spatial, time.delta_seconds());

        transform.rotation = spatial.orientation;
    }
}

pub fn camera_focus(
    mut look_transform: Query<&mut LookTransform>,
    state: Res<State>,
    planets: Query<(&GlobalTransform, &Name)>,
) {
    let Ok(mut look) = look_transform.get_single_mut() else {
        return;
    };

    match &state.focus_mode {
        FocusMode::Sun => {
            look.target = Vec3::ZERO;
        }
        FocusMode::Planet(focused_name) => {
            for (transform, name) in planets.iter() {
                if focused_name == name.as_str() {
                    look.target = transform.translation();
                }
            }
        }
    }
}
