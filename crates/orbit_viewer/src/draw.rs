use bevy::prelude::*;
use kinematic_orrery::geometry::orbit_samples;

use crate::debug_arrows::AimArrows;
use crate::{OrbitColor, Orrery, State};

pub fn orbits(
    mut lines: Gizmos,
    orrery: Res<Orrery>,
    colors: Query<&OrbitColor>,
    state: Res<State>,
) {
    if !state.draw_orbits {
        return;
    }

    let system = &orrery.0;
    let distance_scale = system.scale().distance_scale;

    for spawned in &system.bodies {
        let color = colors
            .get(spawned.handle)
            .map(|c| c.0)
            .unwrap_or(Color::GRAY);

        let points = orbit_samples(
            spawned.params.distance_au,
            distance_scale,
            state.orbit_segments,
        );

        lines.linestrip(points.into_iter().map(|p| p + system.origin()), color);
    }
}

/// Where each compensator light sits and which way it shines
pub fn light_aim(
    mut lines: Gizmos,
    orrery: Res<Orrery>,
    camera: Query<&GlobalTransform, With<Camera>>,
    state: Res<State>,
) {
    if !state.show_light_aim {
        return;
    }

    let Ok(camera) = camera.get_single() else {
        return;
    };

    let mut arrows = AimArrows::new(&mut lines, camera.translation());

    let system = &orrery.0;
    let aimers = system
        .bodies
        .iter()
        .filter_map(|spawned| spawned.body.aimer())
        .chain(system.fixed_lights.iter().map(|fixed| &fixed.aimer));

    for aimer in aimers {
        arrows.draw(
            aimer.light_position(),
            aimer.orientation() * Vec3::Z,
            state.aim_arrow_length,
            Color::YELLOW,
        );
    }
}
