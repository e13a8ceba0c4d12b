use bevy::core_pipeline::bloom::BloomSettings;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy_egui::EguiPlugin;
use kinematic_orrery::{
    BodyConfig, CentralBodyConfig, GlobalScaleConfig, OrbitalParameters,
    SolarSystem, SolarSystemConfig, SolarSystemGenerator, Spin,
};
use smooth_bevy_cameras::controllers::orbit::{
    OrbitCameraBundle, OrbitCameraController, OrbitCameraPlugin,
};
use smooth_bevy_cameras::LookTransformPlugin;

use crate::host::{BevyHost, BodyPrefab};

/// The real sun would swallow the inner planets at this distance scale
const SUN_RELATIVE_SIZE: f32 = 20.0;
const SUN_SPIN_DEG_PER_SECOND: f32 = 5.0;

mod debug_arrows;
mod draw;
mod host;
mod ui;
mod update;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(LookTransformPlugin)
        .add_plugins(OrbitCameraPlugin::new(false))
        .add_plugins(EguiPlugin)
        .init_resource::<ui::UiState>()
        .add_systems(Startup, setup)
        .add_systems(Update, ui::render)
        .add_systems(Update, update::orbits)
        .add_systems(Update, update::spin)
        .add_systems(Update, update::camera_focus)
        .add_systems(Update, draw::orbits)
        .add_systems(Update, draw::light_aim)
        .run();
}

#[derive(Resource)]
struct State {
    paused: bool,

    draw_orbits: bool,
    orbit_segments: usize,

    show_light_aim: bool,
    aim_arrow_length: f32,

    focus_mode: FocusMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FocusMode {
    Sun,
    Planet(String),
}

#[derive(Resource)]
struct Orrery(SolarSystem<Entity>);

/// Marks the entity standing in for the central body
#[derive(Component)]
struct Star(Spin);

/// Orbit line colour of a body
#[derive(Component)]
struct OrbitColor(Color);

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ClearColor(Color::BLACK));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.01,
    });

    commands.insert_resource(State {
        paused: false,
        draw_orbits: true,
        orbit_segments: kinematic_orrery::constants::DEFAULT_ORBIT_SEGMENTS,
        show_light_aim: false,
        aim_arrow_length: 10.0,
        focus_mode: FocusMode::Sun,
    });

    let sphere = meshes.add(
        shape::Icosphere {
            radius: 0.5,
            subdivisions: 4,
        }
        .try_into()
        .unwrap(),
    );

    let ring = meshes.add(Mesh::from(shape::Torus {
        radius: 1.2,
        ring_radius: 0.15,
        ..default()
    }));

    let star_material = materials.add(StandardMaterial {
        emissive: Color::YELLOW * 100.0,
        ..Default::default()
    });

    let mut planet_material = |color: Color| {
        materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 1.0,
            ..Default::default()
        })
    };

    let colors = [
        Color::BEIGE,
        Color::ORANGE,
        Color::BLUE,
        Color::RED,
        Color::GREEN,
        Color::YELLOW_GREEN,
        Color::ALICE_BLUE,
        Color::MIDNIGHT_BLUE,
    ];

    let bodies = OrbitalParameters::real_solar_system()
        .into_iter()
        .zip(colors)
        .map(|(params, color)| {
            let mut prefab =
                BodyPrefab::new(sphere.clone(), planet_material(color));

            if params.name == "Saturn" {
                prefab = prefab.with_child(
                    BodyPrefab::new(ring.clone(), planet_material(color)),
                    Transform::from_rotation(Quat::from_rotation_x(0.4)),
                );
            }

            BodyConfig::new(params, Some(prefab))
        })
        .collect();

    let config = SolarSystemConfig {
        scale: GlobalScaleConfig::default(),
        central: CentralBodyConfig {
            prefab: Some(BodyPrefab::new(sphere, star_material)),
            relative_size: SUN_RELATIVE_SIZE,
        },
        bodies,
    };

    let system = SolarSystemGenerator::new(Vec3::ZERO).generate(
        &mut BevyHost::new(&mut commands),
        &config,
        &mut rand::thread_rng(),
    );

    for (name, err) in &system.report.skipped {
        warn!("{name} was not spawned: {err}");
    }

    if let Some(star) = system.central {
        commands
            .entity(star)
            .insert(NotShadowCaster)
            .insert(Star(Spin::new(SUN_SPIN_DEG_PER_SECOND)));
    }

    for spawned in &system.bodies {
        let idx = config
            .bodies
            .iter()
            .position(|b| b.params.name == spawned.params.name);

        if let Some(color) = idx.and_then(|idx| colors.get(idx)) {
            commands.entity(spawned.handle).insert(OrbitColor(*color));
        }
    }

    commands.insert_resource(Orrery(system));

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 100000.0,
            range: 100000.0,
            shadows_enabled: true,
            ..default()
        },
        ..default()
    });

    commands
        .spawn(Camera3dBundle::default())
        .insert(BloomSettings::OLD_SCHOOL)
        .insert(RenderLayers::all())
        .insert(OrbitCameraBundle::new(
            {
                let mut controller = OrbitCameraController::default();

                controller.mouse_rotate_sensitivity = Vec2::ONE * 1.0;
                controller.mouse_translate_sensitivity = Vec2::ONE * 10.0;

                controller
            },
            Vec3::new(-200.0, 500.0, 500.0),
            Vec3::new(0., 0., 0.),
            Vec3::Y,
        ));
}
