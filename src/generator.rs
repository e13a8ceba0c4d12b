//! Solar system generation and the runtime that ticks it.

use log::{debug, info, warn};
use rand::Rng;

use crate::body::{OrbitSetup, OrbitalBody};
use crate::config::{BodyConfig, GlobalScaleConfig, OrbitalParameters, SolarSystemConfig};
use crate::error::{OrreryError, Result};
use crate::geometry::{aligned_ring, inclination_offset, orbit_samples, place_polar};
use crate::illumination::{CompensatorLight, IlluminationAimer, LightPlacement};
use crate::scene::{LayerId, SceneHost};
use crate::spatial::SpatialState;
use crate::{Num, Quat, Vec3};

/// How bodies are spread around the center at spawn
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BodyLayout {
    /// Every body at its own random azimuth
    #[default]
    Scattered,
    /// Azimuths evenly spaced in configuration order, the first body on +X
    Aligned,
}

/// Spawns a central body and orbiting bodies around `origin`.
///
/// `origin` is both where the central body goes and what every body revolves
/// around. Compensator lights are aimed relative to `anchor`, which defaults
/// to the origin.
#[derive(Debug, Clone)]
pub struct SolarSystemGenerator<T> {
    origin: Vec3,
    anchor: Vec3,
    root: Option<T>,
    placement: LightPlacement,
    layout: BodyLayout,
}

impl<T: Copy> SolarSystemGenerator<T> {
    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            anchor: origin,
            root: None,
            placement: LightPlacement::Static,
            layout: BodyLayout::Scattered,
        }
    }

    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = anchor;
        self
    }

    /// Scene object every spawned body gets parented to
    pub fn with_root(mut self, root: T) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_light_placement(mut self, placement: LightPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_layout(mut self, layout: BodyLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Spawns the central body and then every configured body, in order.
    ///
    /// A body that can't be spawned is logged and skipped, the rest of the
    /// batch carries on. Check the returned report for what was left out.
    pub fn generate<H>(
        &self,
        host: &mut H,
        config: &SolarSystemConfig<H::Prefab>,
        rng: &mut impl Rng,
    ) -> SolarSystem<T>
    where
        H: SceneHost<Handle = T>,
    {
        let mut system = SolarSystem::empty(self.origin, self.anchor, config.scale);

        if let Err(err) = config.scale.validate() {
            warn!("Not generating anything: {err}");
            system.report.skipped.push((String::from("scale"), err));
            return system;
        }

        system.central = self.generate_central_body(
            host,
            config.central.prefab.as_ref(),
            &config.scale,
            config.central.relative_size,
        );

        if config.bodies.is_empty() {
            warn!("No bodies configured!");
            system.report.skipped.push((String::new(), OrreryError::NoBodies));
            return system;
        }

        let directions = match self.layout {
            BodyLayout::Scattered => Vec::new(),
            BodyLayout::Aligned => aligned_ring(1.0, config.bodies.len()),
        };

        for (idx, body) in config.bodies.iter().enumerate() {
            let direction = directions.get(idx).copied();

            match self.spawn_body(host, body, &config.scale, direction, &mut *rng) {
                Ok(spawned) => system.bodies.push(spawned),
                Err(err) => {
                    warn!("Skipping body `{}`: {err}", body.params.name);
                    system.report.skipped.push((body.params.name.clone(), err));
                }
            }
        }

        info!(
            "Generated {} of {} bodies",
            system.bodies.len(),
            config.bodies.len()
        );

        system
    }

    /// Places the central body on the origin. Without a prefab nothing is spawned.
    pub fn generate_central_body<H>(
        &self,
        host: &mut H,
        prefab: Option<&H::Prefab>,
        scale: &GlobalScaleConfig,
        relative_size: Num,
    ) -> Option<T>
    where
        H: SceneHost<Handle = T>,
    {
        let Some(prefab) = prefab else {
            warn!("Central body prefab not assigned, the central body will not be spawned");
            return None;
        };

        let handle = host.instantiate(prefab, self.origin, Quat::IDENTITY);
        host.set_name(handle, "Sun");
        if let Some(root) = self.root {
            host.set_parent(handle, root);
        }

        let size = relative_size * scale.size_multiplier;
        host.set_local_scale(handle, Vec3::splat(size));

        debug!("Spawned central body with size {size}");

        Some(handle)
    }

    /// Spawns one body at a random azimuth, together with its compensator light
    pub fn generate_body<H>(
        &self,
        host: &mut H,
        config: &BodyConfig<H::Prefab>,
        scale: &GlobalScaleConfig,
        rng: &mut impl Rng,
    ) -> Result<SpawnedBody<T>>
    where
        H: SceneHost<Handle = T>,
    {
        self.spawn_body(host, config, scale, None, rng)
    }

    /// `direction` is a unit vector on the XZ plane, random when not given
    fn spawn_body<H>(
        &self,
        host: &mut H,
        config: &BodyConfig<H::Prefab>,
        scale: &GlobalScaleConfig,
        direction: Option<Vec3>,
        rng: &mut impl Rng,
    ) -> Result<SpawnedBody<T>>
    where
        H: SceneHost<Handle = T>,
    {
        let params = &config.params;

        let prefab = config.prefab.as_ref().ok_or_else(|| OrreryError::MissingPrefab {
            name: params.name.clone(),
        })?;
        params.validate()?;

        let radius = params.distance_au * scale.distance_scale;
        let mut offset = match direction {
            Some(direction) => direction * radius,
            None => place_polar(params.distance_au, scale.distance_scale, rng),
        };
        offset.y =
            inclination_offset(params.distance_au, scale.distance_scale, params.inclination_deg)?;
        let spawn_position = offset + self.origin;

        let aimer = IlluminationAimer::attach(spawn_position, self.anchor)?
            .with_placement(self.placement);

        let size = params.relative_size * scale.size_multiplier;
        let mut body = OrbitalBody::new(
            params.name.clone(),
            SpatialState::new(spawn_position, Quat::IDENTITY, size),
        );
        let light_pose = *aimer.light();
        body.setup(
            OrbitSetup {
                orbital_period_years: params.orbital_period_years,
                inclination_deg: params.inclination_deg,
                speed_multiplier: scale.simulation_speed_multiplier,
            },
            aimer,
        )?;

        let handle = host.instantiate(prefab, spawn_position, Quat::IDENTITY);
        host.set_name(handle, &params.name);
        if let Some(root) = self.root {
            host.set_parent(handle, root);
        }
        host.set_local_scale(handle, Vec3::splat(size));

        let light = host.create_light(
            &format!("{}CompensatorLight", params.name),
            &CompensatorLight::for_layer(params.layer_id),
        );
        host.set_pose(light, light_pose.position, light_pose.orientation);
        host.set_parent(light, handle);

        // The light has to be parented first so it lands on the layer too
        host.set_layer_recursive(handle, params.layer_id);

        debug!(
            "Spawned `{}` at {spawn_position} with size {size} on layer {}",
            params.name, params.layer_id
        );

        Ok(SpawnedBody {
            handle,
            light,
            params: params.clone(),
            body,
        })
    }
}

/// A generated body together with the scene objects that represent it
#[derive(Debug, Clone)]
pub struct SpawnedBody<T> {
    pub handle: T,
    pub light: T,
    pub params: OrbitalParameters,
    pub body: OrbitalBody,
}

/// Light on a body that doesn't orbit, only re-aimed every tick
#[derive(Debug, Clone)]
pub struct FixedLight<T> {
    pub handle: T,
    pub light: T,
    pub aimer: IlluminationAimer,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Entries that were left out and why
    pub skipped: Vec<(String, OrreryError)>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SolarSystem<T> {
    origin: Vec3,
    anchor: Vec3,
    scale: GlobalScaleConfig,
    pub central: Option<T>,
    pub bodies: Vec<SpawnedBody<T>>,
    pub fixed_lights: Vec<FixedLight<T>>,
    pub report: GenerationReport,
}

impl<T: Copy> SolarSystem<T> {
    fn empty(origin: Vec3, anchor: Vec3, scale: GlobalScaleConfig) -> Self {
        Self {
            origin,
            anchor,
            scale,
            central: None,
            bodies: Vec::new(),
            fixed_lights: Vec::new(),
            report: GenerationReport::default(),
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Moves the point bodies revolve around, picked up on the next tick
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Moves the point compensator lights shine away from, picked up on the next tick
    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = anchor;
    }

    pub fn scale(&self) -> &GlobalScaleConfig {
        &self.scale
    }

    pub fn body(&self, name: &str) -> Option<&SpawnedBody<T>> {
        self.bodies.iter().find(|b| b.params.name == name)
    }

    /// Advances every body by `dt` seconds and re-aims the fixed lights.
    ///
    /// A body that fails to tick doesn't hold up the others, the first such
    /// error is returned once everything else has been advanced.
    pub fn tick(&mut self, dt: Num) -> Result<()> {
        let mut first_err = None;

        for spawned in &mut self.bodies {
            if let Err(err) = spawned.body.tick(dt, self.origin, self.anchor) {
                warn!("Body `{}` did not tick: {err}", spawned.params.name);
                first_err.get_or_insert(err);
            }
        }

        for fixed in &mut self.fixed_lights {
            fixed.aimer.tick(self.anchor);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// World poses of every body and light owned by the system
    pub fn poses(&self) -> impl Iterator<Item = (T, SpatialState)> + '_ {
        let bodies = self.bodies.iter().flat_map(|spawned| {
            let lights = spawned.body.aimer().map(|aimer| (spawned.light, *aimer.light()));
            std::iter::once((spawned.handle, *spawned.body.spatial())).chain(lights)
        });
        let fixed = self
            .fixed_lights
            .iter()
            .map(|fixed| (fixed.light, *fixed.aimer.light()));

        bodies.chain(fixed)
    }

    /// Pushes the current poses to the host
    pub fn sync<H>(&self, host: &mut H)
    where
        H: SceneHost<Handle = T>,
    {
        for (handle, pose) in self.poses() {
            host.set_pose(handle, pose.position, pose.orientation);
        }
    }

    /// Draws each body's orbit as a flat circle around the origin
    pub fn draw_orbits<H>(&self, host: &mut H, segments: usize)
    where
        H: SceneHost<Handle = T>,
    {
        for spawned in &self.bodies {
            let points: Vec<Vec3> =
                orbit_samples(spawned.params.distance_au, self.scale.distance_scale, segments)
                    .into_iter()
                    .map(|p| p + self.origin)
                    .collect();

            host.draw_debug_polyline(&points);
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        for spawned in &mut self.bodies {
            if paused {
                spawned.body.pause();
            } else {
                spawned.body.resume();
            }
        }
    }

    /// Stops a body for good and hands it back, despawning it is up to the host
    pub fn remove_body(&mut self, name: &str) -> Option<SpawnedBody<T>> {
        let idx = self.bodies.iter().position(|b| b.params.name == name)?;
        let mut spawned = self.bodies.remove(idx);
        spawned.body.remove();

        Some(spawned)
    }

    /// Gives an already placed, stationary object its own compensator light
    pub fn attach_static_light<H>(
        &mut self,
        host: &mut H,
        handle: T,
        name: &str,
        position: Vec3,
        layer: LayerId,
    ) -> Result<()>
    where
        H: SceneHost<Handle = T>,
    {
        let aimer = IlluminationAimer::attach(position, self.anchor)?;

        let light = host.create_light(
            &format!("{name}CompensatorLight"),
            &CompensatorLight::for_layer(layer),
        );
        host.set_pose(light, aimer.light_position(), aimer.orientation());
        host.set_parent(light, handle);
        host.set_layer(light, layer);

        self.fixed_lights.push(FixedLight {
            handle,
            light,
            aimer,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::body::BodyState;
    use crate::config::CentralBodyConfig;
    use crate::scene::{NodeId, Prefab, SceneGraph};
    use crate::vec3;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xC0FFEE)
    }

    fn planet(name: &str, distance_au: Num, layer: LayerId) -> BodyConfig<Prefab> {
        BodyConfig::new(
            OrbitalParameters::new(name, distance_au, 1.0, 0.0, 1.0, layer),
            Some(Prefab::new("sphere")),
        )
    }

    fn scenario_config() -> SolarSystemConfig<Prefab> {
        SolarSystemConfig {
            scale: GlobalScaleConfig {
                distance_scale: 100.0,
                size_multiplier: 1.0,
                simulation_speed_multiplier: 10.0,
            },
            central: CentralBodyConfig {
                prefab: Some(Prefab::new("sun")),
                relative_size: 109.0,
            },
            bodies: vec![planet("Earth", 1.0, 8)],
        }
    }

    fn generate(config: &SolarSystemConfig<Prefab>) -> (SceneGraph, SolarSystem<NodeId>) {
        let mut scene = SceneGraph::new();
        let system = SolarSystemGenerator::new(Vec3::ZERO).generate(&mut scene, config, &mut rng());

        (scene, system)
    }

    #[test]
    fn earth_returns_to_its_start_after_a_year() {
        let (_, mut system) = generate(&scenario_config());

        let start = system.bodies[0].body.position();
        assert!((start.length() - 100.0).abs() < 1e-3);

        // One year at 10x is ten full revolutions
        for _ in 0..100 {
            system.tick(0.01).unwrap();
            let p = system.bodies[0].body.position();
            assert!((p.length() - 100.0).abs() < 1e-2);
        }

        let end = system.bodies[0].body.position();
        assert!(end.abs_diff_eq(start, 0.1), "{end} != {start}");
        let phase = system.bodies[0].body.phase_deg();
        assert!(phase < 0.1 || phase > 359.9, "phase = {phase}");
    }

    #[test]
    fn missing_prefab_skips_only_that_body() {
        let mut config = scenario_config();
        config.bodies = (1..=5)
            .map(|i| planet(&format!("p{i}"), i as Num, 8))
            .collect();
        config.bodies[2].prefab = None;

        let (_, system) = generate(&config);

        let names: Vec<_> = system.bodies.iter().map(|b| b.params.name.as_str()).collect();
        assert_eq!(names, ["p1", "p2", "p4", "p5"]);

        assert_eq!(system.report.skipped.len(), 1);
        assert_eq!(
            system.report.skipped[0],
            (
                String::from("p3"),
                OrreryError::MissingPrefab {
                    name: String::from("p3")
                }
            )
        );
    }

    #[test]
    fn invalid_bodies_are_skipped() {
        let mut config = scenario_config();
        config.bodies.push(BodyConfig::new(
            OrbitalParameters::new("Steep", 2.0, 1.0, 89.5, 1.0, 9),
            Some(Prefab::new("sphere")),
        ));
        config.bodies.push(BodyConfig::new(
            OrbitalParameters::new("Frozen", 2.0, 1.0, 0.0, 0.0, 10),
            Some(Prefab::new("sphere")),
        ));

        let (scene, system) = generate(&config);

        assert_eq!(system.bodies.len(), 1);
        assert_eq!(system.report.skipped.len(), 2);
        assert!(system.report.skipped.iter().all(|(_, e)| e.is_configuration()));
        // Nothing half-built was left behind
        assert!(scene.find_by_name("Steep").is_none());
        assert!(scene.find_by_name("Frozen").is_none());
    }

    #[test]
    fn every_descendant_shares_the_body_layer() {
        let mut config = scenario_config();
        let prefab = Prefab::new("planet")
            .with_child(Prefab::new("clouds").with_child(Prefab::new("storm")));
        config.bodies = vec![BodyConfig::new(
            OrbitalParameters::new("Mars", 1.52, 0.53, 1.9, 1.88, 9),
            Some(prefab),
        )];

        let (scene, system) = generate(&config);
        let root = system.bodies[0].handle;

        for name in ["Mars", "clouds", "storm", "MarsCompensatorLight"] {
            let id = scene.find_by_name(name).unwrap();
            assert_eq!(scene.get(id).unwrap().layer, 9, "{name}");
        }
        assert_eq!(scene.subtree(root).len(), 4);

        // tan(1.9°) * 1.52 AU * 100
        let expected = (1.9 as Num).to_radians().tan() * 152.0;
        let spawned = system.bodies[0].body.position();
        assert!((spawned.y - expected).abs() < 1e-3, "{} != {expected}", spawned.y);
        assert_eq!(scene.get(root).unwrap().pose.position, spawned);
    }

    #[test]
    fn aligned_layout_spreads_bodies_evenly() {
        let mut config = scenario_config();
        config.bodies = (1..=4)
            .map(|i| planet(&format!("p{i}"), i as Num, 8))
            .collect();

        let mut scene = SceneGraph::new();
        let system = SolarSystemGenerator::new(Vec3::ZERO)
            .with_layout(BodyLayout::Aligned)
            .generate(&mut scene, &config, &mut rng());

        let expected = [
            vec3(100.0, 0.0, 0.0),
            vec3(0.0, 0.0, 200.0),
            vec3(-300.0, 0.0, 0.0),
            vec3(0.0, 0.0, -400.0),
        ];
        for (spawned, expected) in system.bodies.iter().zip(expected) {
            let p = spawned.body.position();
            assert!(p.abs_diff_eq(expected, 1e-3), "{p} != {expected}");
        }
    }

    #[test]
    fn missing_central_prefab_still_spawns_bodies() {
        let mut config = scenario_config();
        config.central.prefab = None;

        let (scene, system) = generate(&config);

        assert_eq!(system.central, None);
        assert!(scene.find_by_name("Sun").is_none());
        assert_eq!(system.bodies.len(), 1);
    }

    #[test]
    fn central_body_sits_on_the_origin() {
        let mut config = scenario_config();
        config.scale.size_multiplier = 0.5;

        let mut scene = SceneGraph::new();
        let root = scene.instantiate(&Prefab::new("spawner"), vec3(1.0, 2.0, 3.0), Quat::IDENTITY);
        let system = SolarSystemGenerator::new(vec3(1.0, 2.0, 3.0))
            .with_root(root)
            .generate(&mut scene, &config, &mut rng());

        let sun = scene.get(system.central.unwrap()).unwrap();
        assert_eq!(sun.name, "Sun");
        assert_eq!(sun.pose.position, vec3(1.0, 2.0, 3.0));
        assert_eq!(sun.local_scale, Vec3::splat(54.5));
        assert_eq!(sun.parent, Some(root));

        let earth = system.body("Earth").unwrap();
        assert!((earth.body.position().distance(vec3(1.0, 2.0, 3.0)) - 100.0).abs() < 1e-3);
        assert_eq!(scene.get(earth.handle).unwrap().parent, Some(root));
    }

    #[test]
    fn no_bodies_leaves_a_valid_empty_system() {
        let mut config = scenario_config();
        config.bodies.clear();

        let (_, mut system) = generate(&config);

        assert!(system.bodies.is_empty());
        assert!(system.central.is_some());
        assert_eq!(system.report.skipped[0].1, OrreryError::NoBodies);
        system.tick(1.0).unwrap();
    }

    #[test]
    fn invalid_scale_generates_nothing() {
        let mut config = scenario_config();
        config.scale.distance_scale = 0.0;

        let (scene, system) = generate(&config);

        assert!(scene.is_empty());
        assert!(system.bodies.is_empty());
        assert!(!system.report.is_complete());
    }

    #[test]
    fn compensator_light_is_placed_and_isolated() {
        let (scene, system) = generate(&scenario_config());
        let earth = system.body("Earth").unwrap();

        let light = scene.get(earth.light).unwrap();
        assert_eq!(light.name, "EarthCompensatorLight");
        assert_eq!(light.parent, Some(earth.handle));

        let settings = light.light.as_ref().unwrap();
        assert_eq!(settings.culling_mask, 1 << 8);
        assert_eq!(settings.intensity, 2.0);
        assert!(settings.hard_shadows);

        let expected = earth.body.position() * 0.85;
        assert!(light.pose.position.abs_diff_eq(expected, 1e-3));
    }

    #[test]
    fn sync_pushes_poses_to_the_host() {
        let (mut scene, mut system) = generate(&scenario_config());

        system.tick(0.05).unwrap();
        system.sync(&mut scene);

        let earth = system.body("Earth").unwrap();
        let node = scene.get(earth.handle).unwrap();
        assert_eq!(node.pose.position, earth.body.position());

        let light = scene.get(earth.light).unwrap();
        assert_eq!(
            light.pose.position,
            earth.body.aimer().unwrap().light_position()
        );
    }

    #[test]
    fn later_config_changes_do_not_touch_spawned_bodies() {
        let mut config = scenario_config();
        let (_, mut system) = generate(&config);

        config.scale.simulation_speed_multiplier = 1000.0;
        config.scale.validate().unwrap();

        system.tick(0.01).unwrap();

        // 360°/year * 0.01 * 10
        let phase = system.bodies[0].body.phase_deg();
        assert!((phase - 36.0).abs() < 1e-3, "phase = {phase}");
    }

    #[test]
    fn orbits_are_drawn_through_the_host() {
        let mut config = scenario_config();
        config.bodies.push(planet("Mars", 1.52, 9));
        let (mut scene, system) = generate(&config);

        system.draw_orbits(&mut scene, 36);

        assert_eq!(scene.polylines().len(), 2);
        assert_eq!(scene.polylines()[1].len(), 37);
        assert!((scene.polylines()[1][0].length() - 152.0).abs() < 1e-3);
    }

    #[test]
    fn pausing_and_removing_bodies() {
        let mut config = scenario_config();
        config.bodies.push(planet("Mars", 1.52, 9));
        let (_, mut system) = generate(&config);

        system.set_paused(true);
        let before = system.body("Earth").unwrap().body.position();
        system.tick(0.1).unwrap();
        assert_eq!(system.body("Earth").unwrap().body.position(), before);

        system.set_paused(false);
        let removed = system.remove_body("Mars").unwrap();
        assert_eq!(removed.body.state(), BodyState::Removed);
        assert!(system.body("Mars").is_none());

        system.tick(0.1).unwrap();
        assert_ne!(system.body("Earth").unwrap().body.position(), before);
    }

    #[test]
    fn failing_body_does_not_hold_up_the_rest() {
        let (_, mut system) = generate(&scenario_config());
        let moon = NodeId(1000);
        system
            .attach_static_light(&mut SceneGraph::new(), moon, "Moon", vec3(0.0, 0.0, 10.0), 3)
            .unwrap();

        system.bodies.insert(
            0,
            SpawnedBody {
                handle: NodeId(998),
                light: NodeId(999),
                params: OrbitalParameters::new("Ghost", 1.0, 1.0, 0.0, 1.0, 4),
                body: OrbitalBody::new("Ghost", SpatialState::default()),
            },
        );

        let before = system.body("Earth").unwrap().body.position();
        system.set_anchor(vec3(0.0, 0.0, 20.0));

        assert_eq!(
            system.tick(0.01).unwrap_err(),
            OrreryError::NotActive {
                state: BodyState::Uninitialized
            }
        );
        assert_ne!(system.body("Earth").unwrap().body.position(), before);

        let fixed = &system.fixed_lights[0];
        assert!((fixed.aimer.orientation() * Vec3::Z).abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn bodies_follow_a_moving_origin() {
        let (_, mut system) = generate(&scenario_config());
        let start = system.bodies[0].body.position();
        let origin = vec3(0.0, 50.0, 0.0);

        system.set_origin(origin);
        system.tick(0.01).unwrap();

        let p = system.bodies[0].body.position();
        assert!(((p - origin).length() - (start - origin).length()).abs() < 1e-2);
    }

    #[test]
    fn static_light_tracks_a_moving_anchor() {
        let mut config = scenario_config();
        config.bodies.clear();

        let mut scene = SceneGraph::new();
        let mut system = SolarSystemGenerator::new(Vec3::ZERO)
            .with_anchor(vec3(0.0, 0.0, -10.0))
            .generate(&mut scene, &config, &mut rng());

        let moon = scene.instantiate(&Prefab::new("moon"), vec3(0.0, 0.0, 10.0), Quat::IDENTITY);
        system
            .attach_static_light(&mut scene, moon, "Moon", vec3(0.0, 0.0, 10.0), 3)
            .unwrap();

        system.tick(0.1).unwrap();

        let fixed = &system.fixed_lights[0];
        // Light parked at 0 + 20 * 0.35 = 7 on z, shining away from the anchor
        assert!(fixed.aimer.light_position().abs_diff_eq(vec3(0.0, 0.0, 7.0), 1e-4));
        assert!((fixed.aimer.orientation() * Vec3::Z).abs_diff_eq(Vec3::Z, 1e-4));

        // Anchor moves past the light, which turns around but stays put
        system.set_anchor(vec3(0.0, 0.0, 20.0));
        system.tick(0.1).unwrap();

        let fixed = &system.fixed_lights[0];
        assert!(fixed.aimer.light_position().abs_diff_eq(vec3(0.0, 0.0, 7.0), 1e-4));
        assert!((fixed.aimer.orientation() * Vec3::Z).abs_diff_eq(Vec3::NEG_Z, 1e-4));

        let light = scene.find_by_name("MoonCompensatorLight").unwrap();
        assert_eq!(scene.get(light).unwrap().layer, 3);
        assert_eq!(scene.get(light).unwrap().parent, Some(moon));
    }
}
