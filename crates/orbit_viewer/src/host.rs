use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;

use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use kinematic_orrery::{CompensatorLight, LayerId, SceneHost};

/// Roughly how many lux a unit of compensator intensity is worth
const LUX_PER_INTENSITY: f32 = 5000.0;

/// Mesh and material a body is built from, plus decorations attached to it
#[derive(Debug, Clone)]
pub struct BodyPrefab {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    /// Nested parts with transforms local to their parent
    pub children: Vec<(BodyPrefab, Transform)>,
}

impl BodyPrefab {
    pub fn new(mesh: Handle<Mesh>, material: Handle<StandardMaterial>) -> Self {
        Self {
            mesh,
            material,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: BodyPrefab, transform: Transform) -> Self {
        self.children.push((child, transform));
        self
    }
}

/// Parent assigned by the orrery.
///
/// Orrery poses are world space, so these are not bevy hierarchy parents.
#[derive(Component)]
pub struct OrreryParent(pub Entity);

#[derive(Component)]
pub struct Compensator;

/// Orrery lights shine along +Z, bevy lights along -Z
pub fn light_rotation(orientation: Quat) -> Quat {
    orientation * Quat::from_rotation_y(PI)
}

/// Scene host on top of `Commands`.
///
/// Spawned entities only exist once the commands are applied, so the host
/// keeps its own copy of transforms and hierarchy for the generator to use.
pub struct BevyHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    transforms: HashMap<Entity, Transform>,
    parents: HashMap<Entity, Entity>,
    children: HashMap<Entity, Vec<Entity>>,
    lights: HashSet<Entity>,
}

impl<'a, 'w, 's> BevyHost<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>) -> Self {
        Self {
            commands,
            transforms: HashMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
            lights: HashSet::new(),
        }
    }

    fn spawn_part(&mut self, prefab: &BodyPrefab, transform: Transform) -> Entity {
        self.commands
            .spawn(PbrBundle {
                mesh: prefab.mesh.clone(),
                material: prefab.material.clone(),
                transform,
                ..default()
            })
            .id()
    }

    fn write_transform(&mut self, entity: Entity) {
        if let Some(transform) = self.transforms.get(&entity) {
            self.commands.entity(entity).insert(*transform);
        }
    }
}

impl SceneHost for BevyHost<'_, '_, '_> {
    type Handle = Entity;
    type Prefab = BodyPrefab;

    fn instantiate(
        &mut self,
        prefab: &BodyPrefab,
        position: Vec3,
        orientation: Quat,
    ) -> Entity {
        let transform =
            Transform::from_translation(position).with_rotation(orientation);
        let root = self.spawn_part(prefab, transform);
        self.transforms.insert(root, transform);

        let mut stack = vec![(root, prefab)];
        while let Some((parent, prefab)) = stack.pop() {
            for (child_prefab, local) in &prefab.children {
                let child = self.spawn_part(child_prefab, *local);
                self.commands.entity(parent).add_child(child);
                self.children.entry(parent).or_default().push(child);
                stack.push((child, child_prefab));
            }
        }

        root
    }

    /// Directional lights in bevy 0.12 ignore `RenderLayers`, so
    /// `culling_mask` can't be honoured and every compensator light reaches
    /// every body. The mask is still logged for when the renderer supports it.
    fn create_light(&mut self, name: &str, light: &CompensatorLight) -> Entity {
        debug!(
            "{name} would be limited to layer mask {:#b}",
            light.culling_mask
        );

        let entity = self
            .commands
            .spawn(DirectionalLightBundle {
                directional_light: DirectionalLight {
                    illuminance: light.intensity * LUX_PER_INTENSITY,
                    shadows_enabled: light.hard_shadows,
                    ..default()
                },
                ..default()
            })
            .insert(Name::new(name.to_string()))
            .insert(Compensator)
            .id();

        self.transforms.insert(entity, Transform::IDENTITY);
        self.lights.insert(entity);

        entity
    }

    fn set_name(&mut self, handle: Entity, name: &str) {
        self.commands
            .entity(handle)
            .insert(Name::new(name.to_string()));
    }

    fn set_parent(&mut self, child: Entity, parent: Entity) {
        if child == parent {
            warn!("Refusing to parent {child:?} to itself");
            return;
        }

        if let Some(old) = self.parents.insert(child, parent) {
            if let Some(siblings) = self.children.get_mut(&old) {
                siblings.retain(|&c| c != child);
            }
        }

        self.children.entry(parent).or_default().push(child);
        self.commands.entity(child).insert(OrreryParent(parent));
    }

    fn set_local_scale(&mut self, handle: Entity, scale: Vec3) {
        self.transforms.entry(handle).or_default().scale = scale;
        self.write_transform(handle);
    }

    fn set_pose(&mut self, handle: Entity, position: Vec3, orientation: Quat) {
        let rotation = if self.lights.contains(&handle) {
            light_rotation(orientation)
        } else {
            orientation
        };

        let transform = self.transforms.entry(handle).or_default();
        transform.translation = position;
        transform.rotation = rotation;

        self.write_transform(handle);
    }

    fn children(&self, handle: Entity) -> Vec<Entity> {
        self.children.get(&handle).cloned().unwrap_or_default()
    }

    fn set_layer(&mut self, handle: Entity, layer: LayerId) {
        let Some(layer) = u8::try_from(layer)
            .ok()
            .filter(|&l| (l as usize) < RenderLayers::TOTAL_LAYERS)
        else {
            warn!("Render layer {layer} is out of range");
            return;
        };

        self.commands
            .entity(handle)
            .insert(RenderLayers::layer(layer));
    }
}
