//! The boundary between the orrery and whatever owns the actual scene.
//!
//! The generator never touches scene objects directly. It asks a
//! [`SceneHost`] to instantiate, parent, scale and tag them, and later pushes
//! updated poses back through the same host.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use log::warn;

use crate::illumination::CompensatorLight;
use crate::spatial::SpatialState;
use crate::{Quat, Vec3};

/// Isolation group of a body and everything below it
pub type LayerId = u32;

pub trait SceneHost {
    type Handle: Copy + Eq + Hash + Debug;
    type Prefab;

    /// Builds `prefab`, including any nested children it carries
    fn instantiate(
        &mut self,
        prefab: &Self::Prefab,
        position: Vec3,
        orientation: Quat,
    ) -> Self::Handle;

    fn create_light(&mut self, name: &str, light: &CompensatorLight) -> Self::Handle;

    fn set_name(&mut self, handle: Self::Handle, name: &str);

    fn set_parent(&mut self, child: Self::Handle, parent: Self::Handle);

    fn set_local_scale(&mut self, handle: Self::Handle, scale: Vec3);

    /// Moves an object to a world-space pose
    fn set_pose(&mut self, handle: Self::Handle, position: Vec3, orientation: Quat);

    fn children(&self, handle: Self::Handle) -> Vec<Self::Handle>;

    fn set_layer(&mut self, handle: Self::Handle, layer: LayerId);

    /// Tags `root` and every descendant with `layer`.
    ///
    /// Walks the tree with an explicit stack so deep hierarchies are fine.
    /// Every object is visited once even if the host hierarchy has a cycle.
    fn set_layer_recursive(&mut self, root: Self::Handle, layer: LayerId) {
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(handle) = stack.pop() {
            if !visited.insert(handle) {
                continue;
            }

            self.set_layer(handle, layer);
            stack.extend(self.children(handle));
        }
    }

    /// Editor-only orbit visualisation
    fn draw_debug_polyline(&mut self, _points: &[Vec3]) {}
}

/// Blueprint for [`SceneGraph::instantiate`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prefab {
    pub name: String,
    pub children: Vec<Prefab>,
}

impl Prefab {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Prefab) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub pose: SpatialState,
    pub local_scale: Vec3,
    pub layer: LayerId,
    pub light: Option<CompensatorLight>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SceneNode {
    fn new(name: &str, pose: SpatialState) -> Self {
        Self {
            name: name.to_string(),
            pose,
            local_scale: Vec3::ONE,
            layer: 0,
            light: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Simple in-memory scene, designed for headless runs and tests.
///
/// Poses are stored in world space and are not propagated from parents,
/// the orrery pushes every pose it owns explicitly.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, SceneNode>,
    next_id: u32,
    polylines: Vec<Vec<Vec3>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn spawn_tree(&mut self, prefab: &Prefab, pose: SpatialState) -> NodeId {
        let root = self.spawn(SceneNode::new(&prefab.name, pose));

        for child in &prefab.children {
            let child_id = self.spawn_tree(child, pose);
            self.set_parent(child_id, root);
        }

        root
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| *id)
    }

    /// Ids of `root` and all of its descendants
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            if visited.insert(id) {
                found.push(id);
                stack.extend(self.children(id));
            }
        }

        found
    }

    /// Whether `node` is `ancestor` or sits somewhere below it
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);

        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }

        false
    }

    pub fn polylines(&self) -> &[Vec<Vec3>] {
        &self.polylines
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneHost for SceneGraph {
    type Handle = NodeId;
    type Prefab = Prefab;

    fn instantiate(&mut self, prefab: &Prefab, position: Vec3, orientation: Quat) -> NodeId {
        self.spawn_tree(prefab, SpatialState::new(position, orientation, 1.0))
    }

    fn create_light(&mut self, name: &str, light: &CompensatorLight) -> NodeId {
        let mut node = SceneNode::new(name, SpatialState::default());
        node.light = Some(light.clone());
        self.spawn(node)
    }

    fn set_name(&mut self, handle: NodeId, name: &str) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.name = name.to_string();
        }
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if !self.nodes.contains_key(&parent) {
            return;
        }

        let has_children = self.nodes.get(&child).is_some_and(|n| !n.children.is_empty());
        if parent == child || (has_children && self.is_within(parent, child)) {
            warn!("Refusing to parent {child:?} under {parent:?}, it would form a cycle");
            return;
        }

        let Some(old_parent) = self.nodes.get_mut(&child).map(|n| n.parent.replace(parent))
        else {
            return;
        };

        if let Some(old) = old_parent.and_then(|p| self.nodes.get_mut(&p)) {
            old.children.retain(|&c| c != child);
        }

        if let Some(node) = self.nodes.get_mut(&parent) {
            if !node.children.contains(&child) {
                node.children.push(child);
            }
        }
    }

    fn set_local_scale(&mut self, handle: NodeId, scale: Vec3) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.local_scale = scale;
        }
    }

    fn set_pose(&mut self, handle: NodeId, position: Vec3, orientation: Quat) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.pose.position = position;
            node.pose.orientation = orientation;
        }
    }

    fn children(&self, handle: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&handle)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn set_layer(&mut self, handle: NodeId, layer: LayerId) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.layer = layer;
        }
    }

    fn draw_debug_polyline(&mut self, points: &[Vec3]) {
        self.polylines.push(points.to_vec());
    }
}
