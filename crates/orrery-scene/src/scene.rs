//! [`EcsScene`]: a `bevy_ecs` world holding one node per body.

use std::collections::HashMap;
use std::f64::consts::TAU;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::IntoSystemConfigs;
use glam::{DVec3, Vec3};
use orrery_sim::{BodyPath, OrbitalHierarchy, SceneAdapter, StarSpin};
use tracing::debug;

use crate::{
    GlobalTransform, LocalTransform, NodeName, ParentNode, propagate_child_transforms,
    propagate_root_transforms,
};

/// Scene graph backed by an ECS world, indexed by body path.
pub struct EcsScene {
    world: World,
    propagation: Schedule,
    nodes: HashMap<BodyPath, Entity>,
}

impl Default for EcsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl EcsScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        let mut propagation = Schedule::default();
        propagation.add_systems((propagate_root_transforms, propagate_child_transforms).chain());

        Self {
            world: World::new(),
            propagation,
            nodes: HashMap::new(),
        }
    }

    /// Creates a scene with a node for the star, every planet, and every
    /// moon, each moon attached to its planet.
    pub fn spawn_system(star: &StarSpin, hierarchy: &OrbitalHierarchy) -> Self {
        let mut scene = Self::new();
        scene.spawn_node(BodyPath::root(star.name()), None);
        for planet in hierarchy.planets() {
            let planet_name = planet.body.name();
            let parent = scene.spawn_node(BodyPath::root(planet_name), None);
            for moon in &planet.moons {
                scene.spawn_node(BodyPath::child(planet_name, moon.name()), Some(parent));
            }
        }
        debug!(nodes = scene.node_count(), "Spawned scene nodes");
        scene
    }

    /// Spawns a node with an identity transform. A node already registered
    /// under `path` is replaced in the index.
    pub fn spawn_node(&mut self, path: BodyPath, parent: Option<Entity>) -> Entity {
        let mut entity = self.world.spawn((
            NodeName(path.to_string()),
            LocalTransform::default(),
            GlobalTransform::default(),
        ));
        if let Some(parent) = parent {
            entity.insert(ParentNode(parent));
        }
        let id = entity.id();
        self.nodes.insert(path, id);
        id
    }

    /// Removes a node from the world and the index.
    pub fn despawn_node(&mut self, path: &BodyPath) -> bool {
        match self.nodes.remove(path) {
            Some(entity) => self.world.despawn(entity),
            None => false,
        }
    }

    /// Recomputes every node's world transform from the local transforms.
    pub fn propagate(&mut self) {
        self.propagation.run(&mut self.world);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn entity(&self, path: &BodyPath) -> Option<Entity> {
        self.nodes.get(path).copied()
    }

    pub fn local_transform(&self, path: &BodyPath) -> Option<&LocalTransform> {
        self.world.get::<LocalTransform>(self.entity(path)?)
    }

    /// World position as of the last [`propagate`](Self::propagate).
    pub fn global_translation(&self, path: &BodyPath) -> Option<Vec3> {
        self.world
            .get::<GlobalTransform>(self.entity(path)?)
            .map(GlobalTransform::translation)
    }

    /// Node paths in a stable order, for reporting.
    pub fn paths(&self) -> Vec<&BodyPath> {
        let mut paths: Vec<_> = self.nodes.keys().collect();
        paths.sort();
        paths
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn local_mut(&mut self, node: Entity) -> Option<Mut<'_, LocalTransform>> {
        self.world.get_mut::<LocalTransform>(node)
    }
}

impl SceneAdapter for EcsScene {
    type Node = Entity;

    fn resolve(&self, path: &BodyPath) -> Option<Entity> {
        self.entity(path)
    }

    fn set_local_position(&mut self, node: &Entity, position: DVec3) {
        if let Some(mut local) = self.local_mut(*node) {
            local.translation = position.as_vec3();
        }
    }

    fn set_local_rotation_y(&mut self, node: &Entity, angle: f64) {
        if let Some(mut local) = self.local_mut(*node) {
            // The core angle is unbounded; wrap before narrowing to f32.
            local.rotation_y = angle.rem_euclid(TAU) as f32;
        }
    }

    fn set_local_scale(&mut self, node: &Entity, scale: f64) {
        if let Some(mut local) = self.local_mut(*node) {
            local.scale = scale as f32;
        }
    }
}
