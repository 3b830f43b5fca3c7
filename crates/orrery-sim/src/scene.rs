//! The contract with the external scene graph, and the up-front wiring of
//! bodies to its transform nodes.

use glam::DVec3;
use tracing::debug;

use crate::{BodyKey, BodyPath, BodyTransform, OrbitalHierarchy, SimError, StarSpin};

/// Write-only access to the transform nodes of an external scene graph.
///
/// A moon's node is expected to be a child of its planet's node: values
/// written to it are local to the planet, and composing them with the
/// planet's world transform is the scene's job.
pub trait SceneAdapter {
    /// Opaque handle to one transform node.
    type Node: Clone;

    /// Finds the node for a body, if the scene has one.
    fn resolve(&self, path: &BodyPath) -> Option<Self::Node>;

    fn set_local_position(&mut self, node: &Self::Node, position: DVec3);

    /// Sets the rotation about the node's local Y axis, in radians.
    fn set_local_rotation_y(&mut self, node: &Self::Node, angle: f64);

    /// Sets a uniform scale.
    fn set_local_scale(&mut self, node: &Self::Node, scale: f64);
}

#[derive(Clone, Debug)]
struct PlanetNodes<N> {
    node: N,
    moons: Vec<N>,
}

/// Node handles for the star and every body of a hierarchy, resolved once.
#[derive(Clone, Debug)]
pub struct SceneBindings<N> {
    star: N,
    planets: Vec<PlanetNodes<N>>,
}

impl<N: Clone> SceneBindings<N> {
    /// Resolves a node for the star and every body.
    ///
    /// Fails on the first body without a node, naming it.
    pub fn resolve<S>(
        star: &StarSpin,
        hierarchy: &OrbitalHierarchy,
        scene: &S,
    ) -> Result<Self, SimError>
    where
        S: SceneAdapter<Node = N>,
    {
        let lookup = |path: BodyPath| match scene.resolve(&path) {
            Some(node) => Ok(node),
            None => Err(SimError::MissingNode { path }),
        };

        let star = lookup(BodyPath::root(star.name()))?;
        let mut planets = Vec::with_capacity(hierarchy.planet_count());
        for planet in hierarchy.planets() {
            let node = lookup(BodyPath::root(planet.body.name()))?;
            let moons = planet
                .moons
                .iter()
                .map(|moon| lookup(BodyPath::child(planet.body.name(), moon.name())))
                .collect::<Result<Vec<_>, _>>()?;
            planets.push(PlanetNodes { node, moons });
        }

        debug!(
            planets = planets.len(),
            moons = hierarchy.moon_count(),
            "Resolved scene nodes"
        );
        Ok(Self { star, planets })
    }

    pub fn star(&self) -> &N {
        &self.star
    }

    pub fn node(&self, key: BodyKey) -> Option<&N> {
        let planet = self.planets.get(key.planet)?;
        match key.moon {
            None => Some(&planet.node),
            Some(moon) => planet.moons.get(moon),
        }
    }

    /// Writes scales and angle-zero placements before the first frame.
    pub fn apply_initial_state<S>(&self, star: &StarSpin, hierarchy: &OrbitalHierarchy, scene: &mut S)
    where
        S: SceneAdapter<Node = N>,
    {
        scene.set_local_scale(&self.star, star.radius());
        scene.set_local_position(&self.star, DVec3::ZERO);
        scene.set_local_rotation_y(&self.star, star.angle());

        for (key, body) in hierarchy.iter() {
            if let Some(node) = self.node(key) {
                scene.set_local_scale(node, body.radius());
                write_transform(scene, node, &BodyTransform::of(body));
            }
        }
    }

    /// Writes one body's transform to its node. Unknown keys are ignored.
    pub fn write<S>(&self, scene: &mut S, key: BodyKey, transform: &BodyTransform)
    where
        S: SceneAdapter<Node = N>,
    {
        if let Some(node) = self.node(key) {
            write_transform(scene, node, transform);
        }
    }
}

fn write_transform<S: SceneAdapter>(scene: &mut S, node: &S::Node, transform: &BodyTransform) {
    scene.set_local_position(node, transform.position);
    scene.set_local_rotation_y(node, transform.rotation_y);
}
