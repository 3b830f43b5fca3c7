//! In-memory scene that records every write, for tests.

use std::collections::HashMap;

use glam::DVec3;

use crate::{BodyPath, OrbitalHierarchy, SceneAdapter, StarSpin};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneWrite {
    Position(usize, DVec3),
    RotationY(usize, f64),
    Scale(usize, f64),
    /// Marker pushed by the host callback.
    Present,
}

impl SceneWrite {
    pub fn node(&self) -> Option<usize> {
        match *self {
            Self::Position(n, _) | Self::RotationY(n, _) | Self::Scale(n, _) => Some(n),
            Self::Present => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingScene {
    nodes: HashMap<BodyPath, usize>,
    writes: Vec<SceneWrite>,
}

impl RecordingScene {
    /// A scene with one node per body, numbered in update order with the star
    /// as node 0.
    pub fn for_system(star: &StarSpin, hierarchy: &OrbitalHierarchy) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(BodyPath::root(star.name()), 0);
        for (i, (key, _)) in hierarchy.iter().enumerate() {
            nodes.insert(hierarchy.path(key).unwrap(), i + 1);
        }
        Self {
            nodes,
            writes: Vec::new(),
        }
    }

    pub fn remove(&mut self, path: &BodyPath) {
        self.nodes.remove(path);
    }

    pub fn node(&self, path: &BodyPath) -> Option<usize> {
        self.nodes.get(path).copied()
    }

    pub fn path_of(&self, node: usize) -> Option<&str> {
        self.nodes
            .iter()
            .find(|(_, n)| **n == node)
            .map(|(path, _)| path.as_str())
    }

    pub fn writes(&self) -> &[SceneWrite] {
        &self.writes
    }

    pub fn present(&mut self) {
        self.writes.push(SceneWrite::Present);
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Last position written to `node`.
    pub fn last_position(&self, node: usize) -> Option<DVec3> {
        self.writes.iter().rev().find_map(|w| match *w {
            SceneWrite::Position(n, p) if n == node => Some(p),
            _ => None,
        })
    }

    /// Last Y rotation written to `node`.
    pub fn last_rotation(&self, node: usize) -> Option<f64> {
        self.writes.iter().rev().find_map(|w| match *w {
            SceneWrite::RotationY(n, a) if n == node => Some(a),
            _ => None,
        })
    }
}

impl SceneAdapter for RecordingScene {
    type Node = usize;

    fn resolve(&self, path: &BodyPath) -> Option<usize> {
        self.node(path)
    }

    fn set_local_position(&mut self, node: &usize, position: DVec3) {
        self.writes.push(SceneWrite::Position(*node, position));
    }

    fn set_local_rotation_y(&mut self, node: &usize, angle: f64) {
        self.writes.push(SceneWrite::RotationY(*node, angle));
    }

    fn set_local_scale(&mut self, node: &usize, scale: f64) {
        self.writes.push(SceneWrite::Scale(*node, scale));
    }
}
