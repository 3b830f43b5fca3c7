//! Scene node components.

use bevy_ecs::prelude::*;
use glam::{Mat4, Quat, Vec3};

/// Diagnostic path of the body this node renders, e.g. `Earth/Moon`.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct NodeName(pub String);

/// Transform relative to the parent node, or to the world for root nodes.
///
/// Rotation is restricted to the Y axis and scale is uniform.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }
}

impl LocalTransform {
    /// Scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.translation,
        )
    }
}

/// World transform, written only by transform propagation.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GlobalTransform(pub Mat4);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

impl GlobalTransform {
    pub fn translation(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }
}

/// The node this node is attached to. Absent on root nodes.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParentNode(pub Entity);
