//! Transform propagation systems.
//!
//! The scene graph is two levels deep, so propagation is two passes: roots
//! first, then children composed with their parent's freshly written world
//! transform. Chain them in that order.

use bevy_ecs::prelude::*;
use tracing::warn;

use crate::{GlobalTransform, LocalTransform, ParentNode};

/// Copies each root node's local transform into its world transform.
pub fn propagate_root_transforms(
    mut roots: Query<(&LocalTransform, &mut GlobalTransform), Without<ParentNode>>,
) {
    for (local, mut global) in &mut roots {
        global.0 = local.matrix();
    }
}

/// Composes each child's local transform with its parent's world transform.
///
/// **Runs after:** [`propagate_root_transforms`].
pub fn propagate_child_transforms(
    parents: Query<&GlobalTransform, Without<ParentNode>>,
    mut children: Query<(Entity, &ParentNode, &LocalTransform, &mut GlobalTransform)>,
) {
    for (entity, parent, local, mut global) in &mut children {
        match parents.get(parent.0) {
            Ok(parent_global) => global.0 = parent_global.0 * local.matrix(),
            Err(_) => warn!("Node {entity:?} has no root parent {:?}", parent.0),
        }
    }
}
