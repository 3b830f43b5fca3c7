//! ECS scene graph for the orrery.
//!
//! One entity per body. Moons are parented to their planet, and
//! [`EcsScene::propagate`] composes each node's local transform with its
//! parent's world transform. [`EcsScene`] implements
//! [`orrery_sim::SceneAdapter`], so a render loop can write straight into it.

mod components;
mod scene;
mod systems;

pub use components::{GlobalTransform, LocalTransform, NodeName, ParentNode};
pub use scene::EcsScene;
pub use systems::{propagate_child_transforms, propagate_root_transforms};
