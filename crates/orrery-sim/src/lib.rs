//! Orbit simulation core.
//!
//! A star spins in place while planets circle it and moons circle their
//! planets. [`OrbitalHierarchy`] holds the bodies, [`TransformUpdater`] steps
//! them, and [`RenderLoop`] drives both once per frame from a [`Clock`],
//! writing results into an external scene through [`SceneAdapter`].

mod body;
mod clock;
mod error;
mod hierarchy;
mod render_loop;
mod scene;
mod star;
mod updater;

#[cfg(test)]
mod test_scene;

pub use body::{OrbitalBody, OrbitalParams};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SimError;
pub use hierarchy::{BodyKey, BodyPath, OrbitalHierarchy, Planet};
pub use render_loop::{FrameReport, LoopState, RenderLoop};
pub use scene::{SceneAdapter, SceneBindings};
pub use star::StarSpin;
pub use updater::{BodyTransform, TransformUpdater, orbit_position};
