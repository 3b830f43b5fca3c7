//! Frame-synchronous update loop.
//!
//! The host calls [`RenderLoop::tick`] once per displayed frame. Each tick
//! measures the delta since the previous one, spins the star by that delta,
//! steps every planet and then its moons, writes their transforms into the
//! scene, and finally hands the scene to the host's present callback
//! (camera controller update and draw call).

use orrery_config::SystemConfig;
use tracing::{debug, trace, warn};

use crate::{Clock, OrbitalHierarchy, SceneAdapter, SceneBindings, SimError, StarSpin, TransformUpdater};

/// Lifecycle of a [`RenderLoop`]. There is no terminal state; the loop
/// lives until the process exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, no frame run yet.
    Idle,
    /// At least one frame has run.
    Running,
}

/// Timing of one completed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// 1-based index of the frame.
    pub frame: u64,
    /// Clock reading at the start of the frame, in seconds.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub delta: f64,
}

/// Owns the simulation state and drives it one frame at a time.
pub struct RenderLoop<C, N> {
    clock: C,
    hierarchy: OrbitalHierarchy,
    star: StarSpin,
    updater: TransformUpdater,
    bindings: SceneBindings<N>,
    state: LoopState,
    previous_time: f64,
    frame_count: u64,
}

impl<C: Clock, N: Clone> RenderLoop<C, N> {
    /// Wires every body to its scene node and writes the initial state.
    ///
    /// A body without a node is a configuration error and nothing is written.
    pub fn new<S>(
        hierarchy: OrbitalHierarchy,
        star: StarSpin,
        updater: TransformUpdater,
        clock: C,
        scene: &mut S,
    ) -> Result<Self, SimError>
    where
        S: SceneAdapter<Node = N>,
    {
        let bindings = SceneBindings::resolve(&star, &hierarchy, scene)?;
        bindings.apply_initial_state(&star, &hierarchy, scene);

        debug!(
            star = star.name(),
            planets = hierarchy.planet_count(),
            moons = hierarchy.moon_count(),
            stepping = ?updater.stepping(),
            "Render loop wired"
        );

        Ok(Self {
            clock,
            hierarchy,
            star,
            updater,
            bindings,
            state: LoopState::Idle,
            previous_time: 0.0,
            frame_count: 0,
        })
    }

    /// Builds the hierarchy, star, and updater from config, then wires them.
    pub fn from_config<S>(system: &SystemConfig, clock: C, scene: &mut S) -> Result<Self, SimError>
    where
        S: SceneAdapter<Node = N>,
    {
        let hierarchy = OrbitalHierarchy::from_config(system)?;
        let star = StarSpin::from_config(&system.star)?;
        let updater = TransformUpdater::from_config(system)?;
        Self::new(hierarchy, star, updater, clock, scene)
    }

    /// Runs one frame and calls `present` exactly once, after every body has
    /// been written.
    pub fn tick<S>(&mut self, scene: &mut S, present: impl FnOnce(&mut S)) -> FrameReport
    where
        S: SceneAdapter<Node = N>,
    {
        let current_time = self.clock.elapsed_time();
        let mut delta = current_time - self.previous_time;
        self.previous_time = current_time;

        if delta < 0.0 {
            warn!("Clock went backwards by {:.3}ms, treating as zero", -delta * 1000.0);
            delta = 0.0;
        }

        if self.state == LoopState::Idle {
            debug!("First frame");
            self.state = LoopState::Running;
        }

        let star_angle = self.star.advance(delta);
        scene.set_local_rotation_y(self.bindings.star(), star_angle);

        let bindings = &self.bindings;
        self.updater
            .advance_hierarchy(&mut self.hierarchy, delta, |key, transform| {
                bindings.write(scene, key, transform);
            });

        present(scene);

        self.frame_count += 1;
        trace!(frame = self.frame_count, delta, "Frame complete");

        FrameReport {
            frame: self.frame_count,
            elapsed: current_time,
            delta,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn hierarchy(&self) -> &OrbitalHierarchy {
        &self.hierarchy
    }

    pub fn star(&self) -> &StarSpin {
        &self.star
    }

    pub fn bindings(&self) -> &SceneBindings<N> {
        &self.bindings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access for host-driven clocks such as
    /// [`ManualClock`](crate::ManualClock).
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
