//! Command-line argument parsing for the orrery.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, OrbitStepping};

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Animated star, planet, and moon orbits")]
pub struct CliArgs {
    /// Target frame rate (0 = unpaced).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Number of frames to run (0 = until killed).
    #[arg(long)]
    pub frames: Option<u64>,

    /// Orbit stepping for planets and moons (per-tick, delta-scaled).
    #[arg(long)]
    pub stepping: Option<OrbitStepping>,

    /// Advance the clock by exactly one frame period per frame.
    #[arg(long)]
    pub manual_clock: bool,

    /// Log composed body positions every N frames (0 = never).
    #[arg(long)]
    pub report_every: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ignore `config.ron` and start from built-in defaults.
    #[arg(long)]
    pub no_config: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(fps) = args.fps {
            self.frame_loop.target_fps = fps;
        }
        if let Some(frames) = args.frames {
            self.frame_loop.frames = frames;
        }
        if let Some(stepping) = args.stepping {
            self.system.orbit_stepping = stepping;
        }
        if args.manual_clock {
            self.frame_loop.manual_clock = true;
        }
        if let Some(every) = args.report_every {
            self.debug.report_every = every;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
