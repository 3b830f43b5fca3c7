//! Wiring and the host frame loop.

use std::path::Path;

use bevy_ecs::entity::Entity;
use orrery_config::{CliArgs, Config, ConfigError};
use orrery_scene::EcsScene;
use orrery_sim::{
    Clock, ManualClock, OrbitalHierarchy, RenderLoop, SimError, StarSpin, SystemClock,
    TransformUpdater,
};
use tracing::info;

use crate::pacer::{FramePacer, frame_period};
use crate::report::TraceReporter;

/// Fallback step for the manual clock when pacing is disabled.
const UNPACED_MANUAL_STEP: f64 = 1.0 / 60.0;

/// Errors that abort the host before or during startup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("configuration error: {0}")]
    Sim(#[from] SimError),
}

/// Loads `config.ron` from `config_dir`, creating a default file when it is
/// missing, then applies CLI overrides. Built-in defaults are used when there
/// is no directory or `--no-config` was given.
pub fn load_config(config_dir: Option<&Path>, args: &CliArgs) -> Result<Config, AppError> {
    let mut config = match config_dir {
        Some(dir) if !args.no_config => Config::load_or_create(dir)?,
        _ => Config::default(),
    };
    config.apply_cli_overrides(args);
    Ok(config)
}

/// Final state after the host loop ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    /// Clock reading at the last frame, in seconds.
    pub elapsed: f64,
    /// Star rotation at the last frame, in radians.
    pub star_angle: f64,
}

/// Builds the system from `config`, wires it to a fresh ECS scene, and runs
/// `config.frame_loop.frames` frames (forever when 0).
pub fn run(config: &Config) -> Result<RunSummary, AppError> {
    let system = &config.system;
    let hierarchy = OrbitalHierarchy::from_config(system)?;
    let star = StarSpin::from_config(&system.star)?;
    let updater = TransformUpdater::from_config(system)?;
    let mut scene = EcsScene::spawn_system(&star, &hierarchy);

    info!(
        planets = hierarchy.planet_count(),
        moons = hierarchy.moon_count(),
        stepping = ?system.orbit_stepping,
        "Starting orrery"
    );

    if config.frame_loop.manual_clock {
        let step = frame_period(config.frame_loop.target_fps)
            .map_or(UNPACED_MANUAL_STEP, |p| p.as_secs_f64());
        let render_loop = RenderLoop::new(hierarchy, star, updater, ManualClock::new(), &mut scene)?;
        Ok(drive(render_loop, scene, config, |clock| clock.advance(step)))
    } else {
        let render_loop = RenderLoop::new(hierarchy, star, updater, SystemClock::new(), &mut scene)?;
        Ok(drive(render_loop, scene, config, |_| {}))
    }
}

fn drive<C: Clock>(
    mut render_loop: RenderLoop<C, Entity>,
    mut scene: EcsScene,
    config: &Config,
    mut before_frame: impl FnMut(&mut C),
) -> RunSummary {
    let frames = config.frame_loop.frames;
    let reporter = TraceReporter::new(config.debug.report_every);
    let mut pacer = FramePacer::new(config.frame_loop.target_fps);
    let mut elapsed = 0.0;

    while frames == 0 || render_loop.frame_count() < frames {
        before_frame(render_loop.clock_mut());
        let report = render_loop.tick(&mut scene, |scene| scene.propagate());
        reporter.report(&report, &scene);
        elapsed = report.elapsed;
        pacer.wait();
    }

    RunSummary {
        frames: render_loop.frame_count(),
        elapsed,
        star_angle: render_loop.star().angle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_config::PlanetRecord;

    fn headless(frames: u64) -> Config {
        let mut config = Config::default();
        config.frame_loop.frames = frames;
        config.frame_loop.target_fps = 0;
        config.frame_loop.manual_clock = true;
        config.debug.report_every = 0;
        config
    }

    #[test]
    fn test_manual_run_is_deterministic() {
        let a = run(&headless(120)).unwrap();
        let b = run(&headless(120)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.frames, 120);
        assert!((a.elapsed - 2.0).abs() < 1e-9);
        // Two seconds at 20°/s.
        assert!((a.star_angle - 40.0_f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_table_reported_as_config_error() {
        let mut config = headless(1);
        config
            .system
            .planets
            .push(PlanetRecord::new("Mercury", 1.0, 40.0, 0.1));
        let err = run(&config).unwrap_err();
        assert!(matches!(err, AppError::Sim(SimError::DuplicateName { .. })));
        assert!(err.to_string().contains("Mercury"));
    }

    #[test]
    fn test_star_name_clash_rejected_before_wiring() {
        let mut config = headless(1);
        config.system.planets[0].name = "Sun".to_string();
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            AppError::Sim(SimError::DuplicateName { ref path }) if path.as_str() == "Sun"
        ));
    }

    #[test]
    fn test_nan_reference_fps_rejected() {
        let mut config = headless(1);
        config.system.orbit_stepping = orrery_config::OrbitStepping::DeltaScaled;
        config.system.reference_fps = f64::NAN;
        assert!(matches!(
            run(&config),
            Err(AppError::Sim(SimError::InvalidSetting { .. }))
        ));
    }

    #[test]
    fn test_load_config_creates_default_and_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            frames: Some(5),
            ..Default::default()
        };
        let config = load_config(Some(dir.path()), &args).unwrap();
        assert_eq!(config.frame_loop.frames, 5);
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(system: oops").unwrap();
        let err = load_config(Some(dir.path()), &CliArgs::default()).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Parse { .. })));
        assert!(err.to_string().contains("config.ron"));
    }

    #[test]
    fn test_no_config_skips_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(system: oops").unwrap();
        let args = CliArgs {
            no_config: true,
            ..Default::default()
        };
        assert_eq!(load_config(Some(dir.path()), &args).unwrap(), Config::default());
    }

    #[test]
    fn test_system_clock_run_completes() {
        let mut config = headless(3);
        config.frame_loop.manual_clock = false;
        let summary = run(&config).unwrap();
        assert_eq!(summary.frames, 3);
        assert!(summary.elapsed >= 0.0);
    }
}
