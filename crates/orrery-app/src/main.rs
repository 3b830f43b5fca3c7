//! Binary entry point: config, logging, then the host loop.
//!
//! Run with: `cargo run -p orrery-app -- --frames 600 --report-every 60`

use clap::Parser;
use orrery_config::{CliArgs, default_config_dir};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => Some(dir),
        None if args.no_config => None,
        None => match default_config_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                eprintln!("{e}, using built-in defaults");
                None
            }
        },
    };

    let config = match orrery_app::load_config(config_dir.as_deref(), &args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    orrery_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    info!(
        "Target {} fps, {} frames, {} clock",
        config.frame_loop.target_fps,
        config.frame_loop.frames,
        if config.frame_loop.manual_clock {
            "manual"
        } else {
            "system"
        }
    );

    match orrery_app::run(&config) {
        Ok(summary) => info!(
            frames = summary.frames,
            "Finished after {:.3}s, star at {:.3} rad",
            summary.elapsed,
            summary.star_angle
        ),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
