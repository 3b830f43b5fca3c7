//! Configuration for the orrery.
//!
//! Holds the body table that seeds the orbital hierarchy together with the
//! loop, logging, and reporting settings. Settings persist to disk as RON,
//! accept CLI overrides via clap, and stay forward/backward compatible
//! through `#[serde(default)]`.

mod cli;
mod config;
mod error;
mod system;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, LoopConfig, default_config_dir};
pub use error::ConfigError;
pub use system::{BodyRecord, OrbitStepping, PlanetRecord, StarConfig, SystemConfig};
