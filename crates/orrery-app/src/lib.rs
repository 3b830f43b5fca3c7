//! Headless host for the orrery.
//!
//! Stands in for the display side: it paces frames, drives the render loop,
//! propagates the ECS scene after every frame, and logs composed positions.

pub mod pacer;
pub mod report;
pub mod run;

pub use run::{AppError, RunSummary, load_config, run};
