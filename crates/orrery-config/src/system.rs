//! The body table: star, planets, and their moons.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How orbiting bodies advance their rotation angle each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrbitStepping {
    /// Add `speed` once per tick, regardless of elapsed time.
    #[default]
    PerTick,
    /// Add `speed * delta * reference_fps`, independent of frame rate.
    DeltaScaled,
}

impl FromStr for OrbitStepping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "pertick" | "tick" => Ok(Self::PerTick),
            "deltascaled" | "delta" => Ok(Self::DeltaScaled),
            other => Err(format!(
                "unknown orbit stepping '{other}' (expected per-tick or delta-scaled)"
            )),
        }
    }
}

/// Orbital parameters of a single body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyRecord {
    /// Diagnostic name, unique among siblings.
    pub name: String,
    /// Visual radius, applied as the node's uniform scale.
    pub radius: f64,
    /// Orbital radius from the parent's origin.
    pub distance: f64,
    /// Angle added per step, in radians. Sign sets the direction.
    pub speed: f64,
}

impl BodyRecord {
    pub fn new(name: &str, radius: f64, distance: f64, speed: f64) -> Self {
        Self {
            name: name.to_string(),
            radius,
            distance,
            speed,
        }
    }
}

/// A planet and the moons orbiting it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetRecord {
    pub name: String,
    pub radius: f64,
    pub distance: f64,
    pub speed: f64,
    /// Moons in update order.
    #[serde(default)]
    pub moons: Vec<BodyRecord>,
}

impl PlanetRecord {
    pub fn new(name: &str, radius: f64, distance: f64, speed: f64) -> Self {
        Self {
            name: name.to_string(),
            radius,
            distance,
            speed,
            moons: Vec::new(),
        }
    }

    /// Adds a moon, keeping insertion order.
    pub fn with_moon(mut self, moon: BodyRecord) -> Self {
        self.moons.push(moon);
        self
    }

    /// The planet's own parameters as a [`BodyRecord`].
    pub fn body(&self) -> BodyRecord {
        BodyRecord::new(&self.name, self.radius, self.distance, self.speed)
    }
}

/// The central star. It spins in place and never orbits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    pub name: String,
    /// Visual radius, applied as the node's uniform scale.
    pub radius: f64,
    /// Self-rotation rate in degrees per second of elapsed time.
    pub spin_deg_per_sec: f64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            name: "Sun".to_string(),
            radius: 5.0,
            spin_deg_per_sec: 20.0,
        }
    }
}

/// The whole simulated system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    pub star: StarConfig,
    /// Planets in update order.
    pub planets: Vec<PlanetRecord>,
    /// Stepping mode for planets and moons.
    pub orbit_stepping: OrbitStepping,
    /// Frame rate the per-tick speeds were tuned for. Only used by
    /// [`OrbitStepping::DeltaScaled`].
    pub reference_fps: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            star: StarConfig::default(),
            planets: vec![
                PlanetRecord::new("Mercury", 0.5, 10.0, 0.01),
                PlanetRecord::new("Venus", 0.8, 15.0, 0.007),
                PlanetRecord::new("Earth", 1.0, 20.0, 0.005)
                    .with_moon(BodyRecord::new("Moon", 0.3, 3.0, 0.015)),
                PlanetRecord::new("Mars", 0.7, 25.0, 0.003)
                    .with_moon(BodyRecord::new("Phobos", 0.1, 2.0, 0.02))
                    .with_moon(BodyRecord::new("Deimos", 0.2, 3.0, 0.015)),
            ],
            orbit_stepping: OrbitStepping::PerTick,
            reference_fps: 60.0,
        }
    }
}

impl SystemConfig {
    /// Total number of moons across all planets.
    pub fn moon_count(&self) -> usize {
        self.planets.iter().map(|p| p.moons.len()).sum()
    }
}
