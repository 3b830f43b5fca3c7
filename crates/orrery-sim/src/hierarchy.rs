//! Two-level forest of planets and their moons.
//!
//! Planets own their moons by value, so a moon can never be shared between
//! planets and no body can be its own ancestor. Order of insertion is the
//! update order.

use std::collections::HashSet;
use std::fmt;

use orrery_config::{BodyRecord, PlanetRecord, SystemConfig};

use crate::star::validate_star;
use crate::{OrbitalBody, SimError};

/// Identifies a body by position in the hierarchy.
///
/// A moon's key names its parent planet explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyKey {
    pub planet: usize,
    pub moon: Option<usize>,
}

impl BodyKey {
    pub const fn planet(planet: usize) -> Self {
        Self { planet, moon: None }
    }

    pub const fn moon(planet: usize, moon: usize) -> Self {
        Self {
            planet,
            moon: Some(moon),
        }
    }

    /// Key of the parent planet, or `None` for a planet.
    pub const fn parent(&self) -> Option<BodyKey> {
        match self.moon {
            Some(_) => Some(BodyKey::planet(self.planet)),
            None => None,
        }
    }
}

/// Slash-separated diagnostic name of a body, e.g. `Earth/Moon`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyPath(String);

impl BodyPath {
    /// Path of a top-level body (the star or a planet).
    pub fn root(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Path of a moon under its planet.
    pub fn child(parent: &str, name: &str) -> Self {
        Self(format!("{parent}/{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A planet and its moons.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub body: OrbitalBody,
    pub moons: Vec<OrbitalBody>,
}

/// The planets of a system, each owning its moons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitalHierarchy {
    planets: Vec<Planet>,
}

impl OrbitalHierarchy {
    /// Builds and validates the hierarchy from the configured body table.
    ///
    /// The star is validated too, and no planet may take its name since both
    /// resolve to top-level scene nodes.
    pub fn from_config(system: &SystemConfig) -> Result<Self, SimError> {
        validate_star(&system.star)?;
        let hierarchy = Self::from_records(&system.planets)?;
        if hierarchy
            .planets
            .iter()
            .any(|p| p.body.name() == system.star.name)
        {
            return Err(SimError::DuplicateName {
                path: BodyPath::root(&system.star.name),
            });
        }
        Ok(hierarchy)
    }

    /// Builds and validates the hierarchy from planet records.
    ///
    /// Names must be unique among planets and among a planet's moons.
    pub fn from_records(records: &[PlanetRecord]) -> Result<Self, SimError> {
        let mut planet_names = HashSet::new();
        let mut planets = Vec::with_capacity(records.len());

        for record in records {
            let path = BodyPath::root(&record.name);
            validate(&path, &record.body())?;
            if !planet_names.insert(record.name.as_str()) {
                return Err(SimError::DuplicateName { path });
            }

            let mut moon_names = HashSet::new();
            let mut moons = Vec::with_capacity(record.moons.len());
            for moon in &record.moons {
                let path = BodyPath::child(&record.name, &moon.name);
                validate(&path, moon)?;
                if !moon_names.insert(moon.name.as_str()) {
                    return Err(SimError::DuplicateName { path });
                }
                moons.push(OrbitalBody::from(moon));
            }

            planets.push(Planet {
                body: OrbitalBody::from(&record.body()),
                moons,
            });
        }

        Ok(Self { planets })
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub(crate) fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    pub fn moon_count(&self) -> usize {
        self.planets.iter().map(|p| p.moons.len()).sum()
    }

    /// Looks up a body by key.
    pub fn get(&self, key: BodyKey) -> Option<&OrbitalBody> {
        let planet = self.planets.get(key.planet)?;
        match key.moon {
            None => Some(&planet.body),
            Some(moon) => planet.moons.get(moon),
        }
    }

    /// Diagnostic path of a body.
    pub fn path(&self, key: BodyKey) -> Option<BodyPath> {
        let planet = self.planets.get(key.planet)?;
        match key.moon {
            None => Some(BodyPath::root(planet.body.name())),
            Some(moon) => planet
                .moons
                .get(moon)
                .map(|m| BodyPath::child(planet.body.name(), m.name())),
        }
    }

    /// All bodies in update order: each planet followed by its moons.
    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &OrbitalBody)> {
        self.planets.iter().enumerate().flat_map(|(p, planet)| {
            std::iter::once((BodyKey::planet(p), &planet.body)).chain(
                planet
                    .moons
                    .iter()
                    .enumerate()
                    .map(move |(m, moon)| (BodyKey::moon(p, m), moon)),
            )
        })
    }
}

fn invalid(path: &BodyPath, reason: String) -> SimError {
    SimError::InvalidBody {
        path: path.clone(),
        reason,
    }
}

/// Checks the name and radius shared by the star and orbiting bodies.
pub(crate) fn validate_shape(path: &BodyPath, name: &str, radius: f64) -> Result<(), SimError> {
    if name.is_empty() {
        return Err(invalid(path, "name is empty".to_string()));
    }
    if name.contains('/') {
        return Err(invalid(path, "name contains '/'".to_string()));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(invalid(path, format!("radius {radius} is not positive")));
    }
    Ok(())
}

fn validate(path: &BodyPath, record: &BodyRecord) -> Result<(), SimError> {
    validate_shape(path, &record.name, record.radius)?;
    if !(record.distance.is_finite() && record.distance >= 0.0) {
        return Err(invalid(
            path,
            format!("distance {} is negative or not finite", record.distance),
        ));
    }
    if !record.speed.is_finite() {
        return Err(invalid(path, format!("speed {} is not finite", record.speed)));
    }
    Ok(())
}
