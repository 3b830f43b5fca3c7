//! A single orbiting body.

use orrery_config::BodyRecord;

/// Immutable orbital parameters of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalParams {
    /// Visual radius. Has no effect on the orbit.
    pub radius: f64,
    /// Orbital radius from the parent's origin.
    pub distance: f64,
    /// Angle added per step, in radians. Sign sets the direction.
    pub angular_speed: f64,
}

/// A planet or moon: fixed parameters plus its accumulated rotation angle.
///
/// The angle grows without bound; only its sine and cosine are consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalBody {
    name: String,
    params: OrbitalParams,
    rotation_angle: f64,
}

impl OrbitalBody {
    /// Creates a body at rotation angle 0.
    pub fn new(name: impl Into<String>, params: OrbitalParams) -> Self {
        Self {
            name: name.into(),
            params,
            rotation_angle: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &OrbitalParams {
        &self.params
    }

    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    pub fn distance(&self) -> f64 {
        self.params.distance
    }

    pub fn angular_speed(&self) -> f64 {
        self.params.angular_speed
    }

    /// Current accumulated rotation angle in radians.
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Adds `step` radians to the rotation angle and returns the new angle.
    pub(crate) fn rotate_by(&mut self, step: f64) -> f64 {
        self.rotation_angle += step;
        self.rotation_angle
    }
}

impl From<&BodyRecord> for OrbitalBody {
    fn from(record: &BodyRecord) -> Self {
        Self::new(
            record.name.clone(),
            OrbitalParams {
                radius: record.radius,
                distance: record.distance,
                angular_speed: record.speed,
            },
        )
    }
}
