//! Self-rotation of the central star.

use orrery_config::StarConfig;

use crate::SimError;
use crate::hierarchy::{BodyPath, validate_shape};

/// Checks the star's name, radius, and spin rate.
pub(crate) fn validate_star(star: &StarConfig) -> Result<(), SimError> {
    let path = BodyPath::root(&star.name);
    validate_shape(&path, &star.name, star.radius)?;
    if !star.spin_deg_per_sec.is_finite() {
        return Err(SimError::InvalidBody {
            path,
            reason: format!("spin {} deg/s is not finite", star.spin_deg_per_sec),
        });
    }
    Ok(())
}

/// The star's spin. Unlike orbiting bodies it is always scaled by elapsed
/// time, so it turns at the same rate at any frame rate.
#[derive(Clone, Debug, PartialEq)]
pub struct StarSpin {
    name: String,
    radius: f64,
    rate: f64,
    angle: f64,
}

impl StarSpin {
    /// `rate` is in radians per second.
    pub fn new(name: impl Into<String>, radius: f64, rate: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            rate,
            angle: 0.0,
        }
    }

    pub fn from_config(star: &StarConfig) -> Result<Self, SimError> {
        validate_star(star)?;
        Ok(Self::new(
            star.name.clone(),
            star.radius,
            star.spin_deg_per_sec.to_radians(),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Spin rate in radians per second.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Current rotation about Y, in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advances the spin by `delta` seconds and returns the new angle.
    pub fn advance(&mut self, delta: f64) -> f64 {
        self.angle += delta * self.rate;
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate_is_twenty_degrees_per_second() {
        let spin = StarSpin::from_config(&StarConfig::default()).unwrap();
        assert!((spin.rate() - 20.0_f64.to_radians()).abs() < 1e-15);
        assert_eq!(spin.name(), "Sun");
        assert_eq!(spin.radius(), 5.0);
    }

    #[test]
    fn test_non_finite_spin_rejected() {
        let star = StarConfig {
            spin_deg_per_sec: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            StarSpin::from_config(&star),
            Err(SimError::InvalidBody { ref path, .. }) if path.as_str() == "Sun"
        ));
    }

    #[test]
    fn test_empty_star_name_rejected() {
        let star = StarConfig {
            name: String::new(),
            ..Default::default()
        };
        assert!(StarSpin::from_config(&star).is_err());
    }

    #[test]
    fn test_zero_delta_leaves_angle_unchanged() {
        let mut spin = StarSpin::from_config(&StarConfig::default()).unwrap();
        spin.advance(0.5);
        let before = spin.angle();
        spin.advance(0.0);
        spin.advance(0.0);
        assert_eq!(spin.angle(), before);
    }

    #[test]
    fn test_spin_scales_with_delta() {
        let mut a = StarSpin::new("A", 1.0, 2.0);
        let mut b = StarSpin::new("B", 1.0, 2.0);
        a.advance(1.0);
        for _ in 0..4 {
            b.advance(0.25);
        }
        assert!((a.angle() - 2.0).abs() < 1e-12);
        assert!((a.angle() - b.angle()).abs() < 1e-12);
    }
}
