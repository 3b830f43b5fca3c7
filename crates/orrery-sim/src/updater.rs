//! Per-tick orbit stepping and position derivation.

use glam::DVec3;
use orrery_config::{OrbitStepping, SystemConfig};

use crate::{BodyKey, OrbitalBody, OrbitalHierarchy, SimError};

/// Position on a circular orbit of radius `distance` at `angle`, in the
/// parent's local frame.
///
/// Angle 0 lies on +Z; positive angles turn towards +X.
pub fn orbit_position(distance: f64, angle: f64) -> DVec3 {
    let (sin, cos) = angle.sin_cos();
    DVec3::new(distance * sin, 0.0, distance * cos)
}

/// Rotation and position written to a body's transform node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTransform {
    /// Rotation about the local Y axis, in radians.
    pub rotation_y: f64,
    /// Position in the parent's local frame (world space for planets).
    pub position: DVec3,
}

impl BodyTransform {
    /// Transform of a body at its current angle, without stepping it.
    pub fn of(body: &OrbitalBody) -> Self {
        let angle = body.rotation_angle();
        Self {
            rotation_y: angle,
            position: orbit_position(body.distance(), angle),
        }
    }
}

/// Advances orbiting bodies by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformUpdater {
    stepping: OrbitStepping,
    reference_fps: f64,
}

impl Default for TransformUpdater {
    fn default() -> Self {
        Self {
            stepping: OrbitStepping::PerTick,
            reference_fps: 60.0,
        }
    }
}

impl TransformUpdater {
    /// `reference_fps` must be finite and positive.
    pub fn new(stepping: OrbitStepping, reference_fps: f64) -> Result<Self, SimError> {
        if !(reference_fps.is_finite() && reference_fps > 0.0) {
            return Err(SimError::InvalidSetting {
                setting: "reference_fps",
                reason: format!("{reference_fps} is not a positive frame rate"),
            });
        }
        Ok(Self {
            stepping,
            reference_fps,
        })
    }

    pub fn from_config(system: &SystemConfig) -> Result<Self, SimError> {
        Self::new(system.orbit_stepping, system.reference_fps)
    }

    pub fn stepping(&self) -> OrbitStepping {
        self.stepping
    }

    /// Angle added to a body with `angular_speed` over `delta` seconds.
    pub fn step(&self, angular_speed: f64, delta: f64) -> f64 {
        match self.stepping {
            OrbitStepping::PerTick => angular_speed,
            OrbitStepping::DeltaScaled => angular_speed * delta * self.reference_fps,
        }
    }

    /// Steps `body` and returns its new transform.
    ///
    /// `delta` is ignored in [`OrbitStepping::PerTick`] mode.
    pub fn update(&self, body: &mut OrbitalBody, delta: f64) -> BodyTransform {
        let step = self.step(body.angular_speed(), delta);
        body.rotate_by(step);
        BodyTransform::of(body)
    }

    /// Steps every body of the hierarchy, handing each transform to `sink`.
    ///
    /// A planet is always stepped and emitted before any of its moons.
    pub fn advance_hierarchy(
        &self,
        hierarchy: &mut OrbitalHierarchy,
        delta: f64,
        mut sink: impl FnMut(BodyKey, &BodyTransform),
    ) {
        for (p, planet) in hierarchy.planets_mut().iter_mut().enumerate() {
            let transform = self.update(&mut planet.body, delta);
            sink(BodyKey::planet(p), &transform);

            for (m, moon) in planet.moons.iter_mut().enumerate() {
                let transform = self.update(moon, delta);
                sink(BodyKey::moon(p, m), &transform);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrbitalParams;

    fn body(distance: f64, speed: f64) -> OrbitalBody {
        OrbitalBody::new(
            "Test",
            OrbitalParams {
                radius: 1.0,
                distance,
                angular_speed: speed,
            },
        )
    }

    #[test]
    fn test_orbit_position_axes() {
        let p = orbit_position(10.0, 0.0);
        assert!((p - DVec3::new(0.0, 0.0, 10.0)).length() < 1e-12);

        let p = orbit_position(10.0, std::f64::consts::FRAC_PI_2);
        assert!((p - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_per_tick_ignores_delta() {
        let updater = TransformUpdater::default();
        let mut a = body(5.0, 0.02);
        let mut b = body(5.0, 0.02);
        for delta in [0.0, 0.5, 0.001, 3.0] {
            updater.update(&mut a, delta);
            updater.update(&mut b, 1.0 / 60.0);
        }
        assert_eq!(a.rotation_angle(), b.rotation_angle());
    }

    #[test]
    fn test_update_returns_new_angle_and_position() {
        let updater = TransformUpdater::default();
        let mut b = body(4.0, 0.25);
        let t = updater.update(&mut b, 0.016);
        assert_eq!(t.rotation_y, 0.25);
        assert!((t.position - orbit_position(4.0, 0.25)).length() < 1e-12);
        assert_eq!(b.rotation_angle(), 0.25);
    }

    #[test]
    fn test_orbit_stays_on_circle() {
        let updater = TransformUpdater::default();
        let mut b = body(7.5, 0.37);
        for _ in 0..500 {
            let t = updater.update(&mut b, 0.0);
            let r2 = t.position.x * t.position.x + t.position.z * t.position.z;
            assert!((r2 - 7.5 * 7.5).abs() < 1e-9, "r² = {r2}");
            assert_eq!(t.position.y, 0.0);
        }
    }

    #[test]
    fn test_negative_speed_reverses_direction() {
        let updater = TransformUpdater::default();
        let mut b = body(1.0, -0.1);
        let t = updater.update(&mut b, 0.0);
        assert!(t.position.x < 0.0);
    }

    #[test]
    fn test_delta_scaled_is_frame_rate_independent() {
        let updater = TransformUpdater::new(OrbitStepping::DeltaScaled, 60.0).unwrap();

        let mut fast = body(3.0, 0.01);
        for _ in 0..120 {
            updater.update(&mut fast, 1.0 / 120.0);
        }
        let mut slow = body(3.0, 0.01);
        for _ in 0..30 {
            updater.update(&mut slow, 1.0 / 30.0);
        }

        // One second at either rate covers 60 reference ticks.
        assert!((fast.rotation_angle() - 0.6).abs() < 1e-9);
        assert!((slow.rotation_angle() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_bad_reference_fps_rejected() {
        for fps in [f64::NAN, 0.0, -60.0, f64::INFINITY] {
            assert!(
                matches!(
                    TransformUpdater::new(OrbitStepping::DeltaScaled, fps),
                    Err(SimError::InvalidSetting { setting: "reference_fps", .. })
                ),
                "{fps} accepted"
            );
        }

        let system = SystemConfig {
            orbit_stepping: OrbitStepping::DeltaScaled,
            reference_fps: f64::NAN,
            ..Default::default()
        };
        assert!(TransformUpdater::from_config(&system).is_err());
    }

    #[test]
    fn test_delta_scaled_zero_delta_is_idle() {
        let updater = TransformUpdater::new(OrbitStepping::DeltaScaled, 60.0).unwrap();
        let mut b = body(3.0, 0.5);
        updater.update(&mut b, 0.0);
        assert_eq!(b.rotation_angle(), 0.0);
    }

    #[test]
    fn test_advance_hierarchy_orders_parent_first() {
        let mut hierarchy = OrbitalHierarchy::from_config(&SystemConfig::default()).unwrap();
        let mut visited = Vec::new();
        TransformUpdater::default().advance_hierarchy(&mut hierarchy, 0.016, |key, _| {
            visited.push(key)
        });

        assert_eq!(visited.len(), 7);
        for (i, key) in visited.iter().enumerate() {
            if let Some(parent) = key.parent() {
                let parent_idx = visited.iter().position(|k| *k == parent).unwrap();
                assert!(parent_idx < i, "{key:?} emitted before its parent");
            }
        }
    }
}
