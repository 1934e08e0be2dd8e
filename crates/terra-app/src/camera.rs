//! Orbit camera and pointer picking.

use glam::{DVec2, DVec3};
use terra_planet::Ray;

/// Closest the camera may orbit to its target.
pub const MIN_DISTANCE: f64 = 80.0;
/// Farthest the camera may orbit from its target.
pub const MAX_DISTANCE: f64 = 650.0;

const POLAR_MARGIN: f64 = 1e-3;

/// A perspective camera orbiting a target point, Y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub position: DVec3,
    pub target: DVec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    /// Width over height.
    pub aspect: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 150.0),
            target: DVec3::ZERO,
            fov_y_deg: 60.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl OrbitCamera {
    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }

    /// World-space ray through a point in normalized device coordinates
    /// (`[-1, 1]` on both axes, `+y` up).
    pub fn ray_through(&self, ndc: DVec2) -> Ray {
        let forward = (self.target - self.position).normalize_or_zero();
        let up_hint = if forward.cross(DVec3::Y).length_squared() < 1e-12 {
            DVec3::Z
        } else {
            DVec3::Y
        };
        let right = forward.cross(up_hint).normalize_or_zero();
        let up = right.cross(forward);

        let half = (self.fov_y_deg.to_radians() * 0.5).tan();
        let dir = forward + right * (ndc.x * half * self.aspect) + up * (ndc.y * half);
        Ray::new(self.position, dir)
    }

    /// Rotate the camera about its target: `yaw` about world Y, `pitch`
    /// toward the poles. The pitch stops just short of either pole.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius == 0.0 {
            return;
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let new_polar = (polar - pitch).clamp(POLAR_MARGIN, std::f64::consts::PI - POLAR_MARGIN);
        let azimuth = offset.x.atan2(offset.z) + yaw;

        let rotated = DVec3::new(
            new_polar.sin() * azimuth.sin(),
            new_polar.cos(),
            new_polar.sin() * azimuth.cos(),
        ) * radius;
        self.position = self.target + rotated;
    }

    /// Scale the orbit distance, clamped to the allowed band.
    pub fn zoom(&mut self, factor: f64) {
        let offset = self.position - self.target;
        let Some(dir) = offset.try_normalize() else {
            return;
        };
        let distance = (offset.length() * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + dir * distance;
    }
}
