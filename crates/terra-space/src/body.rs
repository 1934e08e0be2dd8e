//! A single orbiting body.

use glam::{DQuat, DVec3};

/// Ellipse semi-axes and the speed constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalParams {
    /// Semi-axis along X.
    pub a: f64,
    /// Semi-axis along Z.
    pub b: f64,
    /// Angular speed is `k / r²` at orbit radius `r`.
    pub k: f64,
}

impl OrbitalParams {
    pub const fn new(a: f64, b: f64, k: f64) -> Self {
        Self { a, b, k }
    }

    /// Point on the untilted ellipse at `angle`.
    pub fn point(&self, angle: f64) -> DVec3 {
        DVec3::new(self.a * angle.cos(), 0.0, self.b * angle.sin())
    }

    /// Angular speed at `angle`, in radians per second.
    pub fn angular_velocity(&self, angle: f64) -> f64 {
        let r2 = self.point(angle).length_squared();
        if r2 > 0.0 { self.k / r2 } else { 0.0 }
    }
}

/// The bodies sharing the sky with the planet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Sun,
    Saturn,
    Mars,
    Moon,
}

impl BodyKind {
    /// Update order used by [`CelestialSystem`](crate::CelestialSystem).
    pub const ALL: [BodyKind; 4] = [BodyKind::Sun, BodyKind::Saturn, BodyKind::Mars, BodyKind::Moon];

    pub fn orbit(self) -> OrbitalParams {
        match self {
            BodyKind::Sun => OrbitalParams::new(520.0, 400.0, 12_000.0),
            BodyKind::Saturn => OrbitalParams::new(280.0, 220.0, 6_000.0),
            BodyKind::Mars => OrbitalParams::new(180.0, 145.0, 4_000.0),
            BodyKind::Moon => OrbitalParams::new(130.0, 110.0, 3_600.0),
        }
    }

    /// Body radius in world units.
    pub fn size(self) -> f64 {
        match self {
            BodyKind::Sun => 15.0,
            BodyKind::Saturn => 5.0,
            BodyKind::Mars => 4.2,
            BodyKind::Moon => 3.5,
        }
    }

    /// Spin added per update, in radians.
    pub fn rotation_speed(self) -> f64 {
        match self {
            BodyKind::Sun => 0.0005,
            BodyKind::Saturn => 0.004,
            BodyKind::Mars => 0.003,
            BodyKind::Moon => 0.002,
        }
    }

    /// Tilt of the orbit plane about the X axis, in radians.
    pub fn inclination(self) -> f64 {
        match self {
            BodyKind::Sun => 0.0,
            BodyKind::Saturn => 0.2,
            BodyKind::Mars => -0.1,
            BodyKind::Moon => -0.3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyKind::Sun => "sun",
            BodyKind::Saturn => "saturn",
            BodyKind::Mars => "mars",
            BodyKind::Moon => "moon",
        }
    }
}

/// An orbiting, spinning body.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub kind: BodyKind,
    pub size: f64,
    pub orbit: OrbitalParams,
    pub rotation_speed: f64,
    pub inclination: f64,
    /// Current orbit angle in radians.
    pub angle: f64,
    /// Accumulated spin about the body's own Y axis, in radians.
    pub spin: f64,
    position: DVec3,
}

impl CelestialBody {
    /// A body of `kind` at angle zero with its stock parameters.
    pub fn new(kind: BodyKind) -> Self {
        Self::with_params(
            kind,
            kind.size(),
            kind.orbit(),
            kind.rotation_speed(),
            kind.inclination(),
        )
    }

    pub fn with_params(
        kind: BodyKind,
        size: f64,
        orbit: OrbitalParams,
        rotation_speed: f64,
        inclination: f64,
    ) -> Self {
        Self {
            kind,
            size,
            orbit,
            rotation_speed,
            inclination,
            angle: 0.0,
            spin: 0.0,
            position: orbit.point(0.0),
        }
    }

    /// Place the body at its current angle, then advance the angle by
    /// `k / r² · dt` and the spin by one step.
    pub fn update(&mut self, dt: f64) {
        self.position = self.orbit.point(self.angle);
        self.angle += self.orbit.angular_velocity(self.angle) * dt;
        self.spin += self.rotation_speed;
    }

    /// Position in the orbit plane, before inclination.
    pub fn orbit_position(&self) -> DVec3 {
        self.position
    }

    /// Position in planet space.
    pub fn position(&self) -> DVec3 {
        self.tilt() * self.position
    }

    /// Closed polyline tracing the tilted orbit, `segments + 1` points.
    pub fn orbit_path(&self, segments: usize) -> Vec<DVec3> {
        let tilt = self.tilt();
        (0..=segments)
            .map(|i| {
                let t = i as f64 / segments.max(1) as f64 * std::f64::consts::TAU;
                tilt * self.orbit.point(t)
            })
            .collect()
    }

    fn tilt(&self) -> DQuat {
        DQuat::from_rotation_x(self.inclination)
    }
}
