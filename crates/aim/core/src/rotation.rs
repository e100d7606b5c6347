//! Yaw/pitch angle pairs with wrap-around arithmetic.
//!
//! [`Rotation`] is used both for absolute orientations and for orientation
//! deltas. Values are never clamped: yaw lives on a circle (equivalent modulo
//! 360) and pitch is kept within ±90 by convention of the caller. Every delta
//! must pass through [`Rotation::diff_normalize`] before it is used as a step
//! target, otherwise the view would turn the long way around.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::geometry::Vec3;

/// Reduces an angle in degrees to its representative in `(-180, 180]`.
///
/// `190` becomes `-170`, `-180` becomes `180`. Idempotent.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let mut wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// A (yaw, pitch) pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Rotation {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Euclidean norm of the two components.
    pub fn magnitude(self) -> f64 {
        self.yaw.hypot(self.pitch)
    }

    /// Wraps each component into `(-180, 180]`, giving the shortest signed path.
    pub fn diff_normalize(self) -> Self {
        Self::new(wrap_degrees(self.yaw), wrap_degrees(self.pitch))
    }

    /// Scales the pair down so its magnitude does not exceed `max_magnitude`.
    ///
    /// Never scales up and preserves direction. A negative cap is treated as zero.
    pub fn limited_by_speed(self, max_magnitude: f64) -> Self {
        let cap = max_magnitude.max(0.0);
        let magnitude = self.magnitude();
        if magnitude <= cap {
            return self;
        }
        if cap == 0.0 {
            return Self::ZERO;
        }
        self * (cap / magnitude)
    }

    /// Unit look vector for this orientation.
    pub fn direction(self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let cos_pitch = pitch.cos();
        Vec3::new(-yaw.sin() * cos_pitch, -pitch.sin(), yaw.cos() * cos_pitch)
    }

    /// Absolute orientation that looks from `eye` straight at `target`.
    ///
    /// Both components are wrapped, so the result does not depend on the
    /// viewer's current orientation.
    pub fn look_at(eye: Vec3, target: Vec3) -> Self {
        let delta = target - eye;
        let yaw = wrap_degrees(delta.z.atan2(delta.x).to_degrees() - 90.0);
        let pitch = wrap_degrees(-delta.y.atan2(delta.horizontal_length()).to_degrees());
        Self::new(yaw, pitch)
    }

    /// Angle in degrees between this orientation's look vector and the
    /// direction from `eye` to `point`. Ranges over `[0, 180]`.
    pub fn angle_to(self, eye: Vec3, point: Vec3) -> f64 {
        let look = self.direction().normalize();
        let towards = (point - eye).normalize();
        look.dot(towards).clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl Add for Rotation {
    type Output = Rotation;
    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::new(self.yaw + rhs.yaw, self.pitch + rhs.pitch)
    }
}

impl Sub for Rotation {
    type Output = Rotation;
    fn sub(self, rhs: Rotation) -> Rotation {
        Rotation::new(self.yaw - rhs.yaw, self.pitch - rhs.pitch)
    }
}

impl Mul<f64> for Rotation {
    type Output = Rotation;
    fn mul(self, rhs: f64) -> Rotation {
        Rotation::new(self.yaw * rhs, self.pitch * rhs)
    }
}

/// Division by zero yields [`Rotation::ZERO`].
impl Div<f64> for Rotation {
    type Output = Rotation;
    fn div(self, rhs: f64) -> Rotation {
        if rhs == 0.0 {
            return Rotation::ZERO;
        }
        Rotation::new(self.yaw / rhs, self.pitch / rhs)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(yaw {:.2}°, pitch {:.2}°)", self.yaw, self.pitch)
    }
}
