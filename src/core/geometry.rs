//! Poses handed to the presentation layer.
//!
//! Cards are flat sprites, so a pose is a position plus a rotation about
//! the z axis (degrees, counter-clockwise). Smaller z is closer to the
//! viewer.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 3D position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate about the z axis by `degrees`.
    #[must_use]
    pub fn rotated_z(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Linear interpolation, `t = 0` is `self`.
    #[must_use]
    pub fn lerp(self, to: Vec3, t: f32) -> Self {
        self + (to - self) * t
    }

    /// Move `distance` units toward the viewer.
    #[must_use]
    pub fn toward_viewer(self, distance: f32) -> Self {
        Self::new(self.x, self.y, self.z - distance)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Position and z-rotation of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: f32,
}

impl Pose {
    #[must_use]
    pub const fn new(position: Vec3, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Unrotated pose at `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, 0.0)
    }

    /// Interpolate toward `to`. Rotation takes the shorter arc.
    #[must_use]
    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        let delta = (to.rotation - self.rotation + 540.0).rem_euclid(360.0) - 180.0;
        Pose {
            position: self.position.lerp(to.position, t),
            rotation: self.rotation + delta * t,
        }
    }
}
