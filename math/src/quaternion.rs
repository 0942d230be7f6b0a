use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::float::{self, PI};
use crate::vector::Vector3f;

/// A quaternion `w + v.x i + v.y j + v.z k`. Unit quaternions represent rotations; the default
/// value is the identity rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub v: Vector3f,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(Vector3f::new(0.0, 0.0, 0.0), 1.0);

    pub const fn new(v: Vector3f, w: f32) -> Self {
        Self { v, w }
    }

    pub fn dot(self, q: Self) -> f32 {
        self.v.dot(q.v) + self.w * q.w
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let length = self.length();
        debug_assert!(length > 0.0, "normalizing zero quaternion");
        self / length
    }

    /// Angle between the two quaternions seen as 4D unit vectors.
    pub fn angle_between(self, q: Self) -> f32 {
        if self.dot(q) < 0.0 {
            PI - 2.0 * float::safe_asin((self + q).length() / 2.0)
        } else {
            2.0 * float::safe_asin((q - self).length() / 2.0)
        }
    }

    /// Spherical linear interpolation between two unit quaternions: `t = 0` gives `self`,
    /// `t = 1` gives `q`, and intermediate values move at constant angular speed.
    pub fn slerp(self, q: Self, t: f32) -> Self {
        let theta = self.angle_between(q);
        let sin_theta_over_theta = float::sin_x_over_x(theta);
        self * ((1.0 - t) * float::sin_x_over_x((1.0 - t) * theta) / sin_theta_over_theta)
            + q * (t * float::sin_x_over_x(t * theta) / sin_theta_over_theta)
    }

    pub fn has_nan(&self) -> bool {
        self.v.has_nan() || self.w.is_nan()
    }
}

impl Add for Quaternion {
    type Output = Self;
    fn add(self, q: Self) -> Self {
        Self::new(self.v + q.v, self.w + q.w)
    }
}

impl AddAssign for Quaternion {
    fn add_assign(&mut self, q: Self) {
        *self = *self + q;
    }
}

impl Sub for Quaternion {
    type Output = Self;
    fn sub(self, q: Self) -> Self {
        Self::new(self.v - q.v, self.w - q.w)
    }
}

impl SubAssign for Quaternion {
    fn sub_assign(&mut self, q: Self) {
        *self = *self - q;
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.v, -self.w)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self::new(self.v * s, self.w * s)
    }
}

impl Mul<Quaternion> for f32 {
    type Output = Quaternion;
    fn mul(self, q: Quaternion) -> Quaternion {
        q * self
    }
}

impl MulAssign<f32> for Quaternion {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;
    fn div(self, d: f32) -> Self {
        debug_assert!(d != 0.0);
        Self::new(self.v / d, self.w / d)
    }
}

impl DivAssign<f32> for Quaternion {
    fn div_assign(&mut self, d: f32) {
        *self = *self / d;
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "[ {:.p$}, {:.p$}, {:.p$}, {:.p$} ]",
            self.v.x,
            self.v.y,
            self.v.z,
            self.w,
            p = precision
        )
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self::new(Vector3f::new(q.x, q.y, q.z), q.w)
    }
}

impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.v.x, q.v.y, q.v.z, q.w)
    }
}
