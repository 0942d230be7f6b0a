use crate::float::{self, Float};
use crate::interval::Interval;
use crate::normal::Normal3;
use crate::tuple::{impl_additive, impl_tuple, Scalar};

pub fn vec2(x: f32, y: f32) -> Vector2f {
    Vector2f::new(x, y)
}

pub fn vec3(x: f32, y: f32, z: f32) -> Vector3f {
    Vector3f::new(x, y, z)
}

/// A 2D displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

/// A 3D displacement or direction. Components can be accessed as `v.x`, `v.y`, `v.z`, or by
/// index `v[i]` where `i` is 0, 1 or 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type Vector2f = Vector2<f32>;
pub type Vector2i = Vector2<i32>;
pub type Vector3f = Vector3<f32>;
pub type Vector3i = Vector3<i32>;
pub type Vector3fi = Vector3<Interval<f32>>;

impl_tuple!(Vector2, 2, [x, y], "(", ")");
impl_additive!(Vector2, [x, y]);
impl_tuple!(Vector3, 3, [x, y, z], "(", ")");
impl_additive!(Vector3, [x, y, z]);

impl<T: Scalar> Vector2<T> {
    pub fn dot(self, v: Self) -> T {
        self.x * v.x + self.y * v.y
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }
}

impl<F: Float> Vector2<F> {
    pub fn length(self) -> F {
        self.length_squared().sqrt()
    }

    pub fn normalize(self) -> Self {
        let length = self.length();
        debug_assert!(length > F::ZERO, "normalizing zero-length vector");
        self / length
    }
}

impl<T: Scalar> Vector3<T> {
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Accepts either a vector or a normal for `v`.
    pub fn dot(self, v: impl Into<Self>) -> T {
        let v = v.into();
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn abs_dot(self, v: impl Into<Self>) -> T {
        self.dot(v).abs()
    }

    /// Right-handed cross product. Each component is evaluated with `difference_of_products`,
    /// so floating-point inputs do not suffer from catastrophic cancellation.
    pub fn cross(self, v: impl Into<Self>) -> Self {
        let v = v.into();
        Self {
            x: T::difference_of_products(self.y, v.z, self.z, v.y),
            y: T::difference_of_products(self.z, v.x, self.x, v.z),
            z: T::difference_of_products(self.x, v.y, self.y, v.x),
        }
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }
}

impl<F: Float> Vector3<F> {
    pub fn length(self) -> F {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector in the same direction. The vector must not be zero.
    pub fn normalize(self) -> Self {
        let length = self.length();
        debug_assert!(length > F::ZERO, "normalizing zero-length vector");
        self / length
    }

    /// Same as `normalize()`, but returns `None` instead of producing NaNs for a zero vector.
    pub fn try_normalize(self) -> Option<Self> {
        F::ONE.try_divide(self.length()).map(|inv| self * inv)
    }

    /// Angle in radians between two unit vectors, numerically stable for nearly parallel and
    /// nearly opposite inputs.
    pub fn angle_between(self, v: Self) -> F {
        let two = F::ONE + F::ONE;
        if self.dot(v) < F::ZERO {
            F::PI - two * float::safe_asin((self + v).length() / two)
        } else {
            two * float::safe_asin((v - self).length() / two)
        }
    }

    /// Removes from `self` its component along `w`, which must be normalized.
    pub fn gram_schmidt(self, w: Self) -> Self {
        self - w * self.dot(w)
    }

    /// Builds two unit vectors that together with `self` form an orthonormal basis. `self`
    /// must be normalized.
    pub fn coordinate_system(self) -> (Self, Self) {
        let Self { x, y, z } = self;
        let sign = F::ONE.copysign(z);
        let a = -F::ONE / (sign + z);
        let b = x * y * a;
        (
            Self::new(F::ONE + sign * x * x * a, sign * b, -sign * x),
            Self::new(b, sign + y * y * a, -y),
        )
    }

    /// Flips `self` if needed so that it lies in the same hemisphere as `v`.
    pub fn face_forward(self, v: impl Into<Self>) -> Self {
        if self.dot(v) < F::ZERO {
            -self
        } else {
            self
        }
    }
}

impl<T: Scalar> From<Normal3<T>> for Vector3<T> {
    fn from(n: Normal3<T>) -> Self {
        Self::new(n.x, n.y, n.z)
    }
}

impl From<glam::Vec3> for Vector3f {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3f> for glam::Vec3 {
    fn from(v: Vector3f) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}
