use crate::float::Float;
use crate::tuple::{impl_additive, impl_tuple, Scalar};
use crate::vector::Vector3;

pub fn normal3(x: f32, y: f32, z: f32) -> Normal3f {
    Normal3f::new(x, y, z)
}

/// A surface normal. Unlike a `Vector3` it is not necessarily normalized, and it does not
/// combine with points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Normal3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type Normal3f = Normal3<f32>;

impl_tuple!(Normal3, 3, [x, y, z], "<", ">");
impl_additive!(Normal3, [x, y, z]);

impl<T: Scalar> Normal3<T> {
    pub fn dot(self, v: impl Into<Vector3<T>>) -> T {
        Vector3::from(self).dot(v)
    }

    pub fn abs_dot(self, v: impl Into<Vector3<T>>) -> T {
        self.dot(v).abs()
    }

    pub fn cross(self, v: impl Into<Vector3<T>>) -> Vector3<T> {
        Vector3::from(self).cross(v)
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }
}

impl<F: Float> Normal3<F> {
    pub fn length(self) -> F {
        self.length_squared().sqrt()
    }

    pub fn normalize(self) -> Self {
        let length = self.length();
        debug_assert!(length > F::ZERO, "normalizing zero-length normal");
        self / length
    }

    pub fn angle_between(self, n: Self) -> F {
        Vector3::from(self).angle_between(n.into())
    }

    /// See `Vector3::coordinate_system()`; the normal must be normalized.
    pub fn coordinate_system(self) -> (Vector3<F>, Vector3<F>) {
        Vector3::from(self).coordinate_system()
    }

    /// Flips the normal if needed so that it lies in the same hemisphere as `v`.
    pub fn face_forward(self, v: impl Into<Vector3<F>>) -> Self {
        if self.dot(v) < F::ZERO {
            -self
        } else {
            self
        }
    }
}

impl<T: Scalar> From<Vector3<T>> for Normal3<T> {
    fn from(v: Vector3<T>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
