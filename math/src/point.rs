use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::float::Float;
use crate::interval::Interval;
use crate::tuple::{impl_tuple, Scalar};
use crate::vector::{Vector2, Vector3};

pub fn point2(x: f32, y: f32) -> Point2f {
    Point2f::new(x, y)
}

pub fn point3(x: f32, y: f32, z: f32) -> Point3f {
    Point3f::new(x, y, z)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2<T> {
    pub x: T,
    pub y: T,
}

/// A position in 3D space. Points can be offset by vectors, and the difference between two
/// points is a vector; adding two points is not defined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type Point2f = Point2<f32>;
pub type Point2i = Point2<i32>;
pub type Point3f = Point3<f32>;
pub type Point3i = Point3<i32>;

/// A point whose coordinates carry conservative error bounds, as produced by ray-surface
/// intersection code.
pub type Point3fi = Point3<Interval<f32>>;

impl_tuple!(Point2, 2, [x, y], "[", "]");
impl_tuple!(Point3, 3, [x, y, z], "[", "]");

macro_rules! impl_point_ops {
    ($point:ident, $vector:ident, [$($field:ident),+]) => {
        impl<T: Scalar> Add<$vector<T>> for $point<T> {
            type Output = Self;
            fn add(self, v: $vector<T>) -> Self {
                Self { $($field: self.$field + v.$field),+ }
            }
        }

        impl<T: Scalar> AddAssign<$vector<T>> for $point<T> {
            fn add_assign(&mut self, v: $vector<T>) {
                *self = *self + v;
            }
        }

        impl<T: Scalar> Sub<$vector<T>> for $point<T> {
            type Output = Self;
            fn sub(self, v: $vector<T>) -> Self {
                Self { $($field: self.$field - v.$field),+ }
            }
        }

        impl<T: Scalar> SubAssign<$vector<T>> for $point<T> {
            fn sub_assign(&mut self, v: $vector<T>) {
                *self = *self - v;
            }
        }

        impl<T: Scalar> Sub for $point<T> {
            type Output = $vector<T>;
            fn sub(self, from: Self) -> $vector<T> {
                $vector { $($field: self.$field - from.$field),+ }
            }
        }

        impl<T: Scalar> From<$vector<T>> for $point<T> {
            fn from(v: $vector<T>) -> Self {
                Self { $($field: v.$field),+ }
            }
        }

        impl<T: Scalar> From<$point<T>> for $vector<T> {
            fn from(p: $point<T>) -> Self {
                Self { $($field: p.$field),+ }
            }
        }

        impl<F: Float> $point<F> {
            pub fn distance(self, p: Self) -> F {
                (self - p).length()
            }

            pub fn distance_squared(self, p: Self) -> F {
                (self - p).length_squared()
            }
        }
    };
}

impl_point_ops!(Point2, Vector2, [x, y]);
impl_point_ops!(Point3, Vector3, [x, y, z]);

impl<F: Float> Point3<Interval<F>> {
    /// Builds a point whose coordinates lie within `e` of `p` in each dimension.
    pub fn from_value_and_error(p: Point3<F>, e: Vector3<F>) -> Self {
        Self::new(
            Interval::from_value_and_error(p.x, e.x),
            Interval::from_value_and_error(p.y, e.y),
            Interval::from_value_and_error(p.z, e.z),
        )
    }

    /// Half-widths of the coordinate intervals.
    pub fn error(&self) -> Vector3<F> {
        Vector3::new(
            self.x.width() * F::HALF,
            self.y.width() * F::HALF,
            self.z.width() * F::HALF,
        )
    }

    pub fn is_exact(&self) -> bool {
        self.x.width() == F::ZERO && self.y.width() == F::ZERO && self.z.width() == F::ZERO
    }

    /// The best single-point estimate: the midpoint of each coordinate interval.
    pub fn midpoint(&self) -> Point3<F> {
        Point3::new(self.x.midpoint(), self.y.midpoint(), self.z.midpoint())
    }
}

impl<F: Float> From<Point3<F>> for Point3<Interval<F>> {
    fn from(p: Point3<F>) -> Self {
        Self::new(
            Interval::from_value(p.x),
            Interval::from_value(p.y),
            Interval::from_value(p.z),
        )
    }
}

impl<F: Float> From<Point3<Interval<F>>> for Point3<F> {
    fn from(p: Point3<Interval<F>>) -> Self {
        p.midpoint()
    }
}

impl<F: Float> Add<Vector3<F>> for Point3<Interval<F>> {
    type Output = Self;
    fn add(self, v: Vector3<F>) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl<F: Float> Sub<Vector3<F>> for Point3<Interval<F>> {
    type Output = Self;
    fn sub(self, v: Vector3<F>) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

/// The result stays a `Point3fi`: it still carries the error bounds of `self`.
impl<F: Float> Sub<Point3<F>> for Point3<Interval<F>> {
    type Output = Self;
    fn sub(self, p: Point3<F>) -> Self {
        Self::new(self.x - p.x, self.y - p.y, self.z - p.z)
    }
}

impl From<glam::Vec3> for Point3f {
    fn from(p: glam::Vec3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Point3f> for glam::Vec3 {
    fn from(p: Point3f) -> Self {
        glam::Vec3::new(p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vector::vec3;

    #[test]
    fn points_and_vectors() {
        let p = point3(1.0, 2.0, 3.0);
        let q = point3(4.0, 6.0, 3.0);
        assert_eq!(q - p, vec3(3.0, 4.0, 0.0));
        assert_eq!(p + vec3(3.0, 4.0, 0.0), q);
        assert_eq!(q - vec3(3.0, 4.0, 0.0), p);
        assert_eq!(p.distance(q), 5.0);
        assert_eq!(p.distance_squared(q), 25.0);

        let mut r = p;
        r += vec3(1.0, 1.0, 1.0);
        r -= vec3(0.0, 0.0, 2.0);
        assert_eq!(r, point3(2.0, 3.0, 2.0));
        assert_eq!(point2(0.0, 0.0).distance(point2(3.0, 4.0)), 5.0);
        assert_eq!(Point2i::new(3, 4) - Point2i::new(1, 1), Vector2::new(2, 3));
    }

    #[test]
    fn interval_point_error() {
        let p = Point3fi::from_value_and_error(point3(1.0, -2.0, 0.5), vec3(0.1, 0.0, 0.25));
        assert!(!p.is_exact());
        assert!(p.y.exactly(-2.0));
        let e = p.error();
        assert!(e.x >= 0.1 && e.x < 0.1001);
        assert_eq!(e.y, 0.0);
        assert!(e.z >= 0.25 && e.z < 0.2501);
        assert!(p.x.contains(0.9) && p.x.contains(1.1));

        let exact = Point3fi::from(point3(1.0, 2.0, 3.0));
        assert!(exact.is_exact());
        assert_eq!(Point3f::from(exact), point3(1.0, 2.0, 3.0));
    }

    #[test]
    fn interval_point_arithmetic() {
        let p = Point3fi::from(point3(1.0, 1.0, 1.0));
        let moved = p + vec3(0.1, 0.2, 0.3);
        assert!(moved.x.contains(1.1) && moved.y.contains(1.2) && moved.z.contains(1.3));
        let back = moved - vec3(0.1, 0.2, 0.3);
        assert!(back.x.contains(1.0) && back.y.contains(1.0) && back.z.contains(1.0));
        let d = moved - point3(1.0, 1.0, 1.0);
        assert!(d.x.contains(0.1f32 + 1.0 - 1.0));
    }

    #[test]
    fn glam_round_trip() {
        let p = point3(1.0, 2.0, 3.0);
        let g = glam::Vec3::from(p);
        assert_eq!(Point3f::from(g + glam::Vec3::ONE), point3(2.0, 3.0, 4.0));
    }
}
