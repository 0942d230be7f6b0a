use std::fmt::{self, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::ray::Ray;
use math::float::{self, gamma, Float};
use math::tuple::{self, Limits, Tuple};
use math::{Point2, Point3, Point3f, Vector2, Vector3, Vector3f};

/// 2D axis-aligned box, e.g. a range of pixels or a region on the film.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2<T> {
    pub p_min: Point2<T>,
    pub p_max: Point2<T>,
}

/// 3D axis-aligned box. Boundary checks are closed (`[p_min, p_max]`) unless stated otherwise.
/// - Build one from 1 or 2 `Point3`s, or start from the empty `default()` and grow it;
/// - Expand it by `b.union()` or `b.union_point()`;
/// - Check if it `contains()` a point or `encloses()` another box, or `intersect_p()` a ray.
///
/// A box is empty if `p_min >= p_max` on any axis, and degenerate if `p_min > p_max` on any
/// axis. Zero-width boxes are empty but not degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3<T> {
    pub p_min: Point3<T>,
    pub p_max: Point3<T>,
}

pub type Bounds2f = Bounds2<f32>;
pub type Bounds2i = Bounds2<i32>;
pub type Bounds3f = Bounds3<f32>;
pub type Bounds3i = Bounds3<i32>;

macro_rules! impl_bounds {
    ($bounds:ident, $point:ident, $vector:ident, $n:literal) => {
        impl<T: Limits> Default for $bounds<T> {
            /// The inverted box, with `p_min` at the highest and `p_max` at the lowest value of
            /// `T`. The union of it with any point is that point.
            fn default() -> Self {
                Self {
                    p_min: $point::from_array([T::HIGHEST; $n]),
                    p_max: $point::from_array([T::LOWEST; $n]),
                }
            }
        }

        impl<T: Limits> $bounds<T> {
            pub fn from_point(p: $point<T>) -> Self {
                Self { p_min: p, p_max: p }
            }

            /// Builds the smallest box containing both points, in whichever order they come.
            pub fn new(p0: $point<T>, p1: $point<T>) -> Self {
                Self {
                    p_min: tuple::min(p0, p1),
                    p_max: tuple::max(p0, p1),
                }
            }

            pub fn diagonal(&self) -> $vector<T> {
                self.p_max - self.p_min
            }

            /// Index of the axis along which the box is widest.
            pub fn max_dimension(&self) -> usize {
                tuple::max_component_index(self.diagonal())
            }

            pub fn is_empty(&self) -> bool {
                (0..$n).any(|i| self.p_min[i] >= self.p_max[i])
            }

            pub fn is_degenerate(&self) -> bool {
                (0..$n).any(|i| self.p_min[i] > self.p_max[i])
            }

            /// Position of `p` relative to the corners: 0 at `p_min` and 1 at `p_max` on every
            /// axis with positive extent.
            pub fn offset(&self, p: $point<T>) -> $vector<T> {
                let mut o = p - self.p_min;
                for i in 0..$n {
                    if self.p_max[i] > self.p_min[i] {
                        o[i] = o[i] / (self.p_max[i] - self.p_min[i]);
                    }
                }
                o
            }

            pub fn union(self, b: Self) -> Self {
                Self {
                    p_min: tuple::min(self.p_min, b.p_min),
                    p_max: tuple::max(self.p_max, b.p_max),
                }
            }

            pub fn union_point(self, p: $point<T>) -> Self {
                Self {
                    p_min: tuple::min(self.p_min, p),
                    p_max: tuple::max(self.p_max, p),
                }
            }

            /// The overlapping region; degenerate if the boxes are disjoint.
            pub fn intersect(self, b: Self) -> Self {
                Self {
                    p_min: tuple::max(self.p_min, b.p_min),
                    p_max: tuple::min(self.p_max, b.p_max),
                }
            }

            pub fn overlaps(&self, b: &Self) -> bool {
                (0..$n).all(|i| self.p_max[i] >= b.p_min[i] && self.p_min[i] <= b.p_max[i])
            }

            pub fn contains(&self, p: $point<T>) -> bool {
                (0..$n).all(|i| p[i] >= self.p_min[i] && p[i] <= self.p_max[i])
            }

            /// Like `contains()`, but the upper boundary is excluded. Useful for integer
            /// boxes, where the upper corner is one past the last element.
            pub fn contains_exclusive(&self, p: $point<T>) -> bool {
                (0..$n).all(|i| p[i] >= self.p_min[i] && p[i] < self.p_max[i])
            }

            /// True if `b` lies entirely inside `self`.
            pub fn encloses(&self, b: &Self) -> bool {
                (0..$n).all(|i| self.p_min[i] <= b.p_min[i] && self.p_max[i] >= b.p_max[i])
            }

            /// Squared distance from `p` to the closest point of the box; zero inside.
            pub fn distance_squared(&self, p: $point<T>) -> T {
                (0..$n)
                    .map(|i| {
                        let below = self.p_min[i] - p[i];
                        let above = p[i] - self.p_max[i];
                        let d = [T::ZERO, below, above]
                            .into_iter()
                            .fold(T::ZERO, |m, v| if v > m { v } else { m });
                        d * d
                    })
                    .fold(T::ZERO, |sum, d2| sum + d2)
            }

            /// Grows the box by `delta` on every side.
            pub fn expand(self, delta: T) -> Self {
                let delta = $vector::from_array([delta; $n]);
                Self {
                    p_min: self.p_min - delta,
                    p_max: self.p_max + delta,
                }
            }
        }

        impl<F: Float> $bounds<F> {
            /// Maps `t` in [0, 1] on every axis linearly onto the box.
            pub fn lerp(&self, t: $point<F>) -> $point<F> {
                $point::from_array(std::array::from_fn(|i| {
                    float::lerp_scalar(t[i], self.p_min[i], self.p_max[i])
                }))
            }

            pub fn distance(&self, p: $point<F>) -> F {
                self.distance_squared(p).sqrt()
            }

            /// Center and radius of a sphere enclosing the box. An empty box gets radius 0.
            pub fn bounding_sphere(&self) -> ($point<F>, F) {
                let center = self.p_min + self.diagonal() * F::HALF;
                let radius = if self.contains(center) {
                    center.distance(self.p_max)
                } else {
                    F::ZERO
                };
                (center, radius)
            }
        }

        impl<T> Index<usize> for $bounds<T> {
            type Output = $point<T>;
            fn index(&self, i: usize) -> &$point<T> {
                match i {
                    0 => &self.p_min,
                    1 => &self.p_max,
                    _ => panic!("invalid bounds corner index {}", i),
                }
            }
        }

        impl<T> IndexMut<usize> for $bounds<T> {
            fn index_mut(&mut self, i: usize) -> &mut $point<T> {
                match i {
                    0 => &mut self.p_min,
                    1 => &mut self.p_max,
                    _ => panic!("invalid bounds corner index {}", i),
                }
            }
        }

        impl<T: Limits> Display for $bounds<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                let precision = f.precision().unwrap_or(2);
                write!(f, "[ {:.p$} - {:.p$} ]", self.p_min, self.p_max, p = precision)
            }
        }

        impl_bounds_conversion!($bounds, i32 => f32);
        impl_bounds_conversion!($bounds, f32 => i32);
    };
}

/// Converts the component type. An empty source box maps to the empty box of the target type
/// rather than to whatever the casts of its sentinel corners would give.
macro_rules! impl_bounds_conversion {
    ($bounds:ident, $from:ty => $to:ty) => {
        impl From<$bounds<$from>> for $bounds<$to> {
            fn from(b: $bounds<$from>) -> Self {
                if b.is_empty() {
                    Self::default()
                } else {
                    Self {
                        p_min: b.p_min.map(|c| c as $to),
                        p_max: b.p_max.map(|c| c as $to),
                    }
                }
            }
        }
    };
}

impl_bounds!(Bounds2, Point2, Vector2, 2);
impl_bounds!(Bounds3, Point3, Vector3, 3);

impl<T: Limits> Bounds2<T> {
    /// Corner `i` (0 to 3): bit 0 selects `x` from `p_min` or `p_max`, bit 1 selects `y`.
    pub fn corner(&self, i: usize) -> Point2<T> {
        debug_assert!(i < 4);
        Point2::new(self[i & 1].x, self[(i >> 1) & 1].y)
    }

    pub fn area(&self) -> T {
        let d = self.diagonal();
        d.x * d.y
    }
}

impl<T: Limits> Bounds3<T> {
    /// Corner `i` (0 to 7): bits 0, 1, 2 select `x`, `y`, `z` from `p_min` or `p_max`.
    pub fn corner(&self, i: usize) -> Point3<T> {
        debug_assert!(i < 8);
        Point3::new(self[i & 1].x, self[(i >> 1) & 1].y, self[(i >> 2) & 1].z)
    }

    pub fn surface_area(&self) -> T {
        let d = self.diagonal();
        let two = T::ONE + T::ONE;
        two * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    pub fn volume(&self) -> T {
        tuple::hprod(self.diagonal())
    }
}

/// Scale applied to far slab distances so that rounding in the three operations computing them
/// can never cut off a true intersection.
const FAR_T_SCALE: f32 = 1.0 + 2.0 * gamma(3);

impl Bounds3<f32> {
    /// Slab test of the segment `o + t * d, t in [0, t_max]` against the box. Returns the
    /// parametric entry and exit distances, clipped to `[0, t_max]`, on a hit.
    ///
    /// Directions with zero components are fine: the division yields infinities, which put the
    /// corresponding slab either everywhere or nowhere along the ray.
    pub fn intersect_p(&self, o: Point3f, d: Vector3f, t_max: f32) -> Option<(f32, f32)> {
        let (mut t0, mut t1) = (0.0f32, t_max);
        for i in 0..3 {
            let inv_dir = 1.0 / d[i];
            let t_near = (self.p_min[i] - o[i]) * inv_dir;
            let t_far = (self.p_max[i] - o[i]) * inv_dir;
            let (t_near, t_far) = if t_near > t_far {
                (t_far, t_near)
            } else {
                (t_near, t_far)
            };
            let t_far = t_far * FAR_T_SCALE;

            // Written so that a NaN from 0 * inf leaves the running range untouched.
            t0 = if t_near > t0 { t_near } else { t0 };
            t1 = if t_far < t1 { t_far } else { t1 };
            if t0 > t1 {
                return None;
            }
        }
        Some((t0, t1))
    }

    /// Slab test of `ray` against the box, over `[0, t_max]`.
    pub fn intersect_ray(&self, ray: &Ray, t_max: f32) -> Option<(f32, f32)> {
        self.intersect_p(ray.origin, ray.dir, t_max)
    }

    /// Faster variant of `intersect_p()` for traversal loops that test many boxes against one
    /// ray: the reciprocal direction and its signs (see `dir_is_neg()`) are computed once by
    /// the caller. Only reports whether the ray hits within `(0, ray_t_max)`.
    pub fn intersect_p_with_inv_dir(
        &self,
        o: Point3f,
        ray_t_max: f32,
        inv_dir: Vector3f,
        dir_is_neg: [usize; 3],
    ) -> bool {
        let mut t_min = (self[dir_is_neg[0]].x - o.x) * inv_dir.x;
        let mut t_max = (self[1 - dir_is_neg[0]].x - o.x) * inv_dir.x;
        let ty_min = (self[dir_is_neg[1]].y - o.y) * inv_dir.y;
        let ty_max = (self[1 - dir_is_neg[1]].y - o.y) * inv_dir.y;

        t_max *= FAR_T_SCALE;
        let ty_max = ty_max * FAR_T_SCALE;
        if t_min > ty_max || ty_min > t_max {
            return false;
        }
        if ty_min > t_min {
            t_min = ty_min;
        }
        if ty_max < t_max {
            t_max = ty_max;
        }

        let tz_min = (self[dir_is_neg[2]].z - o.z) * inv_dir.z;
        let tz_max = (self[1 - dir_is_neg[2]].z - o.z) * inv_dir.z * FAR_T_SCALE;
        if t_min > tz_max || tz_min > t_max {
            return false;
        }
        if tz_min > t_min {
            t_min = tz_min;
        }
        if tz_max < t_max {
            t_max = tz_max;
        }
        t_min < ray_t_max && t_max > 0.0
    }
}

/// 1 for each axis along which `inv_dir` points in the negative direction, 0 otherwise.
pub fn dir_is_neg(inv_dir: Vector3f) -> [usize; 3] {
    [
        (inv_dir.x < 0.0) as usize,
        (inv_dir.y < 0.0) as usize,
        (inv_dir.z < 0.0) as usize,
    ]
}

pub fn union<T: Limits>(b0: Bounds3<T>, b1: Bounds3<T>) -> Bounds3<T> {
    b0.union(b1)
}

#[cfg(test)]
mod test {
    use super::*;
    use math::{point2, point3, vec3, Point2i, Point3i};

    fn unit_cube() -> Bounds3f {
        Bounds3f::new(point3(0.0, 0.0, 0.0), point3(1.0, 1.0, 1.0))
    }

    #[test]
    fn construction() {
        let b = Bounds3f::new(point3(1.0, -1.0, 5.0), point3(0.0, 2.0, 3.0));
        assert_eq!(b.p_min, point3(0.0, -1.0, 3.0));
        assert_eq!(b.p_max, point3(1.0, 2.0, 5.0));
        assert_eq!(b[0], b.p_min);
        assert_eq!(b[1], b.p_max);
        let p = point3(1.0, 2.0, 3.0);
        assert_eq!(Bounds3f::from_point(p), Bounds3f::new(p, p));
    }

    #[test]
    fn default_is_empty_and_degenerate() {
        let b = Bounds3f::default();
        assert!(b.is_empty());
        assert!(b.is_degenerate());
        assert_eq!(b.p_min.x, f32::MAX);
        assert_eq!(b.p_max.x, f32::MIN);

        let flat = Bounds3f::new(point3(0.0, 0.0, 0.0), point3(1.0, 0.0, 1.0));
        assert!(flat.is_empty());
        assert!(!flat.is_degenerate());
        assert!(!unit_cube().is_empty());
    }

    #[test]
    fn measures() {
        let b = Bounds3f::new(point3(0.0, 0.0, 0.0), point3(1.0, 2.0, 3.0));
        assert_eq!(b.diagonal(), vec3(1.0, 2.0, 3.0));
        assert_eq!(b.surface_area(), 22.0);
        assert_eq!(b.volume(), 6.0);
        assert_eq!(b.max_dimension(), 2);
        assert_eq!(b.corner(0), b.p_min);
        assert_eq!(b.corner(7), b.p_max);
        assert_eq!(b.corner(5), point3(1.0, 0.0, 3.0));
        assert_eq!(b.lerp(point3(0.5, 0.5, 0.5)), point3(0.5, 1.0, 1.5));
        assert_eq!(b.offset(point3(0.5, 1.0, 3.0)), vec3(0.5, 0.5, 1.0));

        let r = Bounds2i::new(Point2i::new(0, 0), Point2i::new(4, 3));
        assert_eq!(r.area(), 12);
        assert_eq!(r.corner(2), Point2i::new(0, 3));
        assert_eq!(r.max_dimension(), 0);
    }

    #[test]
    fn offset_of_flat_axis_is_unscaled() {
        let b = Bounds3f::new(point3(0.0, 0.0, 0.0), point3(2.0, 0.0, 2.0));
        assert_eq!(b.offset(point3(1.0, 3.0, 2.0)), vec3(0.5, 3.0, 1.0));
    }

    #[test]
    fn set_operations() {
        let a = unit_cube();
        let b = Bounds3f::new(point3(0.5, 0.5, 0.5), point3(2.0, 2.0, 2.0));
        let u = a.union(b);
        assert_eq!(u, Bounds3f::new(point3(0.0, 0.0, 0.0), point3(2.0, 2.0, 2.0)));
        assert_eq!(union(a, b), u);
        assert!(u.encloses(&a) && u.encloses(&b));
        assert!(!a.encloses(&u));

        let i = a.intersect(b);
        assert_eq!(i, Bounds3f::new(point3(0.5, 0.5, 0.5), point3(1.0, 1.0, 1.0)));
        assert!(a.overlaps(&b));

        let far = Bounds3f::new(point3(3.0, 3.0, 3.0), point3(4.0, 4.0, 4.0));
        assert!(!a.overlaps(&far));
        assert!(a.intersect(far).is_degenerate());
    }

    #[test]
    fn empty_union_point() {
        let b = Bounds3f::default().union_point(point3(1.0, 2.0, 3.0));
        assert_eq!(b.p_min, point3(1.0, 2.0, 3.0));
        assert_eq!(b.p_max, point3(1.0, 2.0, 3.0));
        assert!(b.is_empty());
        assert!(!b.is_degenerate());
    }

    #[test]
    fn containment() {
        let b = unit_cube();
        assert!(b.contains(point3(1.0, 0.0, 0.5)));
        assert!(!b.contains_exclusive(point3(1.0, 0.0, 0.5)));
        assert!(b.contains_exclusive(point3(0.0, 0.0, 0.5)));
        assert!(!b.contains(point3(1.5, 0.5, 0.5)));

        let pixels = Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2));
        let inside = (0..3)
            .flat_map(|x| (0..3).map(move |y| Point2i::new(x, y)))
            .filter(|p| pixels.contains_exclusive(*p))
            .count();
        assert_eq!(inside, 4);
    }

    #[test]
    fn distance_to_box() {
        let b = unit_cube();
        assert_eq!(b.distance_squared(point3(0.5, 0.5, 0.5)), 0.0);
        assert_eq!(b.distance_squared(point3(2.0, 0.5, -1.0)), 2.0);
        assert_eq!(b.distance(point3(4.0, 5.0, 0.5)), 5.0);
        let ib = Bounds3i::new(Point3i::new(0, 0, 0), Point3i::new(1, 1, 1));
        assert_eq!(ib.distance_squared(Point3i::new(3, -2, 1)), 8);
    }

    #[test]
    fn expand_and_sphere() {
        let b = unit_cube().expand(1.0);
        assert_eq!(b, Bounds3f::new(point3(-1.0, -1.0, -1.0), point3(2.0, 2.0, 2.0)));
        let (center, radius) = unit_cube().bounding_sphere();
        assert_eq!(center, point3(0.5, 0.5, 0.5));
        assert!((radius - 0.75f32.sqrt()).abs() < 1e-6);
        let (_, radius) = Bounds3f::default().bounding_sphere();
        assert_eq!(radius, 0.0);

        let (center, radius) = Bounds2f::new(point2(0.0, 0.0), point2(6.0, 8.0)).bounding_sphere();
        assert_eq!(center, point2(3.0, 4.0));
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn integer_conversion() {
        let b = Bounds2i::new(Point2i::new(1, 2), Point2i::new(3, 4));
        let f = Bounds2f::from(b);
        assert_eq!(f, Bounds2f::new(point2(1.0, 2.0), point2(3.0, 4.0)));
        assert_eq!(Bounds2i::from(f), b);

        assert_eq!(Bounds3f::from(Bounds3i::default()), Bounds3f::default());
        assert_eq!(Bounds3i::from(Bounds3f::default()), Bounds3i::default());
    }

    #[test]
    fn slab_test_center_hit() {
        let (t0, t1) = unit_cube()
            .intersect_p(point3(0.5, 0.5, -5.0), vec3(0.0, 0.0, 1.0), f32::INFINITY)
            .expect("ray through the center must hit");
        assert_eq!(t0, 5.0);
        assert!(t1 >= 6.0 && t1 < 6.00001);
    }

    #[test]
    fn slab_test_parallel_miss() {
        let b = unit_cube();
        let d = vec3(0.0, 0.0, 1.0);
        assert_eq!(b.intersect_p(point3(0.5, 1.0001, -5.0), d, f32::INFINITY), None);
        assert_eq!(b.intersect_p(point3(-0.0001, 0.5, -5.0), d, f32::INFINITY), None);
        // On the face plane itself counts as a hit.
        assert!(b.intersect_p(point3(0.5, 1.0, -5.0), d, f32::INFINITY).is_some());
    }

    #[test]
    fn slab_test_respects_extent() {
        let b = unit_cube();
        let (o, d) = (point3(0.5, 0.5, -5.0), vec3(0.0, 0.0, 1.0));
        assert_eq!(b.intersect_p(o, d, 4.0), None);
        assert_eq!(b.intersect_p(o, d, 5.5), Some((5.0, 5.5)));
        // Starting inside the box.
        assert_eq!(b.intersect_p(point3(0.5, 0.5, 0.5), d, 10.0).map(|t| t.0), Some(0.0));
    }

    #[test]
    fn precomputed_inverse_matches() {
        let b = unit_cube();
        let cases = [
            (point3(0.5, 0.5, -5.0), vec3(0.0, 0.0, 1.0), true),
            (point3(0.5, 1.0001, -5.0), vec3(0.0, 0.0, 1.0), false),
            (point3(2.0, 2.0, 2.0), vec3(-1.0, -1.0, -1.0), true),
            (point3(2.0, 2.0, 2.0), vec3(1.0, 1.0, 1.0), false),
            (point3(-1.0, 0.5, 0.5), vec3(1.0, 0.1, -0.1), true),
        ];
        for (o, d, expected) in cases {
            let inv_dir = vec3(1.0 / d.x, 1.0 / d.y, 1.0 / d.z);
            let hit = b.intersect_p_with_inv_dir(o, f32::INFINITY, inv_dir, dir_is_neg(inv_dir));
            assert_eq!(hit, expected, "o = {}, d = {}", o, d);
            assert_eq!(b.intersect_p(o, d, f32::INFINITY).is_some(), expected);
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            format!("{:.1}", unit_cube()),
            "[ [0.0, 0.0, 0.0] - [1.0, 1.0, 1.0] ]"
        );
    }
}
