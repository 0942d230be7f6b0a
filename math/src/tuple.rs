//! Component storage shared by vectors, points and normals.
//!
//! The tagged types (`Vector3`, `Point3`, `Normal3`, ...) are distinct structs so that the type
//! system rejects meaningless arithmetic such as adding two points. What they have in common is
//! captured by the `Tuple<N>` trait: conversion to and from a fixed-size array of components. The
//! component-wise helpers in this module (`abs`, `min`, `max`, `lerp`, ...) are written once
//! against that trait.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::float::Float;

/// Numeric types that can be stored in a tuple: `i32`, `f32`, `f64` and intervals.
pub trait Scalar:
    Copy
    + Default
    + PartialEq
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const ONE: Self;

    fn is_nan(self) -> bool;
    fn abs(self) -> Self;

    /// `a * b - c * d`. Floating-point scalars override this with an error-compensated version.
    fn difference_of_products(a: Self, b: Self, c: Self, d: Self) -> Self {
        a * b - c * d
    }
}

/// Scalars with a finite representable range, used to build inverted (empty) bounds.
pub trait Limits: Scalar + PartialOrd {
    const LOWEST: Self;
    const HIGHEST: Self;
}

impl Scalar for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    fn is_nan(self) -> bool {
        false
    }
    fn abs(self) -> Self {
        i32::abs(self)
    }
}

impl Limits for i32 {
    const LOWEST: Self = i32::MIN;
    const HIGHEST: Self = i32::MAX;
}

macro_rules! impl_float_scalar {
    ($($t:ident),*) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                fn is_nan(self) -> bool {
                    $t::is_nan(self)
                }
                fn abs(self) -> Self {
                    $t::abs(self)
                }
                fn difference_of_products(a: Self, b: Self, c: Self, d: Self) -> Self {
                    crate::float::difference_of_products(a, b, c, d)
                }
            }

            impl Limits for $t {
                const LOWEST: Self = $t::MIN;
                const HIGHEST: Self = $t::MAX;
            }
        )*
    };
}

impl_float_scalar!(f32, f64);

/// A fixed-size aggregate of `N` scalar components.
pub trait Tuple<const N: usize>: Copy {
    type Elem: Scalar;

    fn to_array(self) -> [Self::Elem; N];
    fn from_array(components: [Self::Elem; N]) -> Self;
}

fn map<T, const N: usize>(t: T, f: impl Fn(T::Elem) -> T::Elem) -> T
where
    T: Tuple<N>,
{
    T::from_array(t.to_array().map(f))
}

fn zip_map<T, const N: usize>(a: T, b: T, f: impl Fn(T::Elem, T::Elem) -> T::Elem) -> T
where
    T: Tuple<N>,
{
    let (a, b) = (a.to_array(), b.to_array());
    T::from_array(std::array::from_fn(|i| f(a[i], b[i])))
}

pub fn has_nan<T: Tuple<N>, const N: usize>(t: T) -> bool {
    t.to_array().iter().any(|c| c.is_nan())
}

pub fn abs<T: Tuple<N>, const N: usize>(t: T) -> T {
    map(t, Scalar::abs)
}

pub fn ceil<T: Tuple<N>, const N: usize>(t: T) -> T
where
    T::Elem: Float,
{
    map(t, Float::ceil)
}

pub fn floor<T: Tuple<N>, const N: usize>(t: T) -> T
where
    T::Elem: Float,
{
    map(t, Float::floor)
}

/// Component-wise `(1 - t) * a + t * b`. Works on points as well, since no point-point addition
/// is involved.
pub fn lerp<T: Tuple<N>, const N: usize>(t: T::Elem, a: T, b: T) -> T
where
    T::Elem: Float,
{
    zip_map(a, b, |a, b| crate::float::lerp_scalar(t, a, b))
}

/// Component-wise fused `a * b + c`.
pub fn fma<T: Tuple<N>, const N: usize>(a: T::Elem, b: T, c: T) -> T
where
    T::Elem: Float,
{
    zip_map(b, c, |b, c| a.mul_add(b, c))
}

pub fn min<T: Tuple<N>, const N: usize>(a: T, b: T) -> T
where
    T::Elem: PartialOrd,
{
    zip_map(a, b, |a, b| if b < a { b } else { a })
}

pub fn max<T: Tuple<N>, const N: usize>(a: T, b: T) -> T
where
    T::Elem: PartialOrd,
{
    zip_map(a, b, |a, b| if b > a { b } else { a })
}

pub fn min_component_index<T: Tuple<N>, const N: usize>(t: T) -> usize
where
    T::Elem: PartialOrd,
{
    let c = t.to_array();
    (1..N).fold(0, |best, i| if c[i] < c[best] { i } else { best })
}

pub fn max_component_index<T: Tuple<N>, const N: usize>(t: T) -> usize
where
    T::Elem: PartialOrd,
{
    let c = t.to_array();
    (1..N).fold(0, |best, i| if c[i] > c[best] { i } else { best })
}

pub fn min_component_value<T: Tuple<N>, const N: usize>(t: T) -> T::Elem
where
    T::Elem: PartialOrd,
{
    t.to_array()[min_component_index(t)]
}

pub fn max_component_value<T: Tuple<N>, const N: usize>(t: T) -> T::Elem
where
    T::Elem: PartialOrd,
{
    t.to_array()[max_component_index(t)]
}

/// Reorders components: component `i` of the result is component `p[i]` of `t`.
pub fn permute<T: Tuple<N>, const N: usize>(t: T, p: [usize; N]) -> T {
    let c = t.to_array();
    T::from_array(p.map(|i| c[i]))
}

/// Product of all components.
pub fn hprod<T: Tuple<N>, const N: usize>(t: T) -> T::Elem {
    t.to_array()
        .iter()
        .skip(1)
        .fold(t.to_array()[0], |acc, c| acc * *c)
}

/// Implements the parts shared by every tagged tuple type: construction, the `Tuple<N>` trait,
/// indexing, scaling by a scalar, negation and `Display`.
///
/// `$open`/`$close` are the brackets used when displaying the tuple.
macro_rules! impl_tuple {
    ($name:ident, $n:literal, [$($field:ident),+], $open:literal, $close:literal) => {
        impl<T: $crate::tuple::Scalar> $name<T> {
            pub const fn new($($field: T),+) -> Self {
                Self { $($field),+ }
            }

            pub fn has_nan(&self) -> bool {
                $crate::tuple::has_nan(*self)
            }

            /// Converts every component with `f`, e.g. to change the component type.
            pub fn map<U: $crate::tuple::Scalar>(self, f: impl Fn(T) -> U) -> $name<U> {
                $name { $($field: f(self.$field)),+ }
            }
        }

        impl<T: $crate::tuple::Scalar> $crate::tuple::Tuple<$n> for $name<T> {
            type Elem = T;
            fn to_array(self) -> [T; $n] {
                [$(self.$field),+]
            }
            fn from_array(components: [T; $n]) -> Self {
                let [$($field),+] = components;
                Self { $($field),+ }
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::Index<usize> for $name<T> {
            type Output = T;
            fn index(&self, i: usize) -> &T {
                [$(&self.$field),+][i]
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::IndexMut<usize> for $name<T> {
            fn index_mut(&mut self, i: usize) -> &mut T {
                let Self { $($field),+ } = self;
                [$($field),+].into_iter().nth(i).expect("tuple index out of range")
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::Mul<T> for $name<T> {
            type Output = Self;
            fn mul(self, s: T) -> Self {
                Self { $($field: self.$field * s),+ }
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::MulAssign<T> for $name<T> {
            fn mul_assign(&mut self, s: T) {
                *self = *self * s;
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::Div<T> for $name<T> {
            type Output = Self;
            fn div(self, d: T) -> Self {
                debug_assert!(d != T::ZERO, "division of {} by zero", stringify!($name));
                Self { $($field: self.$field / d),+ }
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::DivAssign<T> for $name<T> {
            fn div_assign(&mut self, d: T) {
                *self = *self / d;
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::Neg for $name<T> {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl std::ops::Mul<$name<f32>> for f32 {
            type Output = $name<f32>;
            fn mul(self, t: $name<f32>) -> $name<f32> {
                t * self
            }
        }

        impl std::ops::Mul<$name<f64>> for f64 {
            type Output = $name<f64>;
            fn mul(self, t: $name<f64>) -> $name<f64> {
                t * self
            }
        }

        impl std::ops::Mul<$name<i32>> for i32 {
            type Output = $name<i32>;
            fn mul(self, t: $name<i32>) -> $name<i32> {
                t * self
            }
        }

        impl<T: $crate::tuple::Scalar> std::fmt::Display for $name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let precision = f.precision().unwrap_or(2);
                let components = [$(format!("{:.p$}", self.$field, p = precision)),+];
                write!(f, "{}{}{}", $open, components.join(", "), $close)
            }
        }
    };
}

/// Closed addition and subtraction, for the types where that is meaningful (vectors, normals).
macro_rules! impl_additive {
    ($name:ident, [$($field:ident),+]) => {
        impl<T: $crate::tuple::Scalar> std::ops::Add for $name<T> {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::AddAssign for $name<T> {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::Sub for $name<T> {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl<T: $crate::tuple::Scalar> std::ops::SubAssign for $name<T> {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }
    };
}

pub(crate) use impl_additive;
pub(crate) use impl_tuple;
