use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::tuple::Limits;

pub const PI: f32 = std::f32::consts::PI;
pub const PI_OVER_2: f32 = std::f32::consts::FRAC_PI_2;

/// Unit roundoff of `f32`: half the distance between 1 and the next float. This is the
/// bound on the relative error of a single correctly-rounded operation, and is what
/// `gamma()` is expressed in. Not to be confused with `f32::EPSILON`, which is twice as big.
pub const MACHINE_EPSILON: f32 = f32::EPSILON * 0.5;

/// The float right after 1.0.
pub const ONE_PLUS_EPSILON: f32 = 1.0 + f32::EPSILON;

/// Conservative bound on the relative error accumulated by `n` chained floating-point
/// operations: `n * eps / (1 - n * eps)`.
/// ```
/// use math::float::{gamma, MACHINE_EPSILON};
/// assert!(gamma(3) > 3.0 * MACHINE_EPSILON);
/// assert!(gamma(3) < 3.0 * MACHINE_EPSILON * 1.0001);
/// ```
pub const fn gamma(n: i32) -> f32 {
    let n = n as f32;
    (n * MACHINE_EPSILON) / (1.0 - n * MACHINE_EPSILON)
}

/// Floating-point scalar types the geometry layer is generic over (`f32` and `f64`).
///
/// Besides the usual arithmetic, a `Float` knows how to step to its adjacent representable
/// values, which is what the interval arithmetic needs for outward rounding. `ZERO`, `ONE`,
/// `abs()` and `is_nan()` come from `Scalar`, the finite range from `Limits`.
pub trait Float:
    Limits + Debug + Display + AddAssign + SubAssign + MulAssign + DivAssign
{
    const HALF: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const MACHINE_EPSILON: Self;
    const PI: Self;

    fn from_f64(x: f64) -> Self;

    /// Returns the smallest representable value greater than `self`. `+inf` stays where it is,
    /// and both zeros step to the smallest positive subnormal.
    fn next_up(self) -> Self;
    /// Returns the greatest representable value less than `self`. `-inf` stays where it is,
    /// and both zeros step to the smallest negative subnormal.
    fn next_down(self) -> Self;

    fn is_infinite(self) -> bool;
    fn sqrt(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn log2(self) -> Self;
    fn copysign(self, sign: Self) -> Self;
    fn mul_add(self, a: Self, b: Self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;

    /// Computes `x / y` if y is nonzero; returns `None` if y is zero.
    /// ```
    /// use math::float::Float;
    /// assert_eq!(1.0f32.try_divide(0.0), None);
    /// assert_eq!(1.0f32.try_divide(2.5), Some(0.4));
    /// assert_eq!(0.0f32.try_divide(0.0), None);
    /// ```
    fn try_divide(self, divisor: Self) -> Option<Self> {
        if divisor == Self::ZERO {
            None
        } else {
            Some(self / divisor)
        }
    }
}

macro_rules! impl_float {
    ($t:ident, $bits:ty) => {
        impl Float for $t {
            const HALF: Self = 0.5;
            const INFINITY: Self = $t::INFINITY;
            const NEG_INFINITY: Self = $t::NEG_INFINITY;
            const MACHINE_EPSILON: Self = $t::EPSILON * 0.5;
            const PI: Self = std::$t::consts::PI;

            fn from_f64(x: f64) -> Self {
                x as $t
            }

            fn next_up(self) -> Self {
                if self.is_infinite() && self > 0.0 {
                    return self;
                }
                // Folds -0.0 into +0.0 so that the bit increment below moves away from zero.
                let v = if self == 0.0 { 0.0 } else { self };
                let bits: $bits = v.to_bits();
                let bits = if v >= 0.0 { bits + 1 } else { bits - 1 };
                $t::from_bits(bits)
            }

            fn next_down(self) -> Self {
                if self.is_infinite() && self < 0.0 {
                    return self;
                }
                let v = if self == 0.0 { -0.0 } else { self };
                let bits: $bits = v.to_bits();
                let bits = if v > 0.0 { bits - 1 } else { bits + 1 };
                $t::from_bits(bits)
            }

            fn is_infinite(self) -> bool {
                $t::is_infinite(self)
            }
            fn sqrt(self) -> Self {
                $t::sqrt(self)
            }
            fn floor(self) -> Self {
                $t::floor(self)
            }
            fn ceil(self) -> Self {
                $t::ceil(self)
            }
            fn sin(self) -> Self {
                $t::sin(self)
            }
            fn cos(self) -> Self {
                $t::cos(self)
            }
            fn asin(self) -> Self {
                $t::asin(self)
            }
            fn acos(self) -> Self {
                $t::acos(self)
            }
            fn log2(self) -> Self {
                $t::log2(self)
            }
            fn copysign(self, sign: Self) -> Self {
                $t::copysign(self, sign)
            }
            fn mul_add(self, a: Self, b: Self) -> Self {
                $t::mul_add(self, a, b)
            }
            fn min(self, other: Self) -> Self {
                $t::min(self, other)
            }
            fn max(self, other: Self) -> Self {
                $t::max(self, other)
            }
        }
    };
}

impl_float!(f32, u32);
impl_float!(f64, u64);

pub fn next_float_up<F: Float>(v: F) -> F {
    v.next_up()
}

pub fn next_float_down<F: Float>(v: F) -> F {
    v.next_down()
}

/// Computes `a * b - c * d` with Kahan's FMA-based algorithm; the result is within 1.5 ulps of
/// the exact value even when the two products nearly cancel.
/// ```
/// use math::float::difference_of_products;
/// let (a, b) = (1.1f32, 1.1f32);
/// let c = a * b;
/// let exact = a as f64 * b as f64 - c as f64;
/// assert_eq!(difference_of_products(a, b, c, 1.0) as f64, exact);
/// ```
pub fn difference_of_products<F: Float>(a: F, b: F, c: F, d: F) -> F {
    let cd = c * d;
    let diff = a.mul_add(b, -cd);
    let error = (-c).mul_add(d, cd);
    diff + error
}

pub fn sum_of_products<F: Float>(a: F, b: F, c: F, d: F) -> F {
    difference_of_products(a, b, -c, d)
}

/// Computes sin(x) / x, returning 1 near zero where the quotient is ill-conditioned.
pub fn sin_x_over_x<F: Float>(x: F) -> F {
    if x * x + F::ONE == F::ONE {
        F::ONE
    } else {
        x.sin() / x
    }
}

/// Scalar `(1 - t) * a + t * b`.
pub fn lerp_scalar<F: Float>(t: F, a: F, b: F) -> F {
    (F::ONE - t) * a + t * b
}

/// `asin` with the argument clamped to [-1, 1], for inputs that rounding may have pushed just
/// out of the domain.
pub fn safe_asin<F: Float>(x: F) -> F {
    debug_assert!(x >= F::from_f64(-1.0001) && x <= F::from_f64(1.0001));
    x.max(-F::ONE).min(F::ONE).asin()
}

pub fn min_max<F: Float>(a: F, b: F) -> (F, F) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[macro_export]
macro_rules! assert_le {
    ($left:expr, $right:expr) => {
        if $left > $right {
            panic!(
                "Assertion failed: {} <= {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}

#[macro_export]
macro_rules! assert_lt {
    ($left:expr, $right:expr) => {
        if $left >= $right {
            panic!(
                "Assertion failed: {} < {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}

#[macro_export]
macro_rules! assert_gt {
    ($left:expr, $right:expr) => {
        if $left <= $right {
            panic!(
                "Assertion failed: {} > {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}

#[macro_export]
macro_rules! assert_ge {
    ($left:expr, $right:expr) => {
        if $left < $right {
            panic!(
                "Assertion failed: {} >= {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}

/// Same as `assert_le!` but only checked in debug builds.
#[macro_export]
macro_rules! debug_assert_le {
    ($left:expr, $right:expr) => {
        if cfg!(debug_assertions) {
            $crate::assert_le!($left, $right)
        }
    };
}

#[macro_export]
macro_rules! debug_assert_ge {
    ($left:expr, $right:expr) => {
        if cfg!(debug_assertions) {
            $crate::assert_ge!($left, $right)
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn next_float_steps_across_zero() {
        let tiny = f32::from_bits(1);
        assert_eq!(next_float_up(0.0f32), tiny);
        assert_eq!(next_float_up(-0.0f32), tiny);
        assert_eq!(next_float_down(0.0f32), -tiny);
        assert_eq!(next_float_down(-0.0f32), -tiny);
        assert_eq!(next_float_up(-tiny), 0.0);
        assert_eq!(next_float_down(tiny), 0.0);

        let tiny = f64::from_bits(1);
        assert_eq!(Float::next_up(0.0f64), tiny);
        assert_eq!(Float::next_up(-0.0f64), tiny);
        assert_eq!(Float::next_down(0.0f64), -tiny);
        assert_eq!(Float::next_down(-0.0f64), -tiny);
        assert_eq!(Float::next_up(-tiny), 0.0);
        assert_eq!(Float::next_down(tiny), 0.0);
    }

    #[test]
    fn next_float_saturates_at_infinity() {
        assert_eq!(next_float_up(f32::INFINITY), f32::INFINITY);
        assert_eq!(next_float_down(f32::NEG_INFINITY), f32::NEG_INFINITY);
        assert_eq!(next_float_up(f32::MAX), f32::INFINITY);
        assert_eq!(next_float_down(f32::INFINITY), f32::MAX);
        assert_eq!(next_float_up(f32::NEG_INFINITY), f32::MIN);
        assert_eq!(next_float_down(-f32::MAX), f32::NEG_INFINITY);

        assert_eq!(next_float_up(f64::INFINITY), f64::INFINITY);
        assert_eq!(next_float_down(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_eq!(next_float_up(f64::NEG_INFINITY), f64::MIN);
        assert_eq!(next_float_down(f64::INFINITY), f64::MAX);
    }

    #[test]
    fn next_float_is_adjacent() {
        for v in [1.0f32, -1.0, 3.5e-20, -7.25e12, 0.1] {
            let up = next_float_up(v);
            let down = next_float_down(v);
            assert!(down < v && v < up);
            let stepped = if v > 0.0 { v.to_bits() + 1 } else { v.to_bits() - 1 };
            assert_eq!(up.to_bits(), stepped);
            assert_eq!(next_float_down(up), v);
            assert_eq!(next_float_up(down), v);
        }
        for v in [1.0f64, -2.5, 1e-300, -4.0e200] {
            let up = next_float_up(v);
            let down = next_float_down(v);
            assert!(down < v && v < up);
            assert_eq!(next_float_down(up), v);
            assert_eq!(next_float_up(down), v);
        }
        assert_eq!(next_float_up(1.0f32), ONE_PLUS_EPSILON);
        assert_eq!(next_float_down(ONE_PLUS_EPSILON), 1.0);
        assert_eq!(next_float_up(1.0f64) - 1.0, f64::EPSILON);
    }

    #[test]
    fn sin_x_over_x_limits() {
        assert_eq!(sin_x_over_x(0.0f32), 1.0);
        assert!((sin_x_over_x(PI_OVER_2) - 2.0 / PI).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn assert_le_panics() {
        assert_le!(2.0f32, 1.0f32);
    }
}
