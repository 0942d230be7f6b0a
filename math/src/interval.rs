//! Conservative interval arithmetic.
//!
//! An `Interval` bounds a quantity that was computed with floating-point arithmetic: whatever
//! rounding happened along the way, the exact real-number result lies within
//! `[lower_bound(), upper_bound()]`. Every operation evaluates its endpoint combinations in
//! ordinary round-to-nearest arithmetic and then steps the resulting bounds one representable
//! value outward, which is enough to absorb the half-ulp error of the operation itself.
//!
//! Degenerate intervals equal to exactly 0 or 1 take fast paths that skip the outward step, as
//! operations with them are exact.

use std::fmt::{self, Display, Formatter};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign,
};

use itertools::Itertools;

use crate::float::{self, Float};
use crate::tuple::Scalar;

/// A closed range `[low, high]` on the extended real axis with `low <= high`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interval<F> {
    low: F,
    high: F,
}

pub type FloatInterval = Interval<f32>;

impl<F: Float> Interval<F> {
    /// Builds an interval spanning `a` and `b`; the endpoints may be given in either order.
    pub fn new(a: F, b: F) -> Self {
        debug_assert!(!a.is_nan() && !b.is_nan());
        let (low, high) = float::min_max(a, b);
        Self { low, high }
    }

    /// The degenerate interval `[v, v]`.
    pub fn from_value(v: F) -> Self {
        Self { low: v, high: v }
    }

    /// Builds an interval guaranteed to contain `v - err` and `v + err`. Zero error means the
    /// value is exact, and the result is `[v, v]`.
    ///
    /// This is over-conservative when `v - err` or `v + err` is exactly representable, which is
    /// not worth checking for.
    pub fn from_value_and_error(v: F, err: F) -> Self {
        debug_assert!(err >= F::ZERO, "negative error {}", err);
        if err == F::ZERO {
            Self::from_value(v)
        } else {
            Self {
                low: (v - err).next_down(),
                high: (v + err).next_up(),
            }
        }
    }

    /// Interval enclosing the real number pi.
    pub fn pi() -> Self {
        Self {
            low: F::PI.next_down(),
            high: F::PI.next_up(),
        }
    }

    /// `(-inf, +inf)`.
    pub fn unbounded() -> Self {
        Self {
            low: F::NEG_INFINITY,
            high: F::INFINITY,
        }
    }

    pub fn lower_bound(&self) -> F {
        self.low
    }

    pub fn upper_bound(&self) -> F {
        self.high
    }

    pub fn midpoint(&self) -> F {
        (self.low + self.high) * F::HALF
    }

    pub fn width(&self) -> F {
        self.high - self.low
    }

    pub fn is_nan(&self) -> bool {
        self.low.is_nan() || self.high.is_nan()
    }

    /// True if this is the degenerate interval `[v, v]`.
    pub fn exactly(&self, v: F) -> bool {
        self.low == v && self.high == v
    }

    pub fn contains(&self, v: F) -> bool {
        in_range(v, *self)
    }

    /// True if `v` lies strictly outside the interval.
    pub fn excludes(&self, v: F) -> bool {
        v < self.low || v > self.high
    }
}

impl<F: Float> From<F> for Interval<F> {
    fn from(v: F) -> Self {
        Self::from_value(v)
    }
}

impl From<Interval<f32>> for Interval<f64> {
    fn from(i: Interval<f32>) -> Self {
        Self {
            low: i.low as f64,
            high: i.high as f64,
        }
    }
}

impl From<Interval<f64>> for Interval<f32> {
    /// Narrowing may round either endpoint inward, so both are stepped outward afterwards.
    fn from(i: Interval<f64>) -> Self {
        Self {
            low: Float::next_down(i.low as f32),
            high: Float::next_up(i.high as f32),
        }
    }
}

/// Collapses an interval to its midpoint. Only meant for presentation and heuristics.
macro_rules! impl_scalar_conversion {
    ($($t:ty),*) => {
        $(
            impl From<Interval<$t>> for $t {
                fn from(i: Interval<$t>) -> $t {
                    i.midpoint()
                }
            }
        )*
    };
}

impl_scalar_conversion!(f32, f64);

impl<F> Index<usize> for Interval<F> {
    type Output = F;
    fn index(&self, i: usize) -> &F {
        match i {
            0 => &self.low,
            1 => &self.high,
            _ => panic!("invalid interval endpoint index {}", i),
        }
    }
}

impl<F: Float> Display for Interval<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "[ {:.p$} - {:.p$} ]", self.low, self.high, p = p),
            None => write!(f, "[ {} - {} ]", self.low, self.high),
        }
    }
}

/// Lets vectors and points carry interval components (`Point3fi`).
impl<F: Float> Scalar for Interval<F> {
    const ZERO: Self = Self {
        low: F::ZERO,
        high: F::ZERO,
    };
    const ONE: Self = Self {
        low: F::ONE,
        high: F::ONE,
    };

    fn is_nan(self) -> bool {
        Interval::is_nan(&self)
    }

    fn abs(self) -> Self {
        abs(self)
    }

    fn difference_of_products(a: Self, b: Self, c: Self, d: Self) -> Self {
        difference_of_products(a, b, c, d)
    }
}

/// Returns the smallest and the largest of the values.
fn extremes<F: Float>(values: [F; 4]) -> (F, F) {
    values
        .iter()
        .copied()
        .minmax()
        .into_option()
        .unwrap_or((F::NEG_INFINITY, F::INFINITY))
}

/// Returns the positions of the smallest and the largest of the values.
fn extreme_positions<F: Float>(values: [F; 4]) -> (usize, usize) {
    values.iter().position_minmax().into_option().unwrap_or((0, 3))
}

/// Evaluates `op` on all four endpoint pairs, in the order (lo, lo), (hi, lo), (lo, hi),
/// (hi, hi). Index `k` corresponds to `a[k & 1]` and `b[k >> 1]`.
fn endpoint_combinations<F: Float>(
    a: Interval<F>,
    b: Interval<F>,
    op: impl Fn(F, F) -> F,
) -> [F; 4] {
    [
        op(a.low, b.low),
        op(a.high, b.low),
        op(a.low, b.high),
        op(a.high, b.high),
    ]
}

impl<F: Float> Neg for Interval<F> {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            low: -self.high,
            high: -self.low,
        }
    }
}

impl<F: Float> Add for Interval<F> {
    type Output = Self;
    fn add(self, i: Self) -> Self {
        if self.exactly(F::ZERO) {
            return i;
        } else if i.exactly(F::ZERO) {
            return self;
        }
        Self {
            low: (self.low + i.low).next_down(),
            high: (self.high + i.high).next_up(),
        }
    }
}

impl<F: Float> Sub for Interval<F> {
    type Output = Self;
    fn sub(self, i: Self) -> Self {
        if self.exactly(F::ZERO) {
            return -i;
        } else if i.exactly(F::ZERO) {
            return self;
        }
        Self {
            low: (self.low - i.high).next_down(),
            high: (self.high - i.low).next_up(),
        }
    }
}

impl<F: Float> Mul for Interval<F> {
    type Output = Self;
    fn mul(self, i: Self) -> Self {
        if self.exactly(F::ZERO) || i.exactly(F::ZERO) {
            return Self::from_value(F::ZERO);
        }
        if self.exactly(F::ONE) {
            return i;
        }
        if i.exactly(F::ONE) {
            return self;
        }
        let (low, high) = extremes(endpoint_combinations(self, i, |a, b| a * b));
        Self {
            low: low.next_down(),
            high: high.next_up(),
        }
    }
}

impl<F: Float> Div for Interval<F> {
    type Output = Self;
    fn div(self, i: Self) -> Self {
        if self.exactly(F::ZERO) {
            // NaN from 0/0 is not a concern here.
            return Self::from_value(F::ZERO);
        }
        if i.exactly(F::ONE) {
            return self;
        }
        if i.contains(F::ZERO) {
            // The reciprocal of a range straddling zero is unbounded on both sides.
            return Self::unbounded();
        }
        let (low, high) = extremes(endpoint_combinations(self, i, |a, b| a / b));
        Self {
            low: low.next_down(),
            high: high.next_up(),
        }
    }
}

macro_rules! impl_scalar_ops {
    ($($op:ident::$method:ident, $op_assign:ident::$method_assign:ident);* $(;)?) => {
        $(
            impl<F: Float> $op<F> for Interval<F> {
                type Output = Self;
                fn $method(self, f: F) -> Self {
                    $op::$method(self, Self::from_value(f))
                }
            }

            impl<F: Float> $op_assign for Interval<F> {
                fn $method_assign(&mut self, i: Self) {
                    *self = $op::$method(*self, i);
                }
            }

            impl<F: Float> $op_assign<F> for Interval<F> {
                fn $method_assign(&mut self, f: F) {
                    *self = $op::$method(*self, Self::from_value(f));
                }
            }

            impl $op<Interval<f32>> for f32 {
                type Output = Interval<f32>;
                fn $method(self, i: Interval<f32>) -> Interval<f32> {
                    $op::$method(Interval::from_value(self), i)
                }
            }

            impl $op<Interval<f64>> for f64 {
                type Output = Interval<f64>;
                fn $method(self, i: Interval<f64>) -> Interval<f64> {
                    $op::$method(Interval::from_value(self), i)
                }
            }
        )*
    };
}

impl_scalar_ops! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
    Mul::mul, MulAssign::mul_assign;
    Div::div, DivAssign::div_assign;
}

// Free functions over intervals.
// -------------------------------------------------------------------------------------------------

pub fn in_range<F: Float>(v: F, i: Interval<F>) -> bool {
    v >= i.low && v <= i.high
}

/// True if the two intervals share at least one point.
pub fn overlaps<F: Float>(a: Interval<F>, b: Interval<F>) -> bool {
    a.low <= b.high && a.high >= b.low
}

pub fn floor<F: Float>(i: Interval<F>) -> F {
    i.low.floor()
}

pub fn ceil<F: Float>(i: Interval<F>) -> F {
    i.high.ceil()
}

/// Smallest value either interval may take.
pub fn min<F: Float>(a: Interval<F>, b: Interval<F>) -> F {
    a.low.min(b.low)
}

/// Largest value either interval may take.
pub fn max<F: Float>(a: Interval<F>, b: Interval<F>) -> F {
    a.high.max(b.high)
}

pub fn sqrt<F: Float>(i: Interval<F>) -> Interval<F> {
    Interval {
        low: i.low.sqrt().next_down().max(F::ZERO),
        high: i.high.sqrt().next_up(),
    }
}

pub fn sqr<F: Float>(i: Interval<F>) -> Interval<F> {
    let (s_low, s_high) = float::min_max(i.low * i.low, i.high * i.high);
    if i.contains(F::ZERO) {
        return Interval {
            low: F::ZERO,
            high: s_high.next_up(),
        };
    }
    Interval {
        low: s_low.next_down(),
        high: s_high.next_up(),
    }
}

pub fn abs<F: Float>(i: Interval<F>) -> Interval<F> {
    if i.low >= F::ZERO {
        i
    } else if i.high <= F::ZERO {
        -i
    } else {
        Interval {
            low: F::ZERO,
            high: (-i.low).max(i.high),
        }
    }
}

/// Encloses `a * b + c`. Each endpoint is a single fused operation, so one outward step suffices.
pub fn fma<F: Float>(a: Interval<F>, b: Interval<F>, c: Interval<F>) -> Interval<F> {
    let (low, _) = extremes(endpoint_combinations(a, b, |x, y| x.mul_add(y, c.low)));
    let (_, high) = extremes(endpoint_combinations(a, b, |x, y| x.mul_add(y, c.high)));
    Interval {
        low: low.next_down(),
        high: high.next_up(),
    }
}

/// Encloses `a * b - c * d`, tighter than evaluating the products and the difference separately.
///
/// The endpoint pair that minimises `ab` is combined with the pair that maximises `cd` for the
/// lower bound, and vice versa for the upper bound; each is evaluated with the FMA-based scalar
/// difference of products. That evaluation can be off by up to two roundings, so both bounds are
/// stepped outward twice.
pub fn difference_of_products<F: Float>(
    a: Interval<F>,
    b: Interval<F>,
    c: Interval<F>,
    d: Interval<F>,
) -> Interval<F> {
    let (ab_low, ab_high) = extreme_positions(endpoint_combinations(a, b, |x, y| x * y));
    let (cd_low, cd_high) = extreme_positions(endpoint_combinations(c, d, |x, y| x * y));

    // cd is subtracted, so the lower bound pairs with the largest cd and vice versa.
    let low = float::difference_of_products(
        a[ab_low & 1],
        b[ab_low >> 1],
        c[cd_high & 1],
        d[cd_high >> 1],
    );
    let high = float::difference_of_products(
        a[ab_high & 1],
        b[ab_high >> 1],
        c[cd_low & 1],
        d[cd_low >> 1],
    );
    crate::debug_assert_le!(low, high);

    Interval {
        low: low.next_down().next_down(),
        high: high.next_up().next_up(),
    }
}

pub fn sum_of_products<F: Float>(
    a: Interval<F>,
    b: Interval<F>,
    c: Interval<F>,
    d: Interval<F>,
) -> Interval<F> {
    difference_of_products(a, b, -c, d)
}

/// Multiplies by a power of two, which is exact barring overflow/underflow.
pub fn mul_pow2<F: Float>(i: Interval<F>, s: F) -> Interval<F> {
    debug_assert!(is_power_of_2(s), "{} is not a power of 2", s);
    Interval::new(i.low * s, i.high * s)
}

/// Encloses the sum of squares of all intervals in `terms`, clamped to be non-negative.
pub fn sum_squares<F: Float>(terms: &[Interval<F>]) -> Interval<F> {
    let (last, rest) = match terms.split_last() {
        Some(split) => split,
        None => return Interval::from_value(F::ZERO),
    };
    rest.iter().rev().fold(sqr(*last), |ss, i| {
        let ss = fma(*i, *i, ss);
        Interval {
            low: ss.low.max(F::ZERO),
            high: ss.high,
        }
    })
}

pub fn acos<F: Float>(i: Interval<F>) -> Interval<F> {
    let low = i.high.min(F::ONE).acos();
    let high = i.low.max(-F::ONE).acos();
    Interval {
        low: low.next_down().max(F::ZERO),
        high: high.next_up(),
    }
}

fn check_trig_domain<F: Float>(i: Interval<F>) {
    crate::debug_assert_ge!(i.low, F::from_f64(-1e-16));
    crate::debug_assert_le!(i.high, F::from_f64(2.0001) * F::PI);
}

/// Encloses sin over `i`, which must lie within `[0, 2pi]` (up to a small tolerance).
pub fn sin<F: Float>(i: Interval<F>) -> Interval<F> {
    check_trig_domain(i);
    let (low, high) = float::min_max(i.low.max(F::ZERO).sin(), i.high.sin());
    let mut low = low.next_down().max(-F::ONE);
    let mut high = high.next_up().min(F::ONE);
    if i.contains(F::PI * F::HALF) {
        high = F::ONE;
    }
    if i.contains(F::from_f64(1.5) * F::PI) {
        low = -F::ONE;
    }
    Interval { low, high }
}

/// Encloses cos over `i`, which must lie within `[0, 2pi]` (up to a small tolerance).
pub fn cos<F: Float>(i: Interval<F>) -> Interval<F> {
    check_trig_domain(i);
    let (low, high) = float::min_max(i.low.max(F::ZERO).cos(), i.high.cos());
    let mut low = low.next_down().max(-F::ONE);
    let high = high.next_up().min(F::ONE);
    if i.contains(F::PI) {
        low = -F::ONE;
    }
    Interval { low, high }
}

/// Solves `a t^2 + b t + c = 0` for interval coefficients.
///
/// Returns `None` unless the discriminant is certainly non-negative. Otherwise returns the two
/// roots `(t0, t1)` ordered by their lower bounds.
pub fn quadratic<F: Float>(
    a: Interval<F>,
    b: Interval<F>,
    c: Interval<F>,
) -> Option<(Interval<F>, Interval<F>)> {
    let discrim = difference_of_products(b, b, mul_pow2(a, F::from_f64(4.0)), c);
    if discrim.low < F::ZERO {
        return None;
    }
    let root_discrim = sqrt(discrim);

    // Adding quantities of the same sign avoids cancellation in q.
    let q = if b.midpoint() < F::ZERO {
        mul_pow2(b - root_discrim, -F::HALF)
    } else {
        mul_pow2(b + root_discrim, -F::HALF)
    };
    let t0 = q / a;
    let t1 = c / q;
    if t0.low > t1.low {
        Some((t1, t0))
    } else {
        Some((t0, t1))
    }
}

fn is_power_of_2<F: Float>(s: F) -> bool {
    let exponent = s.abs().log2();
    s != F::ZERO && exponent.floor() == exponent
}
