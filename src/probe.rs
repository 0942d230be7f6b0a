//! Randomized robustness sweeps over the math and geometry crates.
//!
//! Every sweep draws `samples` independent cases in parallel and counts the ones that violate a
//! conservativeness guarantee: an interval that fails to enclose the exact result, a ray aimed
//! inside a box that reports a miss, or a spawned ray origin left inside its error box.

use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use rayon::prelude::*;

use geometry::bounds::{dir_is_neg, Bounds3f};
use geometry::ray::{offset_ray_origin, Ray};
use math::interval::{self, FloatInterval};
use math::{point3, vec3, Normal3f, Point3f, Point3fi, Vector3f};

use crate::cli_options::Check;

/// Number of failing cases echoed to the log per sweep.
const REPORTED_FAILURES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub check: Check,
    pub samples: usize,
    pub failures: usize,
}

/// Runs the sweeps selected by `check` and returns one summary for each.
pub fn run(check: Check, samples: usize) -> Vec<Summary> {
    let sweeps: [(Check, fn(&mut ThreadRng) -> Result<(), String>); 3] = [
        (Check::Interval, interval_case),
        (Check::Bounds, bounds_case),
        (Check::Spawn, spawn_case),
    ];
    sweeps
        .into_iter()
        .filter(|(c, _)| check.includes(*c))
        .map(|(c, case)| sweep(c, samples, case))
        .collect()
}

fn sweep<F>(check: Check, samples: usize, case: F) -> Summary
where
    F: Fn(&mut ThreadRng) -> Result<(), String> + Sync,
{
    debug!("Sweeping {} with {} samples", check, samples);
    let failures = (0..samples)
        .into_par_iter()
        .map_init(rand::thread_rng, |rng, _| case(rng))
        .filter_map(|result| result.err())
        .collect::<Vec<_>>();

    for message in failures.iter().take(REPORTED_FAILURES) {
        warn!("[{}] {}", check, message);
    }
    let summary = Summary {
        check,
        samples,
        failures: failures.len(),
    };
    info!(
        "{:>8}: {} / {} cases failed",
        check, summary.failures, summary.samples
    );
    summary
}

fn random_point(rng: &mut impl Rng, range: f32) -> Point3f {
    point3(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}

fn random_unit_vector(rng: &mut impl Rng) -> Vector3f {
    loop {
        let v = vec3(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len2 = v.length_squared();
        if len2 > 1e-2 && len2 <= 1.0 {
            return v.normalize();
        }
    }
}

fn random_interval(rng: &mut impl Rng) -> FloatInterval {
    let v: f32 = rng.gen_range(-100.0..100.0);
    let err: f32 = if rng.gen_bool(0.25) {
        0.0
    } else {
        rng.gen_range(0.0..10.0)
    };
    FloatInterval::from_value_and_error(v, err)
}

fn sample_in(rng: &mut impl Rng, i: FloatInterval) -> f64 {
    let (lo, hi) = (i.lower_bound() as f64, i.upper_bound() as f64);
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

fn encloses(i: FloatInterval, exact: f64) -> bool {
    i.lower_bound() as f64 <= exact && exact <= i.upper_bound() as f64
}

/// Binary operators and the quadratic solver must enclose the exact result computed in f64
/// from points sampled inside the operands.
fn interval_case(rng: &mut ThreadRng) -> Result<(), String> {
    let (a, b) = (random_interval(rng), random_interval(rng));
    let (x, y) = (sample_in(rng, a), sample_in(rng, b));

    let products = [
        ("+", a + b, x + y),
        ("-", a - b, x - y),
        ("*", a * b, x * y),
    ];
    for (name, result, exact) in products {
        if !encloses(result, exact) {
            return Err(format!("{} {} {} = {} misses {}", a, name, b, result, exact));
        }
    }

    let (c, d) = (random_interval(rng), random_interval(rng));
    let (z, w) = (sample_in(rng, c), sample_in(rng, d));
    let dop = interval::difference_of_products(a, b, c, d);
    if !encloses(dop, x * y - z * w) {
        return Err(format!(
            "{} * {} - {} * {} = {} misses {}",
            a, b, c, d, dop, x * y - z * w
        ));
    }
    if y != 0.0 && !encloses(a / b, x / y) {
        return Err(format!("{} / {} = {} misses {}", a, b, a / b, x / y));
    }

    // (t - r0)(t - r1) with roots at least one unit apart.
    let r0: f32 = rng.gen_range(-50.0..50.0);
    let r1: f32 = r0 + rng.gen_range(1.0..50.0);
    let qb = FloatInterval::from_value(-r0) - FloatInterval::from_value(r1);
    let qc = FloatInterval::from_value(r0) * FloatInterval::from_value(r1);
    match interval::quadratic(FloatInterval::from_value(1.0), qb, qc) {
        Some((t0, t1)) if t0.contains(r0) && t1.contains(r1) => Ok(()),
        Some((t0, t1)) => Err(format!("roots {}, {} not enclosed by {} and {}", r0, r1, t0, t1)),
        None => Err(format!("roots {}, {} not found", r0, r1)),
    }
}

/// A ray aimed at a point strictly inside a box must hit it, with the target inside [t0, t1].
fn bounds_case(rng: &mut ThreadRng) -> Result<(), String> {
    let p = random_point(rng, 100.0);
    let extent = vec3(
        rng.gen_range(1.0..100.0),
        rng.gen_range(1.0..100.0),
        rng.gen_range(1.0..100.0),
    );
    let b = Bounds3f::new(p, p + extent);
    let target = b.lerp(point3(
        rng.gen_range(0.01..0.99),
        rng.gen_range(0.01..0.99),
        rng.gen_range(0.01..0.99),
    ));
    let origin = random_point(rng, 300.0);
    let ray = Ray::new(origin, target - origin);

    match b.intersect_ray(&ray, f32::INFINITY) {
        Some((t0, t1)) if t0 <= 1.0 + 1e-4 && t1 >= 1.0 - 1e-4 => {}
        Some((t0, t1)) => return Err(format!("{} hits {} at [{}, {}]", ray, b, t0, t1)),
        None => return Err(format!("{} misses {}", ray, b)),
    }

    let d = ray.dir;
    let inv_dir = vec3(1.0 / d.x, 1.0 / d.y, 1.0 / d.z);
    if !b.intersect_p_with_inv_dir(origin, f32::INFINITY, inv_dir, dir_is_neg(inv_dir)) {
        return Err(format!("{} misses {} with a precomputed inverse", ray, b));
    }
    Ok(())
}

/// Offset ray origins must land outside the error box, on the side the outgoing direction
/// points to.
fn spawn_case(rng: &mut ThreadRng) -> Result<(), String> {
    let p = random_point(rng, 10.0);
    let e = vec3(
        rng.gen_range(1e-4..1e-2),
        rng.gen_range(1e-4..1e-2),
        rng.gen_range(1e-4..1e-2),
    );
    let pi = Point3fi::from_value_and_error(p, e);
    let n = Normal3f::from(random_unit_vector(rng));
    let w = random_unit_vector(rng);
    if w.dot(n).abs() < 1e-3 {
        return Ok(());
    }

    let po = offset_ray_origin(pi, n, w);
    if (0..3).all(|i| po[i] > pi[i].lower_bound() && po[i] < pi[i].upper_bound()) {
        return Err(format!("{} is inside the error box {}", po, pi));
    }
    let side = (po - pi.midpoint()).dot(n);
    if side * w.dot(n) <= 0.0 {
        return Err(format!("{} was offset to the wrong side of {}", po, pi));
    }
    Ok(())
}
