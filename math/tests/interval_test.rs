use rand::Rng;

use math::interval::{self, Interval};

type Fi = Interval<f32>;

fn encloses(i: Fi, exact: f64) -> bool {
    i.lower_bound() as f64 <= exact && exact <= i.upper_bound() as f64
}

/// Picks a random interval around a random center, sometimes degenerate.
fn random_interval(rng: &mut impl Rng) -> Fi {
    let center = rng.gen_range(-100.0f32..100.0);
    if rng.gen_bool(0.2) {
        Fi::from_value(center)
    } else {
        Fi::from_value_and_error(center, rng.gen_range(0.0f32..4.0))
    }
}

/// Picks a random float inside `i`.
fn sample(rng: &mut impl Rng, i: Fi) -> f32 {
    if i.width() == 0.0 {
        i.lower_bound()
    } else {
        rng.gen_range(i.lower_bound()..=i.upper_bound())
    }
}

/// For any floats taken from the operands, the exact result of the operation must lie in the
/// result interval. Products and sums of two `f32`s are exact in `f64`.
#[test]
fn arithmetic_encloses_exact_results() {
    let mut rng = rand::thread_rng();
    for _ in 0..20000 {
        let (a, b) = (random_interval(&mut rng), random_interval(&mut rng));
        let (x, y) = (sample(&mut rng, a), sample(&mut rng, b));
        let (xd, yd) = (x as f64, y as f64);

        assert!(encloses(a + b, xd + yd), "{} + {} !~ {}", a, b, xd + yd);
        assert!(encloses(a - b, xd - yd), "{} - {} !~ {}", a, b, xd - yd);
        assert!(encloses(a * b, xd * yd), "{} * {} !~ {}", a, b, xd * yd);
        if !b.contains(0.0) {
            assert!(encloses(a / b, xd / yd), "{} / {} !~ {}", a, b, xd / yd);
        } else {
            let q = a / b;
            assert!(a.exactly(0.0) || q == Fi::unbounded(), "{} / {} = {}", a, b, q);
        }
        assert!(encloses(interval::sqr(a), xd * xd));
        assert!(encloses(interval::abs(a), xd.abs()));
        assert!(encloses(interval::fma(a, b, a), xd * yd + xd));
        if a.lower_bound() >= 0.0 {
            assert!(encloses(interval::sqrt(a), xd.sqrt()));
        }
    }
}

#[test]
fn scalar_operands_are_promoted() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let a = random_interval(&mut rng);
        let s = rng.gen_range(-10.0f32..10.0);
        let x = sample(&mut rng, a) as f64;
        assert!(encloses(a * s, x * s as f64));
        assert!(encloses(s * a, x * s as f64));
        assert!(encloses(a + s, x + s as f64));
        assert!(encloses(s - a, s as f64 - x));
    }
}

#[test]
fn value_and_error_encloses_both_ends() {
    let mut rng = rand::thread_rng();
    for _ in 0..10000 {
        let v = rng.gen_range(-1e4f32..1e4);
        let err = rng.gen_range(0.0f32..10.0);
        let i = Fi::from_value_and_error(v, err);
        assert!(encloses(i, v as f64 - err as f64));
        assert!(encloses(i, v as f64 + err as f64));
    }
}

#[test]
fn difference_of_products_encloses_and_is_tight() {
    let mut rng = rand::thread_rng();
    for _ in 0..10000 {
        let (a, b, c, d) = (
            random_interval(&mut rng),
            random_interval(&mut rng),
            random_interval(&mut rng),
            random_interval(&mut rng),
        );
        let (x, y, z, w) = (
            sample(&mut rng, a) as f64,
            sample(&mut rng, b) as f64,
            sample(&mut rng, c) as f64,
            sample(&mut rng, d) as f64,
        );
        let dop = interval::difference_of_products(a, b, c, d);
        assert!(encloses(dop, x * y - z * w), "{} !~ {}", dop, x * y - z * w);
    }

    // Nearly cancelling products of exact values.
    let a = Fi::from_value(1.1);
    let c = Fi::from_value(1.1f32 * 1.1f32);
    let one = Fi::from_value(1.0);
    let exact = 1.1f32 as f64 * 1.1f32 as f64 - (1.1f32 * 1.1f32) as f64;
    let dop = interval::difference_of_products(a, a, c, one);
    let naive = a * a - c * one;
    assert!(encloses(dop, exact));
    assert!(encloses(naive, exact));
    assert!(dop.width() < naive.width(), "{} vs {}", dop, naive);
}

#[test]
fn quadratic_encloses_roots() {
    let mut rng = rand::thread_rng();
    for _ in 0..10000 {
        let r0 = rng.gen_range(-10.0f32..10.0);
        let r1 = r0 + rng.gen_range(1.0f32..10.0);
        let a = rng.gen_range(0.5f32..2.0);
        let (b, c) = (-a * (r0 + r1), a * r0 * r1);

        // Exact roots of the polynomial with the rounded coefficients.
        let (ad, bd, cd) = (a as f64, b as f64, c as f64);
        let disc = (bd * bd - 4.0 * ad * cd).sqrt();
        let q = if bd < 0.0 {
            -0.5 * (bd - disc)
        } else {
            -0.5 * (bd + disc)
        };
        let (e0, e1) = (q / ad, cd / q);
        let (e0, e1) = if e0 < e1 { (e0, e1) } else { (e1, e0) };

        let (t0, t1) = interval::quadratic(Fi::from_value(a), Fi::from_value(b), Fi::from_value(c))
            .expect("distinct real roots");
        assert!(encloses(t0, e0), "{} !~ {}", t0, e0);
        assert!(encloses(t1, e1), "{} !~ {}", t1, e1);
        assert!(t0.lower_bound() <= t1.lower_bound());
    }
}

#[test]
fn quadratic_without_real_roots() {
    let one = Fi::from_value(1.0);
    assert_eq!(interval::quadratic(one, Fi::from_value(0.0), one), None);
}
