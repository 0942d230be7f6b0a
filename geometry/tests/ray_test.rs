use rand::Rng;

use geometry::ray::{offset_ray_origin, spawn_ray, spawn_ray_between, spawn_ray_to};
use math::{normal3, point3, vec3, Normal3f, Point3f, Point3fi, Vector3f};

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

/// A surface point somewhere in [-10, 10]^3 with a small, random error on each axis.
fn random_surface_point(rng: &mut impl Rng) -> Point3fi {
    let p = point3(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    );
    let e = vec3(
        rng.gen_range(1e-4..1e-2),
        rng.gen_range(1e-4..1e-2),
        rng.gen_range(1e-4..1e-2),
    );
    Point3fi::from_value_and_error(p, e)
}

/// True if `p` lies strictly inside the error box of `pi` on every axis.
fn strictly_inside(p: Point3f, pi: Point3fi) -> bool {
    (0..3).all(|i| p[i] > pi[i].lower_bound() && p[i] < pi[i].upper_bound())
}

#[test]
fn offset_origin_leaves_error_box_on_side_of_w() {
    let mut rng = rand::thread_rng();
    for _ in 0..20000 {
        let pi = random_surface_point(&mut rng);
        let n = Normal3f::from(random_unit_vector(&mut rng));
        let w = random_unit_vector(&mut rng);
        if w.dot(n).abs() < 1e-3 {
            continue;
        }

        let po = offset_ray_origin(pi, n, w);
        assert!(!strictly_inside(po, pi), "{} is inside the error box {}", po, pi);

        let side = (po - pi.midpoint()).dot(n);
        assert!(side * w.dot(n) > 0.0, "offset {} on the wrong side", side);
    }
}

#[test]
fn spawn_ray_keeps_direction_and_time() {
    let pi = random_surface_point(&mut rand::thread_rng());
    let n = normal3(0.0, 1.0, 0.0);
    let d = vec3(0.2, 0.9, 0.1);
    let ray = spawn_ray(pi, n, 0.75, d);
    assert_eq!(ray.dir, d);
    assert_eq!(ray.time, 0.75);
    assert_eq!(ray.medium, None);
    assert_eq!(ray.origin, offset_ray_origin(pi, n, d));
    assert!(ray.origin.y > pi.y.upper_bound() || ray.origin.y == pi.y.upper_bound());
}

#[test]
fn spawn_ray_to_reaches_target_at_one() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let pi = random_surface_point(&mut rng);
        let n = Normal3f::from(random_unit_vector(&mut rng));
        let target = point3(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        let ray = spawn_ray_to(pi, n, 0.0, target);
        assert_eq!(ray.dir, target - pi.midpoint());
        // The origin moved by at most the size of the error box, and so does the end point.
        let slack = pi.error().length() * 2.0 + 1e-4;
        assert!(ray.position_at(1.0).distance(target) <= slack);
    }
}

#[test]
fn spawn_ray_between_offsets_both_ends() {
    let from = Point3fi::from_value_and_error(point3(0.0, 0.0, 0.0), vec3(1e-3, 1e-3, 1e-3));
    let to = Point3fi::from_value_and_error(point3(0.0, 0.0, 5.0), vec3(1e-3, 1e-3, 1e-3));
    let n_from = normal3(0.0, 0.0, 1.0);
    let n_to = normal3(0.0, 0.0, -1.0);

    let ray = spawn_ray_between(from, n_from, 0.5, to, n_to);
    assert_eq!(ray.time, 0.5);
    let start = ray.origin;
    let end = ray.position_at(1.0);
    assert!(start.z >= from.z.upper_bound(), "start = {}", start);
    assert!(end.z <= to.z.lower_bound(), "end = {}", end);
    assert!(end.z > start.z);
    assert_eq!(start.x, 0.0);
    assert_eq!(end.x, 0.0);
}
