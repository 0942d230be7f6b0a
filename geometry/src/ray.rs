use std::fmt::{Display, Formatter, Result};
use std::ops::{Deref, DerefMut};

use math::float::Float;
use math::tuple;
use math::{Normal3f, Point3f, Point3fi, Vector3f};

/// Opaque identifier of the participating medium a ray travels through. This crate never looks
/// inside it; it is carried along so that whoever owns the media can resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediumHandle(pub u32);

/// Represents a ray:
///
///   origin + t * direction
///
/// The direction is not required to be normalized, so `t` measures distance in units of
/// `|dir|`. A ray also carries the time at which it is traced and, optionally, the medium that
/// its origin lies in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3f,
    pub dir: Vector3f,
    pub time: f32,
    pub medium: Option<MediumHandle>,
}

impl Ray {
    pub fn new(origin: Point3f, dir: Vector3f) -> Self {
        Ray {
            origin,
            dir,
            time: 0.0,
            medium: None,
        }
    }

    pub fn with_time(self, time: f32) -> Self {
        Ray { time, ..self }
    }

    pub fn with_medium(self, medium: MediumHandle) -> Self {
        Ray {
            medium: Some(medium),
            ..self
        }
    }

    pub fn position_at(&self, t: f32) -> Point3f {
        self.origin + self.dir * t
    }

    pub fn has_nan(&self) -> bool {
        self.origin.has_nan() || self.dir.has_nan()
    }
}

impl Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "{:.precision$} + t{:.precision$}",
            self.origin,
            self.dir,
            precision = precision
        )
    }
}

/// A ray together with two auxiliary rays offset by one pixel in x and y on the film, used to
/// estimate the footprint of the main ray for texture filtering. The auxiliary rays are only
/// meaningful when `has_differentials` is set.
///
/// Derefs to the main `Ray`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayDifferential {
    pub ray: Ray,
    pub has_differentials: bool,
    pub rx_origin: Point3f,
    pub ry_origin: Point3f,
    pub rx_direction: Vector3f,
    pub ry_direction: Vector3f,
}

impl RayDifferential {
    pub fn new(origin: Point3f, dir: Vector3f) -> Self {
        Ray::new(origin, dir).into()
    }

    /// Sets the auxiliary rays and marks the differentials as present.
    pub fn with_differentials(
        self,
        rx_origin: Point3f,
        rx_direction: Vector3f,
        ry_origin: Point3f,
        ry_direction: Vector3f,
    ) -> Self {
        RayDifferential {
            has_differentials: true,
            rx_origin,
            ry_origin,
            rx_direction,
            ry_direction,
            ..self
        }
    }

    /// Rescales the offsets of the auxiliary rays from the main ray by `s`, e.g. when taking
    /// several samples per pixel the spacing between them shrinks accordingly.
    pub fn scale_differentials(&mut self, s: f32) {
        let Ray { origin, dir, .. } = self.ray;
        self.rx_origin = origin + (self.rx_origin - origin) * s;
        self.ry_origin = origin + (self.ry_origin - origin) * s;
        self.rx_direction = dir + (self.rx_direction - dir) * s;
        self.ry_direction = dir + (self.ry_direction - dir) * s;
    }

    pub fn has_nan(&self) -> bool {
        self.ray.has_nan()
            || (self.has_differentials
                && (self.rx_origin.has_nan()
                    || self.ry_origin.has_nan()
                    || self.rx_direction.has_nan()
                    || self.ry_direction.has_nan()))
    }
}

impl From<Ray> for RayDifferential {
    fn from(ray: Ray) -> Self {
        RayDifferential {
            ray,
            has_differentials: false,
            rx_origin: Point3f::default(),
            ry_origin: Point3f::default(),
            rx_direction: Vector3f::default(),
            ry_direction: Vector3f::default(),
        }
    }
}

impl Deref for RayDifferential {
    type Target = Ray;
    fn deref(&self) -> &Ray {
        &self.ray
    }
}

impl DerefMut for RayDifferential {
    fn deref_mut(&mut self) -> &mut Ray {
        &mut self.ray
    }
}

impl Display for RayDifferential {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let precision = f.precision().unwrap_or(2);
        write!(f, "{:.p$}", self.ray, p = precision)?;
        if self.has_differentials {
            write!(
                f,
                " (dx: {:.p$} + t{:.p$}, dy: {:.p$} + t{:.p$})",
                self.rx_origin,
                self.rx_direction,
                self.ry_origin,
                self.ry_direction,
                p = precision
            )?;
        }
        Ok(())
    }
}

/// Moves the center of the error box `pi` along the normal far enough that the result is
/// guaranteed to be outside the box, on the side that `w` points to. A ray leaving from the
/// returned point cannot re-intersect the surface that `pi` was computed on.
pub fn offset_ray_origin(pi: Point3fi, n: Normal3f, w: Vector3f) -> Point3f {
    let d = tuple::abs(n).dot(pi.error());
    let mut offset = Vector3f::from(n) * d;
    if w.dot(n) < 0.0 {
        offset = -offset;
    }
    let mut po = pi.midpoint() + offset;

    // The addition above may have rounded back towards the surface.
    for i in 0..3 {
        if offset[i] > 0.0 {
            po[i] = Float::next_up(po[i]);
        } else if offset[i] < 0.0 {
            po[i] = Float::next_down(po[i]);
        }
    }
    po
}

/// Spawns a ray in direction `d` from a surface point with error bounds `pi` and normal `n`.
pub fn spawn_ray(pi: Point3fi, n: Normal3f, time: f32, d: Vector3f) -> Ray {
    Ray::new(offset_ray_origin(pi, n, d), d).with_time(time)
}

/// Spawns a ray from a surface point towards `p_to`. The direction is left unnormalized, so
/// `t = 1` is (approximately) at `p_to`.
pub fn spawn_ray_to(p_from: Point3fi, n: Normal3f, time: f32, p_to: Point3f) -> Ray {
    let d = p_to - p_from.midpoint();
    spawn_ray(p_from, n, time, d)
}

/// Spawns a ray between two surface points, offsetting both ends off their surfaces. Useful for
/// shadow rays, which must not hit either endpoint's surface.
pub fn spawn_ray_between(
    p_from: Point3fi,
    n_from: Normal3f,
    time: f32,
    p_to: Point3fi,
    n_to: Normal3f,
) -> Ray {
    let pf = offset_ray_origin(p_from, n_from, p_to.midpoint() - p_from.midpoint());
    let pt = offset_ray_origin(p_to, n_to, pf - p_to.midpoint());
    Ray::new(pf, pt - pf).with_time(time)
}
