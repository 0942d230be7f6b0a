/// Defines the `Bounds2` and `Bounds3` axis-aligned box types, including the robust slab test
/// of a ray against a box.
pub mod bounds;

/// Defines `Ray` and `RayDifferential`, and the helpers that spawn rays off a surface point
/// without self-intersection.
pub mod ray;

pub use bounds::{Bounds2, Bounds2f, Bounds2i, Bounds3, Bounds3f, Bounds3i};
pub use ray::{MediumHandle, Ray, RayDifferential};
