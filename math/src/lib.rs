/// Defines useful functions for common math operations, tools and constants:
/// - The `Float` trait that the rest of the crate is generic over, with adjacent-float stepping,
/// - Error-compensated `difference_of_products()` and `gamma()` error bounds,
/// - Macros to check if two math quantities are less than / greater than (or equal to) each other.
pub mod float;

/// Conservative interval arithmetic with outward rounding: `Interval` and its free functions.
pub mod interval;

/// The `Scalar` and `Tuple` traits shared by vectors, points and normals, plus component-wise
/// helpers such as `min()`, `max()`, `lerp()` and `permute()`.
pub mod tuple;

/// 2D and 3D vectors: dot and cross products, normalization, stable angles and orthonormal bases.
pub mod vector;

/// 2D and 3D points, including `Point3fi` whose coordinates are intervals.
pub mod point;

/// Surface normals.
pub mod normal;

/// Quaternions and spherical linear interpolation.
pub mod quaternion;

pub use interval::{FloatInterval, Interval};
pub use normal::{normal3, Normal3, Normal3f};
pub use point::{point2, point3, Point2, Point2f, Point2i, Point3, Point3f, Point3fi, Point3i};
pub use quaternion::Quaternion;
pub use tuple::{Limits, Scalar, Tuple};
pub use vector::{vec2, vec3, Vector2, Vector2f, Vector2i, Vector3, Vector3f, Vector3fi, Vector3i};
