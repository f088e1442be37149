//! Geometry primitives used by every culling stage.
//!
//! Pure value types: bounding volumes, planes and a small convex polytope
//! used to clip frustum slices against scene bounds.

mod aabb;
mod sphere;
mod plane;
mod hull;

pub use aabb::AABB;
pub use sphere::Sphere;
pub use plane::Plane;
pub use hull::{ConvexHull, hull_planes_from_corners};
