/// Axis-aligned bounding box stored as center + extent.
///
/// The extent is the half-size on each axis. A zero extent is a valid
/// (degenerate) box that behaves like a point in every test.

use glam::{Mat4, Vec3};
use super::sphere::Sphere;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Center of the box
    pub center: Vec3,
    /// Half-size on each axis (non-negative)
    pub extent: Vec3,
}

impl AABB {
    /// Zero-sized box at the origin
    pub const ZERO: AABB = AABB { center: Vec3::ZERO, extent: Vec3::ZERO };

    pub const fn new(center: Vec3, extent: Vec3) -> Self {
        Self { center, extent }
    }

    /// Build from min/max corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            extent: (max - min) * 0.5,
        }
    }

    /// Smallest box enclosing all points, `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest.iter().fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self::from_min_max(min, max))
    }

    /// Box enclosing a sphere.
    pub fn from_sphere(sphere: &Sphere) -> Self {
        Self {
            center: sphere.center,
            extent: Vec3::splat(sphere.radius),
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.extent
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.extent
    }

    /// Transform this box by an affine matrix, returning the enclosing box.
    ///
    /// Arvo's method on center/extent form: the center is transformed as a
    /// point and the extent is projected on the absolute 3x3 part.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let center = matrix.transform_point3(self.center);
        let extent = matrix.x_axis.truncate().abs() * self.extent.x
            + matrix.y_axis.truncate().abs() * self.extent.y
            + matrix.z_axis.truncate().abs() * self.extent.z;
        AABB { center, extent }
    }

    /// True if the two boxes overlap or touch.
    pub fn intersects(&self, other: &AABB) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.extent + other.extent;
        delta.x <= reach.x && delta.y <= reach.y && delta.z <= reach.z
    }

    /// True if `other` lies entirely within `self`.
    pub fn contains(&self, other: &AABB) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());
        min.cmple(other_min).all() && max.cmpge(other_max).all()
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).abs().cmple(self.extent).all()
    }

    /// Grow to enclose another box.
    pub fn encapsulate(&mut self, other: &AABB) {
        *self = self.union(other);
    }

    /// Smallest box enclosing both.
    pub fn union(&self, other: &AABB) -> AABB {
        AABB::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// The 8 corners, bit0 = X, bit1 = Y, bit2 = Z (0 = min, 1 = max).
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min(), self.max());
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
        }
        corners
    }

    /// Squared distance from a point to the box (0 inside).
    pub fn squared_distance_to_point(&self, point: Vec3) -> f32 {
        let outside = ((point - self.center).abs() - self.extent).max(Vec3::ZERO);
        outside.length_squared()
    }

    /// Bounding sphere of the box.
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::new(self.center, self.extent.length())
    }

    /// False if any component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.extent.is_finite()
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
