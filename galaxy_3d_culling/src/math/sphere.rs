/// Bounding sphere (center + radius).

use glam::Vec3;
use super::aabb::AABB;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere around a set of points: centroid plus farthest point.
    ///
    /// Not minimal, but stable for a fixed point layout. `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let radius = points.iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0f32, f32::max)
            .sqrt();
        Some(Self { center, radius })
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }

    pub fn intersects(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    /// Exact sphere/box overlap (closest-point distance).
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.squared_distance_to_point(self.center) <= self.radius * self.radius
    }
}

#[cfg(test)]
#[path = "sphere_tests.rs"]
mod tests;
