/// Plane `dot(normal, p) + distance = 0`.
///
/// The positive half-space (`distance_to_point >= 0`) is "inside": every
/// plane set in this crate describes a convex volume with inward normals.

use glam::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Inward-pointing normal (unit length unless stated otherwise)
    pub normal: Vec3,
    /// Signed offset
    pub distance: f32,
}

impl Plane {
    pub const fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given normal (normalized here).
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let n = normal.normalize_or_zero();
        Self { normal: n, distance: -n.dot(point) }
    }

    /// Plane through three points, normal = (b - a) x (c - a).
    ///
    /// Returns `None` for collinear points.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        if normal.length_squared() <= f32::EPSILON * f32::EPSILON {
            return None;
        }
        Some(Self::from_normal_and_point(normal, a))
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self { normal: v.truncate(), distance: v.w }
    }

    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.distance)
    }

    /// Signed distance (scaled by |normal| if the plane is not normalized).
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Unit-normal copy; a zero normal is returned unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.normal.length();
        if len > 0.0 {
            Self { normal: self.normal / len, distance: self.distance / len }
        } else {
            *self
        }
    }

    /// Same plane, opposite inside.
    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, distance: -self.distance }
    }

    /// Express a plane given in the target space of `matrix` in its source space.
    ///
    /// For `matrix` = node-to-world and a world plane, the result is the plane in
    /// node-local space (`M^T * plane`). The result is not normalized; sign tests
    /// stay exact.
    pub fn transformed_by_transpose(&self, matrix: &Mat4) -> Self {
        Self::from_vec4(matrix.transpose() * self.to_vec4())
    }

    /// Line/plane intersection parameter for the segment `a -> b`.
    ///
    /// Returns `t` such that `a + (b - a) * t` lies on the plane, `None` if the
    /// segment is parallel to it.
    pub fn intersect_segment(&self, a: Vec3, b: Vec3) -> Option<f32> {
        let da = self.distance_to_point(a);
        let db = self.distance_to_point(b);
        let denom = da - db;
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        Some(da / denom)
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
