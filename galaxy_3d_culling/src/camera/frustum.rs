/// Frustum: six inward clipping planes extracted from a view-projection matrix.
///
/// A point P is inside if `plane.distance_to_point(P) >= 0` for all planes.
/// Extraction assumes the [0, 1] clip-depth convention used by glam's
/// `perspective_rh` / `orthographic_rh`.

use glam::{Mat4, Vec3, Vec4};
use crate::math::{AABB, Plane};

/// Result of a 3-way frustum/AABB classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB straddles at least one plane
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// NDC corners in the order near bl, br, tr, tl, far bl, br, tr, tl.
const NDC_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Six frustum planes (left, right, bottom, top, near, far), normalized.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract planes from a view-projection matrix (Gribb & Hartmann).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let raw: [Vec4; 6] = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            row2,        // near (z_clip >= 0)
            row3 - row2, // far
        ];

        let mut planes = [Plane::new(Vec3::ZERO, 0.0); 6];
        for (plane, v) in planes.iter_mut().zip(raw.iter()) {
            *plane = Plane::from_vec4(*v).normalized();
        }
        Self { planes }
    }

    /// World-space corners of the frustum (near bl, br, tr, tl, far bl, br, tr, tl).
    pub fn corners(view_projection: &Mat4) -> [Vec3; 8] {
        let inverse = view_projection.inverse();
        let mut corners = [Vec3::ZERO; 8];
        for (corner, ndc) in corners.iter_mut().zip(NDC_CORNERS.iter()) {
            *corner = inverse.project_point3(*ndc);
        }
        corners
    }

    /// Conservative AABB test: false only if the box is fully outside a plane.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let dist = plane.distance_to_point(aabb.center);
            let radius = aabb.extent.dot(plane.normal.abs());
            dist + radius >= 0.0
        })
    }

    /// Classify an AABB against the frustum (3-way test).
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;
        for plane in &self.planes {
            let dist = plane.distance_to_point(aabb.center);
            let radius = aabb.extent.dot(plane.normal.abs());
            if dist + radius < 0.0 {
                return FrustumTest::Outside;
            }
            if dist - radius < 0.0 {
                all_inside = false;
            }
        }
        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
