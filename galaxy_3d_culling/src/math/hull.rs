/// Convex polytope clipped by planes.
///
/// Used to intersect a camera frustum slice with scene bounds before fitting
/// a directional shadow projection around it. Faces are kept as vertex loops;
/// only the vertex set matters to callers, but loops must stay ordered for the
/// next clip to be correct.

use glam::Vec3;
use super::aabb::AABB;
use super::plane::Plane;

/// Frustum corner layout shared with `Frustum::corners`:
/// near bl, br, tr, tl then far bl, br, tr, tl.
const FRUSTUM_FACES: [[usize; 4]; 6] = [
    [0, 3, 7, 4], // left
    [1, 5, 6, 2], // right
    [0, 4, 5, 1], // bottom
    [3, 2, 6, 7], // top
    [0, 1, 2, 3], // near
    [4, 7, 6, 5], // far
];

/// Points closer than this are merged on cap faces
const WELD_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Default)]
pub struct ConvexHull {
    faces: Vec<Vec<Vec3>>,
}

impl ConvexHull {
    /// Hull of a frustum (or frustum slice) given its 8 corners.
    pub fn from_frustum_corners(corners: &[Vec3; 8]) -> Self {
        let faces = FRUSTUM_FACES.iter()
            .map(|face| face.iter().map(|&i| corners[i]).collect())
            .collect();
        Self { faces }
    }

    /// Hull of a box.
    pub fn from_aabb(aabb: &AABB) -> Self {
        // AABB::corners uses bit order; remap to the frustum layout.
        let c = aabb.corners();
        Self::from_frustum_corners(&[c[0], c[1], c[3], c[2], c[4], c[5], c[7], c[6]])
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn faces(&self) -> &[Vec<Vec3>] {
        &self.faces
    }

    /// Keep the part of the hull on the inside of `plane`.
    pub fn clip(&mut self, plane: &Plane) {
        let mut faces = Vec::with_capacity(self.faces.len() + 1);
        let mut cap = Vec::new();

        for face in &self.faces {
            let mut clipped = Vec::with_capacity(face.len() + 1);
            for i in 0..face.len() {
                let a = face[i];
                let b = face[(i + 1) % face.len()];
                let da = plane.distance_to_point(a);
                let db = plane.distance_to_point(b);
                if da >= 0.0 {
                    clipped.push(a);
                }
                if (da >= 0.0) != (db >= 0.0) {
                    let p = a + (b - a) * (da / (da - db));
                    clipped.push(p);
                    cap.push(p);
                }
            }
            if clipped.len() >= 3 {
                faces.push(clipped);
            }
        }

        if let Some(cap_face) = Self::order_cap(cap, plane.normal) {
            faces.push(cap_face);
        }
        self.faces = faces;
    }

    /// Clip by the 6 faces of a box.
    pub fn clip_by_aabb(&mut self, aabb: &AABB) {
        let (min, max) = (aabb.min(), aabb.max());
        let planes = [
            Plane::new(Vec3::X, -min.x),
            Plane::new(-Vec3::X, max.x),
            Plane::new(Vec3::Y, -min.y),
            Plane::new(-Vec3::Y, max.y),
            Plane::new(Vec3::Z, -min.z),
            Plane::new(-Vec3::Z, max.z),
        ];
        for plane in &planes {
            if self.is_empty() {
                return;
            }
            self.clip(plane);
        }
    }

    /// All face vertices (shared vertices appear once per face).
    pub fn vertices(&self) -> Vec<Vec3> {
        self.faces.iter().flatten().copied().collect()
    }

    /// Sort cap points by angle around their centroid in the clip plane.
    fn order_cap(mut points: Vec<Vec3>, normal: Vec3) -> Option<Vec<Vec3>> {
        if points.len() < 3 {
            return None;
        }
        let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let u = normal.any_orthonormal_vector();
        let v = normal.normalize_or_zero().cross(u);
        points.sort_by(|a, b| {
            let da = *a - centroid;
            let db = *b - centroid;
            let angle_a = da.dot(v).atan2(da.dot(u));
            let angle_b = db.dot(v).atan2(db.dot(u));
            angle_a.total_cmp(&angle_b)
        });
        // Every crossing edge is shared by two faces: duplicates are now adjacent.
        points.dedup_by(|a, b| a.distance_squared(*b) <= WELD_EPSILON * WELD_EPSILON);
        if points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) <= WELD_EPSILON * WELD_EPSILON {
            points.pop();
        }
        (points.len() >= 3).then_some(points)
    }
}

/// Six inward planes of a frustum-shaped volume from its 8 corners.
///
/// Order matches the camera plane indices (left, right, bottom, top, near, far).
/// Returns `None` if any face is degenerate.
pub fn hull_planes_from_corners(corners: &[Vec3; 8]) -> Option<[Plane; 6]> {
    let centroid = corners.iter().copied().sum::<Vec3>() / 8.0;
    let mut planes = [Plane::new(Vec3::ZERO, 0.0); 6];
    for (plane, face) in planes.iter_mut().zip(FRUSTUM_FACES.iter()) {
        let candidate = Plane::from_points(corners[face[0]], corners[face[1]], corners[face[2]])
            .or_else(|| Plane::from_points(corners[face[0]], corners[face[2]], corners[face[3]]))?;
        *plane = if candidate.distance_to_point(centroid) < 0.0 { candidate.flipped() } else { candidate };
    }
    Some(planes)
}

#[cfg(test)]
#[path = "hull_tests.rs"]
mod tests;
