/// Stateless AABB/sphere tests against plane sets.
///
/// Planes are inward: a point is inside when `dot(n, p) + d >= 0`. A box is
/// rejected if `dist + radius < 0` for any active plane, with
/// `radius = dot(extent, |n|)`. Bounds are not sanitized; NaN boxes are kept.

use glam::{Mat4, Vec3};
use crate::math::{AABB, Plane, Sphere};
use super::index_list::IndexList;

/// Max planes of a culling plane set (6 frustum planes + user clip planes)
pub const MAX_CULLING_PLANES: usize = 10;

/// Plane mask with every plane active
pub const ALL_PLANES: u32 = u32::MAX;

#[inline]
fn aabb_outside_plane(aabb: &AABB, plane: &Plane) -> bool {
    let dist = plane.distance_to_point(aabb.center);
    let radius = aabb.extent.dot(plane.normal.abs());
    dist + radius < 0.0
}

/// True unless the box is fully outside one of the active planes.
///
/// Bit `i` of `plane_mask` enables `planes[i]`.
pub fn is_aabb_in_planes(aabb: &AABB, planes: &[Plane], plane_mask: u32) -> bool {
    !planes
        .iter()
        .enumerate()
        .any(|(i, plane)| plane_mask & (1 << i) != 0 && aabb_outside_plane(aabb, plane))
}

/// True unless the sphere is fully outside one of the planes.
pub fn is_sphere_in_planes(sphere: &Sphere, planes: &[Plane]) -> bool {
    planes
        .iter()
        .all(|plane| plane.distance_to_point(sphere.center) >= -sphere.radius)
}

/// Test a node's local box against world planes by moving the planes into
/// node space (`local_to_world^T * plane`).
pub fn is_local_aabb_in_planes(local_aabb: &AABB, local_to_world: &Mat4, planes: &[Plane]) -> bool {
    planes.iter().all(|plane| {
        let local = plane.transformed_by_transpose(local_to_world);
        !aabb_outside_plane(local_aabb, &local)
    })
}

/// 0 when the point is inside every plane, else the depth of the deepest
/// violated plane.
pub fn point_distance_to_frustum(point: Vec3, planes: &[Plane]) -> f32 {
    planes
        .iter()
        .map(|plane| -plane.distance_to_point(point))
        .fold(0.0_f32, f32::max)
}

/// Fill `out` with the indices of every box that passes the plane test.
pub fn frustum_cull(aabbs: &[AABB], planes: &[Plane], plane_mask: u32, out: &mut IndexList) {
    out.reset(aabbs.len());
    for (index, aabb) in aabbs.iter().enumerate() {
        if is_aabb_in_planes(aabb, planes, plane_mask) {
            out.push(index);
        }
    }
}

/// Filter an existing candidate list in place.
pub fn frustum_cull_list(aabbs: &[AABB], planes: &[Plane], plane_mask: u32, list: &mut IndexList) {
    list.retain(|index| is_aabb_in_planes(&aabbs[index], planes, plane_mask));
}

#[cfg(test)]
#[path = "frustum_culler_tests.rs"]
mod tests;
