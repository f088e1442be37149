/// Shadow caster culling volume.
///
/// A caster can only throw a shadow into the (shadow-distance truncated)
/// camera frustum if it lies inside the frustum extruded towards the light.
/// That volume is bounded by the frustum planes facing the light plus planes
/// through the silhouette edges, parallel to the light rays.

use glam::Vec3;
use crate::camera::{PLANE_BOTTOM, PLANE_LEFT, PLANE_RIGHT, PLANE_TOP};
use crate::culling::MAX_CULLING_PLANES;
use crate::engine_debug;
use crate::math::Plane;

/// Planes closer than this to a positional light are degenerate.
pub const LIGHT_PLANE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    /// Direction the light travels
    Directional(Vec3),
    /// Light position
    Positional(Vec3),
}

/// Lateral frustum edges as (near corner, far corner, side plane, side plane).
const LATERAL_EDGES: [(usize, usize, usize, usize); 4] = [
    (0, 4, PLANE_LEFT, PLANE_BOTTOM),
    (3, 7, PLANE_LEFT, PLANE_TOP),
    (1, 5, PLANE_RIGHT, PLANE_BOTTOM),
    (2, 6, PLANE_RIGHT, PLANE_TOP),
];

/// Signed facing of a plane: > 0 when moving towards the light stays inside.
fn facing(plane: &Plane, source: LightSource) -> f32 {
    match source {
        LightSource::Directional(direction) => -plane.normal.dot(direction),
        LightSource::Positional(position) => plane.distance_to_point(position),
    }
}

/// Plane through the edge `a -> b` containing the light ray, oriented so the
/// frustum `centroid` is inside.
fn silhouette_plane(a: Vec3, b: Vec3, centroid: Vec3, source: LightSource) -> Option<Plane> {
    let towards_light = match source {
        LightSource::Directional(direction) => -direction,
        LightSource::Positional(position) => position - a,
    };
    let normal = (b - a).cross(towards_light);
    if normal.length_squared() < 1e-12 {
        return None;
    }
    let plane = Plane::from_normal_and_point(normal.normalize(), a);
    Some(if plane.distance_to_point(centroid) < 0.0 { plane.flipped() } else { plane })
}

/// Build the shadow caster culling planes of a truncated camera frustum.
///
/// `planes` are the six frustum planes and `corners` the eight frustum
/// corners (near bl, br, tr, tl then far). Returns at most
/// `MAX_CULLING_PLANES` planes.
pub fn calculate_shadow_caster_cull(planes: &[Plane; 6], corners: &[Vec3; 8], source: LightSource) -> Vec<Plane> {
    let facings: Vec<f32> = planes.iter().map(|p| facing(p, source)).collect();
    let near_light = |i: usize| {
        matches!(source, LightSource::Positional(_)) && facings[i].abs() < LIGHT_PLANE_EPSILON
    };

    let mut result = Vec::with_capacity(MAX_CULLING_PLANES);
    for (plane, &f) in planes.iter().zip(&facings) {
        if f >= -LIGHT_PLANE_EPSILON {
            result.push(*plane);
        }
    }

    let centroid = corners.iter().copied().sum::<Vec3>() / 8.0;
    for &(near_corner, far_corner, side_a, side_b) in &LATERAL_EDGES {
        if near_light(side_a) || near_light(side_b) {
            continue;
        }
        let a_faces = facings[side_a] >= -LIGHT_PLANE_EPSILON;
        let b_faces = facings[side_b] >= -LIGHT_PLANE_EPSILON;
        if a_faces == b_faces {
            continue;
        }
        if result.len() >= MAX_CULLING_PLANES {
            engine_debug!("galaxy3d::ShadowCuller", "Shadow caster cull truncated to {} planes", MAX_CULLING_PLANES);
            return result;
        }
        if let Some(plane) = silhouette_plane(corners[near_corner], corners[far_corner], centroid, source) {
            result.push(plane);
        }
    }
    result
}

#[cfg(test)]
#[path = "caster_cull_planes_tests.rs"]
mod tests;
