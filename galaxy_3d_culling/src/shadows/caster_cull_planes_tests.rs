use glam::{Mat4, Vec3};
use crate::camera::Frustum;
use crate::culling::{is_aabb_in_planes, ALL_PLANES};
use crate::math::AABB;
use super::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Frustum at the origin looking down +Z, 90 degree fov, near 1, far 100.
fn frustum() -> ([Plane; 6], [Vec3; 8]) {
    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::Z, Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0);
    let vp = proj * view;
    (Frustum::from_view_projection(&vp).planes, Frustum::corners(&vp))
}

fn assert_encloses_frustum(planes: &[Plane], corners: &[Vec3; 8]) {
    for plane in planes {
        for corner in corners {
            assert!(
                plane.distance_to_point(*corner) > -1e-2,
                "corner {corner:?} outside plane {plane:?}"
            );
        }
    }
}

fn unit_box(center: Vec3) -> AABB {
    AABB::new(center, Vec3::ONE)
}

// ============================================================================
// Directional lights
// ============================================================================

#[test]
fn test_directional_from_above() {
    let (planes, corners) = frustum();
    let result = calculate_shadow_caster_cull(&planes, &corners, LightSource::Directional(Vec3::NEG_Y));

    // Top plane dropped, two silhouette planes added on the top edges
    assert_eq!(result.len(), 7);
    assert_encloses_frustum(&result, &corners);

    // Above the frustum: can shadow it
    assert!(is_aabb_in_planes(&unit_box(Vec3::new(0.0, 60.0, 30.0)), &result, ALL_PLANES));
    // Below the frustum: cannot
    assert!(!is_aabb_in_planes(&unit_box(Vec3::new(0.0, -60.0, 30.0)), &result, ALL_PLANES));
    // Above but far to the side of the frustum
    assert!(!is_aabb_in_planes(&unit_box(Vec3::new(200.0, 60.0, 30.0)), &result, ALL_PLANES));
}

#[test]
fn test_directional_along_view() {
    let (planes, corners) = frustum();
    let result = calculate_shadow_caster_cull(&planes, &corners, LightSource::Directional(Vec3::Z));

    assert!(result.len() <= MAX_CULLING_PLANES);
    assert_encloses_frustum(&result, &corners);
    // Behind the camera, in line with the frustum
    assert!(is_aabb_in_planes(&unit_box(Vec3::new(0.0, 0.0, -20.0)), &result, ALL_PLANES));
    // Beyond the far plane
    assert!(!is_aabb_in_planes(&unit_box(Vec3::new(0.0, 0.0, 150.0)), &result, ALL_PLANES));
}

#[test]
fn test_diagonal_light_stays_within_limit() {
    let (planes, corners) = frustum();
    let direction = Vec3::new(0.7, -0.5, 0.3).normalize();
    let result = calculate_shadow_caster_cull(&planes, &corners, LightSource::Directional(direction));
    assert!(result.len() <= MAX_CULLING_PLANES);
    assert_encloses_frustum(&result, &corners);
}

// ============================================================================
// Positional lights
// ============================================================================

#[test]
fn test_positional_inside_keeps_frustum() {
    let (planes, corners) = frustum();
    let result = calculate_shadow_caster_cull(&planes, &corners, LightSource::Positional(Vec3::new(0.0, 0.0, 10.0)));
    assert_eq!(result.len(), 6);
    assert_encloses_frustum(&result, &corners);
}

#[test]
fn test_positional_above_frustum() {
    let (planes, corners) = frustum();
    let light = Vec3::new(0.0, 80.0, 30.0);
    let result = calculate_shadow_caster_cull(&planes, &corners, LightSource::Positional(light));
    assert_encloses_frustum(&result, &corners);
    // Between the light and the frustum
    assert!(is_aabb_in_planes(&unit_box(Vec3::new(0.0, 50.0, 30.0)), &result, ALL_PLANES));
    // Under the frustum
    assert!(!is_aabb_in_planes(&unit_box(Vec3::new(0.0, -60.0, 30.0)), &result, ALL_PLANES));
}

#[test]
fn test_positional_on_plane_skips_edges() {
    let (planes, corners) = frustum();
    // On the left plane (x = -z)
    let result = calculate_shadow_caster_cull(&planes, &corners, LightSource::Positional(Vec3::new(-5.0, 0.0, 5.0)));
    assert_eq!(result.len(), 6);
}
