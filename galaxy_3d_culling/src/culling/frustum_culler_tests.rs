use glam::{Mat4, Vec3};
use crate::camera::Frustum;
use crate::math::{AABB, Plane, Sphere};
use super::*;

/// Box [-10, 10]^3 as 6 inward planes.
fn box_planes() -> Vec<Plane> {
    vec![
        Plane::new(Vec3::X, 10.0),
        Plane::new(-Vec3::X, 10.0),
        Plane::new(Vec3::Y, 10.0),
        Plane::new(-Vec3::Y, 10.0),
        Plane::new(Vec3::Z, 10.0),
        Plane::new(-Vec3::Z, 10.0),
    ]
}

fn sample_boxes() -> Vec<AABB> {
    vec![
        AABB::new(Vec3::ZERO, Vec3::ONE),                   // inside
        AABB::new(Vec3::new(50.0, 0.0, 0.0), Vec3::ONE),    // outside +X
        AABB::new(Vec3::new(10.5, 0.0, 0.0), Vec3::ONE),    // straddling
        AABB::new(Vec3::new(0.0, -30.0, 0.0), Vec3::ONE),   // outside -Y
        AABB::new(Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO),    // point inside
    ]
}

// ============================================================================
// Plane tests
// ============================================================================

#[test]
fn test_frustum_cull_keeps_inside_and_straddling() {
    let mut out = IndexList::default();
    frustum_cull(&sample_boxes(), &box_planes(), ALL_PLANES, &mut out);
    assert_eq!(out.as_slice(), &[0, 2, 4]);
}

#[test]
fn test_frustum_cull_is_idempotent() {
    let mut first = IndexList::default();
    let mut second = IndexList::default();
    frustum_cull(&sample_boxes(), &box_planes(), ALL_PLANES, &mut first);
    frustum_cull(&sample_boxes(), &box_planes(), ALL_PLANES, &mut second);
    assert_eq!(first.as_slice(), second.as_slice());
}

#[test]
fn test_frustum_cull_empty_input() {
    let mut out = IndexList::from_range(3);
    frustum_cull(&[], &box_planes(), ALL_PLANES, &mut out);
    assert_eq!(out.size(), 0);
}

#[test]
fn test_plane_mask_disables_planes() {
    let planes = box_planes();
    let beyond_x = AABB::new(Vec3::new(50.0, 0.0, 0.0), Vec3::ONE);
    // plane 1 is the -X facing (x <= 10) plane
    assert!(!is_aabb_in_planes(&beyond_x, &planes, ALL_PLANES));
    assert!(is_aabb_in_planes(&beyond_x, &planes, ALL_PLANES & !(1 << 1)));
}

#[test]
fn test_frustum_cull_list_filters_subset() {
    let mut list = IndexList::default();
    list.assign(&[1, 3, 4]);
    frustum_cull_list(&sample_boxes(), &box_planes(), ALL_PLANES, &mut list);
    assert_eq!(list.as_slice(), &[4]);
}

#[test]
fn test_sphere_in_planes() {
    let planes = box_planes();
    assert!(is_sphere_in_planes(&Sphere::new(Vec3::new(11.0, 0.0, 0.0), 2.0), &planes));
    assert!(!is_sphere_in_planes(&Sphere::new(Vec3::new(13.0, 0.0, 0.0), 2.0), &planes));
}

// ============================================================================
// Distance outside frustum
// ============================================================================

#[test]
fn test_point_distance_inside_is_zero() {
    let planes = box_planes();
    for aabb in sample_boxes().iter().filter(|b| b.extent == Vec3::ZERO || b.center == Vec3::ZERO) {
        assert_eq!(point_distance_to_frustum(aabb.center, &planes), 0.0);
    }
}

#[test]
fn test_point_distance_is_deepest_violation() {
    let planes = box_planes();
    let d = point_distance_to_frustum(Vec3::new(15.0, -40.0, 0.0), &planes);
    assert!((d - 30.0).abs() < 1e-5);
}

// ============================================================================
// Local-space test
// ============================================================================

#[test]
fn test_local_aabb_against_world_planes() {
    let planes = box_planes();
    let local = AABB::new(Vec3::ZERO, Vec3::ONE);
    let inside = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
    let outside = Mat4::from_translation(Vec3::new(25.0, 0.0, 0.0));
    let scaled_in = Mat4::from_translation(Vec3::new(25.0, 0.0, 0.0)) * Mat4::from_scale(Vec3::splat(20.0));
    assert!(is_local_aabb_in_planes(&local, &inside, &planes));
    assert!(!is_local_aabb_in_planes(&local, &outside, &planes));
    assert!(is_local_aabb_in_planes(&local, &scaled_in, &planes));
}

#[test]
fn test_camera_frustum_planes_work_with_culler() {
    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
    let proj = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&(proj * view));
    let ahead = AABB::new(Vec3::new(0.0, 0.0, -20.0), Vec3::ONE);
    let behind = AABB::new(Vec3::new(0.0, 0.0, 20.0), Vec3::ONE);
    assert!(is_aabb_in_planes(&ahead, &frustum.planes, ALL_PLANES));
    assert!(!is_aabb_in_planes(&behind, &frustum.planes, ALL_PLANES));
}
