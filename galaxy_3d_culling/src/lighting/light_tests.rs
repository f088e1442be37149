use glam::Vec3;
use crate::culling::{is_aabb_in_planes, ALL_PLANES};
use crate::math::AABB;
use super::*;

// ============================================================================
// Light construction
// ============================================================================

#[test]
fn test_directional_normalizes_direction() {
    let light = Light::directional(Vec3::new(0.0, -2.0, 0.0), Vec3::ONE, 1.0);
    assert_eq!(light.direction, Vec3::NEG_Y);
    assert_eq!(light.light_type, LightType::Directional);
    assert!(!light.is_local());
}

#[test]
fn test_builder_flags() {
    let light = Light::point(Vec3::ZERO, 5.0, Vec3::ONE, 1.0)
        .with_shadows(ShadowType::Soft)
        .with_render_mode(LightRenderMode::Important)
        .with_lightmapping(LightmappingMode::Auto)
        .with_culling_mask(0b11)
        .with_cookie();
    assert!(light.casts_shadows());
    assert_eq!(light.render_mode.sort_bias(), 1000.0);
    assert_eq!(light.lightmapping, LightmappingMode::Auto);
    assert_eq!(light.culling_mask, 0b11);
    assert!(light.has_cookie);
}

#[test]
fn test_render_mode_bias_table() {
    assert_eq!(LightRenderMode::Auto.sort_bias(), 0.0);
    assert_eq!(LightRenderMode::Important.sort_bias(), 1000.0);
    assert_eq!(LightRenderMode::NotImportant.sort_bias(), -1000.0);
}

#[test]
fn test_greyscale_weights() {
    let light = Light::directional(Vec3::NEG_Y, Vec3::new(1.0, 0.0, 0.0), 1.0);
    assert!((light.greyscale() - 0.30).abs() < 1e-6);
    let white = Light::directional(Vec3::NEG_Y, Vec3::ONE, 1.0);
    assert!((white.greyscale() - 1.0).abs() < 1e-6);
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn test_point_bounds() {
    let light = Light::point(Vec3::new(1.0, 2.0, 3.0), 4.0, Vec3::ONE, 1.0);
    assert_eq!(light.bounding_sphere().radius, 4.0);
    assert_eq!(light.world_bounds().extent, Vec3::splat(4.0));
}

#[test]
fn test_spot_sphere_radius() {
    let light = Light::spot(Vec3::ZERO, Vec3::NEG_Z, 10.0, 120.0, Vec3::ONE, 1.0);
    // half angle 60 degrees: 10 / cos(60) = 20
    assert!((light.bounding_sphere().radius - 20.0).abs() < 1e-3);
}

#[test]
fn test_spot_world_bounds_cover_cone() {
    let light = Light::spot(Vec3::ZERO, Vec3::NEG_Z, 10.0, 90.0, Vec3::ONE, 1.0);
    let bounds = light.world_bounds();
    assert!(bounds.contains_point(Vec3::ZERO));
    assert!(bounds.contains_point(Vec3::new(9.9, 0.0, -10.0)));
    assert!(bounds.min().z < -9.9);
    assert!(bounds.max().z > -0.01);
}

#[test]
fn test_spot_world_bounds_far_from_origin() {
    let position = Vec3::new(5000.0, 0.0, 5000.0);
    let light = Light::spot(position, Vec3::NEG_Z, 100.0, 60.0, Vec3::ONE, 1.0);
    let bounds = light.world_bounds();
    let half = 100.0 * 30.0_f32.to_radians().tan();
    assert!((bounds.min().x - (5000.0 - half)).abs() < 0.05);
    assert!((bounds.max().x - (5000.0 + half)).abs() < 0.05);
    assert!((bounds.min().y + half).abs() < 0.05);
    assert!((bounds.min().z - 4900.0).abs() < 0.05);
    assert!((bounds.max().z - 5000.0).abs() < 0.05);
    // Cone edge at the far cap stays inside
    assert!(bounds.contains_point(Vec3::new(5000.0 + half * 0.99, 0.0, 4900.5)));
}

#[test]
fn test_spot_planes_cull_behind_light() {
    let light = Light::spot(Vec3::ZERO, Vec3::NEG_Z, 10.0, 60.0, Vec3::ONE, 1.0);
    let planes = light.spot_planes();
    let ahead = AABB::new(Vec3::new(0.0, 0.0, -5.0), Vec3::splat(0.5));
    let behind = AABB::new(Vec3::new(0.0, 0.0, 5.0), Vec3::splat(0.5));
    let aside = AABB::new(Vec3::new(8.0, 0.0, -2.0), Vec3::splat(0.5));
    assert!(is_aabb_in_planes(&ahead, &planes, ALL_PLANES));
    assert!(!is_aabb_in_planes(&behind, &planes, ALL_PLANES));
    assert!(!is_aabb_in_planes(&aside, &planes, ALL_PLANES));
}

#[test]
fn test_world_to_light_handles_vertical_direction() {
    let light = Light::spot(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, 20.0, 45.0, Vec3::ONE, 1.0);
    let m = light.world_to_light();
    assert!(m.is_finite());
    let below = m.transform_point3(Vec3::ZERO);
    assert!((below.z + 10.0).abs() < 1e-4);
}

// ============================================================================
// Attenuation
// ============================================================================

#[test]
fn test_intensity_at_point() {
    let light = Light::point(Vec3::ZERO, 10.0, Vec3::ONE, 2.0);
    assert!((light.intensity_at_point(Vec3::ZERO) - 2.0).abs() < 1e-5);
    // d/r = 0.2 => 1 / (1 + 25 * 0.04) = 0.5
    assert!((light.intensity_at_point(Vec3::new(2.0, 0.0, 0.0)) - 1.0).abs() < 1e-5);
    assert_eq!(light.intensity_at_point(Vec3::new(11.0, 0.0, 0.0)), 0.0);

    let sun = Light::directional(Vec3::NEG_Y, Vec3::ONE, 0.5);
    assert!((sun.intensity_at_point(Vec3::splat(1e4)) - 0.5).abs() < 1e-5);
}

// ============================================================================
// LightManager
// ============================================================================

#[test]
fn test_light_manager_lifecycle() {
    let mut manager = LightManager::new();
    let sun = manager.add(Light::directional(Vec3::NEG_Y, Vec3::ONE, 1.0));
    let lamp = manager.add(Light::point(Vec3::ZERO, 3.0, Vec3::ONE, 1.0));
    assert_eq!(manager.len(), 2);

    if let Some(light) = manager.get_mut(lamp) {
        light.intensity = 4.0;
    }
    assert_eq!(manager.get(lamp).map(|l| l.intensity), Some(4.0));

    assert!(manager.remove(sun).is_some());
    assert!(manager.get(sun).is_none());
    assert_eq!(manager.iter().count(), 1);
}
