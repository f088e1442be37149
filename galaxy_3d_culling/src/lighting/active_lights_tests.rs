use glam::Vec3;
use crate::lighting::{Light, LightKey};
use super::*;

fn active(light: Light, offscreen: bool) -> ActiveLight {
    let mut active = ActiveLight::new(LightKey::default(), light);
    active.is_offscreen_vertex_light = offscreen;
    active
}

fn sample() -> ActiveLights {
    ActiveLights {
        lights: vec![
            active(Light::directional(Vec3::NEG_Y, Vec3::ONE, 1.0), false),
            active(Light::spot(Vec3::ZERO, Vec3::Z, 5.0, 30.0, Vec3::ONE, 1.0), false),
            active(Light::point(Vec3::ZERO, 5.0, Vec3::ONE, 1.0), false),
            active(Light::point(Vec3::ZERO, 5.0, Vec3::ONE, 1.0), false),
            active(Light::point(Vec3::ZERO, 5.0, Vec3::ONE, 1.0), true),
        ],
        num_dir_lights: 1,
        num_spot_lights: 1,
        num_point_lights: 2,
        num_off_screen_spot_lights: 0,
        num_off_screen_point_lights: 1,
        has_main_light: true,
    }
}

#[test]
fn test_bucket_ranges() {
    let lights = sample();
    assert_eq!(lights.buckets(), [0..1, 1..2, 2..4, 4..4, 4..5]);
    assert_eq!(lights.directional_range(), 0..1);
    assert_eq!(lights.local_range(), 1..5);
    assert!(lights.is_consistent());
    assert!(lights.main_light().is_some());
}

#[test]
fn test_count_mismatch_is_inconsistent() {
    let mut lights = sample();
    lights.num_point_lights = 1;
    assert!(!lights.is_consistent());
}

#[test]
fn test_wrong_bucket_type_is_inconsistent() {
    let mut lights = sample();
    lights.lights.swap(1, 2);
    assert!(!lights.is_consistent());
}

#[test]
fn test_main_light_must_be_directional() {
    let mut lights = sample();
    lights.lights.remove(0);
    lights.num_dir_lights = 0;
    assert!(!lights.is_consistent());
}

#[test]
fn test_new_active_light_defaults() {
    let light = active(Light::point(Vec3::ONE, 2.0, Vec3::ONE, 1.0), false);
    assert!(light.is_visible_in_prepass);
    assert_eq!(light.visibility_fade, 1.0);
    assert_eq!(light.bounding_sphere.radius, 2.0);
    assert_eq!(light.screen_rect, ScreenRect::FULL);
}
